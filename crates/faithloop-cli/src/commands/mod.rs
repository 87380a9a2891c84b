//! Command implementations.

pub mod checkin;
pub mod demo;
pub mod extract;
pub mod list;
pub mod report;

pub use self::checkin::execute_checkin;
pub use self::demo::execute_demo;
pub use self::extract::execute_extract;
pub use self::list::execute_list;
pub use self::report::execute_report;

use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Resolve text given inline, from a file, or from stdin (`-`).
pub(crate) fn read_text(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    let raw = match (text, file) {
        (_, Some(path)) => fs::read_to_string(path)?,
        (Some("-"), None) => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (Some(text), None) => text.to_string(),
        (None, None) => return Err(CliError::InvalidInput("No text provided".to_string())),
    };

    if raw.trim().is_empty() {
        return Err(CliError::InvalidInput("Text is empty".to_string()));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_text_inline() {
        assert_eq!(read_text(Some("- 기도"), None).unwrap(), "- 기도");
    }

    #[test]
    fn test_read_text_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1) 감사").unwrap();
        writeln!(file, "- 가족").unwrap();
        let text = read_text(None, Some(file.path())).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_read_text_rejects_blank() {
        assert!(matches!(
            read_text(Some("  \n "), None),
            Err(CliError::InvalidInput(_))
        ));
        assert!(read_text(None, None).is_err());
    }
}
