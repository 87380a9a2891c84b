//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::read_text;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, formatter: &Formatter) -> Result<()> {
    let content = read_text(args.text.as_deref(), args.file.as_deref())?;
    let fields = faithloop_extractor::extract(&content);
    println!("{}", formatter.format_fields(&fields)?);
    Ok(())
}
