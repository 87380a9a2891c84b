//! Paragraph chunking for `memory_chunks`

/// Default maximum chunk size (characters)
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 1_000;

/// Splits entry text into paragraph-aligned chunks
///
/// Paragraphs (separated by blank lines) are packed together until the next
/// one would exceed the limit. A single paragraph longer than the limit is cut
/// on character boundaries.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_chunk_chars: usize,
}

impl TextChunker {
    /// Create a chunker with the given character limit
    pub fn new(max_chunk_chars: usize) -> Self {
        Self {
            max_chunk_chars: max_chunk_chars.max(1),
        }
    }

    /// Chunk the given text; blank input yields no chunks
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        if text.chars().count() <= self.max_chunk_chars {
            return vec![text.to_string()];
        }

        let normalized = text.replace("\r\n", "\n");
        let paragraphs = normalized
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty());

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for paragraph in paragraphs {
            let len = paragraph.chars().count();
            let separator = if current.is_empty() { 0 } else { 2 };

            if current_len + separator + len > self.max_chunk_chars {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if len > self.max_chunk_chars {
                    chunks.extend(self.split_at_char_limit(paragraph));
                    continue;
                }
            } else if separator > 0 {
                current.push_str("\n\n");
                current_len += 2;
            }

            current.push_str(paragraph);
            current_len += len;
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }

    fn split_at_char_limit(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.max_chunk_chars)
            .map(|c| c.iter().collect())
            .collect()
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunker = TextChunker::new(100);
        assert_eq!(chunker.chunk("  Short text here.  "), vec!["Short text here."]);
    }

    #[test]
    fn test_blank_text_no_chunks() {
        assert!(TextChunker::default().chunk(" \n\n ").is_empty());
    }

    #[test]
    fn test_paragraphs_packed_until_limit() {
        let chunker = TextChunker::new(30);
        let text = "First paragraph.\n\nSecond one.\n\nThird paragraph here.";
        let chunks = chunker.chunk(text);
        assert_eq!(chunks, vec!["First paragraph.\n\nSecond one.", "Third paragraph here."]);
    }

    #[test]
    fn test_long_paragraph_split_on_char_boundaries() {
        let chunker = TextChunker::new(4);
        let chunks = chunker.chunk("감사합니다오늘도");
        assert_eq!(chunks, vec!["감사합니", "다오늘도"]);
    }
}
