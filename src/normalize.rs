// WHY: every offset the pager hands out is a character offset into this text,
// so normalization and the char/byte index live together

/// Collapse every whitespace run to a single space and trim both ends
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_into(text, &mut result);
    result
}

/// Normalize into supplied buffer to avoid allocation
pub fn normalize_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    // Starting "true" drops leading whitespace without a second pass
    let mut prev_was_space = true;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
        } else {
            buffer.push(ch);
            prev_was_space = false;
        }
    }

    // At most one trailing space can survive the loop
    if buffer.ends_with(' ') {
        buffer.pop();
    }
}

/// Whitespace-normalized text addressed by character offset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    text: String,
    /// Byte offset of each char plus a trailing `text.len()`; empty for ASCII text
    char_starts: Vec<usize>,
    char_len: usize,
}

impl NormalizedText {
    /// Normalize raw content
    pub fn new(raw: &str) -> Self {
        Self::from_normalized(normalize(raw))
    }

    fn from_normalized(text: String) -> Self {
        // WHY: ASCII text has identical byte and char offsets, no index needed
        if text.is_ascii() {
            let char_len = text.len();
            return Self { text, char_starts: Vec::new(), char_len };
        }

        let mut char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let char_len = char_starts.len();
        char_starts.push(text.len());
        Self { text, char_starts, char_len }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of a character offset, clamped to the end of the text
    pub fn byte_offset(&self, char_pos: usize) -> usize {
        let char_pos = char_pos.min(self.char_len);
        if self.char_starts.is_empty() {
            char_pos
        } else {
            self.char_starts[char_pos]
        }
    }

    /// Character offset of a byte offset on a char boundary
    pub fn char_offset(&self, byte_pos: usize) -> usize {
        if self.char_starts.is_empty() {
            byte_pos.min(self.char_len)
        } else {
            self.char_starts.partition_point(|&start| start < byte_pos)
        }
    }

    /// Slice by character range, clamped to the text
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end).max(start_byte);
        &self.text[start_byte..end_byte]
    }

    /// Literal find of `needle` at or after the character offset `from`
    pub fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        let from_byte = self.byte_offset(from);
        self.text[from_byte..]
            .find(needle)
            .map(|found| self.char_offset(from_byte + found))
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
