//! Byte offset to line/column conversion.

use super::Position;

/// Precomputed newline table for a source text.
///
/// Built once per parse; turning a byte offset into a full [`Position`] is
/// then a binary search plus a character count within the line. CRLF line
/// endings work unchanged since only `\n` terminates a line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset at which each line starts. `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    text_len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            text_len: text.len(),
        }
    }

    /// 1-based line number containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// Full position for a byte offset. `text` must be the indexed source.
    ///
    /// Columns are 1-based and count characters, so multi-byte code points
    /// advance the column by one.
    pub fn position(&self, text: &str, offset: usize) -> Position {
        let offset = offset.min(self.text_len);
        let line = self.line(offset);
        let line_start = self.line_starts[line - 1];
        let column = text[line_start..offset].chars().count() + 1;
        Position::new(offset, line, column)
    }
}
