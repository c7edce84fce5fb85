//! Line and column lookup for diagnostic rendering.

/// Pre-computed line offset table for O(log L) line/column lookup.
///
/// ```
/// use zeus_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "a : s32\nb := a";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 13), (2, 6));
/// assert_eq!(table.line_text(source, 2), "b := a");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column). Columns count characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col_text = source.get(line_start..end).unwrap_or("");
        let col = u32::try_from(col_text.chars().count()).unwrap_or(u32::MAX - 1) + 1;
        (line, col)
    }

    /// Byte offset of a line start (1-based line number).
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a 1-based line without its terminator. Empty when out of range.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> &'s str {
        let Some(start) = self.line_start_offset(line) else {
            return "";
        };
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize);
        source
            .get(start as usize..end)
            .unwrap_or("")
            .trim_end_matches(['\n', '\r'])
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let table = LineOffsetTable::build("x := 1");
        assert_eq!(table.line_count(), 1);
        assert_eq!(table.line_from_offset(5), 1);
        assert_eq!(table.line_start_offset(2), None);
    }

    #[test]
    fn test_multiple_lines() {
        let source = "a\nbc\n\nd";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_count(), 4);
        assert_eq!(table.line_from_offset(1), 1); // the '\n' belongs to line 1
        assert_eq!(table.line_from_offset(2), 2);
        assert_eq!(table.line_from_offset(5), 3);
        assert_eq!(table.offset_to_line_col(source, 3), (2, 2));
        assert_eq!(table.offset_to_line_col(source, 6), (4, 1));
    }

    #[test]
    fn test_line_text_strips_terminators() {
        let source = "first\r\nsecond\n";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_text(source, 1), "first");
        assert_eq!(table.line_text(source, 2), "second");
        assert_eq!(table.line_text(source, 3), "");
        assert_eq!(table.line_text(source, 9), "");
    }

    #[test]
    fn test_empty_source() {
        let table = LineOffsetTable::build("");
        assert_eq!(table.offset_to_line_col("", 0), (1, 1));
        assert_eq!(table.line_start_offset(0), None);
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        let source = "ab";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.offset_to_line_col(source, 10), (1, 3));
    }
}
