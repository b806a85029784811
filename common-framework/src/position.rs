/// Represents a location in the source text.
///
/// Tokens only carry byte offsets; a `Position` is computed from the input
/// when a diagnostic needs a line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number in characters (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Computes the line and column of byte `offset` in `input`.
    ///
    /// Offsets past the end are clamped to the end of the input. Invalid
    /// UTF-8 sequences count one column each.
    pub fn locate(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
        let column = 1 + String::from_utf8_lossy(&before[line_start..]).chars().count();
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_new() {
        let pos = Position::new();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_position_default() {
        assert_eq!(Position::default(), Position::new());
    }

    #[test]
    fn test_locate_first_line() {
        assert_eq!(Position::locate(b"hello", 3), Position::at(1, 4, 3));
    }

    #[test]
    fn test_locate_after_newlines() {
        let input = b"a\nbc\nd";
        assert_eq!(Position::locate(input, 0), Position::at(1, 1, 0));
        assert_eq!(Position::locate(input, 2), Position::at(2, 1, 2));
        assert_eq!(Position::locate(input, 3), Position::at(2, 2, 3));
        assert_eq!(Position::locate(input, 5), Position::at(3, 1, 5));
    }

    #[test]
    fn test_locate_counts_characters() {
        let input = "\u{4f60}\u{597d}x".as_bytes();
        assert_eq!(Position::locate(input, 6), Position::at(1, 3, 6));
    }

    #[test]
    fn test_locate_clamps() {
        assert_eq!(Position::locate(b"ab", 10), Position::at(1, 3, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::at(3, 7, 20).to_string(), "3:7");
    }
}
