use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A region of one source file.
///
/// Lines and columns count from 1. Columns are byte columns and `end_col`
/// is inclusive: the single-character token `=` at column 10 has
/// `start_col == end_col == 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "line")]
    pub start_line: u32,
    #[serde(rename = "column")]
    pub start_col: u32,
    pub end_line: u32,
    #[serde(rename = "end_column")]
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A zero-width span at one position.
    pub fn point(line: u32, col: u32) -> Self {
        Self::new(line, col, line, col)
    }

    /// The smallest span covering both `self` and `other`, in either order.
    pub fn to(self, other: Span) -> Span {
        let (start_line, start_col) =
            (self.start_line, self.start_col).min((other.start_line, other.start_col));
        let (end_line, end_col) =
            (self.end_line, self.end_col).max((other.end_line, other.end_col));
        Span::new(start_line, start_col, end_line, end_col)
    }

    /// `true` when `next` starts on the column right after `self` ends,
    /// with no whitespace in between.
    pub fn is_adjacent_to(self, next: Span) -> bool {
        self.end_line == next.start_line && self.end_col + 1 == next.start_col
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// A named source text, indexed by line for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Byte range of each line, without its terminator.
    lines: Vec<Range<usize>>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let mut lines = Vec::new();
        let mut start = 0;
        for segment in source.split_inclusive('\n') {
            let body = segment.trim_end_matches('\n').trim_end_matches('\r');
            lines.push(start..start + body.len());
            start += segment.len();
        }
        // A trailing newline (or an empty file) still opens a final, empty line.
        if source.is_empty() || source.ends_with('\n') {
            lines.push(start..start);
        }
        Self {
            name: name.into(),
            source,
            lines,
        }
    }

    /// The text of a 1-based line, or `None` past either end of the file.
    pub fn line(&self, number: u32) -> Option<&str> {
        let index = (number as usize).checked_sub(1)?;
        let range = self.lines.get(index)?;
        self.source.get(range.clone())
    }

    /// The source text under a single-line span.
    ///
    /// `None` for multi-line spans and spans that fall outside the line or
    /// off a character boundary.
    pub fn snippet(&self, span: Span) -> Option<&str> {
        if span.start_line != span.end_line || span.end_col < span.start_col {
            return None;
        }
        let line = self.line(span.start_line)?;
        let start = (span.start_col as usize).checked_sub(1)?;
        let end = (span.end_col as usize).min(line.len());
        line.get(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_is_zero_width() {
        assert_eq!(Span::point(4, 9), Span::new(4, 9, 4, 9));
    }

    #[test]
    fn test_to_covers_both_in_any_order() {
        let eq = Span::new(1, 10, 1, 10);
        let value = Span::new(1, 12, 1, 19);
        assert_eq!(eq.to(value), Span::new(1, 10, 1, 19));
        assert_eq!(value.to(eq), Span::new(1, 10, 1, 19));
        assert_eq!(
            Span::new(1, 5, 1, 10).to(Span::new(2, 3, 2, 8)),
            Span::new(1, 5, 2, 8)
        );
    }

    #[test]
    fn test_adjacency() {
        let minus = Span::new(1, 4, 1, 4);
        assert!(minus.is_adjacent_to(Span::new(1, 5, 1, 6)));
        assert!(!minus.is_adjacent_to(Span::new(1, 6, 1, 7)));
        assert!(!minus.is_adjacent_to(Span::new(2, 5, 2, 6)));
    }

    #[test]
    fn test_display_is_line_colon_column() {
        assert_eq!(Span::new(3, 7, 3, 15).to_string(), "3:7");
    }

    #[test]
    fn test_lines() {
        let src = SourceFile::new("a.gconf", "global a = 1\r\nglobal b = 2\n\n% end");
        assert_eq!(src.line(1), Some("global a = 1"));
        assert_eq!(src.line(2), Some("global b = 2"));
        assert_eq!(src.line(3), Some(""));
        assert_eq!(src.line(4), Some("% end"));
        assert_eq!(src.line(0), None);
        assert_eq!(src.line(5), None);
    }

    #[test]
    fn test_trailing_newline_and_empty_source() {
        let src = SourceFile::new("a.gconf", "global a = 1\n");
        assert_eq!(src.line(2), Some(""));
        assert_eq!(src.line(3), None);

        let empty = SourceFile::new("a.gconf", "");
        assert_eq!(empty.line(1), Some(""));
        assert_eq!(empty.line(2), None);
    }

    #[test]
    fn test_snippet() {
        let src = SourceFile::new("a.gconf", "global x = ${1 + 2}\nglobal y = 3");
        assert_eq!(src.snippet(Span::new(1, 12, 1, 19)), Some("${1 + 2}"));
        assert_eq!(src.snippet(Span::new(2, 8, 2, 8)), Some("y"));
        assert_eq!(src.snippet(Span::new(1, 1, 2, 3)), None);
    }
}
