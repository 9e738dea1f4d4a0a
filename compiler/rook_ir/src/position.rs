//! Source positions.

use crate::{Name, StringInterner};
use std::fmt;

/// Where a node came from: file, 1-based line and column.
///
/// Breakpoints are keyed on `file:line`, so the column only shows up in
/// error locations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    pub file: Name,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Position for synthesized nodes with no source.
    pub const UNKNOWN: Position = Position {
        file: Name::EMPTY,
        line: 0,
        column: 0,
    };

    #[inline]
    pub const fn new(file: Name, line: u32, column: u32) -> Self {
        Position { file, line, column }
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.line == 0
    }

    /// Render as `file:line:column` using the interner that owns `file`.
    pub fn display(self, interner: &StringInterner) -> String {
        format!("{}:{}:{}", interner.lookup(self.file), self.line, self.column)
    }

    /// Render as `file:line`, the breakpoint key format.
    pub fn line_key(self, interner: &StringInterner) -> String {
        format!("{}:{}", interner.lookup(self.file), self.line)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}:{}", self.file, self.line, self.column)
    }
}
