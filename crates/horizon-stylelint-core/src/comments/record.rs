//! Comment records produced by the scanner.

use crate::source::Span;

/// Which comment syntax a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// ...` running to the end of the line.
    DoubleSlash,
    /// `/* ... */`, only reported when requested through `ScanOptions`.
    Block,
}

/// A comment found in raw source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// Comment syntax.
    pub kind: CommentKind,
    /// Byte span of the whole comment, markers included.
    ///
    /// For `//` comments the span stops before the line break (and before a
    /// `\r` of a CRLF pair).
    pub span: Span,
    /// Body with markers stripped and surrounding whitespace trimmed.
    pub text: String,
    /// Code precedes the comment on its line.
    pub inline_before: bool,
    /// Code follows the comment on its line. Never set for `//` comments.
    pub inline_after: bool,
}

impl CommentRecord {
    /// Whether the comment shares its line with code on either side.
    pub fn is_inline(&self) -> bool {
        self.inline_before || self.inline_after
    }

    /// Whether the comment sits alone on its line(s).
    pub fn is_standalone(&self) -> bool {
        !self.is_inline()
    }
}
