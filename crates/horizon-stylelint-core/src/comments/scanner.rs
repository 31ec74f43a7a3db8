//! Single-pass comment scanner.
//!
//! The scanner is a small state machine over the bytes of the source. Every
//! delimiter it cares about is ASCII, so byte-wise scanning never splits a
//! multi-byte character at a recorded offset.

use super::record::{CommentKind, CommentRecord};
use crate::source::Span;

/// Scanner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Also report `/* */` comments as [`CommentKind::Block`] records.
    pub block_comments: bool,
}

impl ScanOptions {
    /// Options that report both comment kinds.
    pub fn with_block_comments() -> Self {
        Self {
            block_comments: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    /// Inside an unquoted `url(` argument, where `//` is part of the URL.
    Url,
    BlockComment { start: usize, inline_before: bool },
    LineComment { start: usize, inline_before: bool },
}

/// Lazy iterator over the comments of one syntactic root.
///
/// Records come out in ascending start order. Cloning a scanner that has
/// not been advanced restarts the scan; [`scan_comments`] is cheap to call
/// again as well.
#[derive(Debug, Clone)]
pub struct CommentScanner<'a> {
    source: &'a str,
    options: ScanOptions,
    pos: usize,
    state: State,
    /// Non-comment, non-whitespace content seen on the current line.
    line_has_code: bool,
}

/// Scan `source` for `//` comments.
pub fn scan_comments(source: &str) -> CommentScanner<'_> {
    CommentScanner::new(source)
}

impl<'a> CommentScanner<'a> {
    /// Scanner reporting `//` comments only.
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ScanOptions::default())
    }

    /// Scanner with explicit options.
    pub fn with_options(source: &'a str, options: ScanOptions) -> Self {
        Self {
            source,
            options,
            pos: 0,
            state: State::Normal,
            line_has_code: false,
        }
    }

    /// The text being scanned.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Consume one token's worth of input, returning a record when a comment
    /// closes.
    fn step(&mut self) -> Option<CommentRecord> {
        let bytes = self.source.as_bytes();
        let pos = self.pos;
        let b = bytes[pos];
        let next = bytes.get(pos + 1).copied();

        match self.state {
            State::Normal => match b {
                b'/' if next == Some(b'/') => {
                    self.state = State::LineComment {
                        start: pos,
                        inline_before: self.line_has_code,
                    };
                    self.pos += 2;
                }
                b'/' if next == Some(b'*') => {
                    self.state = State::BlockComment {
                        start: pos,
                        inline_before: self.line_has_code,
                    };
                    self.pos += 2;
                }
                b'"' | b'\'' => {
                    self.state = if b == b'"' {
                        State::DoubleQuoted
                    } else {
                        State::SingleQuoted
                    };
                    self.line_has_code = true;
                    self.pos += 1;
                }
                b'\\' => {
                    self.line_has_code = true;
                    self.skip_escape(next);
                }
                b'(' => {
                    if self.is_url_call(pos) && !self.quoted_argument(pos + 1) {
                        self.state = State::Url;
                    }
                    self.line_has_code = true;
                    self.pos += 1;
                }
                _ => self.consume_plain(b),
            },

            State::SingleQuoted | State::DoubleQuoted => {
                let quote = if self.state == State::DoubleQuoted {
                    b'"'
                } else {
                    b'\''
                };
                match b {
                    b'\\' => self.skip_escape(next),
                    _ if b == quote => {
                        self.state = State::Normal;
                        self.pos += 1;
                    }
                    _ => self.consume_plain(b),
                }
            }

            State::Url => {
                if b == b')' {
                    self.state = State::Normal;
                    self.pos += 1;
                } else {
                    self.consume_plain(b);
                }
            }

            State::BlockComment {
                start,
                inline_before,
            } => {
                if b == b'*' && next == Some(b'/') {
                    let end = pos + 2;
                    self.pos = end;
                    self.state = State::Normal;
                    if self.options.block_comments {
                        return Some(self.block_record(start, end, inline_before));
                    }
                } else {
                    if b == b'\n' {
                        self.line_has_code = false;
                    }
                    self.pos += 1;
                }
            }

            State::LineComment {
                start,
                inline_before,
            } => {
                let Some(newline) = self.source[pos..].find('\n').map(|i| pos + i) else {
                    self.pos = bytes.len();
                    return None;
                };
                let end = if newline > start + 2 && bytes[newline - 1] == b'\r' {
                    newline - 1
                } else {
                    newline
                };
                self.pos = newline + 1;
                self.state = State::Normal;
                self.line_has_code = false;
                return Some(self.line_record(start, end, inline_before));
            }
        }

        None
    }

    /// Whitespace and ordinary code bytes.
    fn consume_plain(&mut self, b: u8) {
        if b == b'\n' {
            self.line_has_code = false;
        } else if !b.is_ascii_whitespace() {
            self.line_has_code = true;
        }
        self.pos += 1;
    }

    /// Skip a backslash and the byte it escapes. A line break is left in
    /// place so line tracking still sees it.
    fn skip_escape(&mut self, next: Option<u8>) {
        self.pos += match next {
            Some(b'\n') | None => 1,
            Some(_) => 2,
        };
    }

    /// Whether the `(` at `paren` opens a `url(` call.
    fn is_url_call(&self, paren: usize) -> bool {
        let before = &self.source.as_bytes()[..paren];
        let name_start = before
            .iter()
            .rposition(|b| !(b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_'))
            .map_or(0, |i| i + 1);
        before[name_start..].eq_ignore_ascii_case(b"url")
    }

    /// Whether the argument starting at `from` opens with a quote. Quoted
    /// `url(` arguments are ordinary strings.
    fn quoted_argument(&self, from: usize) -> bool {
        self.source.as_bytes()[from..]
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|&b| b == b'"' || b == b'\'')
    }

    /// Close a `//` comment that is still open at end of input.
    fn finish(&mut self) -> Option<CommentRecord> {
        if let State::LineComment {
            start,
            inline_before,
        } = self.state
        {
            self.state = State::Normal;
            return Some(self.line_record(start, self.source.len(), inline_before));
        }
        None
    }

    fn line_record(&self, start: usize, end: usize, inline_before: bool) -> CommentRecord {
        CommentRecord {
            kind: CommentKind::DoubleSlash,
            span: Span::new(start, end),
            text: self.source[start + 2..end].trim().to_string(),
            inline_before,
            inline_after: false,
        }
    }

    fn block_record(&self, start: usize, end: usize, inline_before: bool) -> CommentRecord {
        let rest = &self.source[end..];
        let line = rest[..rest.find('\n').unwrap_or(rest.len())].trim();
        let inline_after = !line.is_empty() && !line.starts_with("//") && !line.starts_with("/*");

        CommentRecord {
            kind: CommentKind::Block,
            span: Span::new(start, end),
            text: self.source[start + 2..end - 2].trim().to_string(),
            inline_before,
            inline_after,
        }
    }
}

impl Iterator for CommentScanner<'_> {
    type Item = CommentRecord;

    fn next(&mut self) -> Option<CommentRecord> {
        while self.pos < self.source.len() {
            if let Some(record) = self.step() {
                return Some(record);
            }
        }
        self.finish()
    }
}

impl std::iter::FusedIterator for CommentScanner<'_> {}

/// Replace every `//` comment with spaces of the same byte length.
///
/// The result has the same length and line structure as `source`, so
/// offsets found in it are valid in the original. Standard CSS tokenizers
/// can then read SCSS text without tripping over quotes or braces inside
/// line comments.
pub fn blank_line_comments(source: &str) -> String {
    let mut blanked = String::with_capacity(source.len());
    let mut last = 0;

    for comment in scan_comments(source) {
        blanked.push_str(&source[last..comment.span.start]);
        blanked.extend(std::iter::repeat_n(' ', comment.span.len()));
        last = comment.span.end;
    }
    blanked.push_str(&source[last..]);
    blanked
}
