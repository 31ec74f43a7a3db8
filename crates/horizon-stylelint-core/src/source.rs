//! Source text helpers: spans, line lookup and syntactic roots.
//!
//! A single file may hold more than one independently parseable stylesheet.
//! Plain `.css`/`.scss` files are one root; markup documents (`.html`,
//! `.vue`, `.svelte`) contribute one root per `<style>` element.

use std::ops::Range;
use std::path::Path;

use crate::logging::targets;

/// Half-open byte range into a source string.
///
/// Both ends always sit on `char` boundaries, so `&source[span.range()]`
/// never panics for the text the span was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a `Range`, for slicing.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Shift both ends by `offset`.
    pub fn offset_by(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }
}

/// Maps byte offsets to 1-based line/column positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Index the line starts of `text`.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a `(line, column)` pair, both 1-based.
    ///
    /// Columns count characters, not bytes. Offsets past the end clamp to
    /// the last line.
    pub fn line_col(&self, text: &str, offset: usize) -> (u32, u32) {
        let offset = offset.min(text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = text
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        (line as u32 + 1, column as u32 + 1)
    }
}

/// The surface syntax of a linted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// Plain CSS.
    Css,
    /// SCSS (the default for unknown extensions).
    Scss,
    /// A markup document with embedded `<style>` elements.
    Html,
}

impl Syntax {
    /// Pick a syntax from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("css") => Syntax::Css,
            Some("html" | "htm" | "vue" | "svelte") => Syntax::Html,
            _ => Syntax::Scss,
        }
    }

    /// File extensions the linter picks up when expanding directories.
    pub fn lintable_extensions() -> &'static [&'static str] {
        &["css", "scss", "html", "htm", "vue", "svelte"]
    }
}

/// One syntactic root inside a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRoot<'a> {
    /// Byte offset of `text` inside the whole file.
    pub offset: usize,
    /// The stylesheet text of this root.
    pub text: &'a str,
}

/// Split a file into its syntactic roots.
pub fn split_roots(source: &str, syntax: Syntax) -> Vec<SourceRoot<'_>> {
    match syntax {
        Syntax::Css | Syntax::Scss => vec![SourceRoot {
            offset: 0,
            text: source,
        }],
        Syntax::Html => style_elements(source),
    }
}

fn style_elements(source: &str) -> Vec<SourceRoot<'_>> {
    // ASCII lowercasing keeps byte offsets identical to `source`.
    let lower = source.to_ascii_lowercase();
    let mut roots = Vec::new();
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find("<style") {
        let tag_start = cursor + found;
        let after_name = tag_start + "<style".len();

        // Reject `<styles>` and friends.
        let boundary = lower[after_name..].chars().next();
        if !matches!(boundary, Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace()) {
            cursor = after_name;
            continue;
        }

        let Some(open_end) = lower[after_name..].find('>') else {
            break;
        };
        let body_start = after_name + open_end + 1;
        let body_end = lower[body_start..]
            .find("</style")
            .map_or(source.len(), |i| body_start + i);

        roots.push(SourceRoot {
            offset: body_start,
            text: &source[body_start..body_end],
        });
        cursor = body_end;
    }

    tracing::trace!(
        target: targets::SOURCE,
        roots = roots.len(),
        "split markup into style roots"
    );
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_characters() {
        let text = "a {\n  é: x;\n}";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(text, 0), (1, 1));
        assert_eq!(index.line_col(text, 4), (2, 1));
        // "x" sits after a two-byte character.
        let x = text.find('x').unwrap();
        assert_eq!(index.line_col(text, x), (2, 6));
        assert_eq!(index.line_col(text, text.len() + 10), (3, 2));
    }

    #[test]
    fn syntax_from_extension() {
        assert_eq!(Syntax::from_path("a/b.scss"), Syntax::Scss);
        assert_eq!(Syntax::from_path("b.CSS"), Syntax::Css);
        assert_eq!(Syntax::from_path("App.vue"), Syntax::Html);
        assert_eq!(Syntax::from_path("noext"), Syntax::Scss);
    }

    #[test]
    fn stylesheet_is_single_root() {
        let roots = split_roots("a {}", Syntax::Scss);
        assert_eq!(roots, vec![SourceRoot { offset: 0, text: "a {}" }]);
    }

    #[test]
    fn markup_yields_one_root_per_style_element() {
        let html = "<p>x</p>\n<style>a {}</style>\n<STYLE lang=\"scss\">\nb {}\n</STYLE><styles></styles>";
        let roots = split_roots(html, Syntax::Html);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].text, "a {}");
        assert_eq!(&html[roots[0].offset..roots[0].offset + 4], "a {}");
        assert_eq!(roots[1].text, "\nb {}\n");
    }

    #[test]
    fn unclosed_style_runs_to_end() {
        let roots = split_roots("<style>a {}", Syntax::Html);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].text, "a {}");
    }
}
