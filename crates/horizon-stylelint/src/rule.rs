//! Rule trait and per-root context.

use std::fmt;

use horizon_stylelint_core::source::{LineIndex, SourceRoot};
use horizon_stylelint_core::tree::Stylesheet;

use crate::diagnostics::{Diagnostic, Location};

/// A lint rule.
///
/// Rules are configured once and then shared across the worker threads that
/// lint files in parallel, so they hold only their options.
pub trait Rule: Send + Sync + fmt::Debug {
    /// Rule name (e.g., "scss/double-slash-comment-inline").
    fn name(&self) -> &'static str;

    /// Description of what this rule checks.
    fn description(&self) -> &'static str;

    /// Check one syntactic root, pushing any problems onto `diagnostics`.
    fn check(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>);
}

/// Everything a rule can see of one syntactic root.
///
/// Offsets handed to the rule (comment spans, node spans, selector source
/// indices) are relative to the root's text; [`RuleContext::location`] turns
/// them into file positions.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    file: &'a str,
    source: &'a str,
    lines: &'a LineIndex,
    root: SourceRoot<'a>,
    stylesheet: &'a Stylesheet,
}

impl<'a> RuleContext<'a> {
    /// Create a context for `root` of the file `source`.
    ///
    /// `lines` must index `source`, the whole file, and `stylesheet` must be
    /// parsed from `root.text`.
    pub fn new(
        file: &'a str,
        source: &'a str,
        lines: &'a LineIndex,
        root: SourceRoot<'a>,
        stylesheet: &'a Stylesheet,
    ) -> Self {
        Self {
            file,
            source,
            lines,
            root,
            stylesheet,
        }
    }

    /// Path of the linted file, for display.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// Text of the root being checked.
    pub fn root_text(&self) -> &'a str {
        self.root.text
    }

    /// Byte offset of the root inside the file.
    pub fn root_offset(&self) -> usize {
        self.root.offset
    }

    /// Statement tree of the root.
    pub fn stylesheet(&self) -> &'a Stylesheet {
        self.stylesheet
    }

    /// File location of a root-relative byte offset.
    pub fn location(&self, offset: usize) -> Location {
        let offset = self.root.offset + offset;
        let (line, column) = self.lines.line_col(self.source, offset);
        Location::new(self.file, line, column, offset)
    }

    /// An error diagnostic at a root-relative byte offset.
    pub fn report(&self, rule: &str, message: impl Into<String>, offset: usize) -> Diagnostic {
        Diagnostic::error(rule, message, self.location(offset))
    }

    /// A warning diagnostic at a root-relative byte offset.
    pub fn warn(&self, rule: &str, message: impl Into<String>, offset: usize) -> Diagnostic {
        Diagnostic::warning(rule, message, self.location(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_stylelint_core::source::{Syntax, split_roots};
    use horizon_stylelint_core::tree::parse_stylesheet;

    #[test]
    fn locations_are_file_relative() {
        let source = "<p>x</p>\n<style>\n  .a { }\n</style>\n";
        let roots = split_roots(source, Syntax::Html);
        let root = roots[0];
        let sheet = parse_stylesheet(root.text);
        let lines = LineIndex::new(source);
        let ctx = RuleContext::new("a.vue", source, &lines, root, &sheet);

        // ".a" sits three bytes into the root (after "\n  ").
        let location = ctx.location(3);
        assert_eq!(location.line, 3);
        assert_eq!(location.column, 3);
        assert_eq!(&source[location.offset..location.offset + 2], ".a");

        let d = ctx.report("r", "m", 3);
        assert!(d.is_error());
        assert_eq!(d.location.file, "a.vue");
        assert!(!ctx.warn("r", "m", 3).is_error());
    }
}
