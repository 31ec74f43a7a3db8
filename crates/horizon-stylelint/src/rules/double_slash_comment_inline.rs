//! `scss/double-slash-comment-inline`

use horizon_stylelint_core::comments::{CommentKind, scan_comments};
use serde::Deserialize;

use super::parse_options;
use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::rule::{Rule, RuleContext};

const EXPECTED: &str = "Expected //-comment to be inline comment";
const REJECTED: &str = "Unexpected inline //-comment";
const STYLELINT_COMMAND_PREFIX: &str = "stylelint-";

/// Where `//` comments are expected to sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    /// Every `//` comment must share its line with code.
    Always,
    /// No `//` comment may share its line with code.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum Ignore {
    StylelintCommands,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Options {
    expect: Expectation,
    #[serde(default)]
    ignore: Vec<Ignore>,
}

/// Require or disallow `//` comments on the same line as code.
#[derive(Debug, Clone)]
pub struct DoubleSlashCommentInline {
    expect: Expectation,
    ignore_stylelint_commands: bool,
}

impl DoubleSlashCommentInline {
    pub const NAME: &'static str = "scss/double-slash-comment-inline";
    pub const DESCRIPTION: &'static str =
        "Require or disallow //-comments to be inline comments";

    pub fn new(expect: Expectation) -> Self {
        Self {
            expect,
            ignore_stylelint_commands: false,
        }
    }

    /// Skip `// stylelint-...` command comments.
    pub fn ignoring_stylelint_commands(mut self) -> Self {
        self.ignore_stylelint_commands = true;
        self
    }

    pub(crate) fn configure(options: Option<&toml::Table>) -> Result<Self> {
        let Some(table) = options else {
            return Err(Error::invalid_option(
                Self::NAME,
                "expected a table with expect = \"always\" or \"never\"",
            ));
        };
        let options: Options = parse_options(Self::NAME, table)?;
        let rule = Self::new(options.expect);
        Ok(if options.ignore.contains(&Ignore::StylelintCommands) {
            rule.ignoring_stylelint_commands()
        } else {
            rule
        })
    }
}

impl Rule for DoubleSlashCommentInline {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn check(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let text = ctx.root_text();
        if text.trim().is_empty() {
            return;
        }

        for comment in scan_comments(text) {
            if comment.kind != CommentKind::DoubleSlash {
                continue;
            }
            if self.ignore_stylelint_commands && comment.text.starts_with(STYLELINT_COMMAND_PREFIX)
            {
                continue;
            }

            let message = match (self.expect, comment.is_inline()) {
                (Expectation::Always, false) => EXPECTED,
                (Expectation::Never, true) => REJECTED,
                _ => continue,
            };
            diagnostics.push(ctx.report(Self::NAME, message, comment.span.start));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::run;

    #[test]
    fn always_flags_standalone_comments() {
        let rule = DoubleSlashCommentInline::new(Expectation::Always);
        let found = run(&rule, "// own line\na { color: red; } // trailing\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, EXPECTED);
        assert_eq!((found[0].location.line, found[0].location.column), (1, 1));
    }

    #[test]
    fn never_flags_inline_comments() {
        let rule = DoubleSlashCommentInline::new(Expectation::Never);
        let found = run(&rule, "// own line\na {\n  color: red; // trailing\n}\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, REJECTED);
        assert_eq!((found[0].location.line, found[0].location.column), (3, 15));
    }

    #[test]
    fn stylelint_commands_can_be_ignored() {
        let source = "a { color: red; } // stylelint-disable-line\n";
        let rule = DoubleSlashCommentInline::new(Expectation::Never);
        assert_eq!(run(&rule, source).len(), 1);
        assert!(run(&rule.ignoring_stylelint_commands(), source).is_empty());
    }

    #[test]
    fn block_comments_and_urls_are_not_line_comments() {
        let rule = DoubleSlashCommentInline::new(Expectation::Always);
        let source = "/* block */\na { background: url(//cdn.example.com/x.png); }\n";
        assert!(run(&rule, source).is_empty());
    }

    #[test]
    fn blank_roots_are_skipped() {
        let rule = DoubleSlashCommentInline::new(Expectation::Always);
        assert!(run(&rule, "  \n\t\n").is_empty());
    }

    #[test]
    fn every_root_of_a_markup_file_is_checked() {
        let rule = DoubleSlashCommentInline::new(Expectation::Always);
        let source = "<style>\n// one\n</style>\n<style>a { } // two\n// three\n</style>";
        let found = crate::rules::tests::run_file(&rule, "page.vue", source);
        let lines: Vec<_> = found.iter().map(|d| d.location.line).collect();
        assert_eq!(lines, [2, 5]);
    }
}
