//! `scss/dollar-variable-default`

use serde::Deserialize;

use super::parse_options;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::rule::{Rule, RuleContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Ignore {
    Local,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Options {
    #[serde(default)]
    ignore: Vec<Ignore>,
}

/// Require `!default` on `$variable` assignments.
#[derive(Debug, Clone, Default)]
pub struct DollarVariableDefault {
    ignore_local: bool,
}

impl DollarVariableDefault {
    pub const NAME: &'static str = "scss/dollar-variable-default";
    pub const DESCRIPTION: &'static str = "Require !default flag for $-variables";

    pub fn new() -> Self {
        Self::default()
    }

    /// Only check variables declared at the root of the stylesheet.
    pub fn ignoring_local(mut self) -> Self {
        self.ignore_local = true;
        self
    }

    pub(crate) fn configure(options: Option<&toml::Table>) -> Result<Self> {
        let options: Options = match options {
            Some(table) => parse_options(Self::NAME, table)?,
            None => Options::default(),
        };
        Ok(Self {
            ignore_local: options.ignore.contains(&Ignore::Local),
        })
    }
}

impl Rule for DollarVariableDefault {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn check(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let sheet = ctx.stylesheet();

        for (id, decl) in sheet.declarations() {
            if !decl.is_variable() {
                continue;
            }
            if self.ignore_local && sheet.parent(id) != Some(sheet.root()) {
                continue;
            }
            if decl.value.to_lowercase().contains("!default") {
                continue;
            }

            let start = sheet.get(id).map_or(0, |node| node.span.start);
            diagnostics.push(ctx.report(
                Self::NAME,
                format!("Expected !default flag for \"{}\"", decl.prop),
                start,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::run;

    fn messages(rule: &DollarVariableDefault, source: &str) -> Vec<String> {
        run(rule, source).into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn flags_variables_without_default() {
        let source = "$a: 1;\n$b: 2 !default;\n$c: 3 !DEFAULT;\n$d: 4 !global;\ncolor: red;\n";
        assert_eq!(
            messages(&DollarVariableDefault::new(), source),
            [
                "Expected !default flag for \"$a\"",
                "Expected !default flag for \"$d\"",
            ]
        );
    }

    #[test]
    fn reports_at_the_declaration() {
        let found = run(&DollarVariableDefault::new(), ".a {\n  $x: 1;\n}");
        assert_eq!((found[0].location.line, found[0].location.column), (2, 3));
    }

    #[test]
    fn local_variables_can_be_ignored() {
        let source = "$a: 1;\n.x { $b: 2; @media print { $c: 3; } }\n@mixin m { $d: 4; }";
        assert_eq!(run(&DollarVariableDefault::new(), source).len(), 4);
        assert_eq!(
            messages(&DollarVariableDefault::new().ignoring_local(), source),
            ["Expected !default flag for \"$a\""]
        );
    }

    #[test]
    fn commented_out_variables_are_not_declarations() {
        let source = "// $a: 1;\n/* $b: 2; */\n$c: 3 !default; // $d: 4;\n";
        assert!(run(&DollarVariableDefault::new(), source).is_empty());
    }
}
