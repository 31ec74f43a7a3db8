//! Rule registry.

mod dollar_variable_default;
mod double_slash_comment_inline;
mod selector_no_union_class_name;

pub use dollar_variable_default::DollarVariableDefault;
pub use double_slash_comment_inline::{DoubleSlashCommentInline, Expectation};
pub use selector_no_union_class_name::SelectorNoUnionClassName;

use serde::de::DeserializeOwned;

use crate::config::RuleSetting;
use crate::error::{Error, Result};
use crate::rule::Rule;

/// Name and description of every available rule.
const REGISTRY: &[(&str, &str)] = &[
    (
        DollarVariableDefault::NAME,
        DollarVariableDefault::DESCRIPTION,
    ),
    (
        DoubleSlashCommentInline::NAME,
        DoubleSlashCommentInline::DESCRIPTION,
    ),
    (
        SelectorNoUnionClassName::NAME,
        SelectorNoUnionClassName::DESCRIPTION,
    ),
];

/// Names of all available rules, sorted.
pub fn all_rules() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Description of a rule, if it exists.
pub fn rule_description(name: &str) -> Option<&'static str> {
    REGISTRY
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, description)| *description)
}

/// Build a rule from its configured setting.
///
/// Returns `Ok(None)` for a disabled rule. Unknown names are rejected even
/// when disabled, so typos in a config file do not go unnoticed.
pub fn configure_rule(name: &str, setting: &RuleSetting) -> Result<Option<Box<dyn Rule>>> {
    if rule_description(name).is_none() {
        return Err(Error::UnknownRule(name.to_string()));
    }
    if !setting.is_enabled() {
        return Ok(None);
    }

    let options = setting.options();
    let rule: Box<dyn Rule> = match name {
        DollarVariableDefault::NAME => Box::new(DollarVariableDefault::configure(options)?),
        DoubleSlashCommentInline::NAME => Box::new(DoubleSlashCommentInline::configure(options)?),
        SelectorNoUnionClassName::NAME => Box::new(SelectorNoUnionClassName::configure(options)?),
        _ => return Err(Error::UnknownRule(name.to_string())),
    };
    Ok(Some(rule))
}

/// Deserialize a rule's option table.
///
/// Option structs use `deny_unknown_fields`, so misspelt keys and values
/// outside an enum's variants both surface here.
fn parse_options<T: DeserializeOwned>(rule: &str, table: &toml::Table) -> Result<T> {
    toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e: toml::de::Error| Error::invalid_option(rule, e.message()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::rule::RuleContext;
    use horizon_stylelint_core::source::{LineIndex, Syntax, split_roots};
    use horizon_stylelint_core::tree::parse_stylesheet;

    /// Run one rule over every root of `source` as if it were `file`.
    pub(crate) fn run_file(rule: &dyn Rule, file: &str, source: &str) -> Vec<Diagnostic> {
        let lines = LineIndex::new(source);
        let mut diagnostics = vec![];
        for root in split_roots(source, Syntax::from_path(file)) {
            let sheet = parse_stylesheet(root.text);
            let ctx = RuleContext::new(file, source, &lines, root, &sheet);
            rule.check(&ctx, &mut diagnostics);
        }
        diagnostics
    }

    /// Run one rule over SCSS text.
    pub(crate) fn run(rule: &dyn Rule, source: &str) -> Vec<Diagnostic> {
        run_file(rule, "test.scss", source)
    }

    fn table(text: &str) -> RuleSetting {
        RuleSetting::Options(toml::from_str::<toml::Table>(text).unwrap())
    }

    #[test]
    fn registry_lists_every_rule() {
        let names: Vec<_> = all_rules().collect();
        assert_eq!(
            names,
            [
                "scss/dollar-variable-default",
                "scss/double-slash-comment-inline",
                "scss/selector-no-union-class-name",
            ]
        );
        for name in names {
            let rule = configure_rule(name, &table("expect = \"always\""));
            // Only the comment rule takes `expect`.
            if name == DoubleSlashCommentInline::NAME {
                assert_eq!(rule.unwrap().unwrap().name(), name);
            } else {
                assert!(rule.is_err());
            }
        }
    }

    #[test]
    fn unknown_rules_are_rejected_even_when_disabled() {
        let err = configure_rule("scss/nope", &RuleSetting::Enabled(false)).unwrap_err();
        assert!(matches!(err, Error::UnknownRule(ref name) if name == "scss/nope"));
    }

    #[test]
    fn disabled_rules_are_not_built() {
        let rule = configure_rule(SelectorNoUnionClassName::NAME, &RuleSetting::Enabled(false));
        assert!(rule.unwrap().is_none());
    }

    #[test]
    fn option_validation() {
        let name = DoubleSlashCommentInline::NAME;
        assert!(configure_rule(name, &RuleSetting::Enabled(true)).is_err());
        assert!(configure_rule(name, &table("expect = \"sometimes\"")).is_err());
        assert!(configure_rule(name, &table("expect = \"never\"\nignore = [\"x\"]")).is_err());
        assert!(configure_rule(name, &table("expect = \"never\"\nextra = 1")).is_err());
        assert!(
            configure_rule(name, &table("expect = \"never\"\nignore = [\"stylelint-commands\"]"))
                .unwrap()
                .is_some()
        );

        let name = DollarVariableDefault::NAME;
        assert!(configure_rule(name, &RuleSetting::Enabled(true)).unwrap().is_some());
        assert!(configure_rule(name, &table("ignore = [\"local\"]")).unwrap().is_some());
        assert!(configure_rule(name, &table("ignore = [\"global\"]")).is_err());

        let name = SelectorNoUnionClassName::NAME;
        assert!(configure_rule(name, &table("")).unwrap().is_some());
        assert!(configure_rule(name, &table("severity = \"warning\"")).is_err());
    }

    #[test]
    fn invalid_options_name_the_rule() {
        let err = configure_rule(DollarVariableDefault::NAME, &table("ignore = 1")).unwrap_err();
        assert!(err.to_string().contains("scss/dollar-variable-default"));
    }
}
