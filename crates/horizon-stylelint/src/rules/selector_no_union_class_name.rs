//! `scss/selector-no-union-class-name`

use horizon_stylelint_core::selector::{
    SelectorList, UNION_SAFE_SUCCESSORS, parse_selector_list, union_class_name_offenders,
};
use serde::Deserialize;

use super::parse_options;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::logging::targets;
use crate::rule::{Rule, RuleContext};

const REJECTED: &str = "Unexpected union class name with the parent selector (&)";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Options {}

/// Disallow building class names by gluing a suffix onto `&`.
///
/// `.button { &-primary { } }` compiles to `.button-primary`, a class name
/// that cannot be found by searching the source for it.
#[derive(Debug, Clone, Default)]
pub struct SelectorNoUnionClassName;

impl SelectorNoUnionClassName {
    pub const NAME: &'static str = "scss/selector-no-union-class-name";
    pub const DESCRIPTION: &'static str =
        "Disallow union class names with the parent selector (&)";

    pub(crate) fn configure(options: Option<&toml::Table>) -> Result<Self> {
        if let Some(table) = options {
            let Options {} = parse_options(Self::NAME, table)?;
        }
        Ok(Self)
    }

    fn parse(
        &self,
        ctx: &RuleContext<'_>,
        selector: &str,
        offset: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<SelectorList> {
        match parse_selector_list(selector) {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::debug!(target: targets::RULES, rule = Self::NAME, "{}", e);
                diagnostics.push(ctx.warn(
                    Self::NAME,
                    format!("Cannot parse selector ({e})"),
                    offset,
                ));
                None
            }
        }
    }
}

impl Rule for SelectorNoUnionClassName {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn check(&self, ctx: &RuleContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let sheet = ctx.stylesheet();

        for (id, rule) in sheet.rules() {
            if !rule.selector.contains('&') {
                continue;
            }
            let Some(parent_selector) = sheet.parent(id).and_then(|p| sheet.closest_selector(p))
            else {
                continue;
            };
            let start = sheet.get(id).map_or(0, |node| node.span.start);

            let Some(parent) = self.parse(ctx, parent_selector, start, diagnostics) else {
                continue;
            };
            let Some(selector) = self.parse(ctx, &rule.selector, start, diagnostics) else {
                continue;
            };

            for nesting in union_class_name_offenders(&parent, &selector, UNION_SAFE_SUCCESSORS) {
                diagnostics.push(ctx.report(Self::NAME, REJECTED, start + nesting.source_index()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::rules::tests::run;

    fn columns(source: &str) -> Vec<(u32, u32)> {
        run(&SelectorNoUnionClassName, source)
            .iter()
            .map(|d| (d.location.line, d.location.column))
            .collect()
    }

    #[test]
    fn flags_suffix_glued_to_parent_class() {
        assert_eq!(columns(".a {\n  &-b { }\n}"), [(2, 3)]);
        assert_eq!(columns(".a {\n  .x, &_b { }\n}"), [(2, 7)]);
        assert_eq!(columns(".a { &#{$x} { } }"), [(1, 6)]);
    }

    #[test]
    fn allows_compound_and_combined_selectors() {
        for nested in ["&.b", "& .b", "& > .b", "&:hover", "&::after", "&[x]", "&#id", "& + &"] {
            let source = format!(".a {{ {nested} {{ }} }}");
            assert!(columns(&source).is_empty(), "{nested}");
        }
    }

    #[test]
    fn parent_must_end_in_a_class_name() {
        assert!(columns("div { &-b { } }").is_empty());
        assert!(columns(".a:hover { &-b { } }").is_empty());
        assert!(columns("&-b { }").is_empty());
        assert_eq!(columns("div .a { &-b { } }").len(), 1);
    }

    #[test]
    fn climbs_through_at_rules() {
        let source = ".a {\n  @media print {\n    &-b { }\n  }\n}";
        assert_eq!(columns(source), [(3, 5)]);

        let source = ".a {\n  @include m {\n    &-b { }\n  }\n}";
        assert_eq!(columns(source), [(3, 5)]);
    }

    #[test]
    fn nested_parent_references() {
        assert_eq!(columns(".a { &:not(&-b) { } }"), [(1, 12)]);
        assert_eq!(columns(".a { &-b { &-c { } } }").len(), 1);
    }

    #[test]
    fn unparsable_selectors_warn() {
        let found = run(&SelectorNoUnionClassName, ".a { &., .b { } }");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Warning);
        assert!(found[0].message.starts_with("Cannot parse selector ("));
    }
}
