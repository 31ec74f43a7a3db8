//! Tracing targets of the linter and its rules.
//!
//! Parse anomalies are logged by the core under its own targets; see
//! `horizon_stylelint_core::logging`.

/// Target names for log filtering.
pub mod targets {
    /// Linter target.
    pub const LINT: &str = "horizon_stylelint::lint";
    /// Rule execution target.
    pub const RULES: &str = "horizon_stylelint::rules";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_stylelint::config";
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn targets_live_under_this_crate() {
        for target in [targets::LINT, targets::RULES, targets::CONFIG] {
            assert!(target.starts_with(concat!(env!("CARGO_CRATE_NAME"), "::")));
        }
    }
}
