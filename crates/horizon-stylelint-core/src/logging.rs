//! Tracing targets of the parsing core.
//!
//! The core never reports diagnostics itself. It logs recovered parse
//! anomalies at `warn` and bookkeeping at `trace`; install a
//! `tracing-subscriber` in the application to see them.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Stylesheet tree parser target.
    pub const TREE: &str = "horizon_stylelint_core::tree";
    /// Selector parser target.
    pub const SELECTOR: &str = "horizon_stylelint_core::selector";
    /// Markup splitting and offset mapping target.
    pub const SOURCE: &str = "horizon_stylelint_core::source";
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn targets_live_under_this_crate() {
        for target in [targets::TREE, targets::SELECTOR, targets::SOURCE] {
            assert!(target.starts_with(concat!(env!("CARGO_CRATE_NAME"), "::")));
        }
    }
}
