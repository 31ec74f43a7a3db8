//! SCSS lint rules.
//!
//! Three rules built on the `horizon-stylelint-core` parsing core:
//!
//! - `scss/double-slash-comment-inline`: require or disallow `//` comments
//!   on the same line as code
//! - `scss/selector-no-union-class-name`: disallow `&-suffix` class names
//! - `scss/dollar-variable-default`: require `!default` on `$variables`
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use horizon_stylelint::{Config, Linter};
//!
//! let config = Config::from_toml(r#"
//!     [rules]
//!     "scss/selector-no-union-class-name" = true
//! "#).unwrap();
//! let linter = Linter::new(&config).unwrap();
//!
//! let found = linter.lint_source(Path::new("button.scss"), ".button { &-primary { } }");
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].location.column, 11);
//! ```

pub mod config;
pub mod diagnostics;
pub mod linter;
pub mod logging;
pub mod rule;
pub mod rules;

mod error;

pub use config::{CONFIG_FILE_NAME, Config, RuleSetting};
pub use diagnostics::{Diagnostic, Location, Severity};
pub use error::{Error, Result};
pub use linter::Linter;
pub use rule::{Rule, RuleContext};
