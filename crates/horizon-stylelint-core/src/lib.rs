//! Parsing core for the Horizon stylelint rules.
//!
//! This crate recovers the two constructs SCSS rules need but standard CSS
//! tooling does not expose:
//!
//! - **Comments**: `//` line comments found by scanning raw source text,
//!   with their span and inline/standalone placement
//! - **Selectors**: parsed selector trees with node classification and
//!   sibling queries (is `&` directly followed by a class name, what is the
//!   last node of the enclosing rule's selector)
//!
//! A small stylesheet tree and root splitting for markup documents are
//! included so rules have something to walk.
//!
//! # Example
//!
//! ```
//! use horizon_stylelint_core::comments::scan_comments;
//! use horizon_stylelint_core::selector::{parse_selector_list, NodeKind};
//!
//! let comments: Vec<_> = scan_comments("a { b: c; } // note").collect();
//! assert!(comments[0].inline_before);
//!
//! let selector = parse_selector_list("&.child").unwrap();
//! let nesting = selector.walk().next().unwrap();
//! assert_eq!(nesting.next_sibling().map(|n| n.kind()), Some(NodeKind::ClassName));
//! ```

pub mod comments;
pub mod logging;
pub mod selector;
pub mod source;
pub mod tree;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::comments::{
        CommentKind, CommentRecord, CommentScanner, ScanOptions, scan_comments,
    };
    pub use crate::selector::{
        Component, NodeKind, NodeRef, Selector, SelectorList, SelectorNode, parse_selector_list,
    };
    pub use crate::source::{LineIndex, SourceRoot, Span, Syntax, split_roots};
    pub use crate::tree::{NodeData, NodeId, Stylesheet, parse_stylesheet};
}
