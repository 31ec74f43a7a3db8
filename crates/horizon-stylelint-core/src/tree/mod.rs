//! Stylesheet tree.
//!
//! A lightweight statement tree for SCSS and CSS: rules, at-rules and
//! declarations with their spans and parent links. It carries just enough
//! structure for rules that need to know what encloses what, without trying
//! to evaluate Sass.

mod node;
mod parser;

pub use node::{AtRule, Declaration, Descendants, Node, NodeData, NodeId, Rule, Stylesheet};
pub use parser::parse_stylesheet;
