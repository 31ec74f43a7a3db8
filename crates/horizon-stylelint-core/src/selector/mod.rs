//! Selector parsing and classification.

mod classify;
mod parser;
mod types;

pub use classify::{
    NodeRef, UNION_SAFE_SUCCESSORS, Walk, is_one_of, type_of, union_class_name_offenders,
};
pub use parser::parse_selector_list;
pub use types::*;
