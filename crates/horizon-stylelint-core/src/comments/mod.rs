//! Recovery of comments from raw stylesheet text.
//!
//! CSS tokenizers drop `//` comments (they are not CSS), so rules that care
//! about them scan the source text directly instead of walking the tree.

mod record;
mod scanner;

pub use record::{CommentKind, CommentRecord};
pub use scanner::{CommentScanner, ScanOptions, blank_line_comments, scan_comments};
