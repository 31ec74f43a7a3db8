//! Read-only queries over parsed selectors.
//!
//! Nodes are addressed through [`NodeRef`], a borrowed cursor that knows its
//! containing selector. Sibling lookups are index arithmetic, and a node
//! outside any tree cannot be named at all.

use super::types::{Component, NodeKind, Selector, SelectorList, SelectorNode};

/// Successor kinds that keep `&` a plain compound selector.
///
/// Anything else glued to the parent reference (`&-suffix`, `&div`,
/// `&#{$x}`) concatenates onto the parent's last class name.
pub const UNION_SAFE_SUCCESSORS: &[NodeKind] = &[
    NodeKind::ClassName,
    NodeKind::Combinator,
    NodeKind::Attribute,
    NodeKind::Identifier,
    NodeKind::PseudoClass,
    NodeKind::PseudoElement,
];

/// Classify a node.
pub fn type_of(node: &SelectorNode) -> NodeKind {
    node.component.kind()
}

/// Whether the node's kind is one of `kinds`.
pub fn is_one_of(node: &SelectorNode, kinds: &[NodeKind]) -> bool {
    kinds.contains(&type_of(node))
}

/// A node inside a selector tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    selector: &'a Selector,
    index: usize,
}

impl<'a> NodeRef<'a> {
    /// Reference the node at `index` of `selector`, if it exists.
    pub fn new(selector: &'a Selector, index: usize) -> Option<Self> {
        (index < selector.nodes.len()).then_some(Self { selector, index })
    }

    /// The underlying node.
    pub fn node(&self) -> &'a SelectorNode {
        &self.selector.nodes[self.index]
    }

    /// The selector containing the node.
    pub fn selector(&self) -> &'a Selector {
        self.selector
    }

    /// Position within the containing selector.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte offset of the node in the parsed selector text.
    pub fn source_index(&self) -> usize {
        self.node().source_index
    }

    /// Kind of the node.
    pub fn kind(&self) -> NodeKind {
        type_of(self.node())
    }

    /// Whether the node's kind is one of `kinds`.
    pub fn is_one_of(&self, kinds: &[NodeKind]) -> bool {
        is_one_of(self.node(), kinds)
    }

    /// The node right after this one in the same selector.
    pub fn next_sibling(&self) -> Option<NodeRef<'a>> {
        Self::new(self.selector, self.index + 1)
    }

    /// The node right before this one in the same selector.
    pub fn prev_sibling(&self) -> Option<NodeRef<'a>> {
        self.index
            .checked_sub(1)
            .and_then(|index| Self::new(self.selector, index))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.selector, other.selector) && self.index == other.index
    }
}

impl Eq for NodeRef<'_> {}

/// Pre-order traversal of a selector list, descending into selector
/// arguments of pseudo-classes right after the pseudo-class itself.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(&'a Selector, usize)>,
}

impl<'a> Walk<'a> {
    fn new(list: &'a SelectorList) -> Self {
        Self {
            stack: list.selectors.iter().rev().map(|s| (s, 0)).collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        loop {
            let (selector, index) = *self.stack.last()?;
            if index >= selector.nodes.len() {
                self.stack.pop();
                continue;
            }
            if let Some(top) = self.stack.last_mut() {
                top.1 += 1;
            }

            if let Component::PseudoClass(pseudo) = &selector.nodes[index].component
                && let Some(arguments) = pseudo.selectors()
            {
                self.stack
                    .extend(arguments.selectors.iter().rev().map(|s| (s, 0)));
            }
            return Some(NodeRef { selector, index });
        }
    }
}

impl SelectorList {
    /// Walk every node, nested ones included.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// The final node in traversal order.
    pub fn last_node(&self) -> Option<NodeRef<'_>> {
        self.walk().last()
    }

    /// Every `&` in the list, nested ones included.
    pub fn nesting_nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.walk().filter(|n| n.kind() == NodeKind::Nesting)
    }
}

/// Find parent references in `selector` that form a union class name.
///
/// A `&` is reported when the enclosing rule's selector ends in a class
/// name and the node glued to the `&` has a kind outside `allowed`. A `&`
/// at the end of its selector is never reported.
///
/// # Example
///
/// ```
/// use horizon_stylelint_core::selector::{
///     parse_selector_list, union_class_name_offenders, UNION_SAFE_SUCCESSORS,
/// };
///
/// let parent = parse_selector_list(".button").unwrap();
/// let nested = parse_selector_list("&-primary").unwrap();
/// let found: Vec<_> = union_class_name_offenders(&parent, &nested, UNION_SAFE_SUCCESSORS).collect();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].source_index(), 0);
/// ```
pub fn union_class_name_offenders<'a>(
    parent: &SelectorList,
    selector: &'a SelectorList,
    allowed: &'a [NodeKind],
) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
    let parent_ends_in_class = parent
        .last_node()
        .is_some_and(|n| n.kind() == NodeKind::ClassName);

    selector.nesting_nodes().filter(move |nesting| {
        parent_ends_in_class
            && nesting
                .next_sibling()
                .is_some_and(|next| !next.is_one_of(allowed))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::parse_selector_list;

    fn offenders(parent: &str, selector: &str, allowed: &[NodeKind]) -> Vec<usize> {
        let parent = parse_selector_list(parent).unwrap();
        let selector = parse_selector_list(selector).unwrap();
        union_class_name_offenders(&parent, &selector, allowed)
            .map(|n| n.source_index())
            .collect()
    }

    #[test]
    fn next_sibling_of_last_node_is_none() {
        for text in [".a", "&.b > c", ".a, .b:not(.c)", "a::after"] {
            let list = parse_selector_list(text).unwrap();
            for selector in &list.selectors {
                let last = NodeRef::new(selector, selector.nodes.len() - 1).unwrap();
                assert!(last.next_sibling().is_none(), "{text}");
            }
        }
    }

    #[test]
    fn sibling_navigation() {
        let list = parse_selector_list("&.child > a").unwrap();
        let first = list.walk().next().unwrap();
        assert_eq!(first.kind(), NodeKind::Nesting);
        assert!(first.prev_sibling().is_none());

        let second = first.next_sibling().unwrap();
        assert_eq!(second.kind(), NodeKind::ClassName);
        assert_eq!(second.prev_sibling(), Some(first));
        assert!(second.is_one_of(&[NodeKind::Tag, NodeKind::ClassName]));
        assert!(!second.is_one_of(&[NodeKind::Tag]));
        assert!(NodeRef::new(&list.selectors[0], 9).is_none());
    }

    #[test]
    fn walk_descends_into_pseudo_arguments() {
        let list = parse_selector_list(".a:not(.b, .c) .d, .e").unwrap();
        let rendered: Vec<_> = list.walk().map(|n| n.node().component.to_string()).collect();
        assert_eq!(
            rendered,
            [".a", ":not(.b, .c)", ".b", ".c", " ", ".d", ".e"]
        );
    }

    #[test]
    fn last_node_resolution() {
        let last = |text: &str| {
            let list = parse_selector_list(text).unwrap();
            list.last_node().map(|n| n.kind())
        };
        assert_eq!(last(".parent"), Some(NodeKind::ClassName));
        assert_eq!(last(".a .b"), Some(NodeKind::ClassName));
        assert_eq!(last(".a:hover"), Some(NodeKind::PseudoClass));
        assert_eq!(last("div, .b"), Some(NodeKind::ClassName));
        assert_eq!(last(".a:not(.b)"), Some(NodeKind::ClassName));
        assert_eq!(last(".a:nth-child(2)"), Some(NodeKind::PseudoClass));
        assert_eq!(SelectorList::default().last_node().map(|n| n.kind()), None);
    }

    #[test]
    fn type_queries_are_exhaustive() {
        let list = parse_selector_list("a.b#c[d]:e::f & *").unwrap();
        let kinds: Vec<_> = list.walk().map(|n| type_of(n.node())).collect();
        assert_eq!(
            kinds,
            [
                NodeKind::Tag,
                NodeKind::ClassName,
                NodeKind::Identifier,
                NodeKind::Attribute,
                NodeKind::PseudoClass,
                NodeKind::PseudoElement,
                NodeKind::Combinator,
                NodeKind::Nesting,
                NodeKind::Combinator,
                NodeKind::Universal,
            ]
        );
    }

    #[test]
    fn directly_combined_class_is_flagged_when_not_allowed() {
        let allowed = &[NodeKind::Combinator];
        assert_eq!(offenders(".parent", "&.child", allowed), [0]);
        assert!(offenders(".parent", "& > .child", allowed).is_empty());
    }

    #[test]
    fn union_suffix_is_flagged_with_safe_successors() {
        assert_eq!(offenders(".parent", "&-child", UNION_SAFE_SUCCESSORS), [0]);
        assert_eq!(offenders(".parent", ".x, &_child", UNION_SAFE_SUCCESSORS), [4]);
        assert_eq!(offenders(".parent", "&#{$x}", UNION_SAFE_SUCCESSORS), [0]);
    }

    #[test]
    fn safe_successors_are_not_flagged() {
        for selector in ["&.child", "& > .child", "& .child", "&:hover", "&::before", "&[x]", "&#id", "&"] {
            assert!(
                offenders(".parent", selector, UNION_SAFE_SUCCESSORS).is_empty(),
                "{selector}"
            );
        }
    }

    #[test]
    fn parent_must_end_in_class_name() {
        assert!(offenders("div", "&-child", UNION_SAFE_SUCCESSORS).is_empty());
        assert!(offenders(".a:hover", "&-child", UNION_SAFE_SUCCESSORS).is_empty());
        assert!(offenders("#id", "&-child", UNION_SAFE_SUCCESSORS).is_empty());
        assert_eq!(offenders("div .a", "&-child", UNION_SAFE_SUCCESSORS), [0]);
    }

    #[test]
    fn nesting_inside_pseudo_arguments() {
        assert_eq!(offenders(".p", ":not(&-x)", UNION_SAFE_SUCCESSORS), [5]);
    }
}
