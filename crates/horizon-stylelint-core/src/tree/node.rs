//! Stylesheet tree types.

use slotmap::{SlotMap, new_key_type};

use crate::source::Span;

new_key_type! {
    /// Handle to a node in a [`Stylesheet`].
    pub struct NodeId;
}

/// Payload of a stylesheet node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The syntactic root.
    Root,
    /// `selector { ... }`
    Rule(Rule),
    /// `@name params;` or `@name params { ... }`
    AtRule(AtRule),
    /// `prop: value`
    Declaration(Declaration),
}

/// A qualified rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Selector text as written, `//` comments blanked out.
    pub selector: String,
}

/// An at-rule such as `@media`, `@mixin` or `@include`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Name without the `@`.
    pub name: String,
    /// Everything between the name and the block or semicolon, trimmed.
    pub params: String,
    /// Whether the at-rule has a `{}` block.
    pub has_block: bool,
}

/// A declaration, including SCSS variable assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name (`color`, `$gap`, `--accent`).
    pub prop: String,
    /// Value text, trimmed.
    pub value: String,
}

impl Declaration {
    /// `$name: value`
    pub fn is_variable(&self) -> bool {
        self.prop.starts_with('$')
    }

    /// `--name: value`
    pub fn is_custom_property(&self) -> bool {
        self.prop.starts_with("--")
    }

    /// `--name: { ... }`, a custom property holding a declaration block.
    pub fn is_custom_property_set(&self) -> bool {
        self.is_custom_property() && self.value.starts_with('{') && self.value.ends_with('}')
    }
}

/// A node with its tree links.
#[derive(Debug, Clone)]
pub struct Node {
    /// What the node is.
    pub data: NodeData,
    /// Byte span in the parsed text.
    pub span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in source order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The selector, if this is a rule.
    pub fn selector(&self) -> Option<&str> {
        match &self.data {
            NodeData::Rule(rule) => Some(&rule.selector),
            _ => None,
        }
    }

    /// The declaration, if this is one.
    pub fn as_declaration(&self) -> Option<&Declaration> {
        match &self.data {
            NodeData::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// The at-rule, if this is one.
    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match &self.data {
            NodeData::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }
}

/// Arena-backed stylesheet tree for one syntactic root.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Stylesheet {
    /// Create a tree holding only a root spanning `len` bytes.
    pub fn new(len: usize) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            data: NodeData::Root,
            span: Span::new(0, len),
            parent: None,
            children: vec![],
        });
        Self { nodes, root }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of `id`, empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| &n.children)
    }

    /// Append a child under `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData, span: Span) -> NodeId {
        let id = self.nodes.insert(Node {
            data,
            span,
            parent: Some(parent),
            children: vec![],
        });
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Move the end of a node's span (once its block has been read).
    pub(crate) fn set_end(&mut self, id: NodeId, end: usize) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.span.end = end;
        }
    }

    /// All nodes below the root, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            sheet: self,
            stack: self.children(self.root).iter().rev().copied().collect(),
        }
    }

    /// Every rule with its id, in document order.
    pub fn rules(&self) -> impl Iterator<Item = (NodeId, &Rule)> {
        self.descendants().filter_map(|(id, node)| match &node.data {
            NodeData::Rule(rule) => Some((id, rule)),
            _ => None,
        })
    }

    /// Every declaration with its id, in document order.
    pub fn declarations(&self) -> impl Iterator<Item = (NodeId, &Declaration)> {
        self.descendants()
            .filter_map(|(id, node)| node.as_declaration().map(|decl| (id, decl)))
    }

    /// Selector of the nearest rule at or above `id`.
    ///
    /// At-rules (`@media`, `@include ... { }`) have no selector of their
    /// own, so the search climbs through them. Returns `None` once the root
    /// is reached.
    pub fn closest_selector(&self, id: NodeId) -> Option<&str> {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            if let Some(selector) = node.selector() {
                return Some(selector);
            }
            current = node.parent;
        }
        None
    }
}

/// Pre-order iterator over stylesheet nodes.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    sheet: &'a Stylesheet,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Some(node) = self.sheet.get(id) else {
                continue;
            };
            self.stack.extend(node.children.iter().rev().copied());
            return Some((id, node));
        }
        None
    }
}
