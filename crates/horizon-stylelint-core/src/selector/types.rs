//! Selector type definitions.

use std::fmt;

/// A comma separated list of selectors (e.g., "&.active, .parent > a").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorList {
    /// The selectors, in source order.
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    /// Whether the list holds no selectors.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

/// A single complex selector (e.g., "&.primary:hover > .label").
///
/// Unlike a compound-by-compound representation, the nodes are kept flat in
/// source order with combinators as nodes of their own, so "the node right
/// after `&`" is simply the next element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selector {
    /// Simple selector nodes and combinators in source order.
    pub nodes: Vec<SelectorNode>,
}

impl Selector {
    /// Get the rightmost node.
    pub fn last(&self) -> Option<&SelectorNode> {
        self.nodes.last()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{}", node.component)?;
        }
        Ok(())
    }
}

/// One node of a selector together with its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorNode {
    /// What the node is.
    pub component: Component,
    /// Byte offset of the node inside the parsed selector text.
    pub source_index: usize,
}

impl SelectorNode {
    /// Create a node.
    pub fn new(component: Component, source_index: usize) -> Self {
        Self {
            component,
            source_index,
        }
    }

    /// Classify the node.
    pub fn kind(&self) -> NodeKind {
        self.component.kind()
    }
}

/// A simple selector or combinator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    /// `.name`
    ClassName(String),
    /// `#name`
    Identifier(String),
    /// `[attr=value]`, holding the text between the brackets.
    Attribute(String),
    /// Combinator between compound selectors.
    Combinator(Combinator),
    /// `:name` or `:name(...)`
    PseudoClass(PseudoClass),
    /// `::name`, or one of the legacy single-colon elements (`:before`).
    PseudoElement(String),
    /// `&`, the parent selector reference.
    Nesting,
    /// Type selector, or an identifier glued to `&` (`&-suffix`).
    Tag(String),
    /// `*`
    Universal,
    /// Anything else: placeholders (`%name`), interpolation (`#{$x}`),
    /// keyframe offsets.
    Other(String),
}

impl Component {
    /// Classify the component.
    pub fn kind(&self) -> NodeKind {
        match self {
            Component::ClassName(_) => NodeKind::ClassName,
            Component::Identifier(_) => NodeKind::Identifier,
            Component::Attribute(_) => NodeKind::Attribute,
            Component::Combinator(_) => NodeKind::Combinator,
            Component::PseudoClass(_) => NodeKind::PseudoClass,
            Component::PseudoElement(_) => NodeKind::PseudoElement,
            Component::Nesting => NodeKind::Nesting,
            Component::Tag(_) => NodeKind::Tag,
            Component::Universal => NodeKind::Universal,
            Component::Other(_) => NodeKind::Other,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::ClassName(name) => write!(f, ".{}", name),
            Component::Identifier(id) => write!(f, "#{}", id),
            Component::Attribute(raw) => write!(f, "[{}]", raw),
            Component::Combinator(combinator) => write!(f, "{}", combinator),
            Component::PseudoClass(pseudo) => write!(f, "{}", pseudo),
            Component::PseudoElement(name) => write!(f, "::{}", name),
            Component::Nesting => write!(f, "&"),
            Component::Tag(name) => write!(f, "{}", name),
            Component::Universal => write!(f, "*"),
            Component::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Kind of a selector node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ClassName,
    Identifier,
    Attribute,
    Combinator,
    PseudoClass,
    PseudoElement,
    Nesting,
    Tag,
    Universal,
    Other,
}

/// Combinator between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space): matches any descendant.
    Descendant,
    /// Child combinator (>): matches direct child only.
    Child,
    /// Adjacent sibling (+): matches immediately following sibling.
    AdjacentSibling,
    /// General sibling (~): matches any following sibling.
    GeneralSibling,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Descendant => write!(f, " "),
            Combinator::Child => write!(f, " > "),
            Combinator::AdjacentSibling => write!(f, " + "),
            Combinator::GeneralSibling => write!(f, " ~ "),
        }
    }
}

/// A pseudo-class with its optional argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PseudoClass {
    /// Name without the colon, as written.
    pub name: String,
    /// Parenthesized argument, if any.
    pub argument: Option<PseudoArgument>,
}

impl PseudoClass {
    /// Pseudo-classes whose argument is itself a selector list.
    const SELECTOR_ARGUMENTS: &'static [&'static str] = &[
        "not",
        "is",
        "where",
        "has",
        "matches",
        "any",
        "-moz-any",
        "-webkit-any",
        "host",
        "host-context",
        "global",
        "local",
    ];

    /// Whether `name(...)` takes a selector list argument.
    pub fn takes_selectors(name: &str) -> bool {
        Self::SELECTOR_ARGUMENTS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(name))
    }

    /// Nested selectors, when the argument is a selector list.
    pub fn selectors(&self) -> Option<&SelectorList> {
        match &self.argument {
            Some(PseudoArgument::Selectors(list)) => Some(list),
            _ => None,
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)?;
        match &self.argument {
            Some(PseudoArgument::Selectors(list)) => write!(f, "({})", list),
            Some(PseudoArgument::Raw(raw)) => write!(f, "({})", raw),
            None => Ok(()),
        }
    }
}

/// Argument of a functional pseudo-class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoArgument {
    /// `:not(.a, .b)` and friends.
    Selectors(SelectorList),
    /// Anything else (`:nth-child(2n + 1)`), as written.
    Raw(String),
}

/// Pseudo-elements that may be written with a single colon.
pub(crate) fn is_legacy_pseudo_element(name: &str) -> bool {
    ["before", "after", "first-line", "first-letter"]
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        let selector = Selector {
            nodes: vec![
                SelectorNode::new(Component::Nesting, 0),
                SelectorNode::new(Component::ClassName("primary".into()), 1),
                SelectorNode::new(Component::Combinator(Combinator::Child), 9),
                SelectorNode::new(Component::Tag("a".into()), 12),
            ],
        };
        assert_eq!(selector.to_string(), "&.primary > a");
    }

    #[test]
    fn pseudo_class_display() {
        let not = PseudoClass {
            name: "not".into(),
            argument: Some(PseudoArgument::Selectors(SelectorList {
                selectors: vec![Selector {
                    nodes: vec![SelectorNode::new(Component::ClassName("a".into()), 5)],
                }],
            })),
        };
        assert_eq!(not.to_string(), ":not(.a)");
        assert!(PseudoClass::takes_selectors("NOT"));
        assert!(!PseudoClass::takes_selectors("nth-child"));
    }

    #[test]
    fn kinds_follow_components() {
        assert_eq!(Component::Nesting.kind(), NodeKind::Nesting);
        assert_eq!(Component::Universal.kind(), NodeKind::Universal);
        assert_eq!(Component::Other("%x".into()).kind(), NodeKind::Other);
        assert!(is_legacy_pseudo_element("Before"));
        assert!(!is_legacy_pseudo_element("hover"));
    }
}
