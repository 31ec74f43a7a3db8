//! Selector parser using the `cssparser` tokenizer.
//!
//! The grammar is deliberately loose: it accepts the SCSS additions (`&`,
//! `%placeholder`, `#{...}` interpolation) and keeps anything it does not
//! recognise as an [`Component::Other`] node instead of failing. Only
//! structurally broken selectors are rejected.

use cssparser::{ParseError as CssParseError, ParseErrorKind, Parser, ParserInput, Token};

use super::types::{
    Combinator, Component, PseudoArgument, PseudoClass, Selector, SelectorList, SelectorNode,
    is_legacy_pseudo_element,
};
use crate::logging::targets;
use crate::{Error, Result};

type SelectorError<'i> = CssParseError<'i, &'static str>;

/// Parse a selector list such as `"&.active, .parent > a"`.
///
/// Node `source_index` values are byte offsets into `text`.
///
/// # Example
///
/// ```
/// use horizon_stylelint_core::selector::{parse_selector_list, NodeKind};
///
/// let list = parse_selector_list(".a > &-b").unwrap();
/// let kinds: Vec<_> = list.walk().map(|n| n.kind()).collect();
/// assert_eq!(
///     kinds,
///     [NodeKind::ClassName, NodeKind::Combinator, NodeKind::Nesting, NodeKind::Tag]
/// );
/// ```
pub fn parse_selector_list(text: &str) -> Result<SelectorList> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    let list = parse_list(&mut parser).map_err(|e| {
        let message = match e.kind {
            ParseErrorKind::Custom(message) => message.to_string(),
            ParseErrorKind::Basic(kind) => format!("{:?}", kind),
        };
        Error::invalid_selector(text.trim(), message)
    })?;

    tracing::trace!(
        target: targets::SELECTOR,
        selectors = list.selectors.len(),
        "parsed selector list"
    );
    Ok(list)
}

/// Parse comma separated selectors until the parser is exhausted.
fn parse_list<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<SelectorList, SelectorError<'i>> {
    let mut selectors = vec![];
    let mut nodes: Vec<SelectorNode> = vec![];
    // Start of whitespace that may turn into a descendant combinator.
    let mut pending_whitespace: Option<usize> = None;

    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        let component = match token {
            Token::WhiteSpace(_) => {
                let after_compound = nodes
                    .last()
                    .is_some_and(|n| !matches!(n.component, Component::Combinator(_)));
                if after_compound && pending_whitespace.is_none() {
                    pending_whitespace = Some(start.byte_index());
                }
                continue;
            }

            Token::Comma => {
                if nodes.is_empty() {
                    return Err(parser.new_custom_error("Empty selector in list"));
                }
                selectors.push(Selector {
                    nodes: std::mem::take(&mut nodes),
                });
                pending_whitespace = None;
                continue;
            }

            Token::Delim('>') => Component::Combinator(Combinator::Child),
            Token::Delim('+') => Component::Combinator(Combinator::AdjacentSibling),
            Token::Delim('~') => Component::Combinator(Combinator::GeneralSibling),

            Token::Delim('&') => Component::Nesting,
            Token::Delim('*') => Component::Universal,

            Token::Delim('.') => {
                let name_start = parser.position();
                match parser.next_including_whitespace().cloned() {
                    Ok(Token::Ident(_)) => {}
                    Ok(Token::Delim('#')) if skip_interpolation_block(parser) => {}
                    _ => return Err(parser.new_custom_error("Expected class name after '.'")),
                }
                skip_interpolated_tail(parser);
                Component::ClassName(parser.slice_from(name_start).to_string())
            }

            Token::Delim('%') => {
                match parser.next_including_whitespace().cloned() {
                    Ok(Token::Ident(_)) => {}
                    Ok(Token::Delim('#')) if skip_interpolation_block(parser) => {}
                    _ => return Err(parser.new_custom_error("Expected placeholder name after '%'")),
                }
                skip_interpolated_tail(parser);
                Component::Other(parser.slice_from(start).to_string())
            }

            Token::Ident(_) => {
                skip_interpolated_tail(parser);
                Component::Tag(parser.slice_from(start).to_string())
            }

            Token::IDHash(_) => {
                skip_interpolated_tail(parser);
                let raw = parser.slice_from(start);
                Component::Identifier(raw[1..].to_string())
            }

            Token::Delim('#') => {
                skip_interpolation_block(parser);
                skip_interpolated_tail(parser);
                Component::Other(parser.slice_from(start).to_string())
            }

            Token::SquareBracketBlock => {
                skip_block(parser);
                let raw = parser.slice_from(start);
                let inner = raw
                    .strip_prefix('[')
                    .map(|r| r.strip_suffix(']').unwrap_or(r))
                    .unwrap_or(raw);
                Component::Attribute(inner.trim().to_string())
            }

            Token::Colon => parse_pseudo(parser)?,

            Token::ParenthesisBlock
            | Token::CurlyBracketBlock
            | Token::Function(_) => {
                skip_block(parser);
                Component::Other(parser.slice_from(start).to_string())
            }

            _ => Component::Other(parser.slice_from(start).to_string()),
        };

        let is_combinator = matches!(component, Component::Combinator(_));
        if let Some(ws_start) = pending_whitespace.take()
            && !is_combinator
        {
            nodes.push(SelectorNode::new(
                Component::Combinator(Combinator::Descendant),
                ws_start,
            ));
        }
        nodes.push(SelectorNode::new(component, start.byte_index()));
    }

    if nodes.is_empty() {
        let message = if selectors.is_empty() {
            "Empty selector"
        } else {
            "Trailing comma in selector list"
        };
        return Err(parser.new_custom_error(message));
    }
    selectors.push(Selector { nodes });

    Ok(SelectorList { selectors })
}

/// Parse what follows a `:`.
fn parse_pseudo<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Component, SelectorError<'i>> {
    match parser.next_including_whitespace().cloned() {
        Ok(Token::Colon) => match parser.next_including_whitespace().cloned() {
            Ok(Token::Ident(name)) => Ok(Component::PseudoElement(name.to_string())),
            Ok(Token::Function(name)) => {
                skip_block(parser);
                Ok(Component::PseudoElement(name.to_string()))
            }
            _ => Err(parser.new_custom_error("Expected pseudo-element name after '::'")),
        },

        Ok(Token::Ident(name)) if is_legacy_pseudo_element(&name) => {
            Ok(Component::PseudoElement(name.to_string()))
        }

        Ok(Token::Ident(name)) => Ok(Component::PseudoClass(PseudoClass {
            name: name.to_string(),
            argument: None,
        })),

        Ok(Token::Function(name)) => {
            let argument = if PseudoClass::takes_selectors(&name) {
                let list = parser.parse_nested_block(|inner| parse_list(inner))?;
                PseudoArgument::Selectors(list)
            } else {
                let raw = parser.parse_nested_block(|inner| {
                    let start = inner.position();
                    while inner.next_including_whitespace().is_ok() {}
                    Ok::<_, SelectorError<'_>>(inner.slice_from(start).trim().to_string())
                })?;
                PseudoArgument::Raw(raw)
            };
            Ok(Component::PseudoClass(PseudoClass {
                name: name.to_string(),
                argument: Some(argument),
            }))
        }

        _ => Err(parser.new_custom_error("Expected pseudo-class name after ':'")),
    }
}

/// Consume the contents of the block whose opening token was just read.
fn skip_block(parser: &mut Parser<'_, '_>) {
    let _ = parser.parse_nested_block(|p| {
        while p.next_including_whitespace().is_ok() {}
        Ok::<_, CssParseError<'_, ()>>(())
    });
}

/// After a `#`, consume a `{...}` interpolation block if one follows.
fn skip_interpolation_block(parser: &mut Parser<'_, '_>) -> bool {
    let state = parser.state();
    if matches!(
        parser.next_including_whitespace().cloned(),
        Ok(Token::CurlyBracketBlock)
    ) {
        skip_block(parser);
        true
    } else {
        parser.reset(&state);
        false
    }
}

/// Consume `#{...}` interpolations glued to the end of a name, along with
/// the name characters that follow them (`a-#{$b}-c`).
fn skip_interpolated_tail(parser: &mut Parser<'_, '_>) {
    loop {
        let state = parser.state();
        match parser.next_including_whitespace().cloned() {
            Ok(Token::Delim('#')) if skip_interpolation_block(parser) => {
                let state = parser.state();
                match parser.next_including_whitespace().cloned() {
                    Ok(Token::Ident(_) | Token::Number { .. } | Token::Dimension { .. }) => {}
                    _ => parser.reset(&state),
                }
            }
            _ => {
                parser.reset(&state);
                return;
            }
        }
    }
}
