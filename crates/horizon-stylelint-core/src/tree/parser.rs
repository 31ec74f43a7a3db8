//! Stylesheet tree builder using cssparser.
//!
//! SCSS is not CSS, but once `//` comments are blanked out the cssparser
//! tokenizer copes with it well enough to recover statement boundaries:
//! nested rules, at-rules with or without blocks, declarations, and `#{}`
//! interpolation all come out as balanced token runs.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use super::node::{AtRule, Declaration, NodeData, NodeId, Rule, Stylesheet};
use crate::comments::blank_line_comments;
use crate::logging::targets;
use crate::source::Span;

/// How a statement prelude ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// A `{` block follows. The parser sits just inside it.
    Block,
    Semicolon,
    Eof,
}

/// Parse SCSS or CSS text into a [`Stylesheet`].
///
/// Parsing never fails. Statements that cannot be classified are logged via
/// `tracing::warn!` and skipped, and an unterminated block simply ends at
/// the end of input.
///
/// # Example
///
/// ```
/// use horizon_stylelint_core::tree::parse_stylesheet;
///
/// let sheet = parse_stylesheet(".a { &-b { color: red; } }");
/// let selectors: Vec<_> = sheet.rules().map(|(_, r)| r.selector.as_str()).collect();
/// assert_eq!(selectors, [".a", "&-b"]);
/// ```
pub fn parse_stylesheet(source: &str) -> Stylesheet {
    let text = blank_line_comments(source);
    let mut sheet = Stylesheet::new(text.len());
    let root = sheet.root();

    let mut input = ParserInput::new(&text);
    let mut parser = Parser::new(&mut input);
    parse_block(&mut parser, &text, &mut sheet, root);

    tracing::debug!(
        target: targets::TREE,
        bytes = text.len(),
        nodes = sheet.len(),
        "parsed stylesheet"
    );
    sheet
}

/// Parse the statements of one block (or of the whole input) under `parent`.
fn parse_block(parser: &mut Parser<'_, '_>, text: &str, sheet: &mut Stylesheet, parent: NodeId) {
    loop {
        parser.skip_whitespace();
        let start = parser.position().byte_index();
        let state = parser.state();

        match parser.next().cloned() {
            Err(_) => break,
            Ok(Token::Semicolon) => {}
            Ok(Token::CloseCurlyBracket) => {
                tracing::warn!(target: targets::TREE, offset = start, "unmatched '}}'");
            }
            Ok(Token::AtKeyword(name)) => {
                parse_at_rule(parser, text, sheet, parent, start, name.to_string());
            }
            Ok(_) => {
                parser.reset(&state);
                parse_statement(parser, text, sheet, parent, start);
            }
        }
    }
}

fn parse_at_rule(
    parser: &mut Parser<'_, '_>,
    text: &str,
    sheet: &mut Stylesheet,
    parent: NodeId,
    start: usize,
    name: String,
) {
    let params_start = parser.position().byte_index();
    let (end, terminator) = read_prelude(parser);
    let has_block = terminator == Terminator::Block;
    let at_rule = AtRule {
        params: text[params_start..end].trim().to_string(),
        name,
        has_block,
    };

    tracing::trace!(target: targets::TREE, name = %at_rule.name, offset = start, "at-rule");
    let id = sheet.append(parent, NodeData::AtRule(at_rule), Span::new(start, end));
    if has_block {
        parse_children(parser, text, sheet, id);
    }
}

/// Parse a rule or a declaration starting at `start`.
fn parse_statement(
    parser: &mut Parser<'_, '_>,
    text: &str,
    sheet: &mut Stylesheet,
    parent: NodeId,
    start: usize,
) {
    let (end, terminator) = read_prelude(parser);
    let prelude = &text[start..end];

    match terminator {
        Terminator::Block => {
            if prelude.is_empty() {
                tracing::warn!(target: targets::TREE, offset = start, "block without a selector");
                skip_nested(parser);
                return;
            }

            match split_declaration(prelude) {
                // --name: { ... }
                Some((prop, _)) if prop.starts_with("--") => {
                    let value_start = parser.position().byte_index().saturating_sub(1);
                    skip_nested(parser);
                    let value_end = parser.position().byte_index();
                    let declaration = Declaration {
                        prop: prop.to_string(),
                        value: text[value_start..value_end].to_string(),
                    };
                    sheet.append(
                        parent,
                        NodeData::Declaration(declaration),
                        Span::new(start, value_end),
                    );
                }
                // font: { family: x; }
                Some((prop, value)) if value.is_empty() => {
                    let declaration = Declaration {
                        prop: prop.to_string(),
                        value: String::new(),
                    };
                    let id = sheet.append(
                        parent,
                        NodeData::Declaration(declaration),
                        Span::new(start, end),
                    );
                    parse_children(parser, text, sheet, id);
                }
                _ => {
                    let rule = Rule {
                        selector: prelude.to_string(),
                    };
                    let id = sheet.append(parent, NodeData::Rule(rule), Span::new(start, end));
                    parse_children(parser, text, sheet, id);
                }
            }
        }
        Terminator::Semicolon | Terminator::Eof => match split_declaration(prelude) {
            Some((prop, value)) => {
                let declaration = Declaration {
                    prop: prop.to_string(),
                    value: value.to_string(),
                };
                sheet.append(
                    parent,
                    NodeData::Declaration(declaration),
                    Span::new(start, end),
                );
            }
            None if prelude.is_empty() => {}
            None => {
                tracing::warn!(
                    target: targets::TREE,
                    offset = start,
                    statement = prelude,
                    "skipping statement that is neither a rule nor a declaration"
                );
            }
        },
    }
}

/// Parse the block the parser sits in as children of `id`, then extend the
/// node's span past the closing brace.
fn parse_children(parser: &mut Parser<'_, '_>, text: &str, sheet: &mut Stylesheet, id: NodeId) {
    let result = parser.parse_nested_block(|block| {
        parse_block(block, text, sheet, id);
        Ok::<_, CssParseError<'_, ()>>(())
    });
    if let Err(e) = result {
        tracing::warn!(target: targets::TREE, "failed to parse block: {:?}", e);
    }
    sheet.set_end(id, parser.position().byte_index());
}

/// Consume tokens up to a `;`, a `{` block, or the end of input.
///
/// Returns the end of the last significant token, so the prelude is
/// `text[start..end]` without trailing whitespace or comments. Nested
/// brackets are skipped whole, and a `{}` block glued to `#` is treated as
/// interpolation rather than the statement's body.
fn read_prelude(parser: &mut Parser<'_, '_>) -> (usize, Terminator) {
    let mut end = parser.position().byte_index();
    let mut after_hash = false;

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => return (end, Terminator::Eof),
        };

        match token {
            Token::Semicolon => return (end, Terminator::Semicolon),
            Token::CurlyBracketBlock if !after_hash => return (end, Terminator::Block),
            Token::CurlyBracketBlock
            | Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock => {
                skip_nested(parser);
                end = parser.position().byte_index();
            }
            Token::WhiteSpace(_) => {}
            _ => end = parser.position().byte_index(),
        }
        after_hash = matches!(token, Token::Delim('#'));
    }
}

/// Skip the rest of the block the parser just entered.
fn skip_nested(parser: &mut Parser<'_, '_>) {
    let _ = parser.parse_nested_block(|block| {
        while block.next_including_whitespace_and_comments().is_ok() {}
        Ok::<_, CssParseError<'_, ()>>(())
    });
}

/// Split `prop: value` at the first colon.
fn split_declaration(prelude: &str) -> Option<(&str, &str)> {
    let (prop, value) = prelude.split_once(':')?;
    let prop = prop.trim();
    if prop.is_empty() || prop.contains(char::is_whitespace) {
        return None;
    }
    Some((prop, value.trim()))
}
