//! Parser for FBX ASCII tokens.
//!
//! This module transforms the token stream from the [`lexer`](super::lexer)
//! into a [`Document`] node tree. Comments, whitespace and line breaks carry
//! no meaning in the format and are dropped before parsing. The public entry
//! point is [`build_document`].

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, not, opt, preceded, repeat, separated, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    document::{Attribute, AttributeValue, Document, FbxNode},
    error::{DecodeError, Diagnostic, ErrorCode},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what the parser expected
    Expected(&'static str),
    /// A `{` opened at this span was never closed
    UnclosedBlock(Span),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = ModalResult<O, ContextError<Context>>;

fn colon<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| token.token == Token::Colon)
        .void()
        .context(Context::Expected("`:` after the node name"))
        .parse_next(input)
}

fn comma<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| token.token == Token::Comma)
        .void()
        .parse_next(input)
}

fn left_brace<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        (token.token == Token::LeftBrace).then_some(token.span)
    })
    .parse_next(input)
}

fn right_brace<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        (token.token == Token::RightBrace).then_some(token.span)
    })
    .context(Context::Expected("`}`"))
    .parse_next(input)
}

fn node_name<'src>(input: &mut Input<'src>) -> IResult<(&'src str, Span)> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::Identifier(name) => Some((name, token.span)),
        _ => None,
    })
    .context(Context::Expected("node name"))
    .parse_next(input)
}

/// Parse a literal attribute: number, string or array marker.
fn literal_attribute<'src>(input: &mut Input<'src>) -> IResult<Attribute> {
    any.verify_map(|token: &PositionedToken<'_>| {
        let value = match &token.token {
            Token::Integer(value) => AttributeValue::Integer(*value),
            Token::Float(value) => AttributeValue::Float(*value),
            Token::StringLiteral(text) => AttributeValue::String(text.clone()),
            Token::ArrayLength(len) => AttributeValue::ArrayLength(*len),
            _ => return None,
        };
        Some(Attribute::new(value, token.span))
    })
    .parse_next(input)
}

/// Parse a bare word attribute.
///
/// A word followed by `:` starts the next node instead.
fn word_attribute<'src>(input: &mut Input<'src>) -> IResult<Attribute> {
    terminated(
        any.verify_map(|token: &PositionedToken<'_>| match token.token {
            Token::Identifier(word) => Some(Attribute::new(
                AttributeValue::Word(word.to_string()),
                token.span,
            )),
            _ => None,
        }),
        not(colon),
    )
    .parse_next(input)
}

fn attribute<'src>(input: &mut Input<'src>) -> IResult<Attribute> {
    alt((literal_attribute, word_attribute)).parse_next(input)
}

/// Parse `Name: attr, attr, ... [{ children }]`.
///
/// Embedded media is written as `Content: , "..."`, so a comma may precede
/// the first attribute.
fn node<'src>(input: &mut Input<'src>) -> IResult<FbxNode> {
    let (name, name_span) = node_name.parse_next(input)?;
    cut_err(colon).parse_next(input)?;

    let attributes: Vec<Attribute> =
        preceded(opt(comma), separated(0.., attribute, comma)).parse_next(input)?;
    let mut span = attributes
        .last()
        .map_or(name_span, |last| name_span.union(last.span));

    let children = match opt(left_brace).parse_next(input)? {
        Some(open) => {
            let children: Vec<FbxNode> = repeat(0.., node).parse_next(input)?;
            let close = cut_err(right_brace)
                .context(Context::UnclosedBlock(open))
                .parse_next(input)?;
            span = span.union(close);
            children
        }
        None => Vec::new(),
    };

    Ok(FbxNode::new(name, name_span, span, attributes, children))
}

fn nodes<'src>(input: &mut Input<'src>) -> IResult<Vec<FbxNode>> {
    repeat(0.., node).parse_next(input)
}

/// Describe the token at `offset`, or the end of input.
fn describe(tokens: &[PositionedToken<'_>], offset: usize) -> (String, Span) {
    match tokens.get(offset) {
        Some(token) => (token.token.to_string(), token.span),
        None => {
            let end = tokens.last().map_or(0, |token| token.span.end());
            ("end of input".to_string(), Span::new(end..end))
        }
    }
}

/// Convert a parser error into a diagnostic.
fn convert_error(
    err: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken<'_>],
    offset: usize,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };
    let (found, span) = describe(tokens, offset);

    let unclosed = context_error.context().find_map(|ctx| match ctx {
        Context::UnclosedBlock(open) => Some(*open),
        Context::Expected(_) => None,
    });
    if let Some(open) = unclosed {
        if offset >= tokens.len() {
            return Diagnostic::error("unclosed block")
                .with_code(ErrorCode::E101)
                .with_label(open, "block opened here")
                .with_help("add a matching `}`");
        }
        return Diagnostic::error(format!("unexpected token: expected `}}`, found {found}"))
            .with_code(ErrorCode::E100)
            .with_label(span, "unexpected token")
            .with_secondary_label(open, "inside this block")
            .with_help("separate attributes with `,` and start child nodes with `Name:`");
    }

    let expected = context_error
        .context()
        .find_map(|ctx| match ctx {
            Context::Expected(what) => Some(*what),
            Context::UnclosedBlock(_) => None,
        })
        .unwrap_or("node");

    Diagnostic::error(format!("unexpected token: expected {expected}, found {found}"))
        .with_code(ErrorCode::E100)
        .with_label(span, "unexpected token")
}

/// Diagnostic for a token left over after the last top-level node.
fn trailing_token(tokens: &[PositionedToken<'_>], offset: usize) -> Diagnostic {
    let (found, span) = describe(tokens, offset);
    match tokens.get(offset).map(|token| &token.token) {
        Some(Token::RightBrace) => Diagnostic::error("unmatched closing brace")
            .with_code(ErrorCode::E102)
            .with_label(span, "no block to close")
            .with_help("remove the extra `}`"),
        _ => Diagnostic::error(format!("unexpected token: expected node name, found {found}"))
            .with_code(ErrorCode::E100)
            .with_label(span, "unexpected token"),
    }
}

/// Build a document from lexed tokens.
///
/// Parsing stops at the first syntax error.
pub fn build_document(tokens: &[PositionedToken<'_>]) -> Result<Document, DecodeError> {
    let tokens: Vec<PositionedToken<'_>> = tokens
        .iter()
        .filter(|token| !token.token.is_trivia() && token.token != Token::Newline)
        .cloned()
        .collect();
    let mut slice = TokenSlice::new(&tokens);

    match nodes.parse_next(&mut slice) {
        Ok(nodes) => {
            if slice.eof_offset() > 0 {
                let offset = tokens.len() - slice.eof_offset();
                return Err(trailing_token(&tokens, offset).into());
            }
            Ok(Document::new(nodes))
        }
        Err(e) => {
            let offset = tokens.len() - slice.eof_offset();
            Err(convert_error(e, &tokens, offset).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(input: &str) -> Result<Document, DecodeError> {
        let tokens = tokenize(input).expect("Failed to tokenize input");
        build_document(&tokens)
    }

    fn first_code(input: &str) -> Option<ErrorCode> {
        parse(input).unwrap_err().diagnostics()[0].code()
    }

    #[test]
    fn test_flat_nodes() {
        let doc = parse("Version: 7400\nCreator: \"depviz\"\n").unwrap();
        assert_eq!(doc.nodes().len(), 2);
        assert_eq!(doc.nodes()[0].name(), "Version");
        assert_eq!(
            doc.nodes()[1].attribute(0).map(|a| &a.value),
            Some(&AttributeValue::String("depviz".to_string()))
        );
    }

    #[test]
    fn test_nested_blocks() {
        let doc = parse(
            r#"
Objects:  {
    Model: 1, "Model::Cube", "Mesh" {
        Version: 232
    }
}
"#,
        )
        .unwrap();
        let objects = doc.node("Objects").unwrap();
        assert!(objects.attributes().is_empty());
        let model = objects.child("Model").unwrap();
        assert_eq!(model.attributes().len(), 3);
        assert_eq!(model.children().len(), 1);
    }

    #[test]
    fn test_node_without_attributes_before_next_node() {
        let doc = parse("Takes:\nCurrent: \"\"\n").unwrap();
        assert_eq!(doc.nodes().len(), 2);
        assert!(doc.nodes()[0].attributes().is_empty());
    }

    #[test]
    fn test_word_attributes() {
        let doc = parse("Shading: T\nCulling: \"CullingOff\"").unwrap();
        assert_eq!(
            doc.nodes()[0].attribute(0).map(|a| &a.value),
            Some(&AttributeValue::Word("T".to_string()))
        );
        assert_eq!(doc.nodes()[1].name(), "Culling");
    }

    #[test]
    fn test_attributes_continue_across_lines() {
        let doc = parse("Vertices: *4 {\n\ta: 1,2,\n3,4\n}").unwrap();
        let a = doc.nodes()[0].child("a").unwrap();
        assert_eq!(a.attributes().len(), 4);
        assert_eq!(
            doc.nodes()[0].attribute(0).map(|a| &a.value),
            Some(&AttributeValue::ArrayLength(4))
        );
    }

    #[test]
    fn test_leading_comma_before_embedded_content() {
        let doc = parse(
            "Video: 800, \"Video::Skin\", \"Clip\" {\n\tType: \"Clip\"\n\tContent: , \"iVBORw0KGgo=\"\n}",
        )
        .unwrap();
        let content = doc.nodes()[0].child("Content").unwrap();
        assert_eq!(content.attributes().len(), 1);
        assert_eq!(
            content.attribute(0).map(|a| &a.value),
            Some(&AttributeValue::String("iVBORw0KGgo=".to_string()))
        );
    }

    #[test]
    fn test_double_comma_is_rejected() {
        assert_eq!(first_code("Content: , , \"x\"\n"), Some(ErrorCode::E100));
    }

    #[test]
    fn test_comments_are_ignored() {
        let doc = parse("; header\nVersion: 1 ; trailing\n").unwrap();
        assert_eq!(doc.nodes().len(), 1);
    }

    #[test]
    fn test_node_span() {
        let doc = parse("A: 1 {\n}").unwrap();
        assert_eq!(doc.nodes()[0].span(), Span::new(0..8));
        assert_eq!(doc.nodes()[0].name_span(), Span::new(0..1));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").unwrap().nodes().is_empty());
        assert!(parse("; only a comment\n").unwrap().nodes().is_empty());
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(first_code("Objects {\n}"), Some(ErrorCode::E100));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("Objects: {\n  Model: 1 {\n").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E101));
        // Innermost block is reported.
        assert_eq!(diag.labels()[0].span(), Span::new(22..23));
    }

    #[test]
    fn test_unmatched_closing_brace() {
        assert_eq!(first_code("Version: 1\n}"), Some(ErrorCode::E102));
    }

    #[test]
    fn test_stray_token_in_block() {
        assert_eq!(first_code("A: {\n 1 }"), Some(ErrorCode::E100));
    }
}
