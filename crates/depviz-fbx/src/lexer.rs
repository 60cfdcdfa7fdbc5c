//! Lexical analyzer for FBX ASCII documents.
//!
//! [`tokenize`] turns FBX text into [`Token`]s: `;` comments, node names
//! and bare words, quoted strings, numbers, `*N` array markers and the four
//! punctuation characters. Newlines are kept because they end a node header.

use log::trace;
use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, cut_err, peek, preceded, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_till, take_while},
};

use crate::{
    error::{DecodeError, Diagnostic, ErrorCode},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Diagnostic context attached to lexer failures with `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// Offset where the failing token started; the label runs to the error.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Parse a double-quoted string.
///
/// FBX strings have no escape sequences; a literal quote is written as
/// `&quot;`. Strings never span lines.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        '"',
        cut_err(terminated(take_till(0.., ['"', '\n']), '"')).context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add the closing `\"` before the end of the line"),
            start,
        }),
    )
    .map(|content: &str| Token::StringLiteral(content.replace("&quot;", "\"")))
    .parse_next(input)
}

/// Raw text of a numeric token: a sign, digit or dot followed by number characters.
fn number_text<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    preceded(
        peek(one_of(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))),
        take_while(1.., |c: char| {
            c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
        }),
    )
    .parse_next(input)
}

/// Parse an integer or floating point number.
///
/// Integers must fit in an `i64`, which covers every FBX object id.
fn number<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();
    let checkpoint = input.checkpoint();
    let text = number_text(input)?;

    if let Ok(value) = text.parse::<i64>() {
        return Ok(Token::Integer(value));
    }
    if let Ok(value) = text.parse::<f64>() {
        return Ok(Token::Float(value));
    }

    Err(ErrMode::Cut(ContextError::new().add_context(
        input,
        &checkpoint,
        LexerDiagnostic {
            code: ErrorCode::E003,
            message: "invalid number literal",
            help: Some("integers must fit in 64 bits; floats look like `1.5` or `-2e-3`"),
            start,
        },
    )))
}

/// Parse an array length marker such as `*24`.
fn array_length<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        '*',
        cut_err(digit1.try_map(|digits: &str| digits.parse::<usize>())).context(
            LexerDiagnostic {
                code: ErrorCode::E004,
                message: "invalid array length",
                help: Some("array markers look like `*24`"),
                start,
            },
        ),
    )
    .map(Token::ArrayLength)
    .parse_next(input)
}

/// Parse a `;` comment up to the end of the line.
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded(';', take_till(0.., '\n'))
        .map(Token::Comment)
        .parse_next(input)
}

/// Parse node names and bare words.
fn identifier<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .verify(|s: &str| {
            s.chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        })
        .map(Token::Identifier)
        .parse_next(input)
}

/// `:`, `,`, `{` and `}`.
fn single_char_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        ':'.value(Token::Colon),
        ','.value(Token::Comma),
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
    ))
    .parse_next(input)
}

/// Parse whitespace (spaces, tabs, carriage returns but not newlines)
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// The next token and the span it covers.
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        line_comment,
        string_literal,
        array_length,
        number,
        identifier,
        single_char_token,
        newline, // Must come before whitespace
        whitespace,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Turn a failed token parse at `error_pos` into a diagnostic.
///
/// Errors without a diagnostic context are unexpected characters (E002).
fn to_diagnostic(err: ErrMode<ContextError<LexerDiagnostic>>, error_pos: usize) -> Diagnostic {
    let context = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    match context.context().next() {
        Some(ctx) => {
            let diag = Diagnostic::error(ctx.message)
                .with_code(ctx.code)
                .with_label(Span::new(ctx.start..error_pos), ctx.code.description());
            match ctx.help {
                Some(help) => diag.with_help(help),
                None => diag,
            }
        }
        None => Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(
                Span::new(error_pos..error_pos + 1),
                ErrorCode::E002.description(),
            ),
    }
}

/// Tokenize FBX ASCII text.
///
/// Lexing resumes one character past each error, so the returned
/// [`DecodeError`] lists every lexical problem in the document.
pub fn tokenize(source: &str) -> Result<Vec<PositionedToken<'_>>, DecodeError> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    while !input.is_empty() {
        match positioned_token(&mut input) {
            Ok(token) => tokens.push(token),
            Err(err) => {
                let error_pos = input.current_token_start();
                diagnostics.push(to_diagnostic(err, error_pos));
                if !input.is_empty() {
                    input.next_token();
                }
            }
        }
    }

    trace!(tokens = tokens.len(), errors = diagnostics.len(); "Tokenized document");
    DecodeError::check(diagnostics).map(|()| tokens)
}
