use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Pos, Spanned, Token, TokenStream},
        parser::{binary::parse_expression, statement::parse_statement},
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program: top-level statements until the input ends.
///
/// This is the parsing entry point. Lexing happens lazily while tokens are
/// pulled, so lexical errors surface here as well.
///
/// # Parameters
/// - `stream`: Token stream over the source text.
///
/// # Returns
/// The parsed [`Program`].
///
/// # Errors
/// Returns the first [`ParseError`] in the input.
pub fn parse_program(stream: &mut TokenStream) -> ParseResult<Program> {
    let mut statements = Vec::new();
    while stream.peek()?.is_some() {
        statements.push(parse_statement(stream)?);
    }
    Ok(Program { statements })
}

/// Consumes the next token, requiring it to equal `expected`.
///
/// # Parameters
/// - `stream`: Token stream positioned at the required token.
/// - `expected`: The exact token the grammar requires here.
/// - `description`: Human form of the requirement for the diagnostic.
///
/// # Errors
/// Returns a `ParseError` if the next token differs or the input ends.
pub(in crate::interpreter::parser) fn expect(stream: &mut TokenStream,
                                             expected: &Token,
                                             description: &str)
                                             -> ParseResult<Spanned> {
    match stream.next()? {
        Some(spanned) if spanned.token == *expected => Ok(spanned),
        Some(spanned) => Err(ParseError::UnexpectedToken { expected: description.to_string(),
                                                           found:    format!("{:?}",
                                                                             spanned.token),
                                                           pos:      spanned.pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: description.to_string(),
                                                       pos:      stream.pos(), }),
    }
}

/// Consumes the next token, requiring an identifier, and returns its name
/// together with its position.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends.
pub(in crate::interpreter::parser) fn expect_identifier(stream: &mut TokenStream)
                                                        -> ParseResult<(String, Pos)> {
    match stream.next()? {
        Some(Spanned { token: Token::Identifier(name),
                       pos, }) => Ok((name, pos)),
        Some(spanned) => Err(ParseError::UnexpectedToken { expected: "an identifier".to_string(),
                                                           found:    format!("{:?}",
                                                                             spanned.token),
                                                           pos:      spanned.pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "an identifier".to_string(),
                                                       pos:      stream.pos(), }),
    }
}

/// Parses a parenthesised, comma-separated argument list.
///
/// Shared by call statements and call expressions. An immediately closed
/// list `()` is empty.
///
/// Grammar: `arguments := "(" [ expression { "," expression } ] ")"`
///
/// # Errors
/// Returns a `ParseError` if an argument fails to parse or the list is not
/// closed.
pub(in crate::interpreter::parser) fn parse_call_arguments(stream: &mut TokenStream)
                                                           -> ParseResult<Vec<Expr>> {
    expect(stream, &Token::LParen, "'('")?;

    let mut arguments = Vec::new();
    if let Some(spanned) = stream.peek()?
       && spanned.token == Token::RParen
    {
        stream.next()?;
        return Ok(arguments);
    }
    loop {
        arguments.push(parse_expression(stream)?);
        match stream.next()? {
            Some(Spanned { token: Token::Comma, .. }) => {},
            Some(Spanned { token: Token::RParen, .. }) => break,
            Some(spanned) => {
                return Err(ParseError::UnexpectedToken { expected: "',' or ')'".to_string(),
                                                         found:    format!("{:?}",
                                                                           spanned.token),
                                                         pos:      spanned.pos, });
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "',' or ')'".to_string(),
                                                              pos:      stream.pos(), });
            },
        }
    }
    Ok(arguments)
}
