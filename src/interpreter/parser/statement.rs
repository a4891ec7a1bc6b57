use crate::{
    ast::{FunctionDef, Stmt},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token, TokenStream},
        parser::{
            binary::parse_expression,
            core::{ParseResult, expect, expect_identifier, parse_call_arguments},
        },
        value::timedelta::TimeUnit,
    },
};

/// Parses a single top-level statement.
///
/// Function definitions are only legal here; every other statement is
/// shared with block bodies and parsed by [`parse_nested_statement`].
///
/// # Parameters
/// - `stream`: Token stream positioned at the statement's first token.
///
/// # Returns
/// A parsed [`Stmt`] node.
///
/// # Errors
/// Returns a `ParseError` when no statement can start here.
pub fn parse_statement(stream: &mut TokenStream) -> ParseResult<Stmt> {
    if let Some(spanned) = stream.peek()?
       && spanned.token == Token::Fun
    {
        return parse_function_definition(stream);
    }
    parse_nested_statement(stream)
}

/// Parses a statement that may appear inside a block body.
///
/// The statement's first token decides the production:
/// - `var` starts a variable definition,
/// - `if`, `from`, `print`, `return` start their keyword statements,
/// - an identifier starts a call statement or an assignment.
///
/// # Errors
/// Returns a `ParseError` when no statement can start here.
pub fn parse_nested_statement(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let Some(spanned) = stream.peek()? else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "a statement".to_string(),
                                                      pos:      stream.pos(), });
    };

    match &spanned.token {
        Token::Var => parse_variable_definition(stream),
        Token::If => parse_if(stream),
        Token::From => parse_from(stream),
        Token::Print => parse_print(stream),
        Token::Return => parse_return(stream),
        Token::Identifier(_) => parse_identifier_first(stream),
        other => Err(ParseError::UnexpectedToken { expected: "a statement".to_string(),
                                                   found:    format!("{other:?}"),
                                                   pos:      spanned.pos, }),
    }
}

/// Parses a function definition:
///
///     fun <name>(<param>, ...) { <statements> }
///
/// The parameter list may be empty. The definition's body is an ordinary
/// block; nested function definitions are not part of the grammar.
///
/// # Errors
/// Returns a `ParseError` when the header or body is malformed.
fn parse_function_definition(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let keyword = expect(stream, &Token::Fun, "'fun'")?;
    let (name, _) = expect_identifier(stream)?;
    let params = parse_parameter_declaration(stream)?;
    let body = parse_body(stream)?;

    Ok(Stmt::Function(FunctionDef { name,
                                    params,
                                    body,
                                    pos: keyword.pos }))
}

/// Parses a parenthesised, comma-separated list of parameter names. An
/// immediately closed list `()` is empty.
fn parse_parameter_declaration(stream: &mut TokenStream) -> ParseResult<Vec<String>> {
    expect(stream, &Token::LParen, "'('")?;

    let mut params = Vec::new();
    if let Some(spanned) = stream.peek()?
       && spanned.token == Token::RParen
    {
        stream.next()?;
        return Ok(params);
    }
    loop {
        let (name, _) = expect_identifier(stream)?;
        params.push(name);
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
    Ok(params)
}

/// Parses a brace-delimited statement list.
///
/// Grammar: `body := "{" { statement } "}"`
///
/// # Errors
/// Returns a `ParseError` when the braces are missing or a contained
/// statement is malformed.
pub(in crate::interpreter::parser) fn parse_body(stream: &mut TokenStream)
                                                 -> ParseResult<Vec<Stmt>> {
    expect(stream, &Token::LBrace, "'{'")?;

    let mut statements = Vec::new();
    loop {
        match stream.peek()? {
            Some(spanned) if spanned.token == Token::RBrace => {
                stream.next()?;
                return Ok(statements);
            },
            Some(_) => statements.push(parse_nested_statement(stream)?),
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "'}'".to_string(),
                                                              pos:      stream.pos(), });
            },
        }
    }
}

/// Parses a variable definition with optional initializer:
///
///     var <name>
///     var <name> = <expression>
fn parse_variable_definition(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let keyword = expect(stream, &Token::Var, "'var'")?;
    let (name, _) = expect_identifier(stream)?;

    let init = if let Some(spanned) = stream.peek()?
                  && spanned.token == Token::Equals
    {
        stream.next()?;
        Some(parse_expression(stream)?)
    } else {
        None
    };

    Ok(Stmt::VarDef { name,
                      init,
                      pos: keyword.pos })
}

/// Parses an `if` statement with optional `else`:
///
///     if <expression> { ... }
///     if <expression> { ... } else { ... }
fn parse_if(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let keyword = expect(stream, &Token::If, "'if'")?;
    let condition = parse_expression(stream)?;
    let then_body = parse_body(stream)?;

    let else_body = if let Some(spanned) = stream.peek()?
                       && spanned.token == Token::Else
    {
        stream.next()?;
        Some(parse_body(stream)?)
    } else {
        None
    };

    Ok(Stmt::If { condition,
                  then_body,
                  else_body,
                  pos: keyword.pos })
}

/// Parses a `from` statement:
///
///     from <expression> to <expression> by <unit> as <name> { ... }
fn parse_from(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let keyword = expect(stream, &Token::From, "'from'")?;
    let start = parse_expression(stream)?;
    expect(stream, &Token::To, "'to'")?;
    let end = parse_expression(stream)?;
    expect(stream, &Token::By, "'by'")?;
    let step = parse_time_unit(stream)?;
    expect(stream, &Token::As, "'as'")?;
    let (iterator, _) = expect_identifier(stream)?;
    let body = parse_body(stream)?;

    Ok(Stmt::From { start,
                    end,
                    step,
                    iterator,
                    body,
                    pos: keyword.pos })
}

/// Parses one of the seven time-unit keywords.
fn parse_time_unit(stream: &mut TokenStream) -> ParseResult<TimeUnit> {
    match stream.next()? {
        Some(spanned) => spanned.token.time_unit().ok_or_else(|| {
                             ParseError::UnexpectedToken {
                                 expected: "a time unit".to_string(),
                                 found: format!("{:?}", spanned.token),
                                 pos: spanned.pos,
                             }
                         }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "a time unit".to_string(),
                                                       pos:      stream.pos(), }),
    }
}

/// Parses a `print` statement.
fn parse_print(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let keyword = expect(stream, &Token::Print, "'print'")?;
    let expr = parse_expression(stream)?;

    Ok(Stmt::Print { expr,
                     pos: keyword.pos })
}

/// Parses a `return` statement. The returned expression is mandatory.
fn parse_return(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let keyword = expect(stream, &Token::Return, "'return'")?;
    let expr = parse_expression(stream)?;

    Ok(Stmt::Return { expr,
                      pos: keyword.pos })
}

/// Parses a statement that begins with an identifier.
///
/// The token after the identifier disambiguates:
/// - `(` makes it a call statement,
/// - `=` makes it an assignment,
/// - anything else is a syntax error.
fn parse_identifier_first(stream: &mut TokenStream) -> ParseResult<Stmt> {
    let (name, pos) = expect_identifier(stream)?;

    match stream.peek()? {
        Some(spanned) if spanned.token == Token::LParen => {
            let arguments = parse_call_arguments(stream)?;
            Ok(Stmt::Call { name, arguments, pos })
        },
        Some(spanned) if spanned.token == Token::Equals => {
            stream.next()?;
            let expr = parse_expression(stream)?;
            Ok(Stmt::Assign { name, expr, pos })
        },
        Some(spanned) => Err(ParseError::UnexpectedToken { expected: "'(' or '='".to_string(),
                                                           found:    format!("{:?}",
                                                                             spanned.token),
                                                           pos:      spanned.pos, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "'(' or '='".to_string(),
                                                       pos:      stream.pos(), }),
    }
}
