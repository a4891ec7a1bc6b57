use crate::{
    ast::{Expr, Literal, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenStream},
        parser::{
            binary::parse_expression,
            core::{ParseResult, parse_call_arguments},
        },
    },
};

/// Parses a unary expression.
///
/// The rule is: `unary := ["!" | "-"] postfix`
///
/// The operand is a postfix expression, not another unary expression, so
/// unary operators cannot stack: `--x` and `!!x` are syntax errors.
///
/// # Parameters
/// - `stream`: Token stream positioned at the expression's first token.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// Propagates errors from the operand.
pub fn parse_unary(stream: &mut TokenStream) -> ParseResult<Expr> {
    let op = match stream.peek()? {
        Some(spanned) if spanned.token == Token::Minus => Some((UnaryOperator::Negate,
                                                                spanned.pos)),
        Some(spanned) if spanned.token == Token::Bang => Some((UnaryOperator::Not, spanned.pos)),
        _ => None,
    };

    if let Some((op, pos)) = op {
        stream.next()?;
        let operand = parse_postfix(stream)?;
        return Ok(Expr::Unary { op,
                                operand: Box::new(operand),
                                pos });
    }

    parse_postfix(stream)
}

/// Parses an atom with an optional single field access.
///
/// The rule is: `postfix := atom ["." time_unit]`
fn parse_postfix(stream: &mut TokenStream) -> ParseResult<Expr> {
    let base = parse_atom(stream)?;

    if let Some(spanned) = stream.peek()?
       && spanned.token == Token::Dot
    {
        stream.next()?;
        let field = match stream.next()? {
            Some(spanned) => spanned.token.time_unit().ok_or_else(|| {
                                 ParseError::UnexpectedToken {
                                     expected: "a field name".to_string(),
                                     found: format!("{:?}", spanned.token),
                                     pos: spanned.pos,
                                 }
                             })?,
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "a field name"
                                                                        .to_string(),
                                                              pos:      stream.pos(), });
            },
        };
        let pos = base.pos();
        return Ok(Expr::FieldAccess { base: Box::new(base),
                                      field,
                                      pos });
    }

    Ok(base)
}

/// Parses the tightest-binding expression forms.
///
/// The rule is:
/// `atom := literal | identifier | identifier arguments | "(" expression ")"`
fn parse_atom(stream: &mut TokenStream) -> ParseResult<Expr> {
    let Some(spanned) = stream.next()? else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "a value".to_string(),
                                                      pos:      stream.pos(), });
    };
    let pos = spanned.pos;

    match spanned.token {
        Token::Number(value) => Ok(Expr::Literal { value: Literal::Number(value),
                                                   pos }),
        Token::String(value) => Ok(Expr::Literal { value: Literal::String(value),
                                                   pos }),
        Token::Date(value) => Ok(Expr::Literal { value: Literal::Date(value),
                                                 pos }),
        Token::Time(value) => Ok(Expr::Literal { value: Literal::Time(value),
                                                 pos }),
        Token::Datetime(value) => Ok(Expr::Literal { value: Literal::Datetime(value),
                                                     pos }),
        Token::Timedelta(value) => Ok(Expr::Literal { value: Literal::Timedelta(value),
                                                      pos }),
        Token::Identifier(name) => {
            if let Some(next) = stream.peek()?
               && next.token == Token::LParen
            {
                let arguments = parse_call_arguments(stream)?;
                return Ok(Expr::Call { name, arguments, pos });
            }
            Ok(Expr::Variable { name, pos })
        },
        Token::LParen => {
            let expression = parse_expression(stream)?;
            match stream.next()? {
                Some(next) if next.token == Token::RParen => Ok(expression),
                Some(next) => Err(ParseError::UnexpectedToken { expected: "')'".to_string(),
                                                                found:    format!("{:?}",
                                                                                  next.token),
                                                                pos:      next.pos, }),
                None => Err(ParseError::UnexpectedEndOfInput { expected: "')'".to_string(),
                                                               pos:      stream.pos(), }),
            }
        },
        other => Err(ParseError::UnexpectedToken { expected: "a value".to_string(),
                                                   found: format!("{other:?}"),
                                                   pos }),
    }
}
