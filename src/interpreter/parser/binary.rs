use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::{Pos, Token, TokenStream},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical OR, and descends through the precedence
/// hierarchy: `|`, `&`, `== !=`, `< <= > >=`, `+ -`, `* /`, unary, atom.
///
/// Grammar: `expression := or_expression`
///
/// # Parameters
/// - `stream`: Token stream positioned at the expression's first token.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// Propagates any error from the levels below.
pub fn parse_expression(stream: &mut TokenStream) -> ParseResult<Expr> {
    parse_or(stream)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all non-operator tokens.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Ampersand => Some(BinaryOperator::And),
        Token::Pipe => Some(BinaryOperator::Or),
        _ => None,
    }
}

/// Peeks at the next token and returns its binary operator when it belongs
/// to the given precedence level.
fn peek_operator(stream: &mut TokenStream,
                 level: fn(BinaryOperator) -> bool)
                 -> ParseResult<Option<(BinaryOperator, Pos)>> {
    if let Some(spanned) = stream.peek()?
       && let Some(op) = token_to_binary_operator(&spanned.token)
       && level(op)
    {
        return Ok(Some((op, spanned.pos)));
    }
    Ok(None)
}

const fn is_or(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Or)
}

const fn is_and(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::And)
}

const fn is_equality(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
}

const fn is_relational(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::LessEqual
             | BinaryOperator::Greater
             | BinaryOperator::GreaterEqual)
}

const fn is_additive(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
}

const fn is_multiplicative(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
}

/// Parses left-associative `|` chains.
///
/// The rule is: `or := and ("|" and)*`
fn parse_or(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut left = parse_and(stream)?;
    while let Some((op, _)) = peek_operator(stream, is_or)? {
        stream.next()?;
        let right = parse_and(stream)?;
        let pos = left.pos();
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right),
                              pos };
    }
    Ok(left)
}

/// Parses left-associative `&` chains.
///
/// The rule is: `and := equality ("&" equality)*`
fn parse_and(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut left = parse_equality(stream)?;
    while let Some((op, _)) = peek_operator(stream, is_and)? {
        stream.next()?;
        let right = parse_equality(stream)?;
        let pos = left.pos();
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right),
                              pos };
    }
    Ok(left)
}

/// Parses at most one equality comparison.
///
/// The rule is: `equality := relational [("==" | "!=") relational]`
///
/// Equality is non-associative: a second `==`/`!=` at this level is the
/// dedicated chained-comparison error rather than a generic unexpected
/// token.
fn parse_equality(stream: &mut TokenStream) -> ParseResult<Expr> {
    let left = parse_relational(stream)?;

    let Some((op, _)) = peek_operator(stream, is_equality)? else {
        return Ok(left);
    };
    stream.next()?;
    let right = parse_relational(stream)?;

    if let Some((_, pos)) = peek_operator(stream, is_equality)? {
        return Err(ParseError::ChainedComparison { pos });
    }

    let pos = left.pos();
    Ok(Expr::Binary { op,
                      left: Box::new(left),
                      right: Box::new(right),
                      pos })
}

/// Parses at most one relational comparison.
///
/// The rule is: `relational := additive [("<" | "<=" | ">" | ">=") additive]`
///
/// Relational operators are non-associative, like equality.
fn parse_relational(stream: &mut TokenStream) -> ParseResult<Expr> {
    let left = parse_additive(stream)?;

    let Some((op, _)) = peek_operator(stream, is_relational)? else {
        return Ok(left);
    };
    stream.next()?;
    let right = parse_additive(stream)?;

    if let Some((_, pos)) = peek_operator(stream, is_relational)? {
        return Err(ParseError::ChainedComparison { pos });
    }

    let pos = left.pos();
    Ok(Expr::Binary { op,
                      left: Box::new(left),
                      right: Box::new(right),
                      pos })
}

/// Parses left-associative addition and subtraction.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
fn parse_additive(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut left = parse_multiplicative(stream)?;
    while let Some((op, _)) = peek_operator(stream, is_additive)? {
        stream.next()?;
        let right = parse_multiplicative(stream)?;
        let pos = left.pos();
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right),
                              pos };
    }
    Ok(left)
}

/// Parses left-associative multiplication and division.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
fn parse_multiplicative(stream: &mut TokenStream) -> ParseResult<Expr> {
    let mut left = parse_unary(stream)?;
    while let Some((op, _)) = peek_operator(stream, is_multiplicative)? {
        stream.next()?;
        let right = parse_unary(stream)?;
        let pos = left.pos();
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right),
                              pos };
    }
    Ok(left)
}
