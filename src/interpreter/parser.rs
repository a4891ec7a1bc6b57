/// Core parsing machinery.
///
/// Contains the program entry point, the shared `ParseResult` alias and the
/// token-expectation helpers the statement and expression parsers build on.
pub mod core;

/// Statement parsing.
///
/// Implements the statement grammar: function definitions, variable
/// definitions, assignments, call statements, `if`, `from`, `print`,
/// `return` and brace-delimited bodies.
pub mod statement;

/// Binary expression parsing.
///
/// Implements the precedence ladder from `|` at the bottom to `* /` at the
/// top, including the non-associativity of equality and relational
/// operators.
pub mod binary;

/// Unary and atom parsing.
///
/// Handles the tightest-binding expression forms: `!` and unary `-`, field
/// access, literals, variables, calls and parenthesised expressions.
pub mod unary;
