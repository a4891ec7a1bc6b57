/// Lexical errors.
///
/// Defines the error type raised when source text cannot be tokenized:
/// unexpected characters, unterminated comments, strings and timedeltas,
/// malformed number literals and impossible calendar values.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while the parser consumes the
/// token stream: unexpected tokens, premature end of input and chained
/// comparisons. Lexical errors surface through the parser unchanged.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, grouped
/// into the reported diagnostic kinds: name lookup failures, operand type
/// mismatches, arithmetic failures and arity mismatches.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
