use crate::{error::LexError, interpreter::lexer::Pos};

#[derive(Debug)]
/// Represents all errors that can occur while building the syntax tree.
pub enum ParseError {
    /// The lexer failed while the parser pulled a token.
    Lex(LexError),
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// Description of what the grammar allowed at this point.
        expected: String,
        /// The token actually encountered.
        found:    String,
        /// Where the token starts.
        pos:      Pos,
    },
    /// The input ended where the grammar required more.
    UnexpectedEndOfInput {
        /// Description of what the grammar allowed at this point.
        expected: String,
        /// The end-of-input position.
        pos:      Pos,
    },
    /// A second equality or relational operator at the same level, such as
    /// `a < b < c`.
    ChainedComparison {
        /// Where the second operator starts.
        pos: Pos,
    },
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        Self::Lex(error)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(error) => write!(f, "{error}"),

            Self::UnexpectedToken { expected, found, pos } => {
                write!(f, "ParseError at {pos}: expected {expected}, found {found}")
            },

            Self::UnexpectedEndOfInput { expected, pos } => {
                write!(f, "ParseError at {pos}: expected {expected}, found end of input")
            },

            Self::ChainedComparison { pos } => write!(f,
                                                      "ParseError at {pos}: comparison operators cannot be chained"),
        }
    }
}

impl std::error::Error for ParseError {}
