use crate::interpreter::lexer::Pos;

/// The reason a piece of input could not be tokenized.
///
/// This is the error type the lexer works with internally; the stream wraps
/// it together with a position into a [`LexError`]. The `Default` value is
/// what the lexer produces for input no rule matches; the stream fills in
/// the offending character.
#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    /// A character no lexer rule recognizes.
    UnexpectedCharacter(Option<char>),
    /// A comment was still open at the end of the input.
    UnterminatedComment,
    /// A string literal was still open at the end of its line.
    UnterminatedString,
    /// A backslash escape other than `\"` inside a string literal.
    InvalidEscape,
    /// A timedelta literal was still open at the end of its line.
    UnterminatedTimedelta,
    /// A timedelta literal with no component pairs, `''`.
    EmptyTimedelta,
    /// The same unit appeared twice in one timedelta literal.
    RepeatedTimedeltaUnit(char),
    /// A unit appeared after a smaller one in a timedelta literal.
    MisorderedTimedeltaUnit(char),
    /// A unit character outside `Y M W D h m s`.
    UnknownTimedeltaUnit(char),
    /// A character inside timedelta bounds that is neither a digit, a unit
    /// nor a blank.
    StrayTimedeltaCharacter(char),
    /// A number ended at the closing timedelta bound with no unit.
    MissingTimedeltaUnit,
    /// A number literal starting with `0` followed by more digits.
    LeadingZero,
    /// A number literal that does not fit a 64 bit integer.
    NumberTooLarge,
    /// A date literal with impossible calendar values.
    InvalidDate(String),
    /// A time literal with impossible clock values.
    InvalidTime(String),
}

impl Default for LexErrorKind {
    fn default() -> Self {
        Self::UnexpectedCharacter(None)
    }
}

impl std::fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter(Some(character)) => {
                write!(f, "unexpected character '{character}'")
            },
            Self::UnexpectedCharacter(None) => write!(f, "unexpected character"),
            Self::UnterminatedComment => write!(f, "comment is missing its closing '#'"),
            Self::UnterminatedString => write!(f, "string literal is missing its closing '\"'"),
            Self::InvalidEscape => write!(f, "invalid escape; only '\\\"' is recognized"),
            Self::UnterminatedTimedelta => {
                write!(f, "timedelta literal is missing its closing '''")
            },
            Self::EmptyTimedelta => {
                write!(f, "timedelta literal needs at least one component")
            },
            Self::RepeatedTimedeltaUnit(unit) => {
                write!(f, "timedelta unit '{unit}' given twice")
            },
            Self::MisorderedTimedeltaUnit(unit) => {
                write!(f, "timedelta unit '{unit}' out of order; units go Y M W D h m s")
            },
            Self::UnknownTimedeltaUnit(unit) => {
                write!(f, "unknown timedelta unit '{unit}'")
            },
            Self::StrayTimedeltaCharacter(character) => {
                write!(f, "unexpected character '{character}' inside timedelta bounds")
            },
            Self::MissingTimedeltaUnit => {
                write!(f, "timedelta component is missing its unit")
            },
            Self::LeadingZero => write!(f, "number literals cannot start with a leading zero"),
            Self::NumberTooLarge => write!(f, "number literal is too large"),
            Self::InvalidDate(detail) => write!(f, "invalid date: {detail}"),
            Self::InvalidTime(detail) => write!(f, "invalid time: {detail}"),
        }
    }
}

/// A lexical error: what went wrong and where.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    /// The reason the input could not be tokenized.
    pub kind: LexErrorKind,
    /// Where the offending input starts.
    pub pos:  Pos,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LexError at {}: {}", self.pos, self.kind)
    }
}

impl std::error::Error for LexError {}
