use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        lexer::Pos,
        value::{
            calendar::{Date, DateTime, Time},
            timedelta::Timedelta,
        },
    },
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64 bit signed integer.
    Number(i64),
    /// An owned piece of text.
    String(String),
    /// A calendar date.
    Date(Date),
    /// A wall-clock time.
    Time(Time),
    /// A date paired with a time of day.
    Datetime(DateTime),
    /// A signed duration with seven components.
    Timedelta(Timedelta),
    /// A boolean value.
    /// Produced only by comparison operators (`<`, `==`, `!=`, etc.) and
    /// logical operations; there is no boolean literal. Used primarily as
    /// conditions in `if` statements, where the condition must evaluate to
    /// `Bool`.
    Bool(bool),
    /// The absence of a value: an uninitialized variable or the result of a
    /// function that falls off its end.
    Unit,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Date> for Value {
    fn from(v: Date) -> Self {
        Self::Date(v)
    }
}

impl From<Time> for Value {
    fn from(v: Time) -> Self {
        Self::Time(v)
    }
}

impl From<DateTime> for Value {
    fn from(v: DateTime) -> Self {
        Self::Datetime(v)
    }
}

impl From<Timedelta> for Value {
    fn from(v: Timedelta) -> Self {
        Self::Timedelta(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl Value {
    /// The name of the value's variant, as used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Datetime(_) => "datetime",
            Self::Timedelta(_) => "timedelta",
            Self::Bool(_) => "bool",
            Self::Unit => "unit",
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions in `if` statements and the operands of `&`, `|`
    /// and `!`. No other variant converts; in particular numbers are not
    /// truthy.
    ///
    /// # Parameters
    /// - `pos`: Source position used for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError::ExpectedBoolean)`: If not boolean.
    pub const fn as_bool(&self, pos: Pos) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::ExpectedBoolean { found: other.type_name(),
                                                         pos }),
        }
    }
}

impl fmt::Display for Value {
    /// The canonical string form used by `print`.
    ///
    /// Strings render as their raw contents without quotes, `Unit` renders
    /// as the empty string, and the temporal variants use their literal
    /// forms.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::Datetime(dt) => write!(f, "{dt}"),
            Self::Timedelta(td) => write!(f, "{td}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Unit => Ok(()),
        }
    }
}
