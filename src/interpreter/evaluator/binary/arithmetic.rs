use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::{calendar::CalendarError, core::Value, timedelta::Timedelta},
    },
};

/// Maps a calendar-layer failure to its runtime error.
pub(in crate::interpreter::evaluator) fn calendar_error(error: CalendarError,
                                                        pos: Pos)
                                                        -> RuntimeError {
    match error {
        CalendarError::Overflow => RuntimeError::Overflow { pos },
        other => RuntimeError::DateOutOfRange { message: other.to_string(),
                                                pos },
    }
}

impl Context<'_> {
    /// Evaluates an arithmetic operation over the typed operand matrix.
    ///
    /// # Parameters
    /// - `op`: One of `+ - * /`.
    /// - `lhs`: The left-hand value.
    /// - `rhs`: The right-hand value.
    /// - `pos`: Source position used for error reporting.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] for operand types outside the matrix,
    /// division by zero, overflow and calendar results out of range.
    pub fn eval_arithmetic(op: BinaryOperator,
                           lhs: &Value,
                           rhs: &Value,
                           pos: Pos)
                           -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => add(lhs, rhs, pos),
            BinaryOperator::Sub => sub(lhs, rhs, pos),
            BinaryOperator::Mul => mul(lhs, rhs, pos),
            BinaryOperator::Div => div(lhs, rhs, pos),
            _ => unreachable!("eval_arithmetic used with non arithmetic operator"),
        }
    }
}

/// Builds the type-mismatch error for an arithmetic operator.
fn invalid(operator: &'static str, lhs: &Value, rhs: &Value, pos: Pos) -> RuntimeError {
    RuntimeError::InvalidOperands { operator,
                                    lhs: lhs.type_name(),
                                    rhs: rhs.type_name(),
                                    pos }
}

/// `+` matrix: numbers, strings, timedeltas, and timedelta applied to any
/// temporal anchor.
pub(in crate::interpreter::evaluator) fn add(lhs: &Value,
                                             rhs: &Value,
                                             pos: Pos)
                                             -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => {
            a.checked_add(*b)
             .map(Value::Number)
             .ok_or(RuntimeError::Overflow { pos })
        },
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        (Value::Timedelta(a), Value::Timedelta(b)) => {
            a.checked_add(*b)
             .map(Value::Timedelta)
             .ok_or(RuntimeError::Overflow { pos })
        },
        (Value::Date(date), Value::Timedelta(delta)) => {
            date.checked_add(delta)
                .map(Value::Date)
                .map_err(|e| calendar_error(e, pos))
        },
        (Value::Datetime(datetime), Value::Timedelta(delta)) => {
            datetime.checked_add(delta)
                    .map(Value::Datetime)
                    .map_err(|e| calendar_error(e, pos))
        },
        (Value::Time(time), Value::Timedelta(delta)) => {
            time.checked_add(delta)
                .map(Value::Time)
                .map_err(|e| calendar_error(e, pos))
        },
        _ => Err(invalid("+", lhs, rhs, pos)),
    }
}

/// `-` matrix: everything `+` supports minus the string case, plus the
/// differences between two temporal values of the same variant.
fn sub(lhs: &Value, rhs: &Value, pos: Pos) -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => {
            a.checked_sub(*b)
             .map(Value::Number)
             .ok_or(RuntimeError::Overflow { pos })
        },
        (Value::Timedelta(a), Value::Timedelta(b)) => {
            a.checked_sub(*b)
             .map(Value::Timedelta)
             .ok_or(RuntimeError::Overflow { pos })
        },
        (Value::Date(date), Value::Timedelta(delta)) => {
            date.checked_sub(delta)
                .map(Value::Date)
                .map_err(|e| calendar_error(e, pos))
        },
        (Value::Datetime(datetime), Value::Timedelta(delta)) => {
            datetime.checked_sub(delta)
                    .map(Value::Datetime)
                    .map_err(|e| calendar_error(e, pos))
        },
        (Value::Time(time), Value::Timedelta(delta)) => {
            time.checked_sub(delta)
                .map(Value::Time)
                .map_err(|e| calendar_error(e, pos))
        },
        (Value::Date(a), Value::Date(b)) => {
            Ok(Value::Timedelta(Timedelta::from_days(a.days_since(*b))))
        },
        (Value::Datetime(a), Value::Datetime(b)) => {
            Ok(Value::Timedelta(Timedelta::from_day_seconds(a.seconds_since(*b))))
        },
        (Value::Time(a), Value::Time(b)) => {
            Ok(Value::Timedelta(Timedelta::from_clock_seconds(a.seconds_since(*b))))
        },
        _ => Err(invalid("-", lhs, rhs, pos)),
    }
}

/// `*` matrix: numbers, and timedelta scaling from either side.
fn mul(lhs: &Value, rhs: &Value, pos: Pos) -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => {
            a.checked_mul(*b)
             .map(Value::Number)
             .ok_or(RuntimeError::Overflow { pos })
        },
        (Value::Timedelta(delta), Value::Number(factor))
        | (Value::Number(factor), Value::Timedelta(delta)) => {
            delta.checked_mul(*factor)
                 .map(Value::Timedelta)
                 .ok_or(RuntimeError::Overflow { pos })
        },
        _ => Err(invalid("*", lhs, rhs, pos)),
    }
}

/// `/` matrix: integer division truncating toward zero, for numbers and
/// for timedeltas scaled down by a number.
fn div(lhs: &Value, rhs: &Value, pos: Pos) -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => {
            if *b == 0 {
                return Err(RuntimeError::DivisionByZero { pos });
            }
            a.checked_div(*b)
             .map(Value::Number)
             .ok_or(RuntimeError::Overflow { pos })
        },
        (Value::Timedelta(delta), Value::Number(divisor)) => {
            if *divisor == 0 {
                return Err(RuntimeError::DivisionByZero { pos });
            }
            delta.checked_div(*divisor)
                 .map(Value::Timedelta)
                 .ok_or(RuntimeError::Overflow { pos })
        },
        _ => Err(invalid("/", lhs, rhs, pos)),
    }
}
