use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Comparisons are only defined between two values of the same variant.
    /// `Equal` and `NotEqual` accept every variant; the relational
    /// operators accept numbers, strings and the temporal variants.
    /// Timedelta equality normalizes exactly-convertible units while the
    /// timedelta ordering counts a month as its longest possible span.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `lhs`: The left-hand value.
    /// - `rhs`: The right-hand value.
    /// - `pos`: Source position used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when the operands are of different
    /// variants or the variant does not support the operator.
    pub fn eval_comparison(op: BinaryOperator,
                           lhs: &Value,
                           rhs: &Value,
                           pos: Pos)
                           -> EvalResult<Value> {
        Ok(Value::Bool(match op {
                           BinaryOperator::Equal => strict_eq(lhs, rhs, op.symbol(), pos)?,
                           BinaryOperator::NotEqual => !strict_eq(lhs, rhs, op.symbol(), pos)?,

                           BinaryOperator::Less
                           | BinaryOperator::LessEqual
                           | BinaryOperator::Greater
                           | BinaryOperator::GreaterEqual => {
                               let ordering = compare(lhs, rhs, op.symbol(), pos)?;
                               match op {
                                   BinaryOperator::Less => ordering == Ordering::Less,
                                   BinaryOperator::LessEqual => ordering != Ordering::Greater,
                                   BinaryOperator::Greater => ordering == Ordering::Greater,
                                   BinaryOperator::GreaterEqual => ordering != Ordering::Less,
                                   _ => unreachable!(),
                               }
                           },

                           _ => unreachable!("eval_comparison used with non comparison operator"),
                       }))
    }
}

/// Structural same-variant equality; timedeltas are compared through their
/// normalization keys.
fn strict_eq(lhs: &Value, rhs: &Value, operator: &'static str, pos: Pos) -> EvalResult<bool> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::String(a), Value::String(b)) => Ok(a == b),
        (Value::Date(a), Value::Date(b)) => Ok(a == b),
        (Value::Time(a), Value::Time(b)) => Ok(a == b),
        (Value::Datetime(a), Value::Datetime(b)) => Ok(a == b),
        (Value::Timedelta(a), Value::Timedelta(b)) => Ok(a.normalized_eq(*b)),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Unit, Value::Unit) => Ok(true),
        _ => Err(RuntimeError::InvalidOperands { operator,
                                                 lhs: lhs.type_name(),
                                                 rhs: rhs.type_name(),
                                                 pos }),
    }
}

/// Total order within one variant, used by the relational operators and the
/// `from` loop cursor.
pub(in crate::interpreter::evaluator) fn compare(lhs: &Value,
                                                 rhs: &Value,
                                                 operator: &'static str,
                                                 pos: Pos)
                                                 -> EvalResult<Ordering> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
        (Value::Time(a), Value::Time(b)) => Ok(a.cmp(b)),
        (Value::Datetime(a), Value::Datetime(b)) => Ok(a.cmp(b)),
        (Value::Timedelta(a), Value::Timedelta(b)) => {
            Ok(a.duration_key().cmp(&b.duration_key()))
        },
        _ => Err(RuntimeError::InvalidOperands { operator,
                                                 lhs: lhs.type_name(),
                                                 rhs: rhs.type_name(),
                                                 pos }),
    }
}
