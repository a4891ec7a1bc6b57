use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a unary operation.
    ///
    /// Negation applies to numbers and timedeltas (component-wise); logical
    /// NOT applies to booleans only. `-0` yields plain `0`.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `operand`: The operand expression.
    /// - `pos`: Source position used for error reporting.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when the operand has an unsupported type
    /// or negation overflows.
    pub fn eval_unary(&mut self,
                      op: UnaryOperator,
                      operand: &Expr,
                      pos: Pos)
                      -> EvalResult<Value> {
        let value = self.eval(operand)?;

        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => {
                    n.checked_neg()
                     .map(Value::Number)
                     .ok_or(RuntimeError::Overflow { pos })
                },
                Value::Timedelta(delta) => {
                    delta.checked_neg()
                         .map(Value::Timedelta)
                         .ok_or(RuntimeError::Overflow { pos })
                },
                other => Err(RuntimeError::InvalidUnaryOperand { operator: op.symbol(),
                                                                 operand:  other.type_name(),
                                                                 pos }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(operand.pos())?)),
        }
    }
}
