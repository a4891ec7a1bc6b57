use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a logical operation between two boolean expressions.
    ///
    /// Both operators short-circuit left to right: `&` skips the right
    /// operand when the left is `false`, `|` skips it when the left is
    /// `true`. A skipped operand is never evaluated, so its side effects
    /// and errors do not occur.
    ///
    /// # Parameters
    /// - `op`: The logical operator, `And` or `Or`.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    ///
    /// # Errors
    /// Returns a [`crate::error::RuntimeError`] when an evaluated operand
    /// is not a boolean.
    pub fn eval_logic(&mut self,
                      op: BinaryOperator,
                      left: &Expr,
                      right: &Expr)
                      -> EvalResult<Value> {
        let lhs = self.eval(left)?.as_bool(left.pos())?;

        match op {
            BinaryOperator::And if !lhs => Ok(Value::Bool(false)),
            BinaryOperator::Or if lhs => Ok(Value::Bool(true)),
            BinaryOperator::And | BinaryOperator::Or => {
                let rhs = self.eval(right)?.as_bool(right.pos())?;
                Ok(Value::Bool(rhs))
            },
            _ => unreachable!("eval_logic used with non logical operator"),
        }
    }
}
