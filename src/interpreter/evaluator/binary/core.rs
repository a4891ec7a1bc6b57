use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary operation.
    ///
    /// The logical operators short-circuit, so they receive the right
    /// operand unevaluated; every other operator evaluates both operands
    /// left to right and dispatches on the operator group.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    /// - `pos`: Source position used for error reporting.
    ///
    /// # Errors
    /// Returns a [`crate::error::RuntimeError`] when an operand fails to
    /// evaluate or the operand types are outside the operator's matrix.
    pub fn eval_binary_op(&mut self,
                          op: BinaryOperator,
                          left: &Expr,
                          right: &Expr,
                          pos: Pos)
                          -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, left, right);
        }

        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;

        match op {
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div => Self::eval_arithmetic(op, &lhs, &rhs, pos),
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual => Self::eval_comparison(op, &lhs, &rhs, pos),
            BinaryOperator::And | BinaryOperator::Or => unreachable!(),
        }
    }
}
