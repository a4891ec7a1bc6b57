use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow, MAX_CALL_DEPTH},
        lexer::Pos,
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a function call, in statement or expression position.
    ///
    /// The argument count must match the declared parameter count.
    /// Arguments are evaluated left to right in the caller's scope, then a
    /// fresh call frame is pushed with the parameters bound; the body sees
    /// only that frame, scopes it opens itself, and the global scope.
    ///
    /// A `return` in the body yields the function's value; falling off the
    /// end yields `Unit`.
    ///
    /// # Parameters
    /// - `name`: The called function's name.
    /// - `arguments`: Argument expressions in source order.
    /// - `pos`: Source position used for error reporting.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when the function is undefined, the arity
    /// does not match, the call depth limit is hit or the body fails.
    pub fn eval_call(&mut self,
                     name: &str,
                     arguments: &[Expr],
                     pos: Pos)
                     -> EvalResult<Value> {
        let function = self.env.function(name, pos)?;

        if function.params.len() != arguments.len() {
            return Err(RuntimeError::ArityMismatch { name:     name.to_string(),
                                                     expected: function.params.len(),
                                                     found:    arguments.len(),
                                                     pos });
        }
        if self.env.call_depth() >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { limit: MAX_CALL_DEPTH,
                                                      pos });
        }

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval(argument)?);
        }

        self.env.push_call();
        for (param, value) in function.params.iter().zip(values) {
            if let Err(error) = self.env.define(param, value, pos) {
                self.env.pop_call();
                return Err(error);
            }
        }

        let flow = self.eval_statements(&function.body);
        self.env.pop_call();

        match flow? {
            Flow::Return { value, .. } => Ok(value),
            Flow::Normal => Ok(Value::Unit),
        }
    }
}
