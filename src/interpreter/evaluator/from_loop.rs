use std::cmp::Ordering;

use crate::{
    ast::{Expr, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::{arithmetic, comparison},
            core::{Context, EvalResult, Flow},
        },
        lexer::Pos,
        value::{core::Value, timedelta::{TimeUnit, Timedelta}},
    },
};

/// Whether `unit` can advance a cursor of the given temporal variant.
///
/// A plain date cannot move by less than a day and a plain time cannot
/// move by whole days, so those pairings are rejected up front.
const fn step_supported(value: &Value, unit: TimeUnit) -> bool {
    match value {
        Value::Date(_) => matches!(unit,
                                   TimeUnit::Years | TimeUnit::Months | TimeUnit::Weeks
                                   | TimeUnit::Days),
        Value::Time(_) => matches!(unit, TimeUnit::Hours | TimeUnit::Minutes | TimeUnit::Seconds),
        Value::Datetime(_) => true,
        _ => false,
    }
}

impl Context<'_> {
    /// Evaluates a `from` statement.
    ///
    /// Both bounds must evaluate to the same temporal variant, and the step
    /// unit must be able to advance that variant. The cursor starts at the
    /// lower bound and walks by a one-unit timedelta; each iteration binds
    /// the cursor to the iterator name in a fresh scope and executes the
    /// body there. The loop ends when the cursor passes the upper bound, so
    /// the bound itself is included exactly when the cursor lands on it. An
    /// empty range runs zero iterations.
    ///
    /// A time cursor that wraps past midnight stops the loop: the step no
    /// longer moves it forward.
    ///
    /// # Parameters
    /// - `start`: Lower bound expression.
    /// - `end`: Upper bound expression.
    /// - `step`: The step granularity.
    /// - `iterator`: Name the cursor is bound to.
    /// - `body`: Statements executed once per cursor value.
    /// - `pos`: Source position used for error reporting.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when the bounds are not a matching
    /// temporal pair, the step unit does not fit, or the body fails.
    pub fn eval_from(&mut self,
                     start: &Expr,
                     end: &Expr,
                     step: TimeUnit,
                     iterator: &str,
                     body: &[Stmt],
                     pos: Pos)
                     -> EvalResult<Flow> {
        let mut cursor = self.eval(start)?;
        let end_value = self.eval(end)?;

        let bounds_match = matches!((&cursor, &end_value),
                                    (Value::Date(_), Value::Date(_))
                                    | (Value::Time(_), Value::Time(_))
                                    | (Value::Datetime(_), Value::Datetime(_)));
        if !bounds_match {
            return Err(RuntimeError::InvalidFromRange { start: cursor.type_name(),
                                                        end:   end_value.type_name(),
                                                        pos });
        }
        if !step_supported(&cursor, step) {
            return Err(RuntimeError::IncompatibleStepUnit { unit:  step.keyword(),
                                                            range: cursor.type_name(),
                                                            pos });
        }

        let delta = Value::Timedelta(Timedelta::from_unit(step, 1));

        loop {
            if comparison::compare(&cursor, &end_value, "to", pos)? == Ordering::Greater {
                return Ok(Flow::Normal);
            }

            self.env.push_scope();
            let flow = self.env
                           .define(iterator, cursor.clone(), pos)
                           .and_then(|()| self.eval_statements(body));
            self.env.pop_scope();
            if let Flow::Return { value, pos } = flow? {
                return Ok(Flow::Return { value, pos });
            }

            let next = arithmetic::add(&cursor, &delta, pos)?;
            if comparison::compare(&next, &cursor, "to", pos)? != Ordering::Greater {
                return Ok(Flow::Normal);
            }
            cursor = next;
        }
    }
}
