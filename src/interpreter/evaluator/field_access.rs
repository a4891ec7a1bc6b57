use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Pos,
        value::{core::Value, timedelta::TimeUnit},
    },
};

impl Context<'_> {
    /// Evaluates a component access such as `d.days`.
    ///
    /// The legal fields depend on the accessed value:
    /// - timedelta: all seven components, returned exactly as stored;
    /// - date: `years`, `months`, `days`;
    /// - time: `hours`, `minutes`, `seconds`;
    /// - datetime: everything except `weeks`.
    ///
    /// The result is always a `Number`.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] for any other value/field combination.
    pub fn eval_field_access(&mut self,
                             base: &Expr,
                             field: TimeUnit,
                             pos: Pos)
                             -> EvalResult<Value> {
        let value = self.eval(base)?;

        let component = match (&value, field) {
            (Value::Timedelta(delta), _) => delta.component(field),
            (Value::Date(date), TimeUnit::Years) => date.year(),
            (Value::Date(date), TimeUnit::Months) => date.month(),
            (Value::Date(date), TimeUnit::Days) => date.day(),
            (Value::Time(time), TimeUnit::Hours) => time.hour(),
            (Value::Time(time), TimeUnit::Minutes) => time.minute(),
            (Value::Time(time), TimeUnit::Seconds) => time.second(),
            (Value::Datetime(datetime), TimeUnit::Years) => datetime.date().year(),
            (Value::Datetime(datetime), TimeUnit::Months) => datetime.date().month(),
            (Value::Datetime(datetime), TimeUnit::Days) => datetime.date().day(),
            (Value::Datetime(datetime), TimeUnit::Hours) => datetime.time().hour(),
            (Value::Datetime(datetime), TimeUnit::Minutes) => datetime.time().minute(),
            (Value::Datetime(datetime), TimeUnit::Seconds) => datetime.time().second(),
            _ => {
                return Err(RuntimeError::InvalidFieldAccess { field: field.keyword(),
                                                              value: value.type_name(),
                                                              pos });
            },
        };

        Ok(Value::Number(component))
    }
}
