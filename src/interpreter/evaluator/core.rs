use std::io::Write;

use crate::{
    ast::{Expr, Literal, Program, Stmt},
    error::RuntimeError,
    interpreter::{evaluator::environment::Environment, lexer::Pos, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Deepest allowed nesting of function calls.
pub const MAX_CALL_DEPTH: usize = 256;

/// How statement execution left a statement list.
#[derive(Debug)]
pub enum Flow {
    /// Execution ran off the end of the list.
    Normal,
    /// A `return` fired and is unwinding toward the enclosing call.
    Return {
        /// The returned value.
        value: Value,
        /// Position of the `return` statement, for the diagnostic when no
        /// call encloses it.
        pos:   Pos,
    },
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the name environment with all
/// scopes and user-defined functions, and the sink `print` writes to.
///
/// ## Usage
///
/// A `Context` is created once per program run. [`Context::run`] executes a
/// parsed program against it; the individual `eval_*` methods are the
/// dispatch targets for the statement and expression variants.
pub struct Context<'a> {
    /// The name environment: scopes, call barriers and functions.
    pub env: Environment,
    out:     &'a mut dyn Write,
}

impl<'a> Context<'a> {
    /// Creates a fresh context writing `print` output to `out`.
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { env: Environment::new(),
               out }
    }

    /// Executes a whole program.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] the program raises. A `return`
    /// reaching the top level is itself such an error.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        match self.eval_statements(&program.statements)? {
            Flow::Return { pos, .. } => Err(RuntimeError::ReturnOutsideFunction { pos }),
            Flow::Normal => Ok(()),
        }
    }

    /// Executes a statement list in order, stopping early when a `return`
    /// fires.
    pub(in crate::interpreter::evaluator) fn eval_statements(&mut self,
                                                             statements: &[Stmt])
                                                             -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return { value, pos } = self.eval_statement(statement)? {
                return Ok(Flow::Return { value, pos });
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluates a single statement.
    ///
    /// Handles variable definitions, assignments, call statements, `if`,
    /// `from`, `print`, `return` and function definitions. Statements may
    /// modify the context; only `return` produces a non-normal flow.
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when the statement fails.
    pub fn eval_statement(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        match statement {
            Stmt::Function(def) => {
                self.env.define_function(def)?;
                Ok(Flow::Normal)
            },
            Stmt::VarDef { name, init, pos } => {
                let value = match init {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Unit,
                };
                self.env.define(name, value, *pos)?;
                Ok(Flow::Normal)
            },
            Stmt::Assign { name, expr, pos } => {
                self.env.get(name, *pos)?;
                let value = self.eval(expr)?;
                self.env.assign(name, value, *pos)?;
                Ok(Flow::Normal)
            },
            Stmt::Call { name, arguments, pos } => {
                self.eval_call(name, arguments, *pos)?;
                Ok(Flow::Normal)
            },
            Stmt::If { condition, then_body, else_body, .. } => {
                let value = self.eval(condition)?;
                if value.as_bool(condition.pos())? {
                    self.eval_block(then_body)
                } else if let Some(else_body) = else_body {
                    self.eval_block(else_body)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Stmt::From { start, end, step, iterator, body, pos } => {
                self.eval_from(start, end, *step, iterator, body, *pos)
            },
            Stmt::Print { expr, pos } => {
                let value = self.eval(expr)?;
                writeln!(self.out, "{value}").map_err(|e| {
                                                 RuntimeError::OutputFailed { message:
                                                                                  e.to_string(),
                                                                              pos: *pos, }
                                             })?;
                Ok(Flow::Normal)
            },
            Stmt::Return { expr, pos } => {
                let value = self.eval(expr)?;
                Ok(Flow::Return { value, pos: *pos })
            },
        }
    }

    /// Executes a statement list in a fresh scope, popping it even when a
    /// `return` unwinds through the block.
    pub(in crate::interpreter::evaluator) fn eval_block(&mut self,
                                                        statements: &[Stmt])
                                                        -> EvalResult<Flow> {
        self.env.push_scope();
        let flow = self.eval_statements(statements);
        self.env.pop_scope();
        flow
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// variables, unary and binary operations, function calls and field
    /// accesses.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when evaluation fails.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Self::eval_literal(value)),
            Expr::Variable { name, pos } => self.env.get(name, *pos).cloned(),
            Expr::Unary { op, operand, pos } => self.eval_unary(*op, operand, *pos),
            Expr::Binary { op, left, right, pos } => self.eval_binary_op(*op, left, right, *pos),
            Expr::Call { name, arguments, pos } => self.eval_call(name, arguments, *pos),
            Expr::FieldAccess { base, field, pos } => self.eval_field_access(base, *field, *pos),
        }
    }

    /// Turns a literal AST node into its runtime value.
    fn eval_literal(literal: &Literal) -> Value {
        match literal {
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
            Literal::Date(d) => Value::Date(*d),
            Literal::Time(t) => Value::Time(*t),
            Literal::Datetime(dt) => Value::Datetime(*dt),
            Literal::Timedelta(td) => Value::Timedelta(*td),
        }
    }
}
