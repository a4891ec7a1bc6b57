/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions:
/// arithmetic over the typed operand matrix, comparisons, and the
/// short-circuiting logical operators.
pub mod binary;

/// Core evaluation logic for statements and expressions.
///
/// Contains the evaluation context, statement execution, expression
/// dispatch and control-flow plumbing for `return`.
pub mod core;

/// Scope and name management.
///
/// Implements the stack of lexical scopes, the call-frame visibility
/// barriers and the global function table.
pub mod environment;

/// Component access evaluation.
///
/// Reads a named component (`.days`, `.hours`, ...) out of a temporal
/// value.
pub mod field_access;

/// `from` loop evaluation.
///
/// Walks a temporal range by a one-unit step, binding the cursor in a
/// fresh scope for every iteration.
pub mod from_loop;

/// Function call evaluation.
///
/// Resolves user-defined functions, checks arity, binds parameters in a
/// new call frame and turns `return` flow into a value.
pub mod function;

/// Unary operator evaluation.
///
/// Handles arithmetic negation and logical NOT.
pub mod unary;
