use crate::interpreter::lexer::Pos;

#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// Each variant belongs to one of the diagnostic kinds reported to the
/// user (`NameError`, `TypeError`, `ArithmeticError`, `ArityError`,
/// `RuntimeError`, `IOError`); see [`RuntimeError::kind`].
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// Where the use occurred.
        pos:  Pos,
    },
    /// Called a function that was never defined.
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// Where the call occurred.
        pos:  Pos,
    },
    /// `var` redeclared a name already bound in the same scope.
    VariableRedeclaration {
        /// The name of the variable.
        name: String,
        /// Where the redeclaration occurred.
        pos:  Pos,
    },
    /// `fun` redefined an existing function.
    FunctionRedefinition {
        /// The name of the function.
        name: String,
        /// Where the redefinition occurred.
        pos:  Pos,
    },
    /// A function and a variable tried to share one name.
    NameCollision {
        /// The contested name.
        name: String,
        /// Where the collision occurred.
        pos:  Pos,
    },
    /// A binary operator was applied to operand types outside its matrix.
    InvalidOperands {
        /// The operator's source form.
        operator: &'static str,
        /// Type name of the left operand.
        lhs:      &'static str,
        /// Type name of the right operand.
        rhs:      &'static str,
        /// Where the operation occurred.
        pos:      Pos,
    },
    /// A unary operator was applied to an unsupported operand type.
    InvalidUnaryOperand {
        /// The operator's source form.
        operator: &'static str,
        /// Type name of the operand.
        operand:  &'static str,
        /// Where the operation occurred.
        pos:      Pos,
    },
    /// A boolean was required but another type was found.
    ExpectedBoolean {
        /// Type name of the value actually found.
        found: &'static str,
        /// Where the value was used.
        pos:   Pos,
    },
    /// A field access on a value that does not carry that field.
    InvalidFieldAccess {
        /// The field's keyword.
        field: &'static str,
        /// Type name of the accessed value.
        value: &'static str,
        /// Where the access occurred.
        pos:   Pos,
    },
    /// The bounds of a `from` loop were not a matching temporal pair.
    InvalidFromRange {
        /// Type name of the start bound.
        start: &'static str,
        /// Type name of the end bound.
        end:   &'static str,
        /// Where the loop starts.
        pos:   Pos,
    },
    /// The step unit of a `from` loop cannot advance its bounds.
    IncompatibleStepUnit {
        /// The step unit's keyword.
        unit:  &'static str,
        /// Type name of the loop bounds.
        range: &'static str,
        /// Where the loop starts.
        pos:   Pos,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// Where the division occurred.
        pos: Pos,
    },
    /// Arithmetic left the representable range.
    Overflow {
        /// Where the operation occurred.
        pos: Pos,
    },
    /// Calendar arithmetic produced a date outside years 1 through 9999.
    DateOutOfRange {
        /// Detail from the calendar layer.
        message: String,
        /// Where the operation occurred.
        pos:     Pos,
    },
    /// The wrong number of arguments was supplied to a function.
    ArityMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// Where the call occurred.
        pos:      Pos,
    },
    /// `return` executed outside any function call.
    ReturnOutsideFunction {
        /// Where the statement occurred.
        pos: Pos,
    },
    /// The call stack grew past the supported depth.
    RecursionLimit {
        /// The depth that was exceeded.
        limit: usize,
        /// Where the offending call occurred.
        pos:   Pos,
    },
    /// Writing `print` output to the configured sink failed.
    OutputFailed {
        /// Detail from the I/O layer.
        message: String,
        /// Where the `print` occurred.
        pos:     Pos,
    },
}

impl RuntimeError {
    /// The diagnostic kind this error is reported under.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UndefinedVariable { .. }
            | Self::UndefinedFunction { .. }
            | Self::VariableRedeclaration { .. }
            | Self::FunctionRedefinition { .. }
            | Self::NameCollision { .. } => "NameError",
            Self::InvalidOperands { .. }
            | Self::InvalidUnaryOperand { .. }
            | Self::ExpectedBoolean { .. }
            | Self::InvalidFieldAccess { .. }
            | Self::InvalidFromRange { .. }
            | Self::IncompatibleStepUnit { .. } => "TypeError",
            Self::DivisionByZero { .. } | Self::Overflow { .. } | Self::DateOutOfRange { .. } => {
                "ArithmeticError"
            },
            Self::ArityMismatch { .. } => "ArityError",
            Self::ReturnOutsideFunction { .. } | Self::RecursionLimit { .. } => "RuntimeError",
            Self::OutputFailed { .. } => "IOError",
        }
    }

    /// The position the error points at.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::UndefinedVariable { pos, .. }
            | Self::UndefinedFunction { pos, .. }
            | Self::VariableRedeclaration { pos, .. }
            | Self::FunctionRedefinition { pos, .. }
            | Self::NameCollision { pos, .. }
            | Self::InvalidOperands { pos, .. }
            | Self::InvalidUnaryOperand { pos, .. }
            | Self::ExpectedBoolean { pos, .. }
            | Self::InvalidFieldAccess { pos, .. }
            | Self::InvalidFromRange { pos, .. }
            | Self::IncompatibleStepUnit { pos, .. }
            | Self::DivisionByZero { pos }
            | Self::Overflow { pos }
            | Self::DateOutOfRange { pos, .. }
            | Self::ArityMismatch { pos, .. }
            | Self::ReturnOutsideFunction { pos }
            | Self::RecursionLimit { pos, .. }
            | Self::OutputFailed { pos, .. } => *pos,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: ", self.kind(), self.pos())?;
        match self {
            Self::UndefinedVariable { name, .. } => write!(f, "variable '{name}' is not defined"),
            Self::UndefinedFunction { name, .. } => write!(f, "function '{name}' is not defined"),
            Self::VariableRedeclaration { name, .. } => {
                write!(f, "variable '{name}' is already declared in this scope")
            },
            Self::FunctionRedefinition { name, .. } => {
                write!(f, "function '{name}' is already defined")
            },
            Self::NameCollision { name, .. } => {
                write!(f, "'{name}' cannot name both a variable and a function")
            },
            Self::InvalidOperands { operator, lhs, rhs, .. } => {
                write!(f, "operator '{operator}' cannot combine {lhs} and {rhs}")
            },
            Self::InvalidUnaryOperand { operator, operand, .. } => {
                write!(f, "operator '{operator}' cannot be applied to {operand}")
            },
            Self::ExpectedBoolean { found, .. } => write!(f, "expected bool, found {found}"),
            Self::InvalidFieldAccess { field, value, .. } => {
                write!(f, "{value} has no field '{field}'")
            },
            Self::InvalidFromRange { start, end, .. } => write!(f,
                                                                "from range must be two dates, times or datetimes, found {start} and {end}"),
            Self::IncompatibleStepUnit { unit, range, .. } => {
                write!(f, "cannot step a {range} range by {unit}")
            },
            Self::DivisionByZero { .. } => write!(f, "division by zero"),
            Self::Overflow { .. } => write!(f, "arithmetic overflow"),
            Self::DateOutOfRange { message, .. } => write!(f, "{message}"),
            Self::ArityMismatch { name, expected, found, .. } => write!(f,
                                                                        "function '{name}' takes {expected} argument(s) but {found} were supplied"),
            Self::ReturnOutsideFunction { .. } => {
                write!(f, "'return' used outside of a function")
            },
            Self::RecursionLimit { limit, .. } => {
                write!(f, "call depth exceeded the limit of {limit}")
            },
            Self::OutputFailed { message, .. } => write!(f, "failed to write output: {message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
