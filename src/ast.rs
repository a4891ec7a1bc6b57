use std::fmt::Write;

use crate::interpreter::{
    lexer::Pos,
    value::{
        calendar::{Date, DateTime, Time},
        timedelta::{TimeUnit, Timedelta},
    },
};

/// Represents a literal value in the language.
///
/// `Literal` covers all raw, constant values that can appear directly in
/// source code. Booleans are deliberately absent: they are produced only by
/// comparisons and logical operators, never written down.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A 64-bit signed integer literal.
    Number(i64),
    /// A string literal, already unescaped.
    String(String),
    /// A date literal such as `27.05.2020`.
    Date(Date),
    /// A time literal such as `20:30:00`.
    Time(Time),
    /// A datetime literal such as `27.05.2020~20:30:00`.
    Datetime(DateTime),
    /// A timedelta literal such as `'1Y 2M'`.
    Timedelta(Timedelta),
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Date> for Literal {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<Time> for Literal {
    fn from(value: Time) -> Self {
        Self::Time(value)
    }
}

impl From<DateTime> for Literal {
    fn from(value: DateTime) -> Self {
        Self::Datetime(value)
    }
}

impl From<Timedelta> for Literal {
    fn from(value: Timedelta) -> Self {
        Self::Timedelta(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Each variant models a distinct syntactic construct and carries the source
/// position of its first token for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: Literal,
        /// Position of the literal token.
        pos:   Pos,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Position of the identifier.
        pos:  Pos,
    },
    /// A unary operation (`-x`, `!x`).
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Position of the operator.
        pos:     Pos,
    },
    /// A binary operation (addition, comparison, etc.).
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Position of the left operand's first token.
        pos:   Pos,
    },
    /// Function call expression (e.g. `shift(d, 2)`).
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Position of the function name.
        pos:       Pos,
    },
    /// Component access on a temporal value (e.g. `d.days`).
    FieldAccess {
        /// The accessed expression.
        base:  Box<Self>,
        /// Which component is read.
        field: TimeUnit,
        /// Position of the base expression's first token.
        pos:   Pos,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::Literal { pos, .. }
            | Self::Variable { pos, .. }
            | Self::Unary { pos, .. }
            | Self::Binary { pos, .. }
            | Self::Call { pos, .. }
            | Self::FieldAccess { pos, .. } => *pos,
        }
    }
}

/// Represents a user-defined function definition.
///
/// Functions are named callables only; they are not values and can only be
/// defined at the top level of a program.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names.
    pub params: Vec<String>,
    /// The statements executed when the function is called.
    pub body:   Vec<Stmt>,
    /// Position of the `fun` keyword.
    pub pos:    Pos,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A function definition.
    Function(FunctionDef),
    /// A variable declaration using `var`, with optional initializer.
    VarDef {
        /// The name of the variable.
        name: String,
        /// The initial value; the variable holds `Unit` when omitted.
        init: Option<Expr>,
        /// Position of the `var` keyword.
        pos:  Pos,
    },
    /// An assignment binding a name to an expression.
    Assign {
        /// The name of the variable.
        name: String,
        /// The value which is being assigned.
        expr: Expr,
        /// Position of the identifier.
        pos:  Pos,
    },
    /// A function call in statement position; its result is discarded.
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Expr>,
        /// Position of the function name.
        pos:       Pos,
    },
    /// An `if` statement with optional `else`.
    If {
        /// The condition; must evaluate to `Bool`.
        condition: Expr,
        /// Statements executed when the condition holds.
        then_body: Vec<Stmt>,
        /// Statements executed otherwise, if present.
        else_body: Option<Vec<Stmt>>,
        /// Position of the `if` keyword.
        pos:       Pos,
    },
    /// A `from` loop walking a temporal range by a one-unit step.
    From {
        /// Lower bound of the range, inclusive.
        start:    Expr,
        /// Upper bound of the range, inclusive when the cursor lands on it.
        end:      Expr,
        /// The step granularity.
        step:     TimeUnit,
        /// Name the cursor is bound to inside the body.
        iterator: String,
        /// Statements executed once per cursor value.
        body:     Vec<Stmt>,
        /// Position of the `from` keyword.
        pos:      Pos,
    },
    /// A `print` statement.
    Print {
        /// The printed expression.
        expr: Expr,
        /// Position of the `print` keyword.
        pos:  Pos,
    },
    /// A `return` statement.
    Return {
        /// The returned expression.
        expr: Expr,
        /// Position of the `return` keyword.
        pos:  Pos,
    },
}

impl Stmt {
    /// Gets the source position from `self`.
    #[must_use]
    pub const fn pos(&self) -> Pos {
        match self {
            Self::Function(def) => def.pos,
            Self::VarDef { pos, .. }
            | Self::Assign { pos, .. }
            | Self::Call { pos, .. }
            | Self::If { pos, .. }
            | Self::From { pos, .. }
            | Self::Print { pos, .. }
            | Self::Return { pos, .. } => *pos,
        }
    }
}

/// A parsed program: the ordered list of its top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Stmt>,
}

impl Program {
    /// Renders the syntax tree for the `parser` stage: one node per line,
    /// children indented by two spaces. The output is deterministic for a
    /// given program.
    #[must_use]
    pub fn tree_string(&self) -> String {
        let mut out = String::from("Program\n");
        for statement in &self.statements {
            write_statement(&mut out, statement, 1);
        }
        out
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_statement(out: &mut String, statement: &Stmt, depth: usize) {
    indent(out, depth);
    match statement {
        Stmt::Function(def) => {
            let _ = writeln!(out, "FunctionDef {}({})", def.name, def.params.join(", "));
            for statement in &def.body {
                write_statement(out, statement, depth + 1);
            }
        },
        Stmt::VarDef { name, init, .. } => {
            let _ = writeln!(out, "VarDef {name}");
            if let Some(init) = init {
                write_expression(out, init, depth + 1);
            }
        },
        Stmt::Assign { name, expr, .. } => {
            let _ = writeln!(out, "Assign {name}");
            write_expression(out, expr, depth + 1);
        },
        Stmt::Call { name, arguments, .. } => {
            let _ = writeln!(out, "Call {name}");
            for argument in arguments {
                write_expression(out, argument, depth + 1);
            }
        },
        Stmt::If { condition, then_body, else_body, .. } => {
            out.push_str("If\n");
            write_expression(out, condition, depth + 1);
            indent(out, depth + 1);
            out.push_str("Then\n");
            for statement in then_body {
                write_statement(out, statement, depth + 2);
            }
            if let Some(else_body) = else_body {
                indent(out, depth + 1);
                out.push_str("Else\n");
                for statement in else_body {
                    write_statement(out, statement, depth + 2);
                }
            }
        },
        Stmt::From { start, end, step, iterator, body, .. } => {
            let _ = writeln!(out, "From {step} as {iterator}");
            write_expression(out, start, depth + 1);
            write_expression(out, end, depth + 1);
            indent(out, depth + 1);
            out.push_str("Body\n");
            for statement in body {
                write_statement(out, statement, depth + 2);
            }
        },
        Stmt::Print { expr, .. } => {
            out.push_str("Print\n");
            write_expression(out, expr, depth + 1);
        },
        Stmt::Return { expr, .. } => {
            out.push_str("Return\n");
            write_expression(out, expr, depth + 1);
        },
    }
}

fn write_expression(out: &mut String, expression: &Expr, depth: usize) {
    indent(out, depth);
    match expression {
        Expr::Literal { value, .. } => {
            let _ = match value {
                Literal::Number(n) => writeln!(out, "Literal {n}"),
                Literal::String(s) => writeln!(out, "Literal {s:?}"),
                Literal::Date(d) => writeln!(out, "Literal {d}"),
                Literal::Time(t) => writeln!(out, "Literal {t}"),
                Literal::Datetime(dt) => writeln!(out, "Literal {dt}"),
                Literal::Timedelta(td) => writeln!(out, "Literal {td}"),
            };
        },
        Expr::Variable { name, .. } => {
            let _ = writeln!(out, "Variable {name}");
        },
        Expr::Unary { op, operand, .. } => {
            let _ = writeln!(out, "Unary {op}");
            write_expression(out, operand, depth + 1);
        },
        Expr::Binary { op, left, right, .. } => {
            let _ = writeln!(out, "Binary {op}");
            write_expression(out, left, depth + 1);
            write_expression(out, right, depth + 1);
        },
        Expr::Call { name, arguments, .. } => {
            let _ = writeln!(out, "Call {name}");
            for argument in arguments {
                write_expression(out, argument, depth + 1);
            }
        },
        Expr::FieldAccess { base, field, .. } => {
            let _ = writeln!(out, "FieldAccess {field}");
            write_expression(out, base, depth + 1);
        },
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&`), short-circuiting
    And,
    /// Logical or (`|`), short-circuiting
    Or,
}

impl BinaryOperator {
    /// The operator's source form.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::And => "&",
            Self::Or => "|",
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl UnaryOperator {
    /// The operator's source form.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
