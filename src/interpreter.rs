/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, executes statements and evaluates
/// expressions, performs the calendar-aware arithmetic, manages variable
/// scopes and function calls, and produces `print` output. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, and control flow.
/// - Reports runtime errors such as type mismatches or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// temporal literals, numbers, identifiers, operators, and keywords. This
/// is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   location.
/// - Handles date, time, datetime, timedelta, numeric and string literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of statements
/// and expressions. This enables later phases to analyze and execute user
/// code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
/// - Supports the full statement and expression grammar of the language.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation and
/// execution: numbers, strings, dates, times, datetimes, timedeltas and
/// booleans. It also implements the calendar arithmetic those types rely
/// on and their canonical textual rendering.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements calendar and duration arithmetic with range checking.
/// - Provides the canonical string forms used by `print`.
pub mod value;
