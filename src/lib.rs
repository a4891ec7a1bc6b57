//! # timon
//!
//! timon is an interpreter for Timon, a small imperative scripting language
//! whose distinguishing feature is first-class date, time, datetime and
//! timedelta values, together with a `from` loop that walks a temporal
//! range by a fixed calendar step.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Program,
    error::{LexError, ParseError},
    interpreter::{
        evaluator::core::Context,
        lexer::{TokenStream, render_tokens},
        parser::core::parse_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Stmt` and `Expr` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Provides the deterministic tree rendering used by the parser stage.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while processing
/// code. It standardizes error reporting and carries detailed information
/// about failures, including error kinds, descriptions, and source
/// locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source positions and detailed messages for context.
/// - Supports integration with standard error handling traits and
///   reporting utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code evaluation. It exposes the
/// pieces behind the crate-level entry points below.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for tokenizing, parsing and evaluating user
///   code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Tokenizes a source text and renders the tokens one per line, as the
/// `lexer` stage of the command line interface prints them.
///
/// # Errors
/// Returns the first lexical error in the source.
pub fn lex_source(source: &str) -> Result<String, LexError> {
    render_tokens(source)
}

/// Parses a source text into its program AST.
///
/// Lexing happens lazily while the parser pulls tokens, so lexical errors
/// surface here wrapped in [`ParseError::Lex`].
///
/// # Errors
/// Returns the first lexical or syntactic error in the source.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let mut stream = TokenStream::new(source);
    parse_program(&mut stream)
}

/// Parses and executes a source text, writing `print` output to `out`.
///
/// # Errors
/// Returns an error if parsing fails or if any runtime error occurs.
/// Output printed before a runtime error is retained in `out`.
///
/// # Examples
/// ```
/// let mut out = Vec::new();
/// timon::run_source("print 1 + 2", &mut out).unwrap();
/// assert_eq!(out, b"3\n");
///
/// // Example with an intentional error (unknown variable).
/// let mut out = Vec::new();
/// assert!(timon::run_source("print x", &mut out).is_err());
/// ```
pub fn run_source(source: &str, out: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let program = parse_source(source)?;

    let mut context = Context::new(out);
    context.run(&program)?;

    Ok(())
}
