use std::{fs, io, path::PathBuf, process};

use clap::{Parser, ValueEnum};
use timon::{lex_source, parse_source, run_source};

/// timon is an interpreter for Timon, a small scripting language with
/// first-class dates, times, datetimes and timedeltas.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the script file.
    path: PathBuf,

    /// Pipeline stage whose artifact should be produced: the token list,
    /// the syntax tree, or the program's own output.
    #[arg(short, long, value_enum, default_value = "execution")]
    stage: Stage,
}

/// How far to run the pipeline before rendering its artifact.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum Stage {
    /// Stop after tokenization and print one token per line.
    Lexer,
    /// Stop after parsing and print the syntax tree.
    Parser,
    /// Execute the program.
    Execution,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.path).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  args.path.display());
        process::exit(1);
    });

    let result = match args.stage {
        Stage::Lexer => lex_source(&source).map(|tokens| print!("{tokens}"))
                                           .map_err(Into::into),
        Stage::Parser => parse_source(&source).map(|program| print!("{}", program.tree_string()))
                                              .map_err(Into::into),
        Stage::Execution => run_source(&source, &mut io::stdout().lock()),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}
