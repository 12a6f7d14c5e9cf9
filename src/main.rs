use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use gotolang::diagnostics::{check, Failure, ParseOutcome};
use gotolang::lexer::tokenize;
use gotolang::parser::{Parser, ParserError};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "gotolang")]
#[command(about = "Check programs written in the GO TO language", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the input and print tokens
    Lex {
        /// Input file path; stdin when omitted or '-'
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Parse the input and print the syntax tree
    Parse {
        /// Input file path; stdin when omitted or '-'
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Accept or reject the input, reporting the first error
    Check {
        /// Input file path; stdin when omitted or '-'
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Lex { file } => lex_file(file.as_deref()),
        Commands::Parse { file } => parse_file(file.as_deref()),
        Commands::Check { file } => check_file(file.as_deref()),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn source_name(path: Option<&Path>) -> String {
    match path {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read file '{}'", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read standard input")?;
            Ok(input)
        }
    }
}

fn lex_file(path: Option<&Path>) -> Result<bool> {
    let input = read_source(path)?;
    let name = source_name(path);

    let tokens = match tokenize(&input) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("{name}: {}", Failure::from(ParserError::from(err)));
            return Ok(false);
        }
    };

    println!("Tokens:");
    println!("-------");
    for token in &tokens {
        println!("{name}:{} {} {}", token.offset, token.category(), token.lexeme);
    }

    println!("\nTotal tokens: {}", tokens.len());

    Ok(true)
}

fn parse_file(path: Option<&Path>) -> Result<bool> {
    let input = read_source(path)?;
    let name = source_name(path);

    let tokens = match tokenize(&input) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("{name}: {}", Failure::from(ParserError::from(err)));
            return Ok(false);
        }
    };

    let mut parser = Parser::new(tokens);
    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{name}: {}", Failure::from(err));
            return Ok(false);
        }
    };

    println!("Program AST:");
    println!("============\n");

    for (i, cmd) in program.commands.iter().enumerate() {
        println!("[{i}]: {cmd:#?}");
    }

    let labels = parser.labels().names();
    if !labels.is_empty() {
        println!("\nLabels: {}", labels.join(", "));
    }

    println!("\nParsing completed successfully!");

    Ok(true)
}

fn check_file(path: Option<&Path>) -> Result<bool> {
    let input = read_source(path)?;
    let name = source_name(path);

    let outcome = check(&input);
    debug!(source = %name, accepted = outcome.is_success(), "check finished");

    match &outcome {
        ParseOutcome::Success(_) => println!("{name}: {}", outcome.report()),
        ParseOutcome::Failure(_) => eprintln!("{name}: {}", outcome.report()),
    }

    Ok(outcome.is_success())
}
