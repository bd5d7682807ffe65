use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::{ArgAction, Parser};
use ktparse::{display_error, lexer::lexer::tokenize, parser::parser::parse};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE_NAME: &str = "demos/sample.kts";
const SAMPLE: &str = include_str!("../demos/sample.kts");

/// Lexes and parses a Kotlin-subset script, printing the tree and any
/// syntax errors.
#[derive(Debug, Parser)]
#[command(name = "ktparse", version, about = "Kotlin-subset lexer and parser")]
struct Cli {
    /// Script to parse. Parses the bundled sample when omitted.
    path: Option<PathBuf>,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Do not print the syntax tree
    #[arg(long)]
    no_ast: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let (file_name, source) = match &cli.path {
        Some(path) => match read_to_string(path) {
            Ok(source) => (path.display().to_string(), source),
            Err(err) => {
                eprintln!("Failed to read {}: {}", path.display(), err);
                return ExitCode::from(2);
            }
        },
        None => (String::from(SAMPLE_NAME), String::from(SAMPLE)),
    };

    let start = Instant::now();

    if cli.tokens {
        match tokenize(&source) {
            Ok(tokens) => {
                for token in &tokens {
                    println!("{}", token);
                }
            }
            Err(error) => {
                eprint!("{}", display_error(&error, &source, &file_name));
                return ExitCode::from(2);
            }
        }
        info!("tokenized in {:?}", start.elapsed());
    }

    let parse_start = Instant::now();
    let output = match parse(&source) {
        Ok(output) => output,
        Err(error) => {
            eprint!("{}", display_error(&error, &source, &file_name));
            return ExitCode::from(2);
        }
    };
    info!("parsed in {:?}", parse_start.elapsed());

    if !cli.no_ast {
        println!("{:#?}", output.file);
    }

    for diagnostic in &output.diagnostics {
        eprintln!("{}", diagnostic);
    }

    info!("total time: {:?}", start.elapsed());

    if output.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "ktparse=warn",
        1 => "ktparse=debug",
        _ => "ktparse=trace",
    }
}
