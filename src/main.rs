mod analysis;
mod cli;
mod driver;
mod error_handling;
mod grammar;
mod parser;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use analysis::{Analysis, ConflictPolicy};
use cli::Cli;
use driver::trace::TextTrace;
use driver::{ParseError, ParseErrorType};
use error_handling::Location;
use grammar::Vocabulary;

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn trace_error(error: std::io::Error, cli: &Cli) -> String {
    ParseError::at(Location::whole(&cli.output), ParseErrorType::TraceFailed(error)).to_string()
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut vocabulary = Vocabulary::default();
    vocabulary.extend(cli.terminals.iter().cloned());

    let mut grammar = parser::parse_file(&cli.grammar, &vocabulary)
        .map_err(|errors| parser::format_errors(&errors))?;
    if let Some(start) = &cli.start {
        grammar = parser::override_start(grammar, start, &cli.grammar).map_err(|e| e.to_string())?;
    }

    let tokens = parser::tokens::read_tokens(&cli.tokens).map_err(|e| e.to_string())?;

    let policy = if cli.strict { ConflictPolicy::Reject } else { ConflictPolicy::LastWins };
    let analysis = Analysis::new(grammar, policy, &cli.grammar).map_err(|e| e.to_string())?;
    if cli.sets {
        print!("{}", analysis);
    }

    let output = File::create(&cli.output).map_err(|e| trace_error(e, cli))?;
    let mut trace = TextTrace::new(BufWriter::new(output), cli.productions);
    driver::analyse(&analysis, &tokens, &mut trace).map_err(|e| e.to_string())?;
    trace.into_inner().flush().map_err(|e| trace_error(e, cli))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => {
            println!("Analysis completed.");
            ExitCode::SUCCESS
        }
        Err(report) => {
            eprintln!("{}", report);
            ExitCode::FAILURE
        }
    }
}
