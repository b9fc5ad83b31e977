/*
    This module reads grammar and token files
*/

mod lexer;
mod verifier;
pub mod tokens;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::PathBuf;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use log::{debug, info};
use verifier::classify_rules;

#[derive(Debug)]
pub enum GrammarErrorType {
    // A right-hand symbol is neither a known terminal nor defined by a rule
    UndefinedSymbol(String),
    // A rule tries to rewrite a terminal or one of the sentinels
    TerminalDefined(String),
    // No line of the source had the shape of a production
    EmptyGrammar,
    // The requested start symbol has no rule
    UnknownStart(String),
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for GrammarErrorType {}

impl PartialEq for GrammarErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GrammarErrorType::UndefinedSymbol(a), GrammarErrorType::UndefinedSymbol(b)) => a == b,
            (GrammarErrorType::TerminalDefined(a), GrammarErrorType::TerminalDefined(b)) => a == b,
            (GrammarErrorType::UnknownStart(a), GrammarErrorType::UnknownStart(b)) => a == b,
            (GrammarErrorType::FileError(a), GrammarErrorType::FileError(b)) => same_io_kind(a, b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::UndefinedSymbol(symbol) => write!(f, "`{}` is neither a terminal nor defined by any rule", symbol),
            GrammarErrorType::TerminalDefined(symbol) => write!(f, "`{}` is a terminal and cannot be rewritten", symbol),
            GrammarErrorType::EmptyGrammar => write!(f, "No productions found"),
            GrammarErrorType::UnknownStart(symbol) => write!(f, "Start symbol `{}` has no rule", symbol),
            GrammarErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type GrammarError = Error<GrammarErrorType>;
pub type GrammarErrors = Errors<GrammarErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> GrammarError {
    GrammarError {
        location: Location {
            file,
            line: 0
        },
        error: GrammarErrorType::FileError(error)
    }
}

pub type LineResult<T> = std::result::Result<T, GrammarError>;
pub type FileResult<T> = std::result::Result<T, GrammarErrors>;

// A production whose symbols are still plain names
#[derive(PartialEq, Debug)]
struct Rule {
    left: String,
    right: Vec<String>,
    location: Location
}

fn rule_from_line(line: &str, location: Location) -> Option<Rule> {
    lexer::lex_production(line).map(|raw| Rule {
        left: raw.left.to_string(),
        right: raw.right.into_iter().map(str::to_string).collect(),
        location
    })
}

fn grammar_from_rules(rules: Vec<Rule>, path: &PathBuf, vocabulary: &Vocabulary) -> FileResult<Grammar> {
    let start_symbol = match rules.first() {
        Some(rule) => rule.left.clone(),
        None => return Err(vec![GrammarError {
            location: Location::whole(path),
            error: GrammarErrorType::EmptyGrammar
        }])
    };

    let productions = classify_rules(&rules, vocabulary)?;
    info!("loaded {} productions from {}, start symbol `{}`", productions.len(), path.display(), start_symbol);

    return Ok(Grammar {
        start_symbol,
        productions
    });
}

// Reads productions from any line source. `path` is only used for locations.
pub fn parse_reader(reader: impl BufRead, path: &PathBuf, vocabulary: &Vocabulary) -> FileResult<Grammar> {
    let mut rules = Vec::new();

    for (num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| vec![io_error(e, path.clone())])?;
        match rule_from_line(&line, Location::line(path, num + 1)) {
            Some(rule) => rules.push(rule),
            None if !line.trim().is_empty() => debug!("{}:{}: skipped `{}`", path.display(), num + 1, line),
            None => {}
        }
    }

    grammar_from_rules(rules, path, vocabulary)
}

pub fn parse_file(path: &PathBuf, vocabulary: &Vocabulary) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;
    parse_reader(std::io::BufReader::new(file), path, vocabulary)
}

// Replaces the start symbol taken from the first rule
pub fn override_start(grammar: Grammar, start: &str, path: &PathBuf) -> LineResult<Grammar> {
    if !grammar.is_nonterminal(start) {
        return Err(GrammarError {
            location: Location::whole(path),
            error: GrammarErrorType::UnknownStart(start.to_string())
        });
    }

    Ok(Grammar {
        start_symbol: start.to_string(),
        ..grammar
    })
}

// Joins a batch of errors into one report, one per line
pub fn format_errors(errors: &GrammarErrors) -> String {
    errors.iter().map(ToString::to_string).join("\n")
}
