/*
    This module runs the table-driven parse over a token stream
*/

pub mod trace;

use std::fmt::Display;

use log::{debug, info};

use crate::analysis::Analysis;
use crate::error_handling::*;
use crate::grammar::Symbol;
use crate::parser::tokens::{Token, TokenStream};
use trace::{Action, TraceRecord, TraceSink};

#[derive(Debug)]
pub enum ParseErrorType {
    // No way to continue from the stack top with the current token
    SyntaxError { top: Symbol, found: Symbol },
    // The tokens ran out before the end marker was matched
    UnexpectedEnd { top: Symbol },
    // The trace could not be written
    TraceFailed(std::io::Error),
}

impl ErrorType for ParseErrorType {}

impl PartialEq for ParseErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParseErrorType::SyntaxError { top: a, found: b }, ParseErrorType::SyntaxError { top: c, found: d }) => a == c && b == d,
            (ParseErrorType::UnexpectedEnd { top: a }, ParseErrorType::UnexpectedEnd { top: b }) => a == b,
            (ParseErrorType::TraceFailed(a), ParseErrorType::TraceFailed(b)) => same_io_kind(a, b),
            _ => false
        }
    }
}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::SyntaxError { top, found } => write!(f, "Syntax error: unexpected `{}` with `{}` on top of the stack", found, top),
            ParseErrorType::UnexpectedEnd { top } => write!(f, "Tokens ended with `{}` still on the stack", top),
            ParseErrorType::TraceFailed(e) => write!(f, "Could not write trace: {}", e),
        }
    }
}

pub type ParseError = Error<ParseErrorType>;

/// Drives the parse stack over `stream`, reporting every step to `sink`.
/// Returns the number of steps once the end marker is accepted. Stops at the
/// first token the table has no answer for, without recording that step.
pub fn analyse(analysis: &Analysis, stream: &TokenStream, sink: &mut impl TraceSink) -> Result<usize, ParseError> {
    let mut stack = vec![Symbol::End, Symbol::NonTerminal(analysis.grammar.start_symbol.clone())];
    let mut cursor = stream.tokens.iter();
    let mut token = cursor.next();
    let mut seq = 0;

    while let Some(top) = stack.pop() {
        let current: &Token = token.ok_or_else(|| ParseError::at(
            Location::whole(&stream.path),
            ParseErrorType::UnexpectedEnd { top: top.clone() }
        ))?;
        seq += 1;

        let action = if top == current.kind {
            token = cursor.next();
            if top == Symbol::End { Action::Accept } else { Action::Move }
        } else if top == Symbol::Empty {
            Action::Reduction(None)
        } else {
            let production = match &top {
                Symbol::NonTerminal(name) => analysis.table.get(name, &current.kind),
                _ => None
            };
            let production = production.map(|index| analysis.production(index)).ok_or_else(|| ParseError::at(
                stream.location(current),
                ParseErrorType::SyntaxError { top: top.clone(), found: current.kind.clone() }
            ))?;

            stack.extend(production.right.iter().rev().filter(|s| **s != Symbol::Empty).cloned());
            Action::Reduction(Some(production.clone()))
        };

        debug!("step {}: {} on `{}`, stack depth {}", seq, action, current.value, stack.len());
        let accepted = action == Action::Accept;
        sink.record(TraceRecord { seq, top, current: current.value.clone(), action })
            .map_err(|e| ParseError::at(stream.location(current), ParseErrorType::TraceFailed(e)))?;

        if accepted {
            info!("accepted {} after {} steps", stream.path.display(), seq);
            return Ok(seq);
        }
    }

    // `End` sits at the bottom and is only popped by an accept
    Err(ParseError::at(Location::whole(&stream.path), ParseErrorType::UnexpectedEnd { top: Symbol::End }))
}
