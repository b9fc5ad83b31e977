/*
    This module is for storing and classifying grammars
*/

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;

pub const EMPTY: &str = "$";
pub const END: &str = "#";

// Lexical categories the tokenizer can produce
pub const DEFAULT_TERMINALS: [&str; 25] = [
    "const", ",", ";", "Ident", "=", "int", "(", ")", "void", "{", "}", "INT", "+",
    "-", "!", "*", "/", "%", "return", "<", ">", "<=", ">=", "==", "!=",
];

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
    Empty,
    End,
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(s) | Symbol::NonTerminal(s) => write!(f, "{}", s),
            Symbol::Empty => write!(f, "{}", EMPTY),
            Symbol::End => write!(f, "{}", END),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Production {
    pub left: String,
    pub right: Vec<Symbol>,
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.left, self.right.iter().join(" "))
    }
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub start_symbol: String,
    pub productions: Vec<Production>,
}

impl Grammar {
    // Non-terminals in order of first definition
    pub fn nonterminals(&self) -> impl Iterator<Item = &String> {
        self.productions.iter().map(|p| &p.left).unique()
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.productions.iter().any(|p| p.left == name)
    }
}

/// The set of names that are terminals before any production is read.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terminals: BTreeSet<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            terminals: DEFAULT_TERMINALS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    pub fn new<I, S>(terminals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vocabulary {
            terminals: terminals.into_iter().map(Into::into).collect(),
        }
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, terminals: I) {
        self.terminals.extend(terminals);
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        name == EMPTY || name == END || self.is_terminal(name)
    }

    /// Tags a right-hand-side name, given the left-hand sides seen in the
    /// grammar. Unknown names give `None`.
    pub fn classify(&self, name: &str, nonterminals: &BTreeSet<&str>) -> Option<Symbol> {
        if name == EMPTY {
            Some(Symbol::Empty)
        } else if name == END {
            Some(Symbol::End)
        } else if self.is_terminal(name) {
            Some(Symbol::Terminal(name.to_string()))
        } else if nonterminals.contains(name) {
            Some(Symbol::NonTerminal(name.to_string()))
        } else {
            None
        }
    }
}
