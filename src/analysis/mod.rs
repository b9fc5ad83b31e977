/*
    This module computes FIRST/FOLLOW sets and the predictive table
*/

pub mod first;
pub mod follow;
pub mod table;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::PathBuf;

use itertools::Itertools;
use log::info;

use crate::error_handling::*;
use crate::grammar::*;
use first::{compute_first, FirstSets};
use follow::{compute_follow, FollowSets};
use table::{build_table, Table};

pub type SymbolSet = BTreeSet<Symbol>;

pub(crate) fn insert_all(target: &mut SymbolSet, items: impl IntoIterator<Item = Symbol>) -> bool {
    let before = target.len();
    target.extend(items);
    target.len() != before
}

#[derive(Debug, PartialEq)]
pub enum TableErrorType {
    // Two productions claim the same cell
    NotLL1 {
        nonterminal: String,
        lookahead: Symbol,
        replaced: String,
        by: String,
    },
}

impl ErrorType for TableErrorType {}

impl Display for TableErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableErrorType::NotLL1 { nonterminal, lookahead, replaced, by } =>
                write!(f, "Grammar is not LL(1): M[{}, {}] is claimed by `{}` and `{}`", nonterminal, lookahead, replaced, by),
        }
    }
}

pub type TableError = Error<TableErrorType>;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ConflictPolicy {
    // Keep the later production, as the table is filled in rule order
    LastWins,
    Reject,
}

/// Everything derived from one grammar. Built once, read-only afterwards.
#[derive(Debug)]
pub struct Analysis {
    pub grammar: Grammar,
    pub first: FirstSets,
    pub follow: FollowSets,
    pub table: Table,
}

impl Analysis {
    pub fn new(grammar: Grammar, policy: ConflictPolicy, source: &PathBuf) -> Result<Self, TableError> {
        let first = compute_first(&grammar);
        let follow = compute_follow(&grammar, &first);
        let table = build_table(&grammar, &first, &follow);

        if let (ConflictPolicy::Reject, Some(conflict)) = (policy, table.conflicts().first()) {
            return Err(TableError::at(Location::whole(source), TableErrorType::NotLL1 {
                nonterminal: conflict.nonterminal.clone(),
                lookahead: conflict.lookahead.clone(),
                replaced: grammar.productions[conflict.replaced].to_string(),
                by: grammar.productions[conflict.by].to_string(),
            }));
        }

        info!("analysis of `{}` done, {} table conflicts", grammar.start_symbol, table.conflicts().len());
        Ok(Analysis { grammar, first, follow, table })
    }

    pub fn production(&self, index: usize) -> &Production {
        &self.grammar.productions[index]
    }
}

fn format_set(set: &SymbolSet) -> String {
    set.iter().join(" ")
}

impl Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (nonterminal, set) in self.first.iter() {
            writeln!(f, "FIRST({}) = {{ {} }}", nonterminal, format_set(set))?;
        }
        writeln!(f)?;
        for (nonterminal, set) in self.follow.iter() {
            writeln!(f, "FOLLOW({}) = {{ {} }}", nonterminal, format_set(set))?;
        }
        writeln!(f)?;
        for (nonterminal, lookahead, production) in self.table.cells() {
            writeln!(f, "M[{}, {}] = {}", nonterminal, lookahead, self.production(production))?;
        }
        Ok(())
    }
}
