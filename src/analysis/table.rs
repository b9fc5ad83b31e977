use std::collections::BTreeMap;

use log::{debug, warn};

use crate::grammar::{Grammar, Symbol};
use super::first::FirstSets;
use super::follow::FollowSets;

// Two productions claimed the same cell; `by` replaced `replaced`
#[derive(Debug, PartialEq, Clone)]
pub struct Conflict {
    pub nonterminal: String,
    pub lookahead: Symbol,
    pub replaced: usize,
    pub by: usize,
}

/// The predictive table. Cells hold indices into the grammar's productions.
#[derive(Debug, PartialEq, Default)]
pub struct Table {
    cells: BTreeMap<String, BTreeMap<Symbol, usize>>,
    conflicts: Vec<Conflict>,
}

impl Table {
    pub fn get(&self, nonterminal: &str, lookahead: &Symbol) -> Option<usize> {
        self.cells.get(nonterminal)?.get(lookahead).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = (&String, &Symbol, usize)> {
        self.cells.iter()
            .flat_map(|(nonterminal, row)| row.iter().map(move |(lookahead, &production)| (nonterminal, lookahead, production)))
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    fn set(&mut self, nonterminal: &str, lookahead: Symbol, production: usize) {
        let row = self.cells.entry(nonterminal.to_string()).or_default();
        if let Some(previous) = row.insert(lookahead.clone(), production) {
            if previous != production {
                warn!("M[{}, {}]: production {} replaces production {}", nonterminal, lookahead, production, previous);
                self.conflicts.push(Conflict {
                    nonterminal: nonterminal.to_string(),
                    lookahead,
                    replaced: previous,
                    by: production,
                });
            }
        }
    }
}

// Later productions overwrite earlier ones in a shared cell; every such
// overwrite is kept in `conflicts`.
pub fn build_table(grammar: &Grammar, first: &FirstSets, follow: &FollowSets) -> Table {
    let mut table = Table::default();

    for (index, production) in grammar.productions.iter().enumerate() {
        let body = first.of_sequence(&production.right);

        for lookahead in body.iter().filter(|s| **s != Symbol::Empty) {
            table.set(&production.left, lookahead.clone(), index);
        }
        if body.contains(&Symbol::Empty) {
            for lookahead in follow.get(&production.left).into_iter().flatten() {
                table.set(&production.left, lookahead.clone(), index);
            }
        }
    }

    debug!("table has {} cells, {} conflicts", table.cells().count(), table.conflicts.len());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::first::compute_first;
    use crate::analysis::follow::compute_follow;
    use crate::analysis::tests::grammar;

    fn table_of(grammar: &Grammar) -> Table {
        let first = compute_first(grammar);
        let follow = compute_follow(grammar, &first);
        build_table(grammar, &first, &follow)
    }

    fn terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn table_of_repetition() {
        let grammar = grammar("S -> a S\nS -> $", &["a"]);
        let table = table_of(&grammar);

        assert_eq!(table.get("S", &terminal("a")), Some(0));
        assert_eq!(table.get("S", &Symbol::End), Some(1));
        assert_eq!(table.get("S", &Symbol::Empty), None);
        assert_eq!(table.cells().count(), 2);
        assert!(table.conflicts().is_empty());
    }

    #[test]
    fn table_keeps_last_write() {
        let grammar = grammar("S -> a b\nS -> a c", &["a", "b", "c"]);
        let table = table_of(&grammar);

        assert_eq!(table.get("S", &terminal("a")), Some(1));
        assert_eq!(table.conflicts(), &[Conflict {
            nonterminal: "S".to_string(),
            lookahead: terminal("a"),
            replaced: 0,
            by: 1,
        }]);
    }

    #[test]
    fn table_conflict_between_first_and_follow() {
        // A can vanish and is followed by `a`, which also starts A
        let grammar = grammar("S -> A a\nA -> a\nA -> $", &["a"]);
        let table = table_of(&grammar);

        assert_eq!(table.get("A", &terminal("a")), Some(2));
        assert_eq!(table.conflicts().len(), 1);
    }

    #[test]
    fn table_independent_of_rule_order() {
        let text = ["E -> T E'", "E' -> + T E'", "E' -> $", "T -> ( E )", "T -> Ident"];
        let terminals = ["+", "(", ")", "Ident"];

        let forward = grammar(&text.join("\n"), &terminals);
        let mut reversed_text = text[1..].to_vec();
        reversed_text.reverse();
        reversed_text.insert(0, text[0]);
        let reversed = grammar(&reversed_text.join("\n"), &terminals);

        let cells = |grammar: &Grammar| {
            table_of(grammar).cells()
                .map(|(nonterminal, lookahead, production)| (nonterminal.clone(), lookahead.clone(), grammar.productions[production].clone()))
                .collect::<Vec<_>>()
        };

        assert_eq!(cells(&forward), cells(&reversed));
        assert_eq!(cells(&forward).len(), 7);
    }
}
