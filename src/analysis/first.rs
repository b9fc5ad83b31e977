use std::collections::BTreeMap;

use log::debug;

use crate::grammar::{Grammar, Symbol};
use super::{insert_all, SymbolSet};

/// FIRST of every non-terminal. Terminals and sentinels are their own FIRST
/// and are answered without a table entry.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct FirstSets {
    sets: BTreeMap<String, SymbolSet>,
}

impl FirstSets {
    pub fn get(&self, nonterminal: &str) -> Option<&SymbolSet> {
        self.sets.get(nonterminal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolSet)> {
        self.sets.iter()
    }

    pub fn of_symbol(&self, symbol: &Symbol) -> SymbolSet {
        match symbol {
            Symbol::NonTerminal(name) => self.sets.get(name).cloned().unwrap_or_default(),
            other => SymbolSet::from([other.clone()]),
        }
    }

    // Scans left to right while every prefix can vanish; `Empty` survives only
    // if the whole sequence can, which includes the empty sequence.
    pub fn of_sequence(&self, symbols: &[Symbol]) -> SymbolSet {
        let mut result = SymbolSet::from([Symbol::Empty]);

        for symbol in symbols {
            if !result.remove(&Symbol::Empty) {
                break;
            }
            result.extend(self.of_symbol(symbol));
        }

        result
    }
}

// One pass over every production. Returns whether any set grew.
pub fn update_first(grammar: &Grammar, first: &mut FirstSets) -> bool {
    let mut changed = false;

    for production in &grammar.productions {
        let body = first.of_sequence(&production.right);
        let target = first.sets.entry(production.left.clone()).or_default();
        changed |= insert_all(target, body);
    }

    changed
}

pub fn compute_first(grammar: &Grammar) -> FirstSets {
    let mut first = FirstSets {
        sets: grammar.nonterminals().map(|name| (name.clone(), SymbolSet::new())).collect(),
    };

    let mut passes = 1;
    while update_first(grammar, &mut first) {
        passes += 1;
    }
    debug!("FIRST converged after {} passes", passes);

    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::{grammar, set};

    #[test]
    fn first_of_repetition() {
        let grammar = grammar("S -> a S\nS -> $", &["a"]);
        let first = compute_first(&grammar);

        assert_eq!(first.get("S"), Some(&set(&["a", "$"])));
    }

    #[test]
    fn first_through_nullable_prefix() {
        let grammar = grammar("S -> A B c\nA -> a\nA -> $\nB -> b\nB -> $", &["a", "b", "c"]);
        let first = compute_first(&grammar);

        assert_eq!(first.get("A"), Some(&set(&["a", "$"])));
        assert_eq!(first.get("B"), Some(&set(&["b", "$"])));
        assert_eq!(first.get("S"), Some(&set(&["a", "b", "c"])));
    }

    #[test]
    fn first_of_vanishing_body() {
        let grammar = grammar("S -> A B\nA -> $\nB -> $", &[]);
        let first = compute_first(&grammar);

        assert_eq!(first.get("S"), Some(&set(&["$"])));
    }

    #[test]
    fn first_needs_several_passes() {
        // Rules are listed so information flows against the iteration order
        let grammar = grammar("S -> A\nA -> B\nB -> C\nC -> c", &["c"]);
        let first = compute_first(&grammar);

        for name in ["S", "A", "B", "C"] {
            assert_eq!(first.get(name), Some(&set(&["c"])), "FIRST({})", name);
        }
    }

    #[test]
    fn first_of_left_recursion_terminates() {
        let grammar = grammar("E -> E + T\nE -> T\nT -> Ident", &["+", "Ident"]);
        let first = compute_first(&grammar);

        assert_eq!(first.get("E"), Some(&set(&["Ident"])));
    }

    #[test]
    fn first_is_idempotent() {
        let grammar = grammar("S -> A B c\nA -> a A\nA -> $\nB -> b\nB -> $", &["a", "b", "c"]);
        let mut first = compute_first(&grammar);
        let converged = first.clone();

        assert!(!update_first(&grammar, &mut first));
        assert_eq!(first, converged);
    }

    // What leftmost derivations from `start` can begin with, within `limit`
    // expansions: terminals, or `Empty` when the whole form vanishes
    fn derivable_heads(grammar: &Grammar, start: &str, limit: usize) -> SymbolSet {
        let mut heads = SymbolSet::new();
        let mut forms = std::collections::VecDeque::from([vec![Symbol::NonTerminal(start.to_string())]]);
        let mut expansions = 0;

        while let Some(form) = forms.pop_front() {
            let form: Vec<Symbol> = form.into_iter().filter(|s| *s != Symbol::Empty).collect();
            match form.first() {
                None => { heads.insert(Symbol::Empty); }
                Some(Symbol::NonTerminal(name)) if expansions < limit => {
                    for production in grammar.productions.iter().filter(|p| p.left == *name) {
                        expansions += 1;
                        forms.push_back(production.right.iter().chain(&form[1..]).cloned().collect());
                    }
                }
                Some(Symbol::NonTerminal(_)) => {}
                Some(head) => { heads.insert(head.clone()); }
            }
        }

        heads
    }

    #[test]
    fn first_has_a_derivation_for_every_member() {
        let grammar = grammar(
            "E -> T E'\nE' -> + T E'\nE' -> $\nT -> F T'\nT' -> * F T'\nT' -> $\nF -> ( E )\nF -> Ident",
            &["+", "*", "(", ")", "Ident"],
        );
        let first = compute_first(&grammar);

        for (name, set) in first.iter() {
            let heads = derivable_heads(&grammar, name, 1000);
            assert!(set.is_subset(&heads), "FIRST({}) = {:?}, derivations start with {:?}", name, set, heads);
        }
        assert_eq!(first.get("E'"), Some(&set(&["+", "$"])));
    }

    #[test]
    fn sequence_rule() {
        let grammar = grammar("A -> a\nA -> $\nB -> b", &["a", "b", "c"]);
        let first = compute_first(&grammar);
        let a = Symbol::NonTerminal("A".to_string());
        let b = Symbol::NonTerminal("B".to_string());
        let c = Symbol::Terminal("c".to_string());

        assert_eq!(first.of_sequence(&[]), set(&["$"]));
        assert_eq!(first.of_sequence(&[a.clone()]), set(&["a", "$"]));
        assert_eq!(first.of_sequence(&[a.clone(), c.clone()]), set(&["a", "c"]));
        assert_eq!(first.of_sequence(&[b, a.clone()]), set(&["b"]));
        assert_eq!(first.of_sequence(&[Symbol::Empty, a]), set(&["a", "$"]));
    }
}
