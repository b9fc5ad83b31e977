use std::collections::BTreeMap;

use log::debug;

use crate::grammar::{Grammar, Symbol};
use super::first::FirstSets;
use super::{insert_all, SymbolSet};

/// FOLLOW of every non-terminal; never contains `Empty`.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct FollowSets {
    sets: BTreeMap<String, SymbolSet>,
}

impl FollowSets {
    pub fn get(&self, nonterminal: &str) -> Option<&SymbolSet> {
        self.sets.get(nonterminal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolSet)> {
        self.sets.iter()
    }
}

pub fn update_follow(grammar: &Grammar, first: &FirstSets, follow: &mut FollowSets) -> bool {
    let mut changed = false;

    for production in &grammar.productions {
        for (i, symbol) in production.right.iter().enumerate() {
            let Symbol::NonTerminal(name) = symbol else {
                continue;
            };

            let rest = first.of_sequence(&production.right[i + 1..]);
            let vanishes = rest.contains(&Symbol::Empty);
            let mut additions: SymbolSet = rest.into_iter().filter(|s| *s != Symbol::Empty).collect();
            if vanishes {
                additions.extend(follow.sets.get(&production.left).into_iter().flatten().cloned());
            }

            let target = follow.sets.entry(name.clone()).or_default();
            changed |= insert_all(target, additions);
        }
    }

    changed
}

pub fn compute_follow(grammar: &Grammar, first: &FirstSets) -> FollowSets {
    let mut follow = FollowSets {
        sets: grammar.nonterminals().map(|name| (name.clone(), SymbolSet::new())).collect(),
    };
    follow.sets.entry(grammar.start_symbol.clone()).or_default().insert(Symbol::End);

    let mut passes = 1;
    while update_follow(grammar, first, &mut follow) {
        passes += 1;
    }
    debug!("FOLLOW converged after {} passes", passes);

    follow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::first::compute_first;
    use crate::analysis::tests::{grammar, set};

    fn follow_of(text: &str, terminals: &[&str]) -> FollowSets {
        let grammar = grammar(text, terminals);
        compute_follow(&grammar, &compute_first(&grammar))
    }

    #[test]
    fn follow_of_repetition() {
        let follow = follow_of("S -> a S\nS -> $", &["a"]);
        assert_eq!(follow.get("S"), Some(&set(&["#"])));
    }

    #[test]
    fn follow_of_start_without_self_reference() {
        let follow = follow_of("S -> a", &["a"]);
        assert_eq!(follow.get("S"), Some(&set(&["#"])));
    }

    #[test]
    fn follow_of_expression_grammar() {
        let follow = follow_of(
            "E -> T E'\nE' -> + T E'\nE' -> $\nT -> F T'\nT' -> * F T'\nT' -> $\nF -> ( E )\nF -> Ident",
            &["+", "*", "(", ")", "Ident"],
        );

        assert_eq!(follow.get("E"), Some(&set(&[")", "#"])));
        assert_eq!(follow.get("E'"), Some(&set(&[")", "#"])));
        assert_eq!(follow.get("T"), Some(&set(&["+", ")", "#"])));
        assert_eq!(follow.get("T'"), Some(&set(&["+", ")", "#"])));
        assert_eq!(follow.get("F"), Some(&set(&["*", "+", ")", "#"])));
    }

    #[test]
    fn follow_sees_through_nullable_suffix() {
        let follow = follow_of("S -> A B c\nA -> a\nB -> b\nB -> $", &["a", "b", "c"]);

        assert_eq!(follow.get("A"), Some(&set(&["b", "c"])));
        assert_eq!(follow.get("B"), Some(&set(&["c"])));
    }

    #[test]
    fn follow_never_contains_empty() {
        let follow = follow_of("S -> A B\nA -> $\nB -> $", &[]);

        for (name, set) in follow.iter() {
            assert!(!set.contains(&Symbol::Empty), "FOLLOW({})", name);
        }
        assert_eq!(follow.get("A"), Some(&set(&["#"])));
    }

    #[test]
    fn follow_is_idempotent() {
        let grammar = grammar("S -> A S b\nS -> $\nA -> a\nA -> $", &["a", "b"]);
        let first = compute_first(&grammar);
        let mut follow = compute_follow(&grammar, &first);
        let converged = follow.clone();

        assert!(!update_follow(&grammar, &first, &mut follow));
        assert_eq!(follow, converged);
    }
}
