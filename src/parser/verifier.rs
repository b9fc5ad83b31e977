use std::collections::BTreeSet;

use crate::grammar::{Production, Symbol, Vocabulary};
use super::GrammarErrorType::{TerminalDefined, UndefinedSymbol};
use super::{GrammarError, GrammarErrors, FileResult, Rule};

fn get_defined_terminals(rules: &[Rule], vocabulary: &Vocabulary) -> GrammarErrors {
    rules.iter()
        .filter(|rule| vocabulary.is_reserved(&rule.left))
        .map(|rule| GrammarError {
            location: rule.location.clone(),
            error: TerminalDefined(rule.left.clone())
        })
        .collect()
}

// Classifies one rule, or reports every symbol in it that has no class
fn classify_rule(rule: &Rule, nonterminals: &BTreeSet<&str>, vocabulary: &Vocabulary) -> Result<Production, GrammarErrors> {
    let (right, undefined): (Vec<_>, Vec<_>) = rule.right.iter()
        .map(|name| vocabulary.classify(name, nonterminals).ok_or(name))
        .partition(Result::is_ok);

    if !undefined.is_empty() {
        return Err(undefined.into_iter()
            .filter_map(Result::err)
            .map(|name| GrammarError {
                location: rule.location.clone(),
                error: UndefinedSymbol(name.clone())
            })
            .collect());
    }

    Ok(Production {
        left: rule.left.clone(),
        right: right.into_iter().filter_map(Result::ok).collect::<Vec<Symbol>>()
    })
}

pub fn classify_rules(rules: &[Rule], vocabulary: &Vocabulary) -> FileResult<Vec<Production>> {
    let mut errors = get_defined_terminals(rules, vocabulary);

    let nonterminals: BTreeSet<&str> = rules.iter()
        .map(|rule| rule.left.as_str())
        .filter(|left| !vocabulary.is_reserved(left))
        .collect();

    let mut productions = Vec::with_capacity(rules.len());
    for rule in rules {
        match classify_rule(rule, &nonterminals, vocabulary) {
            Ok(production) => productions.push(production),
            Err(rule_errors) => errors.extend(rule_errors)
        }
    }

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(productions)
    }
}
