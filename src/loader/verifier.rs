use std::collections::HashSet;

use crate::grammar::{Rule, Symbol};
use super::LoadErrorType::UndefinedNonterminal;
use super::{LoadError, LoadErrors, Location};

// A rule together with the line it came from
pub type LocatedRule = (Symbol, Rule, Location);

fn get_rule_undefined_symbols(rule: &Rule, location: &Location, defined: &HashSet<Symbol>) -> LoadErrors {
    // Keep only the nonterminals that never head a rule, unwrapping their
    // character for the message
    rule.iter()
        .filter_map(|symbol| match symbol {
            Symbol::NonTerminal(c) if !defined.contains(symbol) => Some(*c),
            _ => None
        })
        .map(|c| LoadError {
            location: location.to_owned(),
            error: UndefinedNonterminal(c)
        })
        .collect()
}

fn get_undefined_symbols(rules: &[LocatedRule]) -> LoadErrors {
    let defined: HashSet<Symbol> = rules.iter().map(|(head, _, _)| *head).collect();

    rules.iter()
        .flat_map(|(_, rule, location)| get_rule_undefined_symbols(rule, location, &defined))
        .collect()
}

// Problems that do not stop the grammar from being analysed. Undefined
// nonterminals have no rules, so they end up unrelated to everything after them.
pub fn verify_rules(rules: &[LocatedRule]) -> LoadErrors {
    let mut warnings = Vec::new();

    warnings.extend(get_undefined_symbols(rules));

    warnings
}
