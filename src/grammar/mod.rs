/*
    This module is for storing and querying grammars
*/

pub mod symbol;

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;
pub use symbol::{Relation, Symbol};

// The body of one production
pub type Rule = Vec<Symbol>;

#[derive(Debug, PartialEq)]
pub enum GrammarErrorType {
    // No rules at all, so there is no axiom either
    EmptyGrammar,
    // A rule head that is not a nonterminal
    InvalidHead(Symbol),
    // A rule with nothing on the right
    EmptyRule(Symbol),
    // A marker or relation inside a rule body
    InvalidBodySymbol(Symbol),
    // The requested axiom has no rules
    UndefinedAxiom(Symbol),
}

impl ErrorType for GrammarErrorType {}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::EmptyGrammar => write!(f, "The grammar has no rules"),
            GrammarErrorType::InvalidHead(symbol) => write!(f, "`{}` cannot head a rule", symbol),
            GrammarErrorType::EmptyRule(head) => write!(f, "Rule for `{}` has an empty body", head),
            GrammarErrorType::InvalidBodySymbol(symbol) => write!(f, "`{}` cannot appear in a rule body", symbol),
            GrammarErrorType::UndefinedAxiom(symbol) => write!(f, "Cannot use `{}` as the axiom, it has no rules", symbol),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    // Every production in declaration order
    productions: Vec<(Symbol, Rule)>,
    rules: HashMap<Symbol, Vec<Rule>>,
    heads: Vec<Symbol>,
    symbols: Vec<Symbol>,
    axiom: Symbol,
}

impl Grammar {
    pub fn new(productions: Vec<(Symbol, Rule)>) -> Result<Grammar, GrammarErrorType> {
        let axiom = match productions.first() {
            Some((head, _)) => *head,
            None => return Err(GrammarErrorType::EmptyGrammar),
        };

        for (head, body) in &productions {
            if !head.is_nonterminal() {
                return Err(GrammarErrorType::InvalidHead(*head));
            }
            if body.is_empty() {
                return Err(GrammarErrorType::EmptyRule(*head));
            }
            if let Some(symbol) = body.iter().find(|s| !s.is_grammar_symbol()) {
                return Err(GrammarErrorType::InvalidBodySymbol(*symbol));
            }
        }

        let heads = productions.iter().map(|(head, _)| *head).unique().collect_vec();

        let mut rules: HashMap<Symbol, Vec<Rule>> = HashMap::with_capacity(heads.len());
        for (head, body) in &productions {
            rules.entry(*head).or_default().push(body.clone());
        }

        let symbols = productions.iter()
            .flat_map(|(head, body)| std::iter::once(head).chain(body.iter()))
            .copied()
            .unique()
            .collect_vec();

        Ok(Grammar {
            productions,
            rules,
            heads,
            symbols,
            axiom,
        })
    }

    // The rules of a nonterminal, empty when it has none
    pub fn get(&self, nonterminal: &Symbol) -> &[Rule] {
        self.rules.get(nonterminal).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn axiom(&self) -> Symbol {
        self.axiom
    }

    pub fn set_axiom(&mut self, axiom: Symbol) -> Result<(), GrammarErrorType> {
        if !self.is_defined(&axiom) {
            return Err(GrammarErrorType::UndefinedAxiom(axiom));
        }
        self.axiom = axiom;
        Ok(())
    }

    pub fn productions(&self) -> &[(Symbol, Rule)] {
        &self.productions
    }

    // Nonterminals that have at least one rule, in order of definition
    pub fn heads(&self) -> &[Symbol] {
        &self.heads
    }

    // All symbols of heads and bodies, deduplicated, in order of appearance
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    // Nonterminals first, then terminals, each in order of appearance
    pub fn grouped_symbols(&self) -> Vec<Symbol> {
        let (nonterminals, terminals): (Vec<Symbol>, Vec<Symbol>) = self.symbols.iter()
            .partition(|s| s.is_nonterminal());
        nonterminals.into_iter().chain(terminals).collect()
    }

    // Whether `nonterminal` heads at least one rule
    pub fn is_defined(&self, nonterminal: &Symbol) -> bool {
        self.rules.contains_key(nonterminal)
    }

    // The head of the earliest declared rule whose body is exactly `body`
    pub fn rule_head(&self, body: &[Symbol]) -> Option<Symbol> {
        self.productions.iter()
            .find(|(_, rule)| rule.as_slice() == body)
            .map(|(head, _)| *head)
    }
}
