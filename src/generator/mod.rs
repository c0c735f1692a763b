/*
    This module generates sentences of a grammar, to have something to
    parse besides the strings in the file
*/

use rand::prelude::*;
use std::path::PathBuf;
use std::fmt::Display;

use crate::grammar::*;
use crate::error_handling::*;

// Past this depth only rules without nonterminals are chosen, when there are any
const SOFT_DEPTH: usize = 32;
// Past this depth generation gives up
const HARD_DEPTH: usize = 256;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(Symbol),
    // A nonterminal kept expanding without ever settling on terminals
    DepthExceeded(Symbol),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::DepthExceeded(nonterminal) => write!(f, "Gave up expanding `{}` after {} levels", nonterminal, HARD_DEPTH),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateError>;

// Generates a sentence starting with the axiom
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, file: PathBuf, rng: &mut R) -> GenResult {
    generate_nonterminal(&grammar.axiom(), grammar, 0, &Location::file(file), rng)
}

pub fn generate_many<R: Rng + ?Sized>(grammar: &Grammar, amount: u32, file: PathBuf, rng: &mut R) -> Result<Vec<String>, GenerateError> {
    (0..amount).map(|_| generate(grammar, file.clone(), rng)).collect()
}

fn generate_nonterminal<R: Rng + ?Sized>(nonterminal: &Symbol, grammar: &Grammar, depth: usize, location: &Location, rng: &mut R) -> GenResult {
    let error = |error| GenerateError { location: location.clone(), error };

    let rules = grammar.get(nonterminal);
    if depth > HARD_DEPTH {
        return Err(error(GenerateErrorType::DepthExceeded(*nonterminal)));
    }

    let mut candidates: Vec<&Rule> = Vec::new();
    if depth > SOFT_DEPTH {
        candidates.extend(rules.iter().filter(|rule| rule.iter().all(Symbol::is_terminal)));
    }
    if candidates.is_empty() {
        candidates.extend(rules.iter());
    }

    let rule = candidates
        .choose(rng)
        .ok_or_else(|| error(GenerateErrorType::UndefinedNonterminal(*nonterminal)))?;

    generate_rule(rule, grammar, depth + 1, location, rng)
}

fn generate_rule<R: Rng + ?Sized>(rule: &Rule, grammar: &Grammar, depth: usize, location: &Location, rng: &mut R) -> GenResult {
    let mut result = String::new();
    for symbol in rule {
        result.push_str(&generate_symbol(symbol, grammar, depth, location, rng)?);
    }

    return Ok(result);
}

fn generate_symbol<R: Rng + ?Sized>(symbol: &Symbol, grammar: &Grammar, depth: usize, location: &Location, rng: &mut R) -> GenResult {
    match symbol {
        Symbol::NonTerminal(_) => generate_nonterminal(symbol, grammar, depth, location, rng),
        Symbol::Terminal(c) => Ok(c.to_string()),
        // Rules never hold markers or relations
        Symbol::StartMarker | Symbol::EndMarker | Symbol::Relation(_) => Ok(String::new()),
    }
}
