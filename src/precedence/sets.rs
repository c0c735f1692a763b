use std::collections::{BTreeSet, HashMap};

use crate::grammar::{Grammar, Rule, Symbol};

pub type SymbolSet = BTreeSet<Symbol>;

// Picks the symbol at one end of a rule body
type Selector = fn(&Rule) -> Option<&Symbol>;

fn leading(rule: &Rule) -> Option<&Symbol> {
    rule.first()
}

fn trailing(rule: &Rule) -> Option<&Symbol> {
    rule.last()
}

// The symbols at the selected end of each of a nonterminal's rules
fn ends<'g>(grammar: &'g Grammar, nonterminal: &Symbol, select: Selector) -> impl Iterator<Item = Symbol> + 'g {
    grammar.get(nonterminal).iter().filter_map(select).copied()
}

// Grows the set of symbols reachable at one end of a nonterminal until it
// stops changing. Returns the set and the number of rounds it took.
fn saturate(grammar: &Grammar, nonterminal: &Symbol, select: Selector) -> (SymbolSet, usize) {
    let mut current: SymbolSet = ends(grammar, nonterminal, select).collect();
    let mut rounds = 0;

    loop {
        rounds += 1;
        let next: SymbolSet = current.iter()
            .filter(|symbol| symbol.is_nonterminal())
            .flat_map(|symbol| ends(grammar, symbol, select))
            .chain(current.iter().copied())
            .collect();

        if next == current {
            return (current, rounds);
        }
        current = next;
    }
}

// FIRST and LAST sets of every defined nonterminal of a grammar. The stored
// sets are the derived ones, reachable through at least one rule application.
#[derive(Debug, PartialEq)]
pub struct SetComputer {
    first: HashMap<Symbol, SymbolSet>,
    last: HashMap<Symbol, SymbolSet>,
}

impl SetComputer {
    pub fn new(grammar: &Grammar) -> Self {
        // Undefined nonterminals are left out and read back as empty sets
        let heads = grammar.heads();

        let mut first = HashMap::with_capacity(heads.len());
        let mut last = HashMap::with_capacity(heads.len());

        for head in heads {
            let (first_set, first_rounds) = saturate(grammar, head, leading);
            let (last_set, last_rounds) = saturate(grammar, head, trailing);
            log::trace!("Saturated `{}` in {} and {} rounds", head, first_rounds, last_rounds);

            first.insert(*head, first_set);
            last.insert(*head, last_set);
        }

        SetComputer { first, last }
    }

    // A terminal or marker is its own FIRST set
    pub fn first(&self, symbol: &Symbol) -> SymbolSet {
        Self::lookup(&self.first, symbol)
    }

    pub fn last(&self, symbol: &Symbol) -> SymbolSet {
        Self::lookup(&self.last, symbol)
    }

    // Symbols that begin a string derived from `symbol` in one or more steps
    pub fn derived_first<'a>(&'a self, symbol: &Symbol) -> impl Iterator<Item = &'a Symbol> {
        self.first.get(symbol).into_iter().flatten()
    }

    pub fn derived_last<'a>(&'a self, symbol: &Symbol) -> impl Iterator<Item = &'a Symbol> {
        self.last.get(symbol).into_iter().flatten()
    }

    fn lookup(sets: &HashMap<Symbol, SymbolSet>, symbol: &Symbol) -> SymbolSet {
        match symbol {
            Symbol::NonTerminal(_) => sets.get(symbol).cloned().unwrap_or_default(),
            _ => BTreeSet::from([*symbol]),
        }
    }
}
