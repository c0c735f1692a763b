/*
    This module builds the precedence relations of a grammar and decides
    whether it can be parsed with them
*/

pub mod classify;
pub mod sets;
pub mod table;

pub use classify::{classify, GrammarType};
pub use sets::SetComputer;
pub use table::PrecedenceTable;

use itertools::Itertools;

use crate::grammar::Grammar;

// Everything derived from a grammar before parsing
#[derive(Debug)]
pub struct Analysis {
    pub table: PrecedenceTable,
    pub grammar_type: GrammarType,
}

pub fn analyze(grammar: &Grammar) -> Analysis {
    let sets = SetComputer::new(grammar);
    for head in grammar.heads() {
        log::debug!(
            "FIRST({}) = {{{}}}, LAST({}) = {{{}}}",
            head, sets.first(head).iter().join(", "),
            head, sets.last(head).iter().join(", ")
        );
    }

    let table = PrecedenceTable::with_sets(grammar, &sets);
    let grammar_type = classify(grammar, &table);

    log::info!("Grammar with axiom `{}` is {}", grammar.axiom(), grammar_type);

    Analysis { table, grammar_type }
}
