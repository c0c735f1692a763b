use std::fmt::Display;

use super::table::PrecedenceTable;
use crate::grammar::{Grammar, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarType {
    // At most one relation per pair
    Simple,
    // `<` and `=` may overlap, but never with `>`
    Weak,
    // Not suitable for precedence parsing
    None,
}

impl GrammarType {
    pub fn code(&self) -> char {
        match self {
            GrammarType::Simple => 'S',
            GrammarType::Weak => 'W',
            GrammarType::None => 'N',
        }
    }

    pub fn is_parsable(&self) -> bool {
        *self != GrammarType::None
    }
}

impl Display for GrammarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarType::Simple => write!(f, "simple precedence"),
            GrammarType::Weak => write!(f, "weak precedence"),
            GrammarType::None => write!(f, "not a precedence grammar"),
        }
    }
}

// Finds a rule `B -> β` and a longer rule `A -> αxβ` where `x <= B`. With
// such a pair the parser cannot tell which basis to reduce.
fn suffix_conflict(grammar: &Grammar, table: &PrecedenceTable) -> Option<(Symbol, Symbol)> {
    for (head, body) in grammar.productions() {
        for (_, other) in grammar.productions() {
            if other.len() <= body.len() || !other.ends_with(body) {
                continue;
            }
            let before = other[other.len() - body.len() - 1];
            let relation = table.get(&before, head);
            if relation.lt || relation.eq {
                return Some((before, *head));
            }
        }
    }
    None
}

pub fn classify(grammar: &Grammar, table: &PrecedenceTable) -> GrammarType {
    if table.relations().all(|r| r.width() <= 1) {
        return GrammarType::Simple;
    }

    if table.relations().any(|r| (r.lt || r.eq) && r.gt) {
        log::debug!("Shift and reduce relations overlap");
        return GrammarType::None;
    }

    if let Some((before, head)) = suffix_conflict(grammar, table) {
        log::debug!("A rule of `{}` is a suffix of another rule where it follows `{}`", head, before);
        return GrammarType::None;
    }

    GrammarType::Weak
}
