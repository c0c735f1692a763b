/*
    Symbols of a precedence grammar, plus the relation markers that share
    the parser stack with them
*/

use std::fmt::Display;

// The three precedence relations between an ordered pair of symbols.
// Any combination may hold at once; none at all means the pair is unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Relation {
    pub lt: bool,
    pub eq: bool,
    pub gt: bool,
}

impl Relation {
    pub const NONE: Relation = Relation { lt: false, eq: false, gt: false };

    pub fn new(lt: bool, eq: bool, gt: bool) -> Self {
        Relation { lt, eq, gt }
    }

    pub fn none(&self) -> bool {
        !(self.lt || self.eq || self.gt)
    }

    // Strictly less, which is the only marker that closes a reduction basis
    pub fn is_basis_start(&self) -> bool {
        self.lt && !self.eq
    }

    pub fn width(&self) -> usize {
        self.to_string().chars().count()
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.none() {
            return write!(f, " ");
        }
        if self.lt {
            write!(f, "<")?;
        }
        if self.gt {
            write!(f, ">")?;
        }
        if self.eq {
            write!(f, "=")?;
        }
        Ok(())
    }
}

pub const START_MARKER: char = '^';
pub const END_MARKER: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(char),
    NonTerminal(char),
    StartMarker,
    EndMarker,
    Relation(Relation),
}

impl Symbol {
    // Uppercase letters name nonterminals, everything else printable is a
    // terminal. Whitespace and the marker characters are not symbols.
    pub fn from_char(c: char) -> Option<Symbol> {
        if c.is_whitespace() || c == START_MARKER || c == END_MARKER {
            None
        } else if c.is_uppercase() {
            Some(Symbol::NonTerminal(c))
        } else {
            Some(Symbol::Terminal(c))
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    // Terminals and nonterminals, the only symbols allowed in a rule
    pub fn is_grammar_symbol(&self) -> bool {
        self.is_terminal() || self.is_nonterminal()
    }

    pub fn relation(&self) -> Option<Relation> {
        match self {
            Symbol::Relation(relation) => Some(*relation),
            _ => None,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(c) | Symbol::NonTerminal(c) => write!(f, "{}", c),
            Symbol::StartMarker => write!(f, "{}", START_MARKER),
            Symbol::EndMarker => write!(f, "{}", END_MARKER),
            Symbol::Relation(relation) => write!(f, "{}", relation),
        }
    }
}

impl From<Relation> for Symbol {
    fn from(relation: Relation) -> Self {
        Symbol::Relation(relation)
    }
}
