use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use super::sets::SetComputer;
use crate::grammar::{Grammar, Relation, Symbol};

// Adjacent symbol pairs inside rule bodies
type Pairs = HashSet<(Symbol, Symbol)>;

// For each symbol, the symbols it is related to
#[derive(Debug, Default)]
struct Links(HashMap<Symbol, HashSet<Symbol>>);

impl Links {
    fn link(&mut self, from: Symbol, to: impl IntoIterator<Item = Symbol>) {
        self.0.entry(from).or_default().extend(to);
    }

    fn contains(&self, from: &Symbol, to: &Symbol) -> bool {
        self.0.get(from).is_some_and(|targets| targets.contains(to))
    }
}

fn equalities(grammar: &Grammar) -> Pairs {
    grammar.productions().iter()
        .flat_map(|(_, body)| body.iter().copied().tuple_windows::<(Symbol, Symbol)>())
        .collect()
}

fn less_links(grammar: &Grammar, sets: &SetComputer, equalities: &Pairs) -> Links {
    let mut links = Links::default();

    for (a, b) in equalities {
        links.link(*a, sets.derived_first(b).copied());
    }

    let axiom = grammar.axiom();
    links.link(Symbol::StartMarker, sets.derived_first(&axiom).copied());
    links.link(Symbol::StartMarker, [axiom]);

    links
}

fn greater_links(grammar: &Grammar, sets: &SetComputer, equalities: &Pairs) -> Links {
    let mut links = Links::default();

    for (a, b) in equalities {
        // FIRST of a terminal is the terminal itself
        let targets = sets.first(b).into_iter().filter(Symbol::is_terminal).collect_vec();
        for ending in sets.derived_last(a) {
            links.link(*ending, targets.iter().copied());
        }
    }

    let axiom = grammar.axiom();
    for ending in sets.derived_last(&axiom) {
        links.link(*ending, [Symbol::EndMarker]);
    }
    links.link(axiom, [Symbol::EndMarker]);

    links
}

// Precedence relations between every row symbol (grammar symbols and `^`)
// and every column symbol (grammar symbols and `$`)
#[derive(Debug, PartialEq)]
pub struct PrecedenceTable {
    cells: HashMap<(Symbol, Symbol), Relation>,
    rows: Vec<Symbol>,
    columns: Vec<Symbol>,
}

impl PrecedenceTable {
    pub fn new(grammar: &Grammar) -> Self {
        Self::with_sets(grammar, &SetComputer::new(grammar))
    }

    pub fn with_sets(grammar: &Grammar, sets: &SetComputer) -> Self {
        let equalities = equalities(grammar);
        let less = less_links(grammar, sets, &equalities);
        let greater = greater_links(grammar, sets, &equalities);

        let rows = grammar.symbols().iter().copied().chain([Symbol::StartMarker]).collect_vec();
        let columns = grammar.symbols().iter().copied().chain([Symbol::EndMarker]).collect_vec();

        let cells = rows.iter()
            .cartesian_product(columns.iter())
            .map(|(a, b)| {
                // Reductions only ever happen in front of a terminal or the end
                let gt = match b {
                    Symbol::Terminal(_) | Symbol::EndMarker => greater.contains(a, b),
                    Symbol::NonTerminal(_) | Symbol::StartMarker | Symbol::Relation(_) => false,
                };
                let relation = Relation::new(less.contains(a, b), equalities.contains(&(*a, *b)), gt);
                ((*a, *b), relation)
            })
            .collect::<HashMap<_, _>>();

        log::info!("Built a {}x{} precedence table", rows.len(), columns.len());

        PrecedenceTable { cells, rows, columns }
    }

    // Missing pairs are unrelated
    pub fn get(&self, row: &Symbol, column: &Symbol) -> Relation {
        self.cells.get(&(*row, *column)).copied().unwrap_or(Relation::NONE)
    }

    pub fn rows(&self) -> &[Symbol] {
        &self.rows
    }

    pub fn columns(&self) -> &[Symbol] {
        &self.columns
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.cells.values()
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;
    use crate::grammar::tests::*;

    #[test]
    fn expression_table() {
        let table = PrecedenceTable::new(&expression_grammar());
        let start = Symbol::StartMarker;
        let end = Symbol::EndMarker;

        let pairs = vec![
            (nt('E'), t('+')),
            (t('+'), nt('T')),
            (t('+'), t('a')),
            (nt('T'), t('*')),
            (t('*'), t('a')),
            (nt('T'), t('+')),
            (t('a'), t('+')),
            (t('a'), t('*')),
            (start, nt('E')),
            (start, nt('T')),
            (start, t('a')),
            (nt('E'), end),
            (nt('T'), end),
            (t('a'), end),
            (t('+'), nt('E')),
            (t('a'), t('a')),
            (start, end),
        ];
        let answers = vec![
            "=", "<=", "<", "=", "=", ">", ">", ">",
            "<", "<", "<", ">", ">", ">",
            " ", " ", " ",
        ];

        for ((a, b), answer) in zip(pairs, answers) {
            assert_eq!(table.get(&a, &b).to_string(), answer, "relation of {} and {}", a, b);
        }
    }

    #[test]
    fn rows_and_columns() {
        let table = PrecedenceTable::new(&expression_grammar());

        assert_eq!(table.rows(), &[nt('E'), t('+'), nt('T'), t('*'), t('a'), Symbol::StartMarker]);
        assert_eq!(table.columns(), &[nt('E'), t('+'), nt('T'), t('*'), t('a'), Symbol::EndMarker]);
        assert_eq!(table.relations().count(), 36);
    }

    #[test]
    fn never_greater_against_nonterminal() {
        let grammars = vec![
            expression_grammar(),
            grammar(&[('S', "Ab"), ('S', "ab"), ('A', "a")]),
            grammar(&[('S', "SS"), ('S', "(S)"), ('S', "()")]),
        ];

        for grammar in grammars {
            let table = PrecedenceTable::new(&grammar);
            for row in table.rows() {
                for column in table.columns().iter().filter(|c| c.is_nonterminal()) {
                    assert!(!table.get(row, column).gt);
                }
            }
        }
    }

    #[test]
    fn building_is_deterministic() {
        let grammar = expression_grammar();
        assert_eq!(PrecedenceTable::new(&grammar), PrecedenceTable::new(&grammar));
    }

    #[test]
    fn undefined_nonterminal_is_only_adjacent() {
        let table = PrecedenceTable::new(&grammar(&[('S', "aBc")]));

        let equal = Relation { eq: true, ..Relation::NONE };

        assert_eq!(table.get(&t('a'), &nt('B')), equal);
        assert_eq!(table.get(&nt('B'), &t('c')), equal);
        assert_eq!(table.get(&nt('B'), &Symbol::EndMarker), Relation::NONE);
        assert_eq!(table.get(&t('c'), &Symbol::EndMarker), Relation { gt: true, ..Relation::NONE });
    }

    #[test]
    fn symbols_outside_the_grammar_are_unrelated() {
        let table = PrecedenceTable::new(&expression_grammar());
        assert!(table.get(&t('+'), &t('b')).none());
        assert!(table.get(&t('b'), &t('+')).none());
    }
}
