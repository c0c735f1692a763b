/*
    This module parses strings bottom-up with a precedence table
*/

use std::collections::VecDeque;
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;
use crate::grammar::{Grammar, Symbol};
use crate::precedence::PrecedenceTable;

pub const ERROR_LINE: &str = "error";

#[derive(Debug, PartialEq)]
pub enum ParseErrorType {
    // The top of the stack was due for a reduction but no rule matches it.
    // The table and the grammar disagree, so this is not the input's fault.
    NoSuchRule(Vec<Symbol>),
}

impl ErrorType for ParseErrorType {}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::NoSuchRule(basis) => write!(f, "No rule derives `{}`", basis.iter().join("")),
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseErrorType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

// Every configuration the parser went through, one line per step
#[derive(Debug, PartialEq)]
pub struct Trace {
    pub lines: Vec<String>,
    pub outcome: Outcome,
}

impl Trace {
    fn finish(lines: Vec<String>, outcome: Outcome) -> ParseResult<Trace> {
        Ok(Trace { lines, outcome })
    }
}

enum Reduction {
    Reduced,
    Stuck,
}

// One terminal per character
pub fn tokenize(text: &str) -> Vec<Symbol> {
    text.chars().map(Symbol::Terminal).collect()
}

fn render_stack(stack: &[Symbol]) -> String {
    stack.iter().filter(|s| s.relation().is_none()).join("")
}

fn render(stack: &[Symbol], input: &VecDeque<Symbol>) -> String {
    format!("{} {}", render_stack(stack), input.iter().join(""))
}

// The topmost grammar symbol or marker, skipping relations
fn top_symbol(stack: &[Symbol]) -> Symbol {
    stack.iter()
        .rev()
        .find(|s| s.relation().is_none())
        .copied()
        .unwrap_or(Symbol::StartMarker)
}

pub struct Parser<'a> {
    grammar: &'a Grammar,
    table: &'a PrecedenceTable,
}

impl<'a> Parser<'a> {
    pub fn new(grammar: &'a Grammar, table: &'a PrecedenceTable) -> Self {
        Parser { grammar, table }
    }

    pub fn parse(&self, input: &[Symbol]) -> ParseResult<Trace> {
        // Grammar symbols interleaved with the relation that held when each was pushed
        let mut stack = vec![Symbol::StartMarker];
        let mut input: VecDeque<Symbol> = input.iter().copied().chain([Symbol::EndMarker]).collect();
        let mut lines = vec![render(&stack, &input)];

        while let Some(&next) = input.front() {
            let top = top_symbol(&stack);
            let relation = self.table.get(&top, &next);

            if relation.none() {
                log::trace!("`{}` and `{}` are unrelated", top, next);
                lines.push(ERROR_LINE.to_string());
                return Trace::finish(lines, Outcome::Rejected);
            }

            if relation.gt {
                if self.is_complete(&stack, &input) {
                    stack.push(relation.into());
                    stack.push(next);
                    input.pop_front();
                    lines.push(render_stack(&stack));
                    return Trace::finish(lines, Outcome::Accepted);
                }

                if let Reduction::Stuck = self.reduce(&mut stack)? {
                    lines.push(ERROR_LINE.to_string());
                    return Trace::finish(lines, Outcome::Rejected);
                }
            } else {
                log::trace!("Shift `{}`", next);
                stack.push(relation.into());
                stack.push(next);
                input.pop_front();
            }

            lines.push(render(&stack, &input));
        }

        Trace::finish(lines, Outcome::Rejected)
    }

    // Only the axiom is left and only the end marker is unread
    fn is_complete(&self, stack: &[Symbol], input: &VecDeque<Symbol>) -> bool {
        let axiom = self.grammar.axiom();
        let reduced = matches!(stack, [Symbol::StartMarker, Symbol::Relation(_), top] if *top == axiom);
        reduced && input.len() == 1 && input.front() == Some(&Symbol::EndMarker)
    }

    // Replaces the longest rule body on top of the stack with its head
    fn reduce(&self, stack: &mut Vec<Symbol>) -> ParseResult<Reduction> {
        let boundary = stack.iter().rposition(|s| s.relation().is_some_and(|r| r.is_basis_start()));
        let Some(boundary) = boundary else {
            log::trace!("No basis start on the stack");
            return Ok(Reduction::Stuck);
        };

        let candidates = stack[boundary + 1..].iter()
            .filter(|s| s.relation().is_none())
            .copied()
            .collect_vec();

        let (head, length) = (1..=candidates.len())
            .rev()
            .find_map(|length| {
                let basis = &candidates[candidates.len() - length..];
                self.grammar.rule_head(basis).map(|head| (head, length))
            })
            .ok_or_else(|| ParseErrorType::NoSuchRule(candidates.clone()))?;

        log::trace!("Reduce `{}` to `{}`", candidates[candidates.len() - length..].iter().join(""), head);

        // Each basis symbol takes its relation marker with it
        stack.truncate(stack.len() - 2 * length);

        let relation = self.table.get(&top_symbol(stack), &head);
        if relation.none() {
            return Ok(Reduction::Stuck);
        }

        stack.push(Symbol::from(relation));
        stack.push(head);
        Ok(Reduction::Reduced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::*;

    fn parse_with(grammar: &Grammar, text: &str) -> ParseResult<Trace> {
        let table = PrecedenceTable::new(grammar);
        Parser::new(grammar, &table).parse(&tokenize(text))
    }

    #[test]
    fn parse_expression() {
        let trace = parse_with(&expression_grammar(), "a+a*a").unwrap();

        assert_eq!(trace.lines, vec![
            "^ a+a*a$",
            "^a +a*a$",
            "^T +a*a$",
            "^E +a*a$",
            "^E+ a*a$",
            "^E+a *a$",
            "^E+T *a$",
            "^E+T* a$",
            "^E+T*a $",
            "^E+T $",
            "^E $",
            "^E$",
        ]);
        assert_eq!(trace.outcome, Outcome::Accepted);
    }

    #[test]
    fn parse_single_rule() {
        let trace = parse_with(&grammar(&[('S', "a")]), "a").unwrap();

        assert_eq!(trace.lines, vec!["^ a$", "^a $", "^S $", "^S$"]);
        assert_eq!(trace.outcome, Outcome::Accepted);
    }

    #[test]
    fn parse_through_unit_rules() {
        let trace = parse_with(&grammar(&[('S', "A"), ('A', "a")]), "a").unwrap();

        assert_eq!(trace.lines, vec!["^ a$", "^a $", "^A $", "^S $", "^S$"]);
        assert_eq!(trace.outcome, Outcome::Accepted);
    }

    #[test]
    fn earliest_rule_wins_ties() {
        let grammar = grammar(&[('S', "A"), ('A', "a"), ('B', "a")]);
        let trace = parse_with(&grammar, "a").unwrap();

        assert_eq!(trace.lines[2], "^A $");
        assert_eq!(trace.outcome, Outcome::Accepted);
    }

    #[test]
    fn unknown_terminal_is_an_error() {
        let trace = parse_with(&expression_grammar(), "a+b").unwrap();

        assert_eq!(trace.lines, vec![
            "^ a+b$",
            "^a +b$",
            "^T +b$",
            "^E +b$",
            "^E+ b$",
            "error",
        ]);
        assert_eq!(trace.outcome, Outcome::Rejected);
    }

    #[test]
    fn incomplete_input_is_an_error() {
        let grammar = expression_grammar();

        let trace = parse_with(&grammar, "a+").unwrap();
        assert_eq!(trace.lines.last().map(String::as_str), Some(ERROR_LINE));
        assert_eq!(trace.outcome, Outcome::Rejected);

        let trace = parse_with(&grammar, "").unwrap();
        assert_eq!(trace.lines, vec!["^ $", "error"]);
    }

    #[test]
    fn parsing_is_repeatable() {
        let grammar = expression_grammar();
        let table = PrecedenceTable::new(&grammar);
        let parser = Parser::new(&grammar, &table);

        for text in ["a*a+a", "a+", "a**a"] {
            assert_eq!(parser.parse(&tokenize(text)), parser.parse(&tokenize(text)));
        }
    }

    #[test]
    fn accepts_other_expressions() {
        let grammar = expression_grammar();
        for text in ["a", "a*a", "a+a", "a*a*a+a+a*a"] {
            assert_eq!(parse_with(&grammar, text).unwrap().outcome, Outcome::Accepted, "parsing {}", text);
        }
        for text in ["+", "aa", "a*+a", "a+a*"] {
            assert_eq!(parse_with(&grammar, text).unwrap().outcome, Outcome::Rejected, "parsing {}", text);
        }
    }

    #[test]
    fn axiom_is_accepted_only_directly_above_start() {
        let grammar = grammar(&[('S', "aB"), ('B', "Sc"), ('B', "d")]);

        let trace = parse_with(&grammar, "ad").unwrap();
        assert_eq!(trace.lines, vec!["^ ad$", "^a d$", "^ad $", "^aB $", "^S $", "^S$"]);
        assert_eq!(trace.outcome, Outcome::Accepted);

        let trace = parse_with(&grammar, "aadc").unwrap();
        assert_eq!(trace.lines.last().map(String::as_str), Some("^S$"));
        assert_eq!(trace.outcome, Outcome::Accepted);

        // `S` is reduced on top of `^a` with only `$` left, which is not an accept
        let result = parse_with(&grammar, "aad");
        assert!(!matches!(result, Ok(Trace { outcome: Outcome::Accepted, .. })));
        assert_eq!(result, Err(ParseErrorType::NoSuchRule(vec![nt('S')])));
    }

    #[test]
    fn missing_rule_is_fatal() {
        // `x b c` can be reduced, but `a b c` sits under the same relations
        let grammar = grammar(&[('S', "ab"), ('S', "C"), ('C', "xbc")]);

        assert_eq!(parse_with(&grammar, "abc"), Err(ParseErrorType::NoSuchRule(vec![t('a'), t('b'), t('c')])));
        assert_eq!(parse_with(&grammar, "xbc").unwrap().outcome, Outcome::Accepted);
        assert_eq!(parse_with(&grammar, "ab").unwrap().outcome, Outcome::Accepted);
    }
}
