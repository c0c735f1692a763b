/*
    This module reads grammar files: the rules, a blank line, then the
    strings to parse
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::PathBuf;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use verifier::{verify_rules, LocatedRule};

#[derive(Debug)]
pub enum LoadErrorType {
    // A rule line without a body
    MissingBody,
    // A rule head that is not a single uppercase letter
    InvalidHead(String),
    // `^` and `$` mark the ends of the input and cannot be grammar symbols
    ReservedSymbol(char),
    // A space inside a rule body
    UnexpectedWhitespace,
    // A nonterminal that is used but never defined
    UndefinedNonterminal(char),
    // The rules do not form a grammar
    Grammar(GrammarErrorType),
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingBody, Self::MissingBody) => true,
            (Self::UnexpectedWhitespace, Self::UnexpectedWhitespace) => true,
            (Self::InvalidHead(a), Self::InvalidHead(b)) => a == b,
            (Self::ReservedSymbol(a), Self::ReservedSymbol(b)) => a == b,
            (Self::UndefinedNonterminal(a), Self::UndefinedNonterminal(b)) => a == b,
            (Self::Grammar(a), Self::Grammar(b)) => a == b,
            (Self::FileError(a), Self::FileError(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl Display for LoadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadErrorType::MissingBody => write!(f, "Expected a space and a rule body after the head"),
            LoadErrorType::InvalidHead(head) => write!(f, "`{}` is not a nonterminal", head),
            LoadErrorType::ReservedSymbol(c) => write!(f, "`{}` is reserved for the input markers", c),
            LoadErrorType::UnexpectedWhitespace => write!(f, "Unexpected whitespace in a rule body"),
            LoadErrorType::UndefinedNonterminal(c) => write!(f, "Could not find definition for `{}`", c),
            LoadErrorType::Grammar(e) => write!(f, "{}", e),
            LoadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadErrors = Errors<LoadErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> LoadError {
    LoadError {
        location: Location::file(file),
        error: LoadErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, LoadErrorType>;
pub type LineResult<T> = std::result::Result<T, LoadError>;
pub type FileResult<T> = std::result::Result<T, LoadErrors>;

// A string to parse and where it was written
#[derive(Debug, PartialEq, Clone)]
pub struct TestCase {
    pub text: String,
    pub location: Location,
}

#[derive(Debug)]
pub struct Input {
    pub grammar: Grammar,
    pub tests: Vec<TestCase>,
    // Problems worth reporting that do not stop the analysis
    pub warnings: LoadErrors,
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<LocatedRule> {
    lexer::lex_line(line)
        .map(|(head, rule)| (head, rule, location.clone()))
        .map_err(|error| LoadError { location, error })
}

fn is_comment(line: &str) -> bool {
    line.starts_with(';')
}

// Returns the lines of a file, with the io errors wrapped in LoadError
fn file_lines(file: File, path: &PathBuf) -> FileResult<Vec<String>> {
    std::io::BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| vec![io_error(e, path.clone())])
}

pub fn parse_lines<S: AsRef<str>>(lines: &[S], path: &PathBuf) -> FileResult<Input> {
    let mut numbered = lines.iter()
        .map(|line| line.as_ref().trim_end())
        .enumerate()
        .map(|(num, line)| (num + 1, line));

    // The rule block ends at the first blank line, which is consumed with it
    let (rules, errors): (Vec<_>, Vec<_>) = numbered.by_ref()
        .take_while(|(_, line)| !line.is_empty())
        .filter(|(_, line)| !is_comment(line))
        .map(|(num, line)| parse_lex_line(line, Location { file: path.clone(), line: num }))
        .partition_result();

    if !errors.is_empty() {
        return Err(errors);
    }

    let tests = numbered
        .take_while(|(_, line)| !line.is_empty())
        .map(|(num, line)| TestCase {
            text: line.to_string(),
            location: Location { file: path.clone(), line: num }
        })
        .collect_vec();

    let warnings = verify_rules(&rules);

    let grammar = Grammar::new(rules.into_iter().map(|(head, rule, _)| (head, rule)).collect())
        .map_err(|e| vec![LoadError {
            location: Location::file(path.clone()),
            error: LoadErrorType::Grammar(e)
        }])?;

    log::info!(
        "Loaded {} rules over {} symbols and {} test strings from {}",
        grammar.productions().len(), grammar.symbols().len(), tests.len(), path.display()
    );

    Ok(Input { grammar, tests, warnings })
}

pub fn parse_file(path: &PathBuf) -> FileResult<Input> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;
    let lines = file_lines(file, path)?;

    parse_lines(&lines, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::*;

    fn at(line: usize) -> Location {
        Location { file: PathBuf::new(), line }
    }

    #[test]
    fn parse_rules_and_tests() {
        let lines = ["S aSb", "; the shortest one", "S ab", "", "ab", "aabb", "", "ignored"];
        let input = parse_lines(&lines, &PathBuf::new()).unwrap();

        assert_eq!(input.grammar, grammar(&[('S', "aSb"), ('S', "ab")]));
        assert_eq!(input.tests, vec![
            TestCase { text: "ab".to_string(), location: at(5) },
            TestCase { text: "aabb".to_string(), location: at(6) },
        ]);
        assert!(input.warnings.is_empty());
    }

    #[test]
    fn parse_without_tests() {
        let input = parse_lines(&["S a"], &PathBuf::new()).unwrap();
        assert!(input.tests.is_empty());
    }

    #[test]
    fn parse_collects_every_malformed_line() {
        let lines = ["S aA", "A", "a b", "A b", "B x y"];
        let errors = parse_lines(&lines, &PathBuf::new()).unwrap_err();

        assert_eq!(errors, vec![
            LoadError { location: at(2), error: LoadErrorType::MissingBody },
            LoadError { location: at(3), error: LoadErrorType::InvalidHead("a".to_string()) },
            LoadError { location: at(5), error: LoadErrorType::UnexpectedWhitespace },
        ]);
    }

    #[test]
    fn parse_empty_grammar() {
        let errors = parse_lines(&["", "ab"], &PathBuf::new()).unwrap_err();

        assert_eq!(errors, vec![LoadError {
            location: at(0),
            error: LoadErrorType::Grammar(GrammarErrorType::EmptyGrammar)
        }]);
    }

    #[test]
    fn parse_reports_undefined_nonterminals() {
        let input = parse_lines(&["S aBc"], &PathBuf::new()).unwrap();

        assert_eq!(input.warnings, vec![LoadError {
            location: at(1),
            error: LoadErrorType::UndefinedNonterminal('B')
        }]);
    }

    #[test]
    fn parse_normal_file() {
        let path = PathBuf::from("example_data/expression.txt");
        let input = parse_file(&path).unwrap();

        assert_eq!(input.grammar, expression_grammar());
        assert_eq!(
            input.tests.iter().map(|test| test.text.as_str()).collect_vec(),
            vec!["a+a*a", "a*a+a", "a+b"]
        );
        assert_eq!(input.tests[0].location, Location { file: path, line: 6 });
    }

    #[test]
    fn parse_missing_file() {
        let path = PathBuf::from("example_data/no_such_file.txt");
        let errors = parse_file(&path).unwrap_err();

        assert_eq!(errors, vec![LoadError {
            location: Location::file(path),
            error: LoadErrorType::FileError(std::io::ErrorKind::NotFound.into())
        }]);
    }
}
