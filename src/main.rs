mod cli;
mod error_handling;
mod generator;
mod grammar;
mod loader;
mod precedence;
mod report;
mod shift_reduce;

use std::fmt::Display;
use std::process::ExitCode;

use clap::Parser as _;
use rand::prelude::*;

use cli::Cli;
use error_handling::*;
use grammar::{Grammar, Symbol};
use loader::{LoadErrorType, TestCase};
use precedence::PrecedenceTable;
use shift_reduce::{Outcome, ParseErrorType, Parser, Trace};

fn fail<E: Display>(errors: impl IntoIterator<Item = E>) -> ExitCode {
    for error in errors {
        eprintln!("{}", error);
    }
    ExitCode::FAILURE
}

fn run_tests(grammar: &Grammar, table: &PrecedenceTable, tests: &[TestCase]) -> Result<Vec<Trace>, Error<ParseErrorType>> {
    let parser = Parser::new(grammar, table);

    tests.iter()
        .map(|test| {
            let trace = parser.parse(&shift_reduce::tokenize(&test.text))
                .map_err(|error| Error::at(test.location.clone(), error))?;
            match trace.outcome {
                Outcome::Accepted => log::info!("Accepted `{}` in {} steps", test.text, trace.lines.len() - 1),
                Outcome::Rejected => log::info!("Rejected `{}` ({})", test.text, test.location),
            }
            Ok(trace)
        })
        .collect()
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let input = match loader::parse_file(&cli.file) {
        Ok(input) => input,
        Err(errors) => return fail(errors),
    };
    for warning in &input.warnings {
        log::warn!("[{}] {}", warning.location, warning.error);
    }

    let mut grammar = input.grammar;
    if let Some(start) = cli.start {
        if let Err(error) = grammar.set_axiom(Symbol::NonTerminal(start)) {
            return fail([Error::at(Location::file(cli.file.clone()), error)]);
        }
    }

    let analysis = precedence::analyze(&grammar);
    let alphabet = grammar.grouped_symbols();
    let table_text = if cli.appearance_order {
        report::render_table(&analysis.table, None)
    } else {
        report::render_table(&analysis.table, Some(alphabet.as_slice()))
    };

    let mut tests = input.tests;
    if cli.amount > 0 {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        match generator::generate_many(&grammar, cli.amount, cli.file.clone(), &mut rng) {
            Ok(sentences) => tests.extend(sentences.into_iter().map(|text| TestCase {
                text,
                location: Location::file(cli.file.clone()),
            })),
            Err(error) => return fail([error]),
        }
    }

    let traces = if analysis.grammar_type.is_parsable() {
        match run_tests(&grammar, &analysis.table, &tests) {
            Ok(traces) => traces,
            Err(error) => return fail([error]),
        }
    } else {
        log::warn!("Skipping {} test strings, the grammar is {}", tests.len(), analysis.grammar_type);
        Vec::new()
    };

    let text = report::render_report(&table_text, analysis.grammar_type, &traces);
    match cli.output {
        Some(path) => {
            if let Err(error) = std::fs::write(&path, text) {
                return fail([Error::at(Location::file(path), LoadErrorType::FileError(error))]);
            }
        }
        None => print!("{}", text),
    }

    ExitCode::SUCCESS
}
