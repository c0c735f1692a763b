/*
    This module turns tables and traces into the text written as output
*/

use itertools::Itertools;

use crate::grammar::Symbol;
use crate::precedence::{GrammarType, PrecedenceTable};
use crate::shift_reduce::Trace;

// Rows are `alphabet` followed by `^`, columns are `alphabet` followed by `$`.
// Without an alphabet the table's own symbol order is used.
pub fn render_table(table: &PrecedenceTable, alphabet: Option<&[Symbol]>) -> String {
    let (rows, columns) = match alphabet {
        Some(alphabet) => (
            alphabet.iter().copied().chain([Symbol::StartMarker]).collect_vec(),
            alphabet.iter().copied().chain([Symbol::EndMarker]).collect_vec(),
        ),
        None => (table.rows().to_vec(), table.columns().to_vec()),
    };

    let header = std::iter::once(String::new())
        .chain(columns.iter().map(Symbol::to_string))
        .collect_vec();
    let grid = std::iter::once(header)
        .chain(rows.iter().map(|row| {
            std::iter::once(row.to_string())
                .chain(columns.iter().map(|column| table.get(row, column).to_string()))
                .collect_vec()
        }))
        .collect_vec();

    let widths = (0..columns.len() + 1)
        .map(|i| grid.iter().map(|line| line[i].chars().count()).max().unwrap_or(0))
        .collect_vec();

    grid.iter()
        .map(|line| {
            let padded = line.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<1$}", cell, width + 1))
                .join("");
            // Trailing empty cells are not padded out
            format!("{}\n", padded.trim_end())
        })
        .join("")
}

// The table and classification code, then the traces separated by blank lines
pub fn render_report(table_text: &str, grammar_type: GrammarType, traces: &[Trace]) -> String {
    let mut report = format!("{}{}\n\n", table_text, grammar_type.code());

    if !traces.is_empty() {
        report.push_str(&traces.iter().map(|trace| trace.lines.join("\n")).join("\n\n"));
        report.push('\n');
    }

    report
}
