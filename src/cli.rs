use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar, a blank line, then the strings to parse
    pub file: PathBuf,

    /// Where to write the table and traces (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Start symbol (default: head of the first rule)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<char>,

    /// Amount of random sentences to generate and parse as well
    #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 0)]
    pub amount: u32,

    /// Seed for generating sentences (default: random)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Order the table by first appearance instead of nonterminals first
    #[arg(long)]
    pub appearance_order: bool,
}
