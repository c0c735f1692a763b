use crate::grammar::symbol::{END_MARKER, START_MARKER};
use crate::grammar::{Rule, Symbol};

use super::{LoadErrorType, Result};

fn lex_symbol(c: char) -> Result<Symbol> {
    match Symbol::from_char(c) {
        Some(symbol) => Ok(symbol),
        None if c == START_MARKER || c == END_MARKER => Err(LoadErrorType::ReservedSymbol(c)),
        None => Err(LoadErrorType::UnexpectedWhitespace),
    }
}

pub fn lex_head(text: &str) -> Result<Symbol> {
    let mut chars = text.chars();
    match (chars.next().map(Symbol::from_char), chars.next()) {
        (Some(Some(head @ Symbol::NonTerminal(_))), None) => Ok(head),
        _ => Err(LoadErrorType::InvalidHead(text.to_string())),
    }
}

// One symbol per character
pub fn lex_body(text: &str) -> Result<Rule> {
    if text.is_empty() {
        return Err(LoadErrorType::MissingBody);
    }
    text.chars().map(lex_symbol).collect()
}

// A rule line is the head, one space, and the body
pub fn lex_line(line: &str) -> Result<(Symbol, Rule)> {
    let (head, body) = line.split_once(' ').ok_or(LoadErrorType::MissingBody)?;
    Ok((lex_head(head)?, lex_body(body)?))
}
