//! Front end for the Teeny Tiny language.
//!
//! ```text
//! Source → Lexer → Token stream → Parser → trace of grammar rules
//! ```
//!
//! The [`lexer`] produces tokens on demand and the [`parser`] pulls them with
//! one token of lookahead, validating the program by recursive descent. The
//! result of a successful parse is the sequence of rules it entered, recorded
//! into a [`trace::TraceSink`]. Any lexical or syntax error stops the run and
//! is returned as a [`error::CompilerError`].

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod trace;


use crate::error::CompilerError;
use crate::parser::Parser;
use crate::trace::{TraceEvent, TraceSink};

/// Validates `source`, feeding every rule entered into `sink`.
///
/// The sink is borrowed so the events recorded before an error stay
/// available to the caller.
pub fn parse_into<S: TraceSink>(source: &str, sink: &mut S) -> Result<(), CompilerError> {
    let mut parser = Parser::from_source(source, sink)?;
    parser.program()
}

/// Validates `source` and returns the full production trace.
pub fn parse(source: &str) -> Result<Vec<TraceEvent>, CompilerError> {
    let mut events: Vec<TraceEvent> = Vec::new();
    parse_into(source, &mut events)?;
    Ok(events)
}
