use crate::token::{Kind, Token};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("FileNotFoundError: {0}")]
    FileNotFound(String),
    #[error("ConfigError: {0}")]
    Config(String),
    #[error("IOError: {0}")]
    IO(#[from] std::io::Error),
    #[error("LexingError: {0}")]
    LexingError(#[from] LexingError),
    #[error("SyntaxError: {0}")]
    Syntax(#[from] SyntaxError),
}

impl CompilerError {
    pub fn is_lexing(&self) -> bool {
        matches!(self, CompilerError::LexingError(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, CompilerError::Syntax(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}\n  --> {line}:{column}")]
pub struct LexingError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
}

impl LexingError {
    pub fn new(kind: LexErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unknown token: {0:?}")]
    UnrecognizedCharacter(char),
    #[error("illegal character in string: {0:?}")]
    IllegalStringCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("illegal character in number: a decimal point must be followed by a digit")]
    MalformedNumber,
    #[error("expected !=, got !{}", describe_next(.0))]
    ExpectedNotEqual(Option<char>),
}

fn describe_next(next: &Option<char>) -> String {
    match next {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}, found {token}\n  --> {}:{}", .token.line, .token.column)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub token: Token,
}

impl SyntaxError {
    pub fn from_token(kind: SyntaxErrorKind, token: &Token) -> Self {
        Self {
            kind,
            token: token.clone(),
        }
    }

    /// The kind `eat` was asked for, when the error came from a mismatch.
    pub fn expected(&self) -> Option<Kind> {
        match self.kind {
            SyntaxErrorKind::Expected(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn found(&self) -> Kind {
        self.token.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("expected {0}")]
    Expected(Kind),
    #[error("invalid statement")]
    InvalidStatement,
    #[error("expected comparison operator")]
    MissingComparisonOperator,
    #[error("expected a number or identifier")]
    UnexpectedPrimary,
    #[error("blocks nested deeper than {0} levels")]
    NestingTooDeep(usize),
}
