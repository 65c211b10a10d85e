use crate::error::{LexErrorKind, LexingError};
use crate::token::{Kind, Token};

/// Character-at-a-time scanner producing [`Token`]s on demand.
///
/// The source always ends in a newline, so the last statement is terminated
/// by a `NEWLINE` token rather than by `EOF`. End of input is represented by
/// `None` in the cursor.
pub struct Lexer {
    source: Vec<char>,
    position: usize,
    current: Option<char>,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut source: Vec<char> = input.chars().collect();
        if source.last() != Some(&'\n') {
            source.push('\n');
        }
        let current = source.first().copied();

        Self {
            source,
            position: 0,
            current,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// The character under the cursor, `None` once past the end.
    pub fn current_char(&self) -> Option<char> {
        self.current
    }

    /// Advances by one character. Calling this past the end keeps the cursor
    /// on `None`.
    pub fn next_char(&mut self) {
        match self.current {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => return,
        }
        self.position += 1;
        self.current = self.source.get(self.position).copied();
    }

    /// Looks one character ahead without moving the cursor.
    pub fn peek(&self) -> Option<char> {
        self.source.get(self.position + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(' ' | '\t' | '\r')) {
            self.next_char();
        }
    }

    fn skip_comment(&mut self) {
        if self.current == Some('#') {
            while !matches!(self.current, Some('\n') | None) {
                self.next_char();
            }
        }
    }

    fn error(&self, kind: LexErrorKind) -> LexingError {
        LexingError::new(kind, self.line, self.column)
    }

    fn slice(&self, start: usize) -> String {
        self.source[start..=self.position].iter().collect()
    }

    /// Consumes a second `=` after `first` when present.
    fn one_or_two(&mut self, first: char, single: Kind, double: Kind) -> (String, Kind) {
        if self.peek() == Some('=') {
            self.next_char();
            (format!("{first}="), double)
        } else {
            (first.to_string(), single)
        }
    }

    /// Scans the next token.
    ///
    /// Every lexical error is final: the caller should not keep scanning
    /// after an `Err`.
    pub fn get_token(&mut self) -> Result<Token, LexingError> {
        self.skip_whitespace();
        self.skip_comment();

        let (line, column) = (self.line, self.column);

        let (text, kind) = match self.current {
            None => (String::new(), Kind::Eof),
            Some('\n') => ("\n".to_string(), Kind::Newline),
            Some('+') => ("+".to_string(), Kind::Plus),
            Some('-') => ("-".to_string(), Kind::Minus),
            Some('*') => ("*".to_string(), Kind::Asterisk),
            Some('/') => ("/".to_string(), Kind::Slash),
            Some(c @ '=') => self.one_or_two(c, Kind::Assign, Kind::EqualEqual),
            Some(c @ '>') => self.one_or_two(c, Kind::Greater, Kind::GreaterEqual),
            Some(c @ '<') => self.one_or_two(c, Kind::Less, Kind::LessEqual),
            Some('!') => {
                if self.peek() != Some('=') {
                    return Err(self.error(LexErrorKind::ExpectedNotEqual(self.peek())));
                }
                self.next_char();
                ("!=".to_string(), Kind::NotEqual)
            }
            Some('"') => {
                self.next_char();
                let start = self.position;
                loop {
                    match self.current {
                        Some('"') => break,
                        Some(c @ ('\r' | '\n' | '\t' | '\\' | '%')) => {
                            return Err(self.error(LexErrorKind::IllegalStringCharacter(c)));
                        }
                        Some(_) => self.next_char(),
                        None => return Err(self.error(LexErrorKind::UnterminatedString)),
                    }
                }
                let body: String = self.source[start..self.position].iter().collect();
                (body, Kind::String)
            }
            // ASCII digits only; other Unicode digits are not number starts.
            Some(c) if c.is_ascii_digit() => {
                let start = self.position;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.next_char();
                }
                if self.peek() == Some('.') {
                    self.next_char();
                    if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        return Err(self.error(LexErrorKind::MalformedNumber));
                    }
                    while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        self.next_char();
                    }
                }
                (self.slice(start), Kind::Number)
            }
            Some(c) if c.is_alphabetic() => {
                let start = self.position;
                while self.peek().is_some_and(char::is_alphanumeric) {
                    self.next_char();
                }
                let ident = self.slice(start);
                let kind = Kind::keyword(&ident).unwrap_or(Kind::Identifier);
                (ident, kind)
            }
            Some(c) => return Err(self.error(LexErrorKind::UnrecognizedCharacter(c))),
        };

        self.next_char();
        tracing::trace!(kind = %kind, text = %text, line, column, "lexed token");
        Ok(Token::new(text, kind, line, column))
    }

    /// Scans the whole input, including the trailing `EOF` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexingError> {
        self.by_ref().collect()
    }
}

/// Yields every token up to and including `EOF`, or up to the first error.
impl Iterator for Lexer {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.get_token();
        self.finished = !matches!(result, Ok(ref token) if token.kind != Kind::Eof);
        Some(result)
    }
}

impl std::iter::FusedIterator for Lexer {}
