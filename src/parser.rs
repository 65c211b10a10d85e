use crate::error::{CompilerError, SyntaxError, SyntaxErrorKind};
use crate::lexer::Lexer;
use crate::token::{Kind, Token};
use crate::trace::{Rule, TraceEvent, TraceSink};

/// Deepest `IF`/`WHILE` block nesting accepted before reporting an error
/// instead of recursing further.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent validator for Teeny Tiny programs.
///
/// The parser holds a two-token window over the lexer (`current_token` and
/// `peek_token`) and pulls a fresh token each time it advances. Every rule
/// it enters is reported to the trace sink; no tree is built.
///
/// ```text
/// program     ::= {nl} {statement} EOF
/// statement   ::= "PRINT" (string | expression) nl
///               | "IF" comparison "THEN" nl {statement} "ENDIF" nl
///               | "WHILE" comparison "REPEAT" nl {statement} "ENDWHILE" nl
///               | "LABEL" ident nl
///               | "GOTO" ident nl
///               | "LET" ident "=" expression nl
///               | "INPUT" ident nl
/// comparison  ::= expression (("==" | "!=" | ">" | ">=" | "<" | "<=") expression)+
/// expression  ::= term {( "-" | "+" ) term}
/// term        ::= unary {( "/" | "*" ) unary}
/// unary       ::= ["+" | "-"] primary
/// primary     ::= number | ident
/// nl          ::= '\n'+
/// ```
pub struct Parser<S: TraceSink> {
    lexer: Lexer,
    current_token: Token,
    peek_token: Token,
    sink: S,
    nesting_depth: usize,
}

impl<S: TraceSink> Parser<S> {
    /// Primes both window slots before any rule runs.
    pub fn new(mut lexer: Lexer, sink: S) -> Result<Self, CompilerError> {
        let current_token = lexer.get_token()?;
        let peek_token = lexer.get_token()?;

        Ok(Self {
            lexer,
            current_token,
            peek_token,
            sink,
            nesting_depth: 0,
        })
    }

    pub fn from_source(source: &str, sink: S) -> Result<Self, CompilerError> {
        Self::new(Lexer::new(source), sink)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    pub fn check_token(&self, kind: Kind) -> bool {
        self.current_token.kind == kind
    }

    pub fn check_peek(&self, kind: Kind) -> bool {
        self.peek_token.kind == kind
    }

    /// Shifts the window by one token.
    pub fn next_token(&mut self) -> Result<(), CompilerError> {
        let fresh = self.lexer.get_token()?;
        self.current_token = std::mem::replace(&mut self.peek_token, fresh);
        tracing::trace!(kind = %self.current_token.kind, text = %self.current_token.text, "advance");
        Ok(())
    }

    /// Consumes the current token if it has the expected kind.
    pub fn eat(&mut self, expecting: Kind) -> Result<(), CompilerError> {
        if !self.check_token(expecting) {
            return Err(self.syntax_error(SyntaxErrorKind::Expected(expecting)));
        }

        self.next_token()
    }

    fn syntax_error(&self, kind: SyntaxErrorKind) -> CompilerError {
        SyntaxError::from_token(kind, &self.current_token).into()
    }

    fn record(&mut self, rule: Rule) {
        tracing::debug!(rule = %rule, "enter");
        self.sink.record(TraceEvent::rule(rule));
    }

    /// Validates the whole token stream.
    pub fn program(&mut self) -> Result<(), CompilerError> {
        self.record(Rule::Program);

        while self.check_token(Kind::Newline) {
            self.next_token()?;
        }

        while !self.check_token(Kind::Eof) {
            self.statement()?;
        }

        Ok(())
    }

    pub fn statement(&mut self) -> Result<(), CompilerError> {
        match self.current_token.kind {
            Kind::Print => {
                self.record(Rule::StatementPrint);
                self.next_token()?;

                if self.check_token(Kind::String) {
                    self.next_token()?;
                } else {
                    self.expression()?;
                }
            }
            Kind::If => {
                self.record(Rule::StatementIf);
                self.next_token()?;
                self.comparison()?;

                self.eat(Kind::Then)?;
                self.nl()?;

                self.block(Kind::EndIf)?;
            }
            Kind::While => {
                self.record(Rule::StatementWhile);
                self.next_token()?;
                self.comparison()?;

                self.eat(Kind::Repeat)?;
                self.nl()?;

                self.block(Kind::EndWhile)?;
            }
            Kind::Label => {
                self.record(Rule::StatementLabel);
                self.next_token()?;
                self.eat(Kind::Identifier)?;
            }
            Kind::Goto => {
                self.record(Rule::StatementGoto);
                self.next_token()?;
                self.eat(Kind::Identifier)?;
            }
            Kind::Let => {
                self.record(Rule::StatementLet);
                self.next_token()?;
                self.eat(Kind::Identifier)?;
                self.eat(Kind::Assign)?;
                self.expression()?;
            }
            Kind::Input => {
                self.record(Rule::StatementInput);
                self.next_token()?;
                self.eat(Kind::Identifier)?;
            }
            _ => return Err(self.syntax_error(SyntaxErrorKind::InvalidStatement)),
        }

        self.nl()
    }

    /// Statements up to and including the closing keyword `end`.
    fn block(&mut self, end: Kind) -> Result<(), CompilerError> {
        self.enter_nesting()?;
        let body = self.block_body(end);
        self.leave_nesting();
        body
    }

    fn block_body(&mut self, end: Kind) -> Result<(), CompilerError> {
        while !self.check_token(end) {
            self.statement()?;
        }
        self.eat(end)
    }

    /// Pair every successful call with [`Self::leave_nesting`].
    fn enter_nesting(&mut self) -> Result<(), CompilerError> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(self.syntax_error(SyntaxErrorKind::NestingTooDeep(MAX_NESTING_DEPTH)));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// At least one newline, then any number of blank lines.
    pub fn nl(&mut self) -> Result<(), CompilerError> {
        self.record(Rule::Newline);

        self.eat(Kind::Newline)?;
        while self.check_token(Kind::Newline) {
            self.next_token()?;
        }

        Ok(())
    }

    /// A bare expression is not a comparison: one operator is required.
    pub fn comparison(&mut self) -> Result<(), CompilerError> {
        self.record(Rule::Comparison);
        self.expression()?;

        if !self.current_token.kind.is_comparison_operator() {
            return Err(self.syntax_error(SyntaxErrorKind::MissingComparisonOperator));
        }

        while self.current_token.kind.is_comparison_operator() {
            self.next_token()?;
            self.expression()?;
        }

        Ok(())
    }

    pub fn expression(&mut self) -> Result<(), CompilerError> {
        self.record(Rule::Expression);
        self.term()?;

        while self.check_token(Kind::Plus) || self.check_token(Kind::Minus) {
            self.next_token()?;
            self.term()?;
        }

        Ok(())
    }

    pub fn term(&mut self) -> Result<(), CompilerError> {
        self.record(Rule::Term);
        self.unary()?;

        while self.check_token(Kind::Asterisk) || self.check_token(Kind::Slash) {
            self.next_token()?;
            self.unary()?;
        }

        Ok(())
    }

    pub fn unary(&mut self) -> Result<(), CompilerError> {
        self.record(Rule::Unary);

        if self.check_token(Kind::Plus) || self.check_token(Kind::Minus) {
            self.next_token()?;
        }

        self.primary()
    }

    pub fn primary(&mut self) -> Result<(), CompilerError> {
        let text = self.current_token.text.clone();
        tracing::debug!(rule = %Rule::Primary, text = %text, "enter");
        self.sink.record(TraceEvent::with_text(Rule::Primary, text));

        match self.current_token.kind {
            Kind::Number | Kind::Identifier => self.next_token(),
            _ => Err(self.syntax_error(SyntaxErrorKind::UnexpectedPrimary)),
        }
    }
}
