use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Token {
    pub text: String,
    pub kind: Kind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: Kind, line: usize, column: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            Kind::Eof => write!(f, "{}", self.kind),
            Kind::Newline => write!(f, "{} \"\\n\"", self.kind),
            _ => write!(f, "{} \"{}\"", self.kind, self.text),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Kind {
    // Sentinels and literals
    Eof,
    Newline,
    Number,
    Identifier,
    String,

    // Keywords
    Label,
    Goto,
    Print,
    Input,
    Let,
    If,
    Then,
    EndIf,
    While,
    Repeat,
    EndWhile,

    // Operators
    Assign,       // =
    Plus,         // +
    Minus,        // -
    Asterisk,     // *
    Slash,        // /
    EqualEqual,   // ==
    NotEqual,     // !=
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
}

impl Kind {
    pub const KEYWORDS: [Kind; 11] = [
        Kind::Label,
        Kind::Goto,
        Kind::Print,
        Kind::Input,
        Kind::Let,
        Kind::If,
        Kind::Then,
        Kind::EndIf,
        Kind::While,
        Kind::Repeat,
        Kind::EndWhile,
    ];

    /// Looks up a reserved spelling. The match is exact and case-sensitive.
    pub fn keyword(text: &str) -> Option<Kind> {
        match text {
            "LABEL" => Some(Kind::Label),
            "GOTO" => Some(Kind::Goto),
            "PRINT" => Some(Kind::Print),
            "INPUT" => Some(Kind::Input),
            "LET" => Some(Kind::Let),
            "IF" => Some(Kind::If),
            "THEN" => Some(Kind::Then),
            "ENDIF" => Some(Kind::EndIf),
            "WHILE" => Some(Kind::While),
            "REPEAT" => Some(Kind::Repeat),
            "ENDWHILE" => Some(Kind::EndWhile),
            _ => None,
        }
    }

    pub fn is_keyword(self) -> bool {
        Self::KEYWORDS.contains(&self)
    }

    pub fn is_comparison_operator(self) -> bool {
        matches!(
            self,
            Kind::EqualEqual
                | Kind::NotEqual
                | Kind::Less
                | Kind::LessEqual
                | Kind::Greater
                | Kind::GreaterEqual
        )
    }

    /// Name used in diagnostics and in the token dump of the driver.
    /// Keyword names equal their reserved spelling.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Eof => "EOF",
            Kind::Newline => "NEWLINE",
            Kind::Number => "NUMBER",
            Kind::Identifier => "IDENT",
            Kind::String => "STRING",
            Kind::Label => "LABEL",
            Kind::Goto => "GOTO",
            Kind::Print => "PRINT",
            Kind::Input => "INPUT",
            Kind::Let => "LET",
            Kind::If => "IF",
            Kind::Then => "THEN",
            Kind::EndIf => "ENDIF",
            Kind::While => "WHILE",
            Kind::Repeat => "REPEAT",
            Kind::EndWhile => "ENDWHILE",
            Kind::Assign => "EQ",
            Kind::Plus => "PLUS",
            Kind::Minus => "MINUS",
            Kind::Asterisk => "ASTERISK",
            Kind::Slash => "SLASH",
            Kind::EqualEqual => "EQEQ",
            Kind::NotEqual => "NOTEQ",
            Kind::Less => "LT",
            Kind::LessEqual => "LTEQ",
            Kind::Greater => "GT",
            Kind::GreaterEqual => "GTEQ",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
