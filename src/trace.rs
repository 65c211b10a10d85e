//! Production trace emitted by the parser.
//!
//! Every grammar rule the parser enters records one [`TraceEvent`], in
//! traversal order. Where the events go is up to the [`TraceSink`] handed to
//! the parser: a `Vec` collects them, [`NullSink`] drops them.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rule {
    #[serde(rename = "PROGRAM")]
    Program,
    #[serde(rename = "STATEMENT-PRINT")]
    StatementPrint,
    #[serde(rename = "STATEMENT-IF")]
    StatementIf,
    #[serde(rename = "STATEMENT-WHILE")]
    StatementWhile,
    #[serde(rename = "STATEMENT-LABEL")]
    StatementLabel,
    #[serde(rename = "STATEMENT-GOTO")]
    StatementGoto,
    #[serde(rename = "STATEMENT-LET")]
    StatementLet,
    #[serde(rename = "STATEMENT-INPUT")]
    StatementInput,
    #[serde(rename = "NEWLINE")]
    Newline,
    #[serde(rename = "COMPARISON")]
    Comparison,
    #[serde(rename = "EXPRESSION")]
    Expression,
    #[serde(rename = "TERM")]
    Term,
    #[serde(rename = "UNARY")]
    Unary,
    #[serde(rename = "PRIMARY")]
    Primary,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Program => "PROGRAM",
            Rule::StatementPrint => "STATEMENT-PRINT",
            Rule::StatementIf => "STATEMENT-IF",
            Rule::StatementWhile => "STATEMENT-WHILE",
            Rule::StatementLabel => "STATEMENT-LABEL",
            Rule::StatementGoto => "STATEMENT-GOTO",
            Rule::StatementLet => "STATEMENT-LET",
            Rule::StatementInput => "STATEMENT-INPUT",
            Rule::Newline => "NEWLINE",
            Rule::Comparison => "COMPARISON",
            Rule::Expression => "EXPRESSION",
            Rule::Term => "TERM",
            Rule::Unary => "UNARY",
            Rule::Primary => "PRIMARY",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub rule: Rule,
    /// Matched text, only set for `PRIMARY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TraceEvent {
    pub fn rule(rule: Rule) -> Self {
        Self { rule, text: None }
    }

    pub fn with_text(rule: Rule, text: impl Into<String>) -> Self {
        Self {
            rule,
            text: Some(text.into()),
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} ({})", self.rule, text),
            None => write!(f, "{}", self.rule),
        }
    }
}

pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, event: TraceEvent) {
        (**self).record(event);
    }
}

/// Discards every event. For callers that only want the accept/reject answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _event: TraceEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_event_shows_its_text() {
        assert_eq!(TraceEvent::with_text(Rule::Primary, "x").to_string(), "PRIMARY (x)");
        assert_eq!(TraceEvent::rule(Rule::StatementGoto).to_string(), "STATEMENT-GOTO");
    }

    #[test]
    fn events_serialize_with_rule_names() {
        let json = serde_json::to_string(&TraceEvent::rule(Rule::StatementIf)).unwrap();
        assert_eq!(json, r#"{"rule":"STATEMENT-IF"}"#);

        let json = serde_json::to_string(&TraceEvent::with_text(Rule::Primary, "5")).unwrap();
        assert_eq!(json, r#"{"rule":"PRIMARY","text":"5"}"#);
    }

    #[test]
    fn borrowed_sink_records_into_owner() {
        fn feed<S: TraceSink>(mut sink: S) {
            sink.record(TraceEvent::rule(Rule::Program));
        }

        let mut events = Vec::new();
        feed(&mut events);
        feed(NullSink);
        assert_eq!(events, vec![TraceEvent::rule(Rule::Program)]);
    }
}
