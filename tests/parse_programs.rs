use teenytiny::error::{CompilerError, LexErrorKind, SyntaxErrorKind};
use teenytiny::parser::Parser;
use teenytiny::token::Kind;
use teenytiny::trace::{NullSink, Rule, TraceEvent};

fn rules(events: &[TraceEvent]) -> Vec<Rule> {
    events.iter().map(|event| event.rule).collect()
}

#[test]
fn let_with_addition() {
    let events = teenytiny::parse("LET x = 5 + 3\n").expect("Parsing failed");
    let rules = rules(&events);

    assert_eq!(rules[1], Rule::StatementLet);
    assert_eq!(rules.iter().filter(|r| **r == Rule::Expression).count(), 1);
    assert_eq!(rules.iter().filter(|r| **r == Rule::Term).count(), 2);

    let primaries: Vec<&str> = events
        .iter()
        .filter_map(|event| event.text.as_deref())
        .collect();
    assert_eq!(primaries, vec!["5", "3"]);
}

#[test]
fn if_block_with_single_comparison() {
    let events = teenytiny::parse("IF x > 5 THEN\nPRINT \"hi\"\nENDIF\n").expect("Parsing failed");
    let rules = rules(&events);

    assert_eq!(
        rules,
        vec![
            Rule::Program,
            Rule::StatementIf,
            Rule::Comparison,
            Rule::Expression,
            Rule::Term,
            Rule::Unary,
            Rule::Primary,
            Rule::Expression,
            Rule::Term,
            Rule::Unary,
            Rule::Primary,
            Rule::Newline,
            Rule::StatementPrint,
            Rule::Newline,
            Rule::Newline,
        ]
    );
}

#[test]
fn extra_number_after_print_expression() {
    match teenytiny::parse("PRINT 1 2\n") {
        Err(CompilerError::Syntax(err)) => {
            assert_eq!(err.kind, SyntaxErrorKind::Expected(Kind::Newline));
            assert_eq!(err.expected(), Some(Kind::Newline));
            assert_eq!(err.found(), Kind::Number);
            assert_eq!(err.token.text, "2");
            let message = err.to_string();
            assert!(message.contains("NEWLINE"), "{message}");
            assert!(message.contains("NUMBER"), "{message}");
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn trailing_decimal_point_is_lexical() {
    match teenytiny::parse("LET x = 5.\n") {
        Err(CompilerError::LexingError(err)) => {
            assert_eq!(err.kind, LexErrorKind::MalformedNumber);
            assert_eq!(err.line, 1);
        }
        other => panic!("expected a lexing error, got {other:?}"),
    }
}

#[test]
fn identifier_cannot_start_a_statement() {
    match teenytiny::parse("x > 5\n") {
        Err(CompilerError::Syntax(err)) => {
            assert_eq!(err.kind, SyntaxErrorKind::InvalidStatement);
            assert_eq!(err.found(), Kind::Identifier);
            assert_eq!(err.expected(), None);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn fibonacci_program() {
    let source = r#"
# Prints the first n Fibonacci numbers.
PRINT "How many fibonacci numbers do you want?"
INPUT nums
PRINT ""

LET a = 0
LET b = 1
WHILE nums > 0 REPEAT
    PRINT a
    LET c = a + b
    LET a = b
    LET b = c
    LET nums = nums - 1
ENDWHILE
"#;

    let events = teenytiny::parse(source).expect("Parsing failed");
    let statements: Vec<Rule> = rules(&events)
        .into_iter()
        .filter(|rule| rule.name().starts_with("STATEMENT-"))
        .collect();
    assert_eq!(
        statements,
        vec![
            Rule::StatementPrint,
            Rule::StatementInput,
            Rule::StatementPrint,
            Rule::StatementLet,
            Rule::StatementLet,
            Rule::StatementWhile,
            Rule::StatementPrint,
            Rule::StatementLet,
            Rule::StatementLet,
            Rule::StatementLet,
            Rule::StatementLet,
        ]
    );
}

#[test]
fn labels_gotos_and_nested_blocks() {
    let source = "\
LABEL loop
INPUT n
IF n >= 10 THEN
    WHILE n != 0 REPEAT
        LET n = n - 1
        IF n == 5 THEN
            GOTO done
        ENDIF
    ENDWHILE
ENDIF
GOTO loop
LABEL done
PRINT -n * 2.5 / +3
";
    teenytiny::parse(source).expect("Parsing failed");
}

#[test]
fn partial_trace_is_kept_on_error() {
    let mut events: Vec<TraceEvent> = Vec::new();
    let err = teenytiny::parse_into("PRINT 1\nGOTO 3\n", &mut events).unwrap_err();

    assert!(err.is_syntax());
    assert_eq!(events.last().map(|event| event.rule), Some(Rule::StatementGoto));
}

#[test]
fn null_sink_only_answers_accept_or_reject() {
    let mut parser = Parser::from_source("LET a = 1\n", NullSink).expect("Parser creation failed");
    assert!(parser.program().is_ok());

    let mut parser = Parser::from_source("LET a 1\n", NullSink).expect("Parser creation failed");
    assert!(parser.program().is_err());
}

#[test]
fn lexing_error_while_priming_the_window() {
    match Parser::from_source("PRINT ?", NullSink) {
        Err(CompilerError::LexingError(err)) => {
            assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter('?'));
            assert_eq!((err.line, err.column), (1, 7));
        }
        Err(other) => panic!("expected a lexing error, got {other:?}"),
        Ok(_) => panic!("expected a lexing error"),
    }
}
