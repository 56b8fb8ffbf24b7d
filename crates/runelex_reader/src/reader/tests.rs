use std::collections::VecDeque;

use super::*;
use pretty_assertions::assert_eq;
use runelex_core::{lex, Scanner, StateFn};

const IDENT: Type = Type::user(0);
const EQUALS: Type = Type::user(1);
const NUMBER: Type = Type::user(2);

/// Replays a fixed token list and counts how often it was pulled.
struct Replay {
    tokens: VecDeque<Token>,
    pulls: usize,
}

impl Replay {
    fn new(kinds: &[(Type, &str)]) -> Self {
        let tokens = kinds
            .iter()
            .enumerate()
            .map(|(i, &(kind, value))| Token::new(kind, i, value))
            .collect();
        Replay { tokens, pulls: 0 }
    }
}

impl TokenSource for Replay {
    fn next_token(&mut self) -> Option<Token> {
        self.pulls += 1;
        self.tokens.pop_front()
    }

    fn position(&self) -> Position<'_> {
        Position {
            name: "replay",
            line: 1,
            column: self.pulls,
        }
    }
}

fn reader(kinds: &[(Type, &str)]) -> Reader<Replay> {
    Reader::new(Replay::new(kinds))
}

fn assignment() -> Reader<Replay> {
    reader(&[
        (IDENT, "x"),
        (EQUALS, "="),
        (NUMBER, "1"),
        (Type::EOF, ""),
    ])
}

// === peek / next ===

#[test]
fn peek_is_idempotent_and_pulls_once() {
    let mut r = assignment();
    let first = r.peek().cloned();
    let second = r.peek().cloned();
    assert_eq!(first, second);
    assert_eq!(first.map(|t| t.value), Some("x".to_owned()));
    assert_eq!(r.source.pulls, 1);
}

#[test]
fn next_after_peek_returns_peeked_token() {
    let mut r = assignment();
    let peeked = r.peek().cloned();
    assert_eq!(r.next(), peeked);
    assert!(r.buf.is_none());
    assert_eq!(r.next().map(|t| t.kind), Some(EQUALS));
    assert_eq!(r.source.pulls, 2);
}

#[test]
fn next_without_peek_pulls_fresh() {
    let mut r = assignment();
    assert_eq!(r.next().map(|t| t.kind), Some(IDENT));
    assert_eq!(r.next().map(|t| t.kind), Some(EQUALS));
    assert_eq!(r.peek_kind(), Some(NUMBER));
}

#[test]
fn exhausted_source() {
    let mut r = reader(&[(Type::EOF, "")]);
    assert_eq!(r.next().map(|t| t.kind), Some(Type::EOF));
    assert_eq!(r.peek(), None);
    assert_eq!(r.next(), None);
}

// === backup ===

#[test]
fn backup_then_next_returns_same_token() {
    let mut r = assignment();
    let Some(t) = r.next() else {
        panic!("empty reader");
    };
    r.backup(t.clone());
    assert_eq!(r.peek(), Some(&t));
    assert_eq!(r.next(), Some(t));
    assert_eq!(r.next().map(|t| t.kind), Some(EQUALS));
}

#[test]
fn backup_foreign_token() {
    let mut r = assignment();
    let synthetic = Token::new(NUMBER, 0, "0");
    r.backup(synthetic.clone());
    assert_eq!(r.next(), Some(synthetic));
    assert_eq!(r.next().map(|t| t.kind), Some(IDENT));
}

#[test]
#[should_panic(expected = "cannot backup more than one token")]
fn double_backup_panics() {
    let mut r = assignment();
    let a = r.next();
    let b = r.next();
    if let (Some(a), Some(b)) = (a, b) {
        r.backup(b);
        r.backup(a);
    }
}

#[test]
#[should_panic(expected = "cannot backup more than one token")]
fn backup_after_peek_panics() {
    let mut r = assignment();
    if let Some(t) = r.next() {
        r.peek();
        r.backup(t);
    }
}

// === expect ===

#[test]
fn expect_all_match() {
    let mut r = assignment();
    let (tokens, ok) = r.expect(&[IDENT, EQUALS, NUMBER]);
    assert!(ok);
    assert_eq!(
        tokens.iter().map(|t| t.value.as_str()).collect::<Vec<_>>(),
        vec!["x", "=", "1"]
    );
    assert_eq!(r.peek_kind(), Some(Type::EOF));
}

#[test]
fn expect_stops_at_first_mismatch() {
    let mut r = assignment();
    let (tokens, ok) = r.expect(&[IDENT, EQUALS, IDENT]);
    assert!(!ok);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind, NUMBER);
    // The mismatching token is consumed, not pushed back.
    assert_eq!(r.peek_kind(), Some(Type::EOF));
}

#[test]
fn expect_early_mismatch_reads_no_further() {
    let mut r = assignment();
    let (tokens, ok) = r.expect(&[EQUALS, EQUALS, NUMBER]);
    assert!(!ok);
    assert_eq!(tokens.len(), 1);
    assert_eq!(r.source.pulls, 1);
    assert_eq!(r.peek_kind(), Some(EQUALS));
}

#[test]
fn expect_uses_buffered_token_first() {
    let mut r = assignment();
    r.peek();
    let (tokens, ok) = r.expect(&[IDENT]);
    assert!(ok);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(r.source.pulls, 1);
}

#[test]
fn expect_runs_out_of_tokens() {
    let mut r = reader(&[(IDENT, "x")]);
    let (tokens, ok) = r.expect(&[IDENT, EQUALS]);
    assert!(!ok);
    assert_eq!(tokens.len(), 1);
}

#[test]
fn expect_nothing_succeeds() {
    let mut r = assignment();
    let (tokens, ok) = r.expect(&[]);
    assert!(ok);
    assert!(tokens.is_empty());
    assert_eq!(r.source.pulls, 0);
}

// === drain / position / iteration ===

#[test]
fn drain_counts_buffered_token() {
    let mut r = assignment();
    r.peek();
    assert_eq!(r.drain(), 4);
    assert_eq!(r.next(), None);
}

#[test]
fn pos_info_passthrough() {
    let mut r = assignment();
    r.next();
    r.next();
    assert_eq!(r.pos_info().to_string(), "replay:1:2");
}

#[test]
fn iterates_remaining_tokens() {
    let mut r = assignment();
    r.next();
    let kinds: Vec<Type> = r.map(|t| t.kind).collect();
    assert_eq!(kinds, vec![EQUALS, NUMBER, Type::EOF]);
}

#[test]
fn into_inner_returns_source() {
    let mut r = assignment();
    r.next();
    let source = r.into_inner();
    assert_eq!(source.tokens.len(), 3);
}

// === over a live token stream ===

fn lex_digits(s: &mut Scanner) -> Option<StateFn> {
    if s.accept_run("0123456789") > 0 {
        s.emit(NUMBER);
        s.accept_run(" ");
        s.ignore();
        return Some(StateFn(lex_digits));
    }
    if s.peek().is_none() {
        s.emit(Type::EOF);
        return None;
    }
    s.errorf(format_args!("expected digit"))
}

#[test]
fn reader_over_token_stream() {
    let mut r = Reader::new(lex("nums", "1 22\n333", StateFn(lex_digits)));
    let (tokens, ok) = r.expect(&[NUMBER, NUMBER]);
    assert!(ok);
    assert_eq!(tokens[1].value, "22");
    assert_eq!(r.peek().map(|t| t.kind), Some(Type::ERROR));
    assert_eq!(r.pos_info().to_string(), "nums:1:5");
    let Some(err) = r.next() else {
        panic!("missing error token");
    };
    assert_eq!(err.value, "expected digit");
    assert_eq!(r.next(), None);
}

#[test]
fn reader_drains_live_stream_after_early_stop() {
    let mut r = Reader::new(lex("nums", "1 2 3 4 5", StateFn(lex_digits)));
    assert_eq!(r.peek_kind(), Some(NUMBER));
    assert_eq!(r.drain(), 6);
    assert_eq!(r.next(), None);
}
