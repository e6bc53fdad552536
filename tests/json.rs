//! A simplistic JSON parser based on `pegcomb`, using plain functions as recursive parsers.

#[macro_use]
extern crate time_test;

use std::collections::HashMap;
use std::iter::{self, FromIterator};

use pegcomb::number::InfNanPolicy;
use pegcomb::primitives::lit;
use pegcomb::whitespace::{spaced_lit, textspace};
use pegcomb::{
    choice, do_parse, real, repeat_ws, seq, string_none_of, Cursor, ErrorCode, Parsed, Parser,
    RepeatSpec, Report,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    Dict(HashMap<String, Value>),
    List(Vec<Value>),
    Null,
}

fn value<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Value> {
    choice((string.map(Value::String), number, list, dict, keyword)).parse(at, end)
}

fn number<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Value> {
    real::<f64>()
        .inf_nan(InfNanPolicy::None)
        .map(Value::Number)
        .parse(at, end)
}

fn string<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, String> {
    let quote = || lit("\"");
    seq((quote(), string_none_of("\"", RepeatSpec::Any), quote())).parse(at, end)
}

fn keyword<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Value> {
    choice((
        lit("true").to(Value::Bool(true)),
        lit("false").to(Value::Bool(false)),
        lit("null").to(Value::Null),
    ))
    .parse(at, end)
}

fn list<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Value> {
    let elements = repeat_ws(value, spaced_lit(','), RepeatSpec::Any);
    seq((spaced_lit('['), elements, spaced_lit(']')))
        .map(Value::List)
        .parse(at, end)
}

fn member<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, (String, Value)> {
    seq((string, spaced_lit(':'), value)).parse(at, end)
}

fn dict<'a>(at: Cursor<'a>, end: Cursor<'a>) -> Parsed<'a, Value> {
    let members = repeat_ws(member, spaced_lit(','), RepeatSpec::Any).collect::<HashMap<_, _>>();
    seq((spaced_lit('{'), members, spaced_lit('}')))
        .map(Value::Dict)
        .parse(at, end)
}

fn hello_world() -> Value {
    Value::Dict(HashMap::from_iter(vec![
        (
            "hello".to_string(),
            Value::List(vec![
                Value::String("world".to_string()),
                Value::List(vec![]),
            ]),
        ),
        ("x".to_string(), Value::Number(4.)),
    ]))
}

#[test]
fn test_number() {
    assert_eq!(Ok(&Value::Number(-1.2)), number.parse_str("-1.2e0").value());
    assert!(number.parse_str("nan").is_err());
}

#[test]
fn test_string() {
    assert_eq!(
        Ok(&"Hello, World\n".to_string()),
        string.parse_str("\"Hello, World\n\"").value()
    );
    assert_eq!(Ok(&String::new()), string.parse_str("\"\"").value());
}

#[test]
fn test_list() {
    let want = Value::List(vec![
        Value::Number(1.),
        Value::Number(2.),
        Value::String("Hello".to_string()),
        Value::List(vec![Value::Bool(true), Value::Null]),
    ]);
    assert_eq!(
        Ok(&want),
        list.parse_str(r#"[1, 2 ,"Hello", [true,null]]"#).value()
    );
}

#[test]
fn test_dict() {
    let r = dict.parse_str(r#"{"hello": ["world", []], "x": 4}"#);
    assert_eq!(Ok(&hello_world()), r.value());
}

#[test]
fn test_document() {
    let document = seq((textspace(), value, textspace()));
    assert_eq!(
        Report::Full(hello_world()),
        do_parse(" {\"hello\" : [\"world\",[ ]],\n \"x\":4}\n", &document)
    );

    // The broken member ends the member list; the dict then misses its closing brace.
    match do_parse(r#"{"a" 1}"#, &document) {
        Report::Failed { code, offset, rest } => {
            assert_eq!(ErrorCode::UnexpectedChar, code);
            assert_eq!(1, offset);
            assert_eq!(r#""a" 1}"#, rest);
        }
        other => panic!("unexpected report {:?}", other),
    }
}

#[test]
fn bench_value() {
    let repeats = 12000;
    let piece = r#"{"hello": 1.22, "world": [1, 2.3, 4, "five"], "test": "key", "lol": "ey"}"#;
    let mut s = String::with_capacity(repeats * piece.len());
    s.extend(iter::repeat(piece).take(repeats));
    let (mut at, end) = Cursor::span(&s);
    {
        time_test!();
        for _ in 0..repeats {
            let r = value.parse(at, end);
            assert!(r.is_ok());
            at = r.cursor();
        }
    }
    assert!(at.at_end(end));
}
