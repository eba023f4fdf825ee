//! Integration tests exercising the full compile -> evaluate pipeline against the concrete
//! scenarios and compile-error cases that drove this language's design.

use chrono::{Duration, Utc};
use condition_lang::{compile, CompileErrorKind, MapEvent, Value};

fn map(pairs: Vec<(&str, Value)>) -> Value {
    Value::Map(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

fn event(pairs: Vec<(&str, Value)>) -> MapEvent {
    MapEvent::new(map(pairs))
}

#[test]
fn scenario_eq_nested_path() {
    let filter = compile(r#"EQ(name,first,"jia")"#).unwrap();
    assert!(filter.evaluate(&event(vec![("name", map(vec![("first", Value::String("jia".into()))]))])));
    assert!(!filter.evaluate(&event(vec![("name", map(vec![("first", Value::String("XX".into()))]))])));
}

#[test]
fn scenario_match_regex() {
    let filter = compile(r#"Match(user,name,^liu.*a$)"#).unwrap();
    assert!(filter.evaluate(&event(vec![("user", map(vec![("name", Value::String("liujia".into()))]))])));
    assert!(!filter.evaluate(&event(vec![("user", map(vec![("name", Value::String("lujia".into()))]))])));
}

#[test]
fn scenario_and_not() {
    let filter = compile(r#"EQ(name,first,"jia") && !EQ(name,last,"liu")"#).unwrap();
    let both = map(vec![
        ("first", Value::String("jia".into())),
        ("last", Value::String("liu".into())),
    ]);
    assert!(!filter.evaluate(&event(vec![("name", both)])));

    let mismatched = map(vec![
        ("first", Value::String("jia".into())),
        ("last", Value::String("XXX".into())),
    ]);
    assert!(filter.evaluate(&event(vec![("name", mismatched)])));
}

#[test]
fn scenario_double_negation() {
    let filter = compile(r#"EQ(name,first,"jia") && !!EQ(name,last,"liu")"#).unwrap();
    let both = map(vec![
        ("first", Value::String("jia".into())),
        ("last", Value::String("liu".into())),
    ]);
    assert!(filter.evaluate(&event(vec![("name", both)])));
}

#[test]
fn scenario_exist_or_not_eq() {
    let filter = compile(r#"!Exist(via) || !EQ(via,"akamai")"#).unwrap();
    assert!(filter.evaluate(&event(vec![("via", Value::String("abc".into()))])));
    assert!(filter.evaluate(&event(vec![("XXX", Value::String("akamai".into()))])));
    assert!(!filter.evaluate(&event(vec![("via", Value::String("akamai".into()))])));
}

#[test]
fn scenario_exist_and_group() {
    let filter = compile(r#"Exist(a) && (Exist(b) || Exist(c))"#).unwrap();
    assert!(filter.evaluate(&event(vec![
        ("a", Value::String("".into())),
        ("b", Value::String("".into())),
    ])));
    assert!(!filter.evaluate(&event(vec![
        ("b", Value::String("".into())),
        ("c", Value::String("".into())),
    ])));
    assert!(!filter.evaluate(&event(vec![("a", Value::String("".into()))])));
}

#[test]
fn scenario_before_or_after() {
    let filter = compile(r#"Before(-24h) || After(24h)"#).unwrap();
    let now = Utc::now();
    assert!(!filter.evaluate_at(&event(vec![("@timestamp", Value::Timestamp(now))]), now));
    assert!(filter.evaluate_at(
        &event(vec![("@timestamp", Value::Timestamp(now + Duration::seconds(86500)))]),
        now
    ));
}

#[test]
fn scenario_before_and_after() {
    let filter = compile(r#"Before(24h) && After(-24h)"#).unwrap();
    let now = Utc::now();
    assert!(filter.evaluate_at(&event(vec![("@timestamp", Value::Timestamp(now))]), now));
    assert!(!filter.evaluate_at(
        &event(vec![("@timestamp", Value::Timestamp(now - Duration::seconds(86500)))]),
        now
    ));
}

#[test]
fn scenario_parens_inside_quotes_compile_successfully() {
    assert!(compile(r#"EQ(a,"ji()a") && EQ(b,"liu")"#).is_ok());
}

#[test]
fn compile_error_two_primaries_without_operator() {
    let err = compile(r#"EQ(a,"x") EQ(b,"y")"#).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::MissingOperator);
}

#[test]
fn compile_error_lone_ampersand() {
    let err = compile(r#"EQ(a,"x") & EQ(b,"y")"#).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::LoneAmpersand);
}

#[test]
fn compile_error_triple_ampersand() {
    let err = compile(r#"EQ(a,"x") &&& EQ(b,"y")"#).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::TripleAmpersand);
}

#[test]
fn compile_error_unterminated_string_spanning_operator() {
    assert!(compile(r#"EQ(a,"x" && EQ(b,"y")"#).is_err());
}

#[test]
fn compile_error_unmatched_paren_inside_string() {
    assert!(compile(r#"EQ(a,"x) && EQ(b,"y")"#).is_err());
}

#[test]
fn compile_error_dangling_not() {
    let err = compile(r#"EQ(a,"x") ! && EQ(b,"y")"#).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::DanglingNot);
}

#[test]
fn compile_error_double_and() {
    let err = compile(r#"EQ(a,"x") && && EQ(b,"y")"#).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::DoubleBinaryOperator);
}

#[test]
fn universal_property_double_negation() {
    let plain = compile(r#"EQ(a,"1")"#).unwrap();
    let doubled = compile(r#"!!EQ(a,"1")"#).unwrap();
    let hit = event(vec![("a", Value::String("1".into()))]);
    let miss = event(vec![("a", Value::String("2".into()))]);
    assert_eq!(plain.evaluate(&hit), doubled.evaluate(&hit));
    assert_eq!(plain.evaluate(&miss), doubled.evaluate(&miss));
}

#[test]
fn universal_property_de_morgan_over_or() {
    let lhs = compile(r#"!(EQ(a,"1") || EQ(b,"2"))"#).unwrap();
    let rhs = compile(r#"!EQ(a,"1") && !EQ(b,"2")"#).unwrap();
    for (a, b) in [("1", "2"), ("1", "X"), ("X", "X")] {
        let e = event(vec![("a", Value::String(a.into())), ("b", Value::String(b.into()))]);
        assert_eq!(lhs.evaluate(&e), rhs.evaluate(&e));
    }
}

#[test]
fn universal_property_absent_path_is_false() {
    let filter = compile(r#"EQ(never,seen,"x") || Match(never,seen,"x") || Exist(never)"#).unwrap();
    assert!(!filter.evaluate(&event(vec![])));
}
