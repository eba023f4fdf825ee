//! The event data model: a recursive, dynamically shaped value and the lookup/timestamp
//! capabilities the evaluator needs from it.
//!
//! Per the Design Notes, a dynamically typed nested mapping is expressed here as a tagged sum
//! type (`Value`) rather than `dyn Any`-style dispatch: predicates branch on the leaf variant,
//! and field lookup returns `None` ("absent") the moment a path step is missing or not a map.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};

/// The fixed key under which an event's wall-clock time is stored.
pub const TIMESTAMP_FIELD: &str = "@timestamp";

/// A single value inside an event: a scalar, a nested mapping, or a sequence (sequences are
/// leaves; field lookup does not descend into them).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Map(HashMap<String, Value>),
    Array(Vec<Value>),
}

impl Value {
    /// Borrow this value as a mapping, if it is one.
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Borrow this value as a string leaf, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render this leaf in its canonical string form, used by `EQ` for string equality.
    ///
    /// Pinned per an Open Question in the spec: integral floats drop the trailing `.0`, bools
    /// render lowercase, `null` renders as the literal string `"null"`, and timestamps render
    /// as RFC 3339. This makes `EQ(n,"1")` true against the numeric leaf `1`.
    pub fn canonical_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::String(s) => s.clone(),
            Value::Timestamp(t) => t.to_rfc3339(),
            Value::Map(_) => String::new(),
            Value::Array(_) => String::new(),
        }
    }

    /// Interpret this leaf as a wall-clock time, for the `@timestamp` field specifically.
    fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            Value::Number(n) => Utc.timestamp_opt(*n as i64, 0).single(),
            _ => None,
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(a) => Value::Array(a.iter().map(Value::from).collect()),
            serde_json::Value::Object(o) => Value::Map(
                o.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from(&v)
    }
}

/// The two capabilities the evaluator needs from a host's event representation.
///
/// Any host data model that satisfies this trait is acceptable; the core does not require a
/// specific representation. [`MapEvent`] below is the bundled implementation, built on [`Value`].
pub trait Event {
    /// Descend through nested mappings following `path` in order. Returns `None` ("absent") the
    /// moment a step is missing or the current value is not a mapping.
    fn lookup(&self, path: &[&str]) -> Option<&Value>;

    /// The event's wall-clock time, if present.
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

/// The bundled [`Event`] implementation: a single root [`Value`], expected to be a `Value::Map`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEvent(pub Value);

impl MapEvent {
    pub fn new(root: Value) -> Self {
        Self(root)
    }
}

impl From<serde_json::Value> for MapEvent {
    fn from(v: serde_json::Value) -> Self {
        MapEvent(Value::from(v))
    }
}

impl Event for MapEvent {
    fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let mut current = &self.0;
        for step in path {
            current = current.as_map()?.get(*step)?;
        }
        Some(current)
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.lookup(&[TIMESTAMP_FIELD])?.as_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: Vec<(&str, Value)>) -> Value {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn lookup_descends_nested_maps() {
        let event = MapEvent::new(map(vec![(
            "name",
            map(vec![("first", Value::String("jia".into()))]),
        )]));

        assert_eq!(
            event.lookup(&["name", "first"]),
            Some(&Value::String("jia".into()))
        );
    }

    #[test]
    fn lookup_is_absent_on_missing_step() {
        let event = MapEvent::new(map(vec![("name", map(vec![]))]));
        assert_eq!(event.lookup(&["name", "first"]), None);
        assert_eq!(event.lookup(&["missing"]), None);
    }

    #[test]
    fn lookup_is_absent_through_non_map() {
        let event = MapEvent::new(map(vec![("via", Value::String("abc".into()))]));
        assert_eq!(event.lookup(&["via", "nested"]), None);
    }

    #[test]
    fn canonical_string_matches_pinned_choices() {
        assert_eq!(Value::Number(1.0).canonical_string(), "1");
        assert_eq!(Value::Number(1.5).canonical_string(), "1.5");
        assert_eq!(Value::Bool(true).canonical_string(), "true");
        assert_eq!(Value::Null.canonical_string(), "null");
    }

    #[test]
    fn timestamp_parses_rfc3339_strings() {
        let event = MapEvent::new(map(vec![(
            TIMESTAMP_FIELD,
            Value::String("2024-01-01T00:00:00Z".into()),
        )]));
        assert!(event.timestamp().is_some());
    }

    #[test]
    fn timestamp_absent_when_missing() {
        let event = MapEvent::new(map(vec![]));
        assert_eq!(event.timestamp(), None);
    }
}
