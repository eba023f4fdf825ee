//! Evaluator: walks a compiled expression tree against an event, short-circuiting `And`/`Or`.
//!
//! Grounded on `other_examples/23344594_ALMaclaine-rdump__rdump-evaluator.rs.rs`'s
//! `Evaluator::evaluate_node` (explicit short-circuit on `LogicalOp`, recursive `Not`) and
//! `crates/m3u-proxy/src/proxy/filter_engine.rs::evaluate_tree_condition`'s match-on-predicate
//! dispatch.

use chrono::{DateTime, Utc};

use crate::ast::{Node, Predicate};
use crate::event::Event;

/// Evaluate `node` against `event`, treating `now` as the current wall-clock time.
///
/// Pure function of (tree, event, now): absent fields and type mismatches yield `false` rather
/// than an error, per the error handling design. All failure classes are caught at compile time.
pub fn evaluate(node: &Node, event: &dyn Event, now: DateTime<Utc>) -> bool {
    match node {
        Node::And(left, right) => evaluate(left, event, now) && evaluate(right, event, now),
        Node::Or(left, right) => evaluate(left, event, now) || evaluate(right, event, now),
        Node::Not(inner) => !evaluate(inner, event, now),
        Node::Pred(predicate) => evaluate_predicate(predicate, event, now),
    }
}

fn evaluate_predicate(predicate: &Predicate, event: &dyn Event, now: DateTime<Utc>) -> bool {
    match predicate {
        Predicate::Eq { path, literal } => {
            let path_refs: Vec<&str> = path.iter().map(String::as_str).collect();
            match event.lookup(&path_refs) {
                Some(value) => &value.canonical_string() == literal,
                None => false,
            }
        }
        Predicate::Match { path, regex } => {
            let path_refs: Vec<&str> = path.iter().map(String::as_str).collect();
            match event.lookup(&path_refs).and_then(|v| v.as_str()) {
                Some(s) => regex.is_match(s),
                None => false,
            }
        }
        Predicate::Exist { path } => {
            let path_refs: Vec<&str> = path.iter().map(String::as_str).collect();
            event.lookup(&path_refs).is_some()
        }
        Predicate::Before { offset } => match event.timestamp() {
            Some(event_time) => event_time < now + *offset,
            None => false,
        },
        Predicate::After { offset } => match event.timestamp() {
            Some(event_time) => event_time > now + *offset,
            None => false,
        },
    }
}
