//! The compiled expression tree: a sum type of boolean composition nodes over predicate leaves.
//!
//! Grounded on the leaf/group shape of `src/models/mod.rs::ConditionNode`, with an explicit
//! `Not` node (rather than the teacher's `negate: bool` flag) per
//! `other_examples/23344594_ALMaclaine-rdump__rdump-evaluator.rs.rs`'s `AstNode::Not`.

use chrono::Duration;
use regex::Regex;

/// A compiled boolean expression. Immutable once built; shareable across threads and
/// evaluations.
#[derive(Debug, Clone)]
pub enum Node {
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Not(Box<Node>),
    Pred(Predicate),
}

/// A compiled predicate leaf. Each variant already holds fully validated, pre-parsed state;
/// no re-parsing happens at evaluation time.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// `EQ(path..., literal)`: string-equality after canonicalizing the leaf.
    Eq { path: Vec<String>, literal: String },
    /// `Match(path..., regex)`: regex search against a string leaf.
    Match { path: Vec<String>, regex: Regex },
    /// `Exist(path...)`: true iff the path resolves to any value.
    Exist { path: Vec<String> },
    /// `Before(duration)`: true iff the event's timestamp is before `now + duration`.
    Before { offset: Duration },
    /// `After(duration)`: true iff the event's timestamp is after `now + duration`.
    After { offset: Duration },
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Predicate::Eq { path: p1, literal: l1 }, Predicate::Eq { path: p2, literal: l2 }) => {
                p1 == p2 && l1 == l2
            }
            (Predicate::Match { path: p1, regex: r1 }, Predicate::Match { path: p2, regex: r2 }) => {
                p1 == p2 && r1.as_str() == r2.as_str()
            }
            (Predicate::Exist { path: p1 }, Predicate::Exist { path: p2 }) => p1 == p2,
            (Predicate::Before { offset: o1 }, Predicate::Before { offset: o2 }) => o1 == o2,
            (Predicate::After { offset: o1 }, Predicate::After { offset: o2 }) => o1 == o2,
            _ => false,
        }
    }
}
