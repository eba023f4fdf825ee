//! A compact embedded boolean condition language for filtering structured events.
//!
//! A condition is compiled once into a [`CompiledFilter`] and evaluated many times against
//! events implementing the [`Event`] trait. See the [`ast`] module for the expression tree
//! shape and [`predicates`] for the supported predicate set (`EQ`, `Match`, `Exist`, `Before`,
//! `After`).

pub mod ast;
pub mod config;
pub mod duration;
pub mod errors;
pub mod eval;
pub mod event;
pub mod lexer;
pub mod parser;
pub mod predicates;

use chrono::Utc;
use tracing::{debug, trace, warn};

pub use ast::{Node, Predicate};
pub use config::ParserLimits;
pub use errors::{CompileError, CompileErrorKind};
pub use event::{Event, MapEvent, Value};

/// A compiled, immutable expression tree. Construct with [`compile`] or [`compile_with_limits`];
/// evaluate with [`CompiledFilter::evaluate`] or [`CompiledFilter::evaluate_at`].
///
/// Cheap to clone and safe to share across threads: the tree holds no interior mutability and
/// every leaf's compiled state (e.g. regexes) is itself read-only and cheaply `Clone`.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    root: Node,
}

impl CompiledFilter {
    /// Evaluate against `event` using the real current time.
    pub fn evaluate(&self, event: &dyn Event) -> bool {
        self.evaluate_at(event, Utc::now())
    }

    /// Evaluate against `event`, treating `now` as the current wall-clock time. Exposed so
    /// callers (and tests) can inject a fixed clock for deterministic `Before`/`After` checks.
    pub fn evaluate_at(&self, event: &dyn Event, now: chrono::DateTime<Utc>) -> bool {
        eval::evaluate(&self.root, event, now)
    }

    /// Borrow the compiled expression tree, e.g. for introspection or pretty-printing.
    pub fn tree(&self) -> &Node {
        &self.root
    }
}

/// Compile condition text into an evaluable filter, using [`ParserLimits::default`].
pub fn compile(text: &str) -> Result<CompiledFilter, CompileError> {
    compile_with_limits(text, &ParserLimits::default())
}

/// Compile condition text into an evaluable filter, enforcing the given limits.
pub fn compile_with_limits(
    text: &str,
    limits: &ParserLimits,
) -> Result<CompiledFilter, CompileError> {
    if text.len() > limits.max_source_len {
        warn!(
            actual = text.len(),
            limit = limits.max_source_len,
            "condition text exceeds the configured maximum length"
        );
        return Err(CompileError::new(
            CompileErrorKind::MaxSourceLenExceeded {
                actual: text.len(),
                limit: limits.max_source_len,
            },
            0,
        ));
    }

    trace!(len = text.len(), "tokenizing condition text");
    let tokens = lexer::tokenize(text).map_err(|e| {
        debug!(kind = %e.kind, offset = e.offset, "condition text failed to tokenize");
        e
    })?;

    trace!(tokens = tokens.len(), "parsing token stream");
    let root = parser::parse(&tokens, text.len(), limits).map_err(|e| {
        debug!(kind = %e.kind, offset = e.offset, "condition text failed to parse");
        e
    })?;

    Ok(CompiledFilter { root })
}
