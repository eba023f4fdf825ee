//! Error type definitions for the condition language
//!
//! All compile-time failures (lexical, syntactic, semantic) are reported through
//! [`CompileError`], which pairs a closed [`CompileErrorKind`] with a byte offset into the
//! source text. Evaluation never fails: absent fields, type mismatches and missing
//! timestamps are defined to yield `false` rather than an error.

use thiserror::Error;

/// The three-level taxonomy from the condition language's error handling design: lexical,
/// syntactic and semantic failures, each with a human-readable message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileErrorKind {
    // --- Lex ---
    /// A `"` was opened but never closed.
    #[error("unterminated quoted string")]
    UnterminatedString,

    /// A predicate call's argument list was opened but never closed.
    #[error("unterminated parenthesis group")]
    UnterminatedGroup,

    /// A single `&` was found; it must be doubled as `&&`.
    #[error("'&' must be doubled as '&&'")]
    LoneAmpersand,

    /// A single `|` was found; it must be doubled as `||`.
    #[error("'|' must be doubled as '||'")]
    LonePipe,

    /// Three or more consecutive `&` characters.
    #[error("three or more consecutive '&' operators")]
    TripleAmpersand,

    /// Three or more consecutive `|` characters.
    #[error("three or more consecutive '|' operators")]
    TriplePipe,

    /// An unexpected character could not begin any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    // --- Syntax ---
    /// `!` with no operand following it (e.g. adjacent to a binary operator or end of input).
    #[error("'!' has no operand")]
    DanglingNot,

    /// Two binary operators appeared back to back (`a && && b`).
    #[error("two consecutive binary operators")]
    DoubleBinaryOperator,

    /// Two primaries appeared with no operator between them (`EQ(...) EQ(...)`).
    #[error("expected '&&' or '||' between expressions")]
    MissingOperator,

    /// A `(` was never matched by a `)`.
    #[error("missing closing parenthesis")]
    MissingClosingParen,

    /// A `)` appeared with no matching open paren.
    #[error("unmatched closing parenthesis")]
    UnmatchedClosingParen,

    /// `()` with nothing inside.
    #[error("empty parenthesized group")]
    EmptyGroup,

    /// End of input where a primary expression (predicate call or `(`) was expected.
    #[error("unexpected end of expression")]
    UnexpectedEof,

    /// A token appeared where a primary expression was expected.
    #[error("expected a predicate call or '(', found '{0}'")]
    ExpectedPrimary(String),

    /// A predicate name was not immediately followed by `(`.
    #[error("expected '(' after predicate name '{0}'")]
    ExpectedOpenParen(String),

    // --- Semantic ---
    /// The predicate name is not one of the registered kinds.
    #[error("unknown predicate '{0}'")]
    UnknownPredicate(String),

    /// The predicate was called with the wrong number of arguments.
    #[error("predicate '{name}' expects {expected}, got {got}")]
    WrongArgCount {
        name: String,
        expected: String,
        got: usize,
    },

    /// An argument that must be a bare field-path step was quoted, or vice versa.
    #[error("predicate '{name}' argument {index} must be {expected}")]
    WrongArgKind {
        name: String,
        index: usize,
        expected: String,
    },

    /// The regex argument to `Match` failed to compile.
    #[error("invalid regex '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    /// The duration argument to `Before`/`After` could not be parsed.
    #[error("invalid duration literal '{0}'")]
    InvalidDuration(String),

    // --- Limits (ambient configuration enforcement, not part of the three-way taxonomy above) ---
    /// Nesting of `&&`/`||`/`!`/groups exceeded `ParserLimits::max_depth`.
    #[error("expression nesting exceeds the configured maximum depth of {0}")]
    MaxDepthExceeded(usize),

    /// The source text exceeded `ParserLimits::max_source_len`.
    #[error("condition text of {actual} bytes exceeds the configured maximum of {limit}")]
    MaxSourceLenExceeded { actual: usize, limit: usize },
}

/// A compile-time failure: a [`CompileErrorKind`] plus the byte offset in the source text
/// where it was detected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at byte {offset}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub offset: usize,
}

impl CompileError {
    pub fn new(kind: CompileErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// The human-readable message, independent of the byte offset.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
