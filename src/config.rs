//! Tunable limits for the parser.
//!
//! The condition language core never reads files or environment variables itself; loading
//! configuration is the embedding host's job (see the Purpose & Scope "external collaborators"
//! boundary). This module only holds the small set of compile-time limits a host may want to
//! tighten, mirroring the plain struct-with-`Default` shape the teacher project uses for its own
//! configuration sections.

/// Limits enforced while compiling a condition. Defaults are generous; hosts embedding the
/// parser behind untrusted input (e.g. a multi-tenant rule editor) may want to tighten them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserLimits {
    /// Maximum nesting depth of `&&`/`||`/`!`/parenthesized groups.
    pub max_depth: usize,
    /// Maximum length, in bytes, of the condition text itself.
    pub max_source_len: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_source_len: 64 * 1024,
        }
    }
}
