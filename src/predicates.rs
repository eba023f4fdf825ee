//! Predicate registry: resolves a predicate call's raw name and argument text into a compiled
//! [`ast::Predicate`] leaf, validating arity and argument kinds along the way.
//!
//! Grounded on `crates/m3u-proxy/src/proxy/filter_engine.rs`'s match-on-operator dispatch
//! (`evaluate_tree_condition`); argument splitting mirrors `src/filter_parser.rs::tokenize`'s
//! quote-aware scanning, applied here to an argument list instead of a whole condition string.

use regex::Regex;

use crate::ast::{Node, Predicate};
use crate::duration;
use crate::errors::{CompileError, CompileErrorKind};

/// One raw argument extracted from a predicate's argument text, with its quoting and byte
/// offset (relative to the start of the whole condition) preserved for error reporting.
struct RawArg {
    text: String,
    quoted: bool,
    pos: usize,
}

/// Build a compiled predicate node from a call's name and raw argument text.
///
/// `call_pos` is the byte offset of the predicate name in the source, used as the fallback
/// error position when an error can't be pinned to a specific argument.
pub fn build(name: &str, args_text: &str, call_pos: usize) -> Result<Node, CompileError> {
    let args = split_args(args_text, call_pos);

    match name {
        "EQ" => build_eq(&args, name, call_pos),
        "Match" => build_match(&args, name, call_pos),
        "Exist" => build_exist(&args, name, call_pos),
        "Before" => build_before(&args, name, call_pos),
        "After" => build_after(&args, name, call_pos),
        other => Err(CompileError::new(
            CompileErrorKind::UnknownPredicate(other.to_string()),
            call_pos,
        )),
    }
}

/// Split a predicate's argument text at commas that are outside of quoted substrings.
fn split_args(args_text: &str, base_pos: usize) -> Vec<RawArg> {
    let chars: Vec<char> = args_text.chars().collect();
    let len = chars.len();
    let mut out = Vec::new();
    let mut i = 0usize;
    let mut field_start = 0usize;

    while i <= len {
        if i == len || chars[i] == ',' {
            let slice: String = chars[field_start..i].iter().collect();
            let trimmed = slice.trim();
            let quoted = trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2;
            let text = if quoted {
                trimmed[1..trimmed.len() - 1].to_string()
            } else {
                trimmed.to_string()
            };
            out.push(RawArg {
                text,
                quoted,
                pos: base_pos + field_start,
            });
            i += 1;
            field_start = i;
            continue;
        }
        if chars[i] == '"' {
            i += 1;
            while i < len && chars[i] != '"' {
                i += 1;
            }
        }
        i += 1;
    }

    out
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn require_path(args: &[RawArg], name: &str, upto: usize) -> Result<Vec<String>, CompileError> {
    let mut path = Vec::with_capacity(upto);
    for (index, arg) in args[..upto].iter().enumerate() {
        if arg.quoted || !is_valid_identifier(&arg.text) {
            return Err(CompileError::new(
                CompileErrorKind::WrongArgKind {
                    name: name.to_string(),
                    index,
                    expected: "a bare field-path step".to_string(),
                },
                arg.pos,
            ));
        }
        path.push(arg.text.clone());
    }
    Ok(path)
}

fn build_eq(args: &[RawArg], name: &str, call_pos: usize) -> Result<Node, CompileError> {
    if args.len() < 2 {
        return Err(CompileError::new(
            CompileErrorKind::WrongArgCount {
                name: name.to_string(),
                expected: "at least 2 arguments (path..., literal)".to_string(),
                got: args.len(),
            },
            call_pos,
        ));
    }
    let literal_arg = args.last().unwrap();
    if !literal_arg.quoted {
        return Err(CompileError::new(
            CompileErrorKind::WrongArgKind {
                name: name.to_string(),
                index: args.len() - 1,
                expected: "a quoted string literal".to_string(),
            },
            literal_arg.pos,
        ));
    }
    let path = require_path(args, name, args.len() - 1)?;
    Ok(Node::Pred(Predicate::Eq {
        path,
        literal: literal_arg.text.clone(),
    }))
}

fn build_match(args: &[RawArg], name: &str, call_pos: usize) -> Result<Node, CompileError> {
    if args.len() < 2 {
        return Err(CompileError::new(
            CompileErrorKind::WrongArgCount {
                name: name.to_string(),
                expected: "at least 2 arguments (path..., regex)".to_string(),
                got: args.len(),
            },
            call_pos,
        ));
    }
    let pattern_arg = args.last().unwrap();
    let path = require_path(args, name, args.len() - 1)?;
    let regex = Regex::new(&pattern_arg.text).map_err(|e| {
        CompileError::new(
            CompileErrorKind::InvalidRegex {
                pattern: pattern_arg.text.clone(),
                message: e.to_string(),
            },
            pattern_arg.pos,
        )
    })?;
    Ok(Node::Pred(Predicate::Match { path, regex }))
}

fn build_exist(args: &[RawArg], name: &str, call_pos: usize) -> Result<Node, CompileError> {
    if args.is_empty() {
        return Err(CompileError::new(
            CompileErrorKind::WrongArgCount {
                name: name.to_string(),
                expected: "at least 1 argument (path...)".to_string(),
                got: 0,
            },
            call_pos,
        ));
    }
    let path = require_path(args, name, args.len())?;
    Ok(Node::Pred(Predicate::Exist { path }))
}

fn build_before(args: &[RawArg], name: &str, call_pos: usize) -> Result<Node, CompileError> {
    let offset = single_duration_arg(args, name, call_pos)?;
    Ok(Node::Pred(Predicate::Before { offset }))
}

fn build_after(args: &[RawArg], name: &str, call_pos: usize) -> Result<Node, CompileError> {
    let offset = single_duration_arg(args, name, call_pos)?;
    Ok(Node::Pred(Predicate::After { offset }))
}

fn single_duration_arg(
    args: &[RawArg],
    name: &str,
    call_pos: usize,
) -> Result<chrono::Duration, CompileError> {
    if args.len() != 1 {
        return Err(CompileError::new(
            CompileErrorKind::WrongArgCount {
                name: name.to_string(),
                expected: "exactly 1 argument (a duration literal)".to_string(),
                got: args.len(),
            },
            call_pos,
        ));
    }
    let arg = &args[0];
    duration::parse_duration(&arg.text).map_err(|kind| CompileError::new(kind, arg.pos))
}
