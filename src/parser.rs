//! Recursive-descent parser: tokens → expression tree.
//!
//! Grounded on `src/filter_parser.rs::parse_expression`/`parse_term`'s shape (an explicit cursor
//! advanced by index, `Result`-returning recursive calls). The precedence split (`||` below `&&`
//! below unary `!`) has no counterpart in the teacher's flat `LogicalOperator` and follows this
//! language's own grammar directly.

use crate::ast::Node;
use crate::config::ParserLimits;
use crate::errors::{CompileError, CompileErrorKind};
use crate::lexer::{Spanned, Token};
use crate::predicates;
use tracing::warn;

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    source_len: usize,
    limits: &'a ParserLimits,
}

/// Parse a pre-tokenized condition into an expression tree.
pub fn parse(
    tokens: &[Spanned],
    source_len: usize,
    limits: &ParserLimits,
) -> Result<Node, CompileError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        source_len,
        limits,
    };

    let tree = parser.parse_or(0)?;

    match parser.peek() {
        None => Ok(tree),
        Some(spanned) => Err(leftover_error(spanned)),
    }
}

/// Classify a token left over after a complete sub-expression has been parsed. A stray `!`
/// is reported as `DanglingNot` (it has no operand of its own to negate), a stray `)` as
/// `UnmatchedClosingParen`, and anything else (another primary start with no operator joining
/// it to what came before) as `MissingOperator`.
fn leftover_error(spanned: &Spanned) -> CompileError {
    match &spanned.token {
        Token::Not => CompileError::new(CompileErrorKind::DanglingNot, spanned.pos),
        Token::RParen => CompileError::new(CompileErrorKind::UnmatchedClosingParen, spanned.pos),
        _ => CompileError::new(CompileErrorKind::MissingOperator, spanned.pos),
    }
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Spanned> {
        let tok = self.tokens.get(self.pos);
        self.pos += 1;
        tok
    }

    fn check_depth(&self, depth: usize) -> Result<(), CompileError> {
        if depth > self.limits.max_depth {
            warn!(
                depth,
                max_depth = self.limits.max_depth,
                "expression nesting exceeds the configured maximum depth"
            );
            Err(CompileError::new(
                CompileErrorKind::MaxDepthExceeded(self.limits.max_depth),
                self.peek().map(|s| s.pos).unwrap_or(self.source_len),
            ))
        } else {
            Ok(())
        }
    }

    fn parse_or(&mut self, depth: usize) -> Result<Node, CompileError> {
        self.check_depth(depth)?;
        let mut left = self.parse_and(depth)?;
        while let Some(Token::Or) = self.peek().map(|s| &s.token) {
            let op_pos = self.advance().unwrap().pos;
            if matches!(self.peek().map(|s| &s.token), Some(Token::And) | Some(Token::Or)) {
                return Err(CompileError::new(CompileErrorKind::DoubleBinaryOperator, op_pos));
            }
            let right = self.parse_and(depth + 1)?;
            left = Node::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self, depth: usize) -> Result<Node, CompileError> {
        self.check_depth(depth)?;
        let mut left = self.parse_unary(depth)?;
        while let Some(Token::And) = self.peek().map(|s| &s.token) {
            let op_pos = self.advance().unwrap().pos;
            if matches!(self.peek().map(|s| &s.token), Some(Token::And) | Some(Token::Or)) {
                return Err(CompileError::new(CompileErrorKind::DoubleBinaryOperator, op_pos));
            }
            let right = self.parse_unary(depth + 1)?;
            left = Node::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self, depth: usize) -> Result<Node, CompileError> {
        self.check_depth(depth)?;
        if let Some(Token::Not) = self.peek().map(|s| &s.token) {
            let not_pos = self.advance().unwrap().pos;
            match self.peek().map(|s| &s.token) {
                None | Some(Token::And) | Some(Token::Or) | Some(Token::RParen) => {
                    Err(CompileError::new(CompileErrorKind::DanglingNot, not_pos))
                }
                _ => {
                    let inner = self.parse_unary(depth + 1)?;
                    Ok(Node::Not(Box::new(inner)))
                }
            }
        } else {
            self.parse_primary(depth)
        }
    }

    fn parse_primary(&mut self, depth: usize) -> Result<Node, CompileError> {
        self.check_depth(depth)?;
        match self.advance() {
            None => Err(CompileError::new(CompileErrorKind::UnexpectedEof, self.source_len)),
            Some(Spanned { token: Token::Predicate { name, args }, pos }) => {
                predicates::build(name, args, *pos)
            }
            Some(Spanned { token: Token::LParen, pos }) => {
                let lparen_pos = *pos;
                if let Some(Token::RParen) = self.peek().map(|s| &s.token) {
                    return Err(CompileError::new(CompileErrorKind::EmptyGroup, lparen_pos));
                }
                let inner = self.parse_or(depth + 1)?;
                match self.peek() {
                    Some(Spanned { token: Token::RParen, .. }) => {
                        self.advance();
                        Ok(inner)
                    }
                    None => Err(CompileError::new(
                        CompileErrorKind::MissingClosingParen,
                        lparen_pos,
                    )),
                    Some(spanned) => Err(leftover_error(spanned)),
                }
            }
            Some(Spanned { token: Token::RParen, pos }) => {
                Err(CompileError::new(CompileErrorKind::UnmatchedClosingParen, *pos))
            }
            Some(Spanned { token: Token::And, pos }) | Some(Spanned { token: Token::Or, pos }) => {
                Err(CompileError::new(
                    CompileErrorKind::ExpectedPrimary("binary operator".to_string()),
                    *pos,
                ))
            }
        }
    }
}
