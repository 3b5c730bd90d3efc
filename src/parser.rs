//! Recursive-descent parser for content expressions (spec.md §4.2) and
//! the name resolver that backs each `NAME` atom (spec.md §4.3).
//!
//! ```text
//! expr      := seq ('|' seq)*
//! seq       := subscript+
//! subscript := atom ('+' | '*' | '?' | '{' range '}')*
//! range     := INT (',' (INT)?)?
//! atom      := '(' expr ')' | NAME
//! ```

use indexmap::IndexMap;

use crate::ast::{Expr, RangeMax};
use crate::error::{SyntaxError, SyntaxErrorReason};
use crate::node_type::NodeType;
use crate::token::TokenStream;

/// Whether a content expression has committed to inline or block content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineLock {
    Inline,
    Block,
}

struct Parser<'a, T> {
    tokens: TokenStream<'a>,
    node_types: &'a IndexMap<String, T>,
    lock: Option<InlineLock>,
}

impl<'a, T: NodeType> Parser<'a, T> {
    fn err(&self, reason: SyntaxErrorReason) -> SyntaxError {
        SyntaxError::new(reason, self.tokens.source())
    }

    fn parse_expr(&mut self) -> Result<Expr<T>, SyntaxError> {
        let mut branches = vec![self.parse_seq()?];
        while self.tokens.eat("|") {
            branches.push(self.parse_seq()?);
        }
        Ok(fold_one(branches, Expr::Choice))
    }

    fn parse_seq(&mut self) -> Result<Expr<T>, SyntaxError> {
        let mut items = vec![self.parse_subscript()?];
        while self.can_start_atom() {
            items.push(self.parse_subscript()?);
        }
        Ok(fold_one(items, Expr::Sequence))
    }

    fn can_start_atom(&self) -> bool {
        match self.tokens.peek() {
            None => false,
            Some(tok) => tok == "(" || is_name_token(tok),
        }
    }

    fn parse_subscript(&mut self) -> Result<Expr<T>, SyntaxError> {
        let mut expr = self.parse_atom()?;
        loop {
            if self.tokens.eat("+") {
                expr = Expr::Plus(Box::new(expr));
            } else if self.tokens.eat("*") {
                expr = Expr::Star(Box::new(expr));
            } else if self.tokens.eat("?") {
                expr = Expr::Optional(Box::new(expr));
            } else if self.tokens.eat("{") {
                let (min, max) = self.parse_range()?;
                if !self.tokens.eat("}") {
                    return Err(self.err(SyntaxErrorReason::UnclosedRange));
                }
                expr = Expr::Range {
                    min,
                    max,
                    child: Box::new(expr),
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_range(&mut self) -> Result<(u32, RangeMax), SyntaxError> {
        let min = self.parse_int()?;
        if !self.tokens.eat(",") {
            return Ok((min, RangeMax::Bounded(min)));
        }
        if self.tokens.peek() == Some("}") {
            return Ok((min, RangeMax::Unbounded));
        }
        let max = self.parse_int()?;
        if max < min {
            return Err(self.err(SyntaxErrorReason::InvalidRange));
        }
        Ok((min, RangeMax::Bounded(max)))
    }

    fn parse_int(&mut self) -> Result<u32, SyntaxError> {
        let tok = self
            .tokens
            .peek()
            .ok_or_else(|| self.err(SyntaxErrorReason::UnexpectedEnd))?;
        let value: u32 = tok
            .parse()
            .map_err(|_| self.err(SyntaxErrorReason::UnclosedRange))?;
        self.tokens.next();
        Ok(value)
    }

    fn parse_atom(&mut self) -> Result<Expr<T>, SyntaxError> {
        if self.tokens.eat("(") {
            let inner = self.parse_expr()?;
            if !self.tokens.eat(")") {
                return Err(self.err(SyntaxErrorReason::UnclosedGroup));
            }
            return Ok(inner);
        }

        let tok = self
            .tokens
            .peek()
            .ok_or_else(|| self.err(SyntaxErrorReason::UnexpectedEnd))?;
        if !is_name_token(tok) {
            let tok = tok.to_string();
            return Err(self.err(SyntaxErrorReason::UnexpectedToken(tok)));
        }
        let name = self.tokens.next().expect("peeked token exists");
        let resolved = self.resolve_name(&name)?;
        self.lock_inline(&resolved)?;

        Ok(match resolved.len() {
            1 => Expr::Name(resolved.into_iter().next().expect("len == 1")),
            _ => Expr::Choice(resolved.into_iter().map(Expr::Name).collect()),
        })
    }

    /// Name resolver (spec.md §4.3): exact name match wins outright;
    /// otherwise every node type carrying `name` as a group tag, in
    /// schema iteration order.
    fn resolve_name(&self, name: &str) -> Result<Vec<T>, SyntaxError> {
        if let Some(t) = self.node_types.values().find(|t| t.name() == name) {
            return Ok(vec![t.clone()]);
        }
        let group_members: Vec<T> = self
            .node_types
            .values()
            .filter(|t| t.groups().iter().any(|g| g == name))
            .cloned()
            .collect();
        if group_members.is_empty() {
            return Err(self.err(SyntaxErrorReason::UnknownName(name.to_string())));
        }
        Ok(group_members)
    }

    fn lock_inline(&mut self, types: &[T]) -> Result<(), SyntaxError> {
        for t in types {
            let this = if t.is_inline() {
                InlineLock::Inline
            } else {
                InlineLock::Block
            };
            match self.lock {
                None => self.lock = Some(this),
                Some(existing) if existing == this => {}
                Some(_) => return Err(self.err(SyntaxErrorReason::MixedInlineBlock)),
            }
        }
        Ok(())
    }
}

fn is_name_token(tok: &str) -> bool {
    tok.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn fold_one<T>(mut items: Vec<Expr<T>>, wrap: impl FnOnce(Vec<Expr<T>>) -> Expr<T>) -> Expr<T> {
    if items.len() == 1 {
        items.pop().expect("len == 1")
    } else {
        wrap(items)
    }
}

/// Parse a content-expression source string into a typed expression
/// tree, or `None` if `source` is empty (the canonical empty expression
/// has no tree at all — see [`crate::compile::parse_pattern`]).
pub(crate) fn parse<T: NodeType>(
    source: &str,
    node_types: &IndexMap<String, T>,
) -> Result<Option<Expr<T>>, SyntaxError> {
    if source.trim().is_empty() {
        return Ok(None);
    }
    let mut parser = Parser {
        tokens: TokenStream::new(source),
        node_types,
        lock: None,
    };
    let expr = parser.parse_expr()?;
    if !parser.tokens.at_end() {
        return Err(parser.err(SyntaxErrorReason::TrailingText));
    }
    Ok(Some(expr))
}
