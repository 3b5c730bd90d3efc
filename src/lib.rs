//! Content-expression compiler and matcher for structured-document schemas.
//!
//! A schema declares, per node type, a regular-expression-like *content
//! expression* over other node types (`"paragraph (horizontal_rule
//! paragraph)+"`, `"(heading | paragraph)*"`). This crate compiles that
//! expression into a finite automaton and answers the three questions an
//! editor needs at edit time:
//!
//! - **Validity** — [`Match::match_fragment`]/[`Match::match_type`]: does a
//!   child sequence conform?
//! - **Auto-completion** — [`Match::fill_before`]: the shortest synthesized
//!   fragment that makes a tail conform.
//! - **Wrapping** — [`Match::find_wrapping`]: the shortest chain of wrapper
//!   node types admitting a target type at the current position.
//!
//! Pipeline, leaves first: [`token`] lexes the source string, [`parser`]
//! parses it into an [`ast::Expr`] tree (resolving identifiers against the
//! schema's node types), [`nfa`] compiles the tree into a Thompson-style
//! NFA, [`dfa`] determinizes it into the arena-allocated [`Match`] graph
//! users see, and [`dead_end`] rejects schemas with an unfillable required
//! position. [`compile::parse_pattern`] ties the whole thing together.
//! [`matcher`], `fill_before.rs`, and `wrapping.rs` add the read-only query
//! surface to [`Match`] itself rather than introducing a second type.
//!
//! The crate is pure and synchronous: no I/O, no locking, no mutation after
//! a schema's `Match` graphs are built (aside from the lazily populated,
//! append-only `find_wrapping` cache — see [`dfa::Match`]).

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod ast;
mod dead_end;
mod dfa;
mod fill_before;
mod matcher;
mod nfa;
mod parser;
mod token;
mod wrapping;

pub mod compile;
pub mod error;
pub mod node_type;

#[cfg(test)]
mod test_support;

pub use compile::parse_pattern;
pub use dfa::Match;
pub use error::{DeadEndError, SchemaError, SyntaxError};
pub use node_type::{Fragment, NodeType};
