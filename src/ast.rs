//! The parsed content-expression tree (spec.md §3, "Expression tree").
//!
//! A closed enum, matched in one `compile(expr, from)` function in
//! [`crate::nfa`] — no visitor pattern, per spec.md §9's design note.

/// Upper bound of a [`Expr::Range`] repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeMax {
    Bounded(u32),
    Unbounded,
}

/// A parsed content expression.
///
/// `Sequence` and `Choice` always hold at least two children — a
/// single-child sequence or choice collapses to its child at parse time,
/// so the invariant is structural, not just documented.
#[derive(Debug, Clone)]
pub(crate) enum Expr<T> {
    /// A single resolved node type. Group identifiers that resolve to
    /// more than one type are represented as a [`Expr::Choice`] of
    /// `Name` atoms, one per member, in schema iteration order.
    Name(T),
    Sequence(Vec<Expr<T>>),
    Choice(Vec<Expr<T>>),
    Star(Box<Expr<T>>),
    Plus(Box<Expr<T>>),
    Optional(Box<Expr<T>>),
    Range {
        min: u32,
        max: RangeMax,
        child: Box<Expr<T>>,
    },
}
