//! Thompson-style NFA construction (spec.md §4.4).
//!
//! Each state is an ordered list of [`Edge`]s; an `Edge` with `label =
//! None` is an epsilon transition. Edge order is preserved exactly as
//! pushed — it is what gives the DFA built from this NFA (see
//! [`crate::dfa`]) its source-textual left-to-right preference, which
//! `fill_before` relies on.

use crate::ast::{Expr, RangeMax};

/// Position of an edge whose target has not yet been patched.
type DanglingPos = (usize, usize);
type Dangling = Vec<DanglingPos>;

pub(crate) struct Edge<T> {
    pub(crate) label: Option<T>,
    pub(crate) target: usize,
}

/// An ordered array of NFA states, each an ordered array of edges.
pub(crate) struct Nfa<T> {
    pub(crate) states: Vec<Vec<Edge<T>>>,
    pub(crate) entry: usize,
    pub(crate) accept: usize,
}

impl<T> Nfa<T> {
    fn new_state(&mut self) -> usize {
        self.states.push(Vec::new());
        self.states.len() - 1
    }

    /// Push an edge whose target is already known.
    fn push_edge(&mut self, state: usize, label: Option<T>, target: usize) {
        self.states[state].push(Edge { label, target });
    }

    /// Push an edge whose target is not yet known, returning its
    /// position so a later `patch` call can fill it in.
    fn push_dangling(&mut self, state: usize, label: Option<T>) -> DanglingPos {
        let idx = self.states[state].len();
        self.states[state].push(Edge {
            label,
            target: usize::MAX,
        });
        (state, idx)
    }

    fn patch(&mut self, dangling: &[DanglingPos], target: usize) {
        for &(s, i) in dangling {
            self.states[s][i].target = target;
        }
    }
}

/// Compile `expr` into `nfa`, emitting states and edges reachable from
/// `from`, and return the list of dangling edges the caller must patch
/// to wherever control flows next. Always returns at least one dangling
/// edge.
fn compile<T: Clone>(expr: &Expr<T>, from: usize, nfa: &mut Nfa<T>) -> Dangling {
    match expr {
        Expr::Name(t) => vec![nfa.push_dangling(from, Some(t.clone()))],

        Expr::Sequence(children) => {
            let mut iter = children.iter();
            let first = iter.next().expect("Sequence has >= 2 children");
            let mut danglers = compile(first, from, nfa);
            for child in iter {
                let s = nfa.new_state();
                nfa.patch(&danglers, s);
                danglers = compile(child, s, nfa);
            }
            danglers
        }

        Expr::Choice(children) => {
            let mut result = Vec::new();
            for child in children {
                result.extend(compile(child, from, nfa));
            }
            result
        }

        Expr::Star(child) => {
            let loop_state = nfa.new_state();
            nfa.push_edge(from, None, loop_state);
            let inner = compile(child, loop_state, nfa);
            nfa.patch(&inner, loop_state);
            vec![nfa.push_dangling(loop_state, None)]
        }

        Expr::Plus(child) => {
            let loop_state = nfa.new_state();
            let first = compile(child, from, nfa);
            nfa.patch(&first, loop_state);
            let second = compile(child, loop_state, nfa);
            nfa.patch(&second, loop_state);
            vec![nfa.push_dangling(loop_state, None)]
        }

        Expr::Optional(child) => {
            // The skip edge is pushed *before* compiling the body, so it
            // is the first edge in `from`'s edge list. That ordering is
            // what makes fill_before prefer skipping the optional.
            let skip = nfa.push_dangling(from, None);
            let mut result = vec![skip];
            result.extend(compile(child, from, nfa));
            result
        }

        Expr::Range { min, max, child } => compile_range(*min, *max, child, from, nfa),
    }
}

fn compile_range<T: Clone>(
    min: u32,
    max: RangeMax,
    child: &Expr<T>,
    from: usize,
    nfa: &mut Nfa<T>,
) -> Dangling {
    // Unroll exactly `min` required copies, sequentially.
    let mut danglers: Dangling = Vec::new();
    let mut cur_state = from;
    for i in 0..min {
        if i > 0 {
            let s = nfa.new_state();
            nfa.patch(&danglers, s);
            cur_state = s;
        }
        danglers = compile(child, cur_state, nfa);
    }
    let has_run = min > 0;

    match max {
        RangeMax::Unbounded => {
            if !has_run {
                // `{0,}` is exactly `child*`.
                return compile(&Expr::Star(Box::new(child.clone())), from, nfa);
            }
            // `{min,}` with min >= 1: one more copy feeding a self loop,
            // same shape as the second half of Plus.
            let loop_state = nfa.new_state();
            nfa.patch(&danglers, loop_state);
            let inner = compile(child, loop_state, nfa);
            nfa.patch(&inner, loop_state);
            vec![nfa.push_dangling(loop_state, None)]
        }
        RangeMax::Bounded(max) => {
            let extra = max - min;
            if extra == 0 {
                if has_run {
                    danglers
                } else {
                    // `{0,0}`: matches nothing, exit is `from` itself.
                    vec![nfa.push_dangling(from, None)]
                }
            } else {
                let mut skip_danglers: Dangling = Vec::new();
                let mut cur_danglers = danglers;
                let mut has_danglers = has_run;
                let mut cur = cur_state;
                for _ in 0..extra {
                    let entry_state = if has_danglers {
                        let s = nfa.new_state();
                        nfa.patch(&cur_danglers, s);
                        s
                    } else {
                        cur
                    };
                    cur = entry_state;
                    skip_danglers.push(nfa.push_dangling(entry_state, None));
                    cur_danglers = compile(child, entry_state, nfa);
                    has_danglers = true;
                }
                skip_danglers.extend(cur_danglers);
                skip_danglers
            }
        }
    }
}

/// Compile a full expression tree (or `None`, for an empty content
/// expression) into an NFA with a designated entry and accepting state.
pub(crate) fn build<T: Clone>(expr: Option<&Expr<T>>) -> Nfa<T> {
    let mut nfa = Nfa {
        states: Vec::new(),
        entry: 0,
        accept: 0,
    };
    let entry = nfa.new_state();
    nfa.entry = entry;

    let Some(expr) = expr else {
        // Canonical empty expression: entry state is itself accepting,
        // with no outgoing edges.
        nfa.accept = entry;
        return nfa;
    };

    let danglers = compile(expr, entry, &mut nfa);
    let accept = nfa.new_state();
    nfa.patch(&danglers, accept);
    nfa.accept = accept;
    nfa
}
