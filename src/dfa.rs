//! Subset construction: NFA → DFA (spec.md §4.5).
//!
//! The resulting states become the immutable, arena-allocated [`Match`]
//! graph users see. Two domain twists on vanilla powerset construction:
//! `null_from`'s single-epsilon-edge elision, and memoizing on the
//! sorted NFA state-id vector rather than a joined string (spec.md §9's
//! design note against string-keyed memoization).

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::nfa::Nfa;
use crate::node_type::NodeType;

pub(crate) type MatchId = usize;

pub(crate) struct MatchState<T: NodeType> {
    pub(crate) valid_end: bool,
    pub(crate) next: Vec<(T, MatchId)>,
    pub(crate) wrap_cache: RefCell<Vec<(T, Option<Rc<[T]>>)>>,
}

struct Graph<T: NodeType> {
    states: Vec<MatchState<T>>,
}

/// A DFA state: both a predicate (`valid_end`) and a transition table
/// (`next`). Cheap to clone — it's an `Rc` handle plus an arena index.
pub struct Match<T: NodeType> {
    graph: Rc<Graph<T>>,
    pub(crate) id: MatchId,
}

impl<T: NodeType> Match<T> {
    pub(crate) fn state(&self) -> &MatchState<T> {
        &self.graph.states[self.id]
    }

    pub(crate) fn with_id(&self, id: MatchId) -> Match<T> {
        Match {
            graph: self.graph.clone(),
            id,
        }
    }
}

impl<T: NodeType> Clone for Match<T> {
    fn clone(&self) -> Self {
        Match {
            graph: self.graph.clone(),
            id: self.id,
        }
    }
}

impl<T: NodeType> PartialEq for Match<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph) && self.id == other.id
    }
}
impl<T: NodeType> Eq for Match<T> {}

impl<T: NodeType> std::hash::Hash for Match<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.graph) as usize).hash(state);
        self.id.hash(state);
    }
}

impl<T: NodeType + std::fmt::Debug> std::fmt::Debug for Match<T> {
    /// Shallow by construction, so it can never loop on a cyclic DFA:
    /// shows this state's own `valid_end` and outgoing `(label, target
    /// id)` pairs without recursing into the targets' own `Debug`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Match")
            .field("id", &self.id)
            .field("valid_end", &state.valid_end)
            .field(
                "next",
                &state
                    .next
                    .iter()
                    .map(|(t, id)| (t.clone(), *id))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T: NodeType> Match<T> {
    /// A full recursive text dump of the DFA reachable from this state,
    /// guarded against cycles with a visited set (spec.md §9: "the
    /// reference implementation's textual dump recurses without cycle
    /// protection ... implementations must guard with a visited set").
    pub fn debug_dump(&self) -> String
    where
        T: std::fmt::Debug,
    {
        let mut out = String::new();
        let mut visited = HashSet::new();
        self.dump_into(&mut out, &mut visited);
        out
    }

    fn dump_into(&self, out: &mut String, visited: &mut HashSet<MatchId>)
    where
        T: std::fmt::Debug,
    {
        use std::fmt::Write;
        if !visited.insert(self.id) {
            let _ = write!(out, "#{}(seen)", self.id);
            return;
        }
        let state = self.state();
        let _ = write!(out, "#{}[{}]{{", self.id, state.valid_end);
        for (i, (label, target)) in state.next.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{label:?}->");
            self.with_id(*target).dump_into(out, visited);
        }
        out.push('}');
    }
}

/// `nullFrom`: epsilon-closure of `start`, sorted ascending. A state
/// with exactly one outgoing edge that is itself an epsilon edge is
/// elided from the result (but still traversed through).
fn null_from<T>(nfa: &Nfa<T>, start: usize) -> Vec<usize> {
    let mut result = BTreeSet::new();
    let mut scanned = HashSet::new();
    scan(nfa, start, &mut result, &mut scanned);
    result.into_iter().collect()
}

fn scan<T>(nfa: &Nfa<T>, state: usize, result: &mut BTreeSet<usize>, scanned: &mut HashSet<usize>) {
    if !scanned.insert(state) {
        return;
    }
    let edges = &nfa.states[state];
    let is_single_epsilon = edges.len() == 1 && edges[0].label.is_none();
    if !is_single_epsilon {
        result.insert(state);
    }
    for edge in edges {
        if edge.label.is_none() {
            scan(nfa, edge.target, result, scanned);
        }
    }
}

struct Builder<'n, T: NodeType> {
    nfa: &'n Nfa<T>,
    states: Vec<MatchState<T>>,
    memo: HashMap<Vec<usize>, MatchId>,
}

impl<'n, T: NodeType> Builder<'n, T> {
    /// Walks `state`'s own edges in order, recording each labeled edge's
    /// target under its label. An epsilon edge recurses immediately into
    /// its target's edges instead of being skipped, so that target's
    /// labels are gathered right where the epsilon edge sits rather than
    /// only after every other member of the enclosing state set.
    fn gather_labels(
        &self,
        state: usize,
        grouped: &mut IndexMap<T, Vec<usize>>,
        gathered: &mut HashSet<usize>,
    ) {
        if !gathered.insert(state) {
            return;
        }
        for edge in &self.nfa.states[state] {
            match &edge.label {
                Some(label) => grouped.entry(label.clone()).or_default().push(edge.target),
                None => self.gather_labels(edge.target, grouped, gathered),
            }
        }
    }

    fn explore(&mut self, state_set: Vec<usize>) -> MatchId {
        if let Some(&id) = self.memo.get(&state_set) {
            return id;
        }

        // Reserve the id before recursing so a cycle back to this same
        // state set finds the in-progress entry instead of re-exploring.
        let id = self.states.len();
        self.states.push(MatchState {
            valid_end: false,
            next: Vec::new(),
            wrap_cache: RefCell::new(Vec::new()),
        });
        self.memo.insert(state_set.clone(), id);

        let valid_end = state_set.contains(&self.nfa.accept);

        // Ordered, duplicate-free (label -> target NFA states), first
        // occurrence of each label wins its position. An epsilon edge is
        // expanded in place — at the position it occupies in its state's
        // own edge list — rather than after every state's direct labeled
        // edges, so a skip-edge's target (reached "for free") is still
        // seen before a sibling edge that sits later in the same state,
        // even when subset construction gave that target a higher state
        // id (e.g. `x? y`: the skip edge must surface `y` before the
        // sibling edge that materializes `x`).
        let mut grouped: IndexMap<T, Vec<usize>> = IndexMap::new();
        let mut gathered = HashSet::new();
        for &s in &state_set {
            self.gather_labels(s, &mut grouped, &mut gathered);
        }

        let mut next = Vec::with_capacity(grouped.len());
        for (label, targets) in grouped {
            let mut closure = BTreeSet::new();
            for target in targets {
                closure.extend(null_from(self.nfa, target));
            }
            let target_id = self.explore(closure.into_iter().collect());
            next.push((label, target_id));
        }

        self.states[id].valid_end = valid_end;
        self.states[id].next = next;
        id
    }
}

/// Determinize `nfa`, returning the schema's entry `Match` —
/// `explore(null_from(nfa.entry))`.
pub(crate) fn build<T: NodeType>(nfa: &Nfa<T>) -> Match<T> {
    let mut builder = Builder {
        nfa,
        states: Vec::new(),
        memo: HashMap::new(),
    };
    let root_set = null_from(nfa, nfa.entry);
    let root_id = builder.explore(root_set);
    Match {
        graph: Rc::new(Graph {
            states: builder.states,
        }),
        id: root_id,
    }
}
