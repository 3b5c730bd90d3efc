//! `fill_before` (spec.md §4.8): a depth-first search over the DFA that
//! returns the shortest synthesizable fragment making `after` fit,
//! preferring the leftmost-in-source admissible completion because the
//! DFA inherits the NFA's source-textual edge order.

use std::collections::HashSet;

use crate::dfa::{Match, MatchId};
use crate::node_type::{Fragment, NodeType};

impl<T: NodeType> Match<T> {
    /// Returns a sequence of freshly synthesized nodes `F` such that,
    /// concatenated in front of `after.child_type(start_index..)`, the
    /// combined sequence is accepted by this state — and, if `to_end`,
    /// the final state reached is `valid_end`. `None` if no such `F`
    /// exists.
    pub fn fill_before(
        &self,
        after: &(impl Fragment<T> + ?Sized),
        to_end: bool,
        start_index: usize,
    ) -> Option<Vec<T::Node>> {
        let mut seen = HashSet::new();
        seen.insert(self.id);
        let mut types: Vec<T> = Vec::new();
        self.search(after, start_index, to_end, &mut types, &mut seen)
    }

    /// `fill_before` with `start_index = 0`.
    pub fn fill_before_all(
        &self,
        after: &(impl Fragment<T> + ?Sized),
        to_end: bool,
    ) -> Option<Vec<T::Node>> {
        self.fill_before(after, to_end, 0)
    }

    fn search(
        &self,
        after: &(impl Fragment<T> + ?Sized),
        start_index: usize,
        to_end: bool,
        types: &mut Vec<T>,
        seen: &mut HashSet<MatchId>,
    ) -> Option<Vec<T::Node>> {
        if let Some(result) = self.match_fragment(after, start_index, after.child_count()) {
            if !to_end || result.valid_end() {
                return Some(materialize(types));
            }
        }

        for i in 0..self.edge_count() {
            let (t, next) = self.edge(i);
            if t.is_text() || t.has_required_attrs() || seen.contains(&next.id) {
                continue;
            }
            seen.insert(next.id);
            types.push(t);
            if let Some(result) = next.search(after, start_index, to_end, types, seen) {
                return Some(result);
            }
            types.pop();
        }

        None
    }
}

fn materialize<T: NodeType>(types: &[T]) -> Vec<T::Node> {
    types.iter().filter_map(|t| t.create_and_fill()).collect()
}
