//! `find_wrapping` (spec.md §4.9): breadth-first search over wrapper-
//! admitting node types, producing the shortest chain of wrapper types
//! that would let `target` appear at this position. Results are
//! memoized per target in `wrap_cache` via linear scan (spec.md §9:
//! small N, most entries never touched, branch-predictable beats
//! hashing).

use std::collections::HashSet;
use std::rc::Rc;

use crate::dfa::Match;
use crate::node_type::NodeType;

struct Candidate<T: NodeType> {
    state: Match<T>,
    via: Option<usize>,
    wrap_type: Option<T>,
}

impl<T: NodeType> Match<T> {
    /// Shortest chain of wrapper node types `[W1, .., Wk]` such that
    /// `target` fits inside a freshly created `Wk` inside ... inside
    /// `W1`, and `W1` fits at this position. `k == 0` means `target`
    /// fits directly. `None` if no wrapping exists.
    pub fn find_wrapping(&self, target: &T) -> Option<Vec<T>> {
        {
            let cache = self.state().wrap_cache.borrow();
            if let Some((_, cached)) = cache.iter().find(|(t, _)| t == target) {
                return cached.as_ref().map(|chain| chain.to_vec());
            }
        }

        let result = self.find_wrapping_uncached(target);
        let cached = result.clone().map(|chain| Rc::from(chain.into_boxed_slice()));
        self.state()
            .wrap_cache
            .borrow_mut()
            .push((target.clone(), cached));
        result
    }

    fn find_wrapping_uncached(&self, target: &T) -> Option<Vec<T>> {
        let mut explored: Vec<Candidate<T>> = vec![Candidate {
            state: self.clone(),
            via: None,
            wrap_type: None,
        }];
        let mut visited_names: HashSet<String> = HashSet::new();
        let mut i = 0;

        while i < explored.len() {
            let idx = i;
            i += 1;

            if explored[idx].state.match_type(target).is_some() {
                let mut chain = Vec::new();
                let mut cur = idx;
                loop {
                    if let Some(t) = explored[cur].wrap_type.clone() {
                        chain.push(t);
                    }
                    match explored[cur].via {
                        Some(parent) => cur = parent,
                        None => break,
                    }
                }
                chain.reverse();
                return Some(chain);
            }

            let is_seed = idx == 0;
            let current_state = explored[idx].state.clone();
            for j in 0..current_state.edge_count() {
                let (wrap_type, next_state) = current_state.edge(j);
                if wrap_type.is_leaf() || wrap_type.has_required_attrs() {
                    continue;
                }
                if visited_names.contains(wrap_type.name()) {
                    continue;
                }
                if !is_seed && !next_state.valid_end() {
                    continue;
                }
                visited_names.insert(wrap_type.name().to_string());
                explored.push(Candidate {
                    state: wrap_type.content_match(),
                    via: Some(idx),
                    wrap_type: Some(wrap_type),
                });
            }
        }

        None
    }
}
