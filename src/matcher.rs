//! The `Match` read API (spec.md §4.7): `match_type`, `match_fragment`,
//! `valid_end`, `default_type`, `edge_count`, `edge`, `inline_content`,
//! `compatible`. Everything here is read-only.

use crate::dfa::Match;
use crate::node_type::{Fragment, NodeType};

impl<T: NodeType> Match<T> {
    /// True iff this state is accepting.
    pub fn valid_end(&self) -> bool {
        self.state().valid_end
    }

    /// Number of outgoing transitions.
    pub fn edge_count(&self) -> usize {
        self.state().next.len()
    }

    /// The `i`-th outgoing `(type, match)` pair.
    ///
    /// # Panics
    /// Panics if `i >= self.edge_count()`.
    pub fn edge(&self, i: usize) -> (T, Match<T>) {
        let (label, target) = &self.state().next[i];
        (label.clone(), self.with_id(*target))
    }

    /// The next `Match` for the first outgoing transition labeled
    /// exactly `t`, or `None` if there is no such transition.
    pub fn match_type(&self, t: &T) -> Option<Match<T>> {
        self.state()
            .next
            .iter()
            .find(|(label, _)| label == t)
            .map(|(_, target)| self.with_id(*target))
    }

    /// Walk `match_type` over `fragment.child_type(start..end)`,
    /// returning the resulting state, or `None` if any child is
    /// rejected.
    pub fn match_fragment(
        &self,
        fragment: &(impl Fragment<T> + ?Sized),
        start: usize,
        end: usize,
    ) -> Option<Match<T>> {
        let mut cur = self.clone();
        for i in start..end {
            cur = cur.match_type(&fragment.child_type(i))?;
        }
        Some(cur)
    }

    /// `match_fragment` over the fragment's entire child sequence.
    pub fn match_fragment_all(&self, fragment: &(impl Fragment<T> + ?Sized)) -> Option<Match<T>> {
        self.match_fragment(fragment, 0, fragment.child_count())
    }

    /// True iff the first outgoing label is an inline node type. Used to
    /// ask "does this position accept inline children?".
    pub fn inline_content(&self) -> bool {
        self.state()
            .next
            .first()
            .is_some_and(|(t, _)| t.is_inline())
    }

    /// The first outgoing label that is neither a text type nor has
    /// required attributes — a "fill me in" default choice for callers
    /// that need one.
    pub fn default_type(&self) -> Option<T> {
        self.state()
            .next
            .iter()
            .find(|(t, _)| !t.is_text() && !t.has_required_attrs())
            .map(|(t, _)| t.clone())
    }

    /// True iff `self` and `other` share any outgoing label. Quadratic
    /// in edge count, which is fine since schemas have few node types
    /// per position.
    pub fn compatible(&self, other: &Match<T>) -> bool {
        self.state()
            .next
            .iter()
            .any(|(t, _)| other.state().next.iter().any(|(u, _)| t == u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dfa, nfa, parser};
    use crate::test_support::{node_type_map, TestType};

    fn build_match(source: &str, names: &[&str]) -> dfa::Match<TestType> {
        let map = node_type_map(names);
        let expr = parser::parse(source, &map).unwrap();
        let n = nfa::build(expr.as_ref());
        dfa::build(&n)
    }

    #[test]
    fn seed_1_single_choice_matches() {
        let m = build_match("(paragraph | heading)", &["paragraph", "heading"]);
        let p = TestType::new("paragraph");
        let result = m.match_type(&p).unwrap();
        assert!(result.valid_end());
    }

    #[test]
    fn seed_2_sequence_matches() {
        let m = build_match(
            "paragraph horizontal_rule paragraph",
            &["paragraph", "horizontal_rule"],
        );
        let p = TestType::new("paragraph");
        let hr = TestType::new("horizontal_rule");
        let seq = [p.clone(), hr, p];
        let result = m.match_fragment_all(&seq[..]).unwrap();
        assert!(result.valid_end());
    }

    #[test]
    fn seed_3_heading_paragraph_plus_not_yet_valid() {
        let m = build_match("heading paragraph+", &["heading", "paragraph"]);
        let heading = TestType::new("heading");
        let result = m.match_type(&heading).unwrap();
        assert!(!result.valid_end());
    }

    #[test]
    fn seed_4_hard_break_range_rejects_fifth() {
        let m = build_match("hard_break{2,4}", &["hard_break"]);
        let hb = TestType::new("hard_break");
        let seq = vec![hb.clone(), hb.clone(), hb.clone(), hb.clone(), hb];
        assert!(m.match_fragment_all(&seq).is_none());
    }

    #[test]
    fn edge_range_check_panics() {
        let m = build_match("paragraph", &["paragraph"]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| m.edge(5)));
        assert!(result.is_err());
    }

    #[test]
    fn default_type_skips_text_and_required_attrs() {
        let mut map = node_type_map(&["a"]);
        map.insert(
            "b".to_string(),
            TestType::new("b").required_attrs(),
        );
        map.insert("c".to_string(), TestType::new("c"));
        let expr = parser::parse("b | c | a", &map).unwrap();
        let n = nfa::build(expr.as_ref());
        let m = dfa::build(&n);
        let default = m.default_type().unwrap();
        assert_eq!(default.name(), "c");
    }

    #[test]
    fn compatible_shares_outgoing_label() {
        let m1 = build_match("paragraph | heading", &["paragraph", "heading", "image"]);
        let m2 = build_match("paragraph | image", &["paragraph", "heading", "image"]);
        assert!(m1.compatible(&m2));

        let m3 = build_match("image", &["paragraph", "heading", "image"]);
        let m4 = build_match("heading", &["paragraph", "heading", "image"]);
        assert!(!m3.compatible(&m4));
    }

    #[test]
    fn inline_content_reflects_first_edge() {
        let mut map = node_type_map(&["paragraph"]);
        map.insert("text".to_string(), TestType::new("text").inline().text());
        let expr = parser::parse("text*", &map).unwrap();
        let n = nfa::build(expr.as_ref());
        let m = dfa::build(&n);
        assert!(m.inline_content());
    }
}
