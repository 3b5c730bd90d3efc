//! Dead-end checker (spec.md §4.6): rejects expressions in which some
//! required position accepts only non-generatable node types.

use std::collections::{HashSet, VecDeque};

use crate::dfa::Match;
use crate::error::DeadEndError;
use crate::node_type::NodeType;

/// Breadth-first over reachable `Match` states from `root`. A state is
/// a dead end when it is not `valid_end` and every outgoing label is
/// either a text type or has required attributes (so `create_and_fill`
/// could never synthesize past it).
pub(crate) fn check<T: NodeType>(root: &Match<T>) -> Result<(), DeadEndError> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(root.id);
    queue.push_back(root.clone());

    while let Some(m) = queue.pop_front() {
        if !m.valid_end() {
            let non_generatable: Vec<String> = (0..m.edge_count())
                .map(|i| m.edge(i).0)
                .filter(|t| t.is_text() || t.has_required_attrs())
                .map(|t| t.name().to_string())
                .collect();
            if non_generatable.len() == m.edge_count() {
                return Err(DeadEndError {
                    names: non_generatable,
                });
            }
        }

        for i in 0..m.edge_count() {
            let (_, next) = m.edge(i);
            if visited.insert(next.id) {
                queue.push_back(next);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{nfa, parser};
    use crate::test_support::{node_type_map, TestType};
    use indexmap::IndexMap;

    #[test]
    fn accepts_expression_with_generatable_required_position() {
        let map = node_type_map(&["heading", "paragraph"]);
        let expr = parser::parse("heading paragraph+", &map).unwrap();
        let n = nfa::build(expr.as_ref());
        let m = crate::dfa::build(&n);
        assert!(check(&m).is_ok());
    }

    #[test]
    fn star_of_only_text_is_fine_because_zero_is_allowed() {
        let mut map: IndexMap<String, TestType> = IndexMap::new();
        map.insert("text".to_string(), TestType::new("text").text());
        let expr = parser::parse("text*", &map).unwrap();
        let n = nfa::build(expr.as_ref());
        let m = crate::dfa::build(&n);
        assert!(check(&m).is_ok());
    }

    #[test]
    fn seed_8_required_text_only_position_is_a_dead_end() {
        let mut map: IndexMap<String, TestType> = IndexMap::new();
        map.insert("text".to_string(), TestType::new("text").text());
        let expr = parser::parse("text+", &map).unwrap();
        let n = nfa::build(expr.as_ref());
        let m = crate::dfa::build(&n);
        let err = check(&m).unwrap_err();
        assert_eq!(err.offending_names(), &["text".to_string()]);
    }

    #[test]
    fn required_attrs_only_position_is_a_dead_end() {
        let mut map: IndexMap<String, TestType> = IndexMap::new();
        map.insert(
            "figure".to_string(),
            TestType::new("figure").required_attrs(),
        );
        let expr = parser::parse("figure", &map).unwrap();
        let n = nfa::build(expr.as_ref());
        let m = crate::dfa::build(&n);
        let err = check(&m).unwrap_err();
        assert_eq!(err.offending_names(), &["figure".to_string()]);
    }

    #[test]
    fn mixed_generatable_and_non_generatable_position_is_fine() {
        let mut map: IndexMap<String, TestType> = IndexMap::new();
        map.insert("text".to_string(), TestType::new("text").text());
        map.insert("paragraph".to_string(), TestType::new("paragraph"));
        let expr = parser::parse("(text | paragraph)+", &map).unwrap();
        let n = nfa::build(expr.as_ref());
        let m = crate::dfa::build(&n);
        assert!(check(&m).is_ok());
    }
}
