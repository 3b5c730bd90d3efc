//! Ties the pipeline together: source string → parser → NFA builder →
//! subset construction → dead-end check → the schema's entry `Match`.

use indexmap::IndexMap;

use crate::dead_end;
use crate::dfa::{self, Match};
use crate::error::SchemaError;
use crate::nfa;
use crate::node_type::NodeType;
use crate::parser;

/// Compile a content-expression source string against a schema's node
/// types into a `Match` DFA root.
///
/// `node_types` must be keyed by each node type's own name, and its
/// iteration order is the schema iteration order the resolver uses when
/// a group identifier expands to more than one member (spec.md §4.3).
pub fn parse_pattern<T: NodeType>(
    source: &str,
    node_types: &IndexMap<String, T>,
) -> Result<Match<T>, SchemaError> {
    let expr = parser::parse(source, node_types)?;
    let automaton = nfa::build(expr.as_ref());
    let root = dfa::build(&automaton);
    dead_end::check(&root)?;
    Ok(root)
}
