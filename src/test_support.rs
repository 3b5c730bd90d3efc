//! Shared test fixture: a minimal [`NodeType`] implementation used by
//! every module's unit tests. Not part of the public API.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::dfa::Match;
use crate::node_type::NodeType;

#[derive(Clone)]
pub(crate) struct TestType {
    name: Rc<str>,
    groups: Rc<[String]>,
    inline: bool,
    leaf: bool,
    text: bool,
    required_attrs: bool,
    content: Rc<RefCell<Option<Match<TestType>>>>,
}

impl TestType {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: Rc::from(name),
            groups: Rc::from(Vec::<String>::new()),
            inline: false,
            leaf: false,
            text: false,
            required_attrs: false,
            content: Rc::new(RefCell::new(None)),
        }
    }

    pub(crate) fn with_groups(mut self, groups: impl IntoIterator<Item = String>) -> Self {
        self.groups = groups.into_iter().collect::<Vec<_>>().into();
        self
    }

    pub(crate) fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub(crate) fn leaf(mut self) -> Self {
        self.leaf = true;
        self
    }

    pub(crate) fn text(mut self) -> Self {
        self.text = true;
        self.leaf = true;
        self
    }

    pub(crate) fn required_attrs(mut self) -> Self {
        self.required_attrs = true;
        self
    }

    pub(crate) fn set_content_match(&self, m: Match<TestType>) {
        *self.content.borrow_mut() = Some(m);
    }
}

impl PartialEq for TestType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for TestType {}

impl std::hash::Hash for TestType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Debug for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TestType({})", self.name)
    }
}

impl NodeType for TestType {
    type Node = ();

    fn name(&self) -> &str {
        &self.name
    }

    fn groups(&self) -> &[String] {
        &self.groups
    }

    fn is_text(&self) -> bool {
        self.text
    }

    fn is_leaf(&self) -> bool {
        self.leaf
    }

    fn is_inline(&self) -> bool {
        self.inline
    }

    fn has_required_attrs(&self) -> bool {
        self.required_attrs
    }

    fn content_match(&self) -> Match<Self> {
        self.content
            .borrow()
            .clone()
            .expect("content_match used before set_content_match")
    }

    fn create_and_fill(&self) -> Option<()> {
        if self.required_attrs { None } else { Some(()) }
    }
}

/// Build a flat node-type table (no groups) from a list of names, in
/// the given order — convenient for tests that don't care about groups.
pub(crate) fn node_type_map(names: &[&str]) -> IndexMap<String, TestType> {
    names
        .iter()
        .map(|n| (n.to_string(), TestType::new(n)))
        .collect()
}
