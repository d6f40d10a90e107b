//! Dependency graph over one scope of a workflow body.
//!
//! # Graph Construction Rules
//!
//! 1. **Synthetic entry** - slot 0 is the entry node; elements with no
//!    dependencies are anchored to it, so every defined element has at
//!    least one incoming edge.
//! 2. **Interning** - an identity gets a slot the first time it is seen,
//!    whether as a dependency reference or as a full definition. A
//!    dependency may name an element that is defined later in the input.
//! 3. **Define once** - a slot's definition is set exactly once; a second
//!    full definition for the same identity is a duplicate error.
//! 4. **Tie-break keys** - every defined node carries `(kind rank,
//!    insertion index)`. The index is the slot number allocated at first
//!    sight, so a node's key does not depend on whether the reference or
//!    the definition arrived first.
//!
//! Cycle detection is not construction's job: a cycle can only be
//! confirmed once the full edge set is known, so it is reported by the
//! ordering pass in [`crate::order`].

use indexmap::IndexMap;
use tracing::debug;

use wdlfmt_ast::{BodyNode, ElementKind, NodeId};

use crate::error::{Error, Result};

/// Slot index of the synthetic entry node.
pub(crate) const HEAD: usize = 0;

/// Deterministic tie-break key: `(kind rank, insertion index)`.
///
/// The entry node holds the reserved key `(0, 0)`; real insertion indices
/// start at 1, so the entry node sorts strictly before every real node.
pub(crate) type SortKey = (u8, usize);

/// Fixed rank of each element kind in the tie-break order.
fn kind_rank(kind: ElementKind) -> u8 {
    match kind {
        ElementKind::Decl => 0,
        ElementKind::Call => 1,
        ElementKind::Conditional => 2,
        ElementKind::Scatter => 3,
    }
}

/// One slot in the graph arena.
#[derive(Debug)]
pub(crate) struct Slot {
    /// Insertion index, allocated when the identity was first seen.
    index: usize,
    /// Full definition, present once the element itself is registered.
    /// `None` marks a placeholder that has only been referenced as a
    /// dependency so far.
    element: Option<BodyNode>,
    /// Outgoing edges: slots that must appear after this one.
    dependents: Vec<usize>,
}

impl Slot {
    fn placeholder(index: usize) -> Self {
        Self {
            index,
            element: None,
            dependents: Vec::new(),
        }
    }

    pub(crate) fn element(&self) -> Option<&BodyNode> {
        self.element.as_ref()
    }

    pub(crate) fn dependents(&self) -> &[usize] {
        &self.dependents
    }

    pub(crate) fn is_defined(&self) -> bool {
        self.element.is_some()
    }

    /// Tie-break key. Only meaningful for the entry node and for defined
    /// slots; placeholders are pruned before ordering.
    pub(crate) fn key(&self) -> SortKey {
        match &self.element {
            Some(node) => (kind_rank(node.kind()), self.index),
            None => (0, self.index),
        }
    }
}

/// Dependency graph for one scope, rooted at a synthetic entry node.
///
/// Built fresh per scope (top-level body or any section body), queried for
/// one ordering, then discarded. Nested section bodies are processed
/// through entirely independent graphs.
#[derive(Debug)]
pub struct BodyGraph {
    slots: Vec<Slot>,
    ids: IndexMap<NodeId, usize>,
}

impl BodyGraph {
    /// Builds the dependency graph for one scope.
    ///
    /// Input order carries no semantic weight beyond seeding the
    /// insertion indices used for tie-breaking.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateNode`] when an identity receives a second full
    /// definition. Dependency references to identities that never receive
    /// a definition are legal here; the ordering pass prunes them.
    pub fn build(elements: impl IntoIterator<Item = BodyNode>) -> Result<Self> {
        let mut graph = Self {
            slots: vec![Slot::placeholder(HEAD)],
            ids: IndexMap::new(),
        };

        let mut count = 0usize;
        for element in elements {
            graph.insert(element)?;
            count += 1;
        }

        debug!(
            elements = count,
            interned = graph.slots.len() - 1,
            "body graph built"
        );
        Ok(graph)
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Registers one full definition and its dependency edges.
    fn insert(&mut self, element: BodyNode) -> Result<()> {
        let slot = self.intern(element.id.clone());
        if self.slots[slot].is_defined() {
            return Err(Error::DuplicateNode(element.id));
        }

        if element.dependencies.is_empty() {
            self.slots[HEAD].dependents.push(slot);
        } else {
            for dep in &element.dependencies {
                let source = self.intern(dep.clone());
                self.slots[source].dependents.push(slot);
            }
        }

        self.slots[slot].element = Some(element);
        Ok(())
    }

    /// Returns the slot for an identity, allocating one on first sight.
    fn intern(&mut self, id: NodeId) -> usize {
        if let Some(&slot) = self.ids.get(&id) {
            return slot;
        }
        let slot = self.slots.len();
        self.slots.push(Slot::placeholder(slot));
        self.ids.insert(id, slot);
        slot
    }
}
