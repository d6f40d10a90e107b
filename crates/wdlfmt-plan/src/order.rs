//! Canonical ordering of a body graph.
//!
//! Implements a lexicographic variant of Kahn's algorithm: the frontier of
//! zero-in-degree nodes is kept as an ordered set keyed by tie-break key,
//! and the minimum is extracted repeatedly. For a fixed input the produced
//! order is exactly reproducible.
//!
//! The traversal works on its own in-degree table and frontier; the graph
//! itself is never mutated, so each [`dependency_order`] call derives a
//! fresh traversal from the same graph.

use std::collections::{BTreeSet, HashSet};

use tracing::trace;

use wdlfmt_ast::{BodyNode, NodeId};

use crate::error::{Error, Result};
use crate::graph::{BodyGraph, SortKey, HEAD};

/// Starts a canonical traversal of one scope's graph.
///
/// The returned iterator yields the scope's defined elements in
/// dependency order: an element appears strictly after everything it
/// depends on, with ties broken by `(kind rank, insertion index)`.
/// Identities that were only ever referenced as dependencies and never
/// defined are pruned up front: they are not yielded and their edges do
/// not block progress.
///
/// The iterator is single-pass and fuses after the first error.
pub fn dependency_order(graph: &BodyGraph) -> DependencyOrder<'_> {
    let slots = graph.slots();

    // Prune dangling placeholders: edges out of an undefined slot do not
    // count toward in-degrees, and the slot never enters the frontier.
    let mut in_degree = vec![0usize; slots.len()];
    let mut remaining = 0usize;
    for (idx, slot) in slots.iter().enumerate() {
        if idx != HEAD {
            if !slot.is_defined() {
                continue;
            }
            remaining += 1;
        }
        for &dependent in slot.dependents() {
            in_degree[dependent] += 1;
        }
    }

    let mut frontier = BTreeSet::new();
    frontier.insert((slots[HEAD].key(), HEAD));
    for (idx, slot) in slots.iter().enumerate() {
        // An element whose dependencies were all dangling starts free.
        if idx != HEAD && slot.is_defined() && in_degree[idx] == 0 {
            frontier.insert((slot.key(), idx));
        }
    }

    DependencyOrder {
        graph,
        in_degree,
        frontier,
        remaining,
        state: State::Start,
    }
}

#[derive(Debug)]
enum State {
    /// Entry node not yet consumed.
    Start,
    /// Emitting elements.
    Running,
    /// Exhausted or errored.
    Done,
}

/// Single-pass canonical order over one scope.
///
/// Created by [`dependency_order`]. Yields `Result` items so that cycle
/// detection, which can only fire once the frontier drains early, is
/// reported at the point the traversal discovers it.
pub struct DependencyOrder<'a> {
    graph: &'a BodyGraph,
    in_degree: Vec<usize>,
    frontier: BTreeSet<(SortKey, usize)>,
    remaining: usize,
    state: State,
}

impl<'a> DependencyOrder<'a> {
    fn pop_min(&mut self) -> Option<usize> {
        self.frontier.pop_first().map(|(_, slot)| slot)
    }

    /// Removes the emitted slot's outgoing edges, freeing successors.
    fn release(&mut self, slot: usize) {
        let slots = self.graph.slots();
        for &dependent in slots[slot].dependents() {
            self.in_degree[dependent] -= 1;
            if self.in_degree[dependent] == 0 {
                self.frontier.insert((slots[dependent].key(), dependent));
            }
        }
    }

    /// Builds the cycle error for a drained frontier with elements left.
    ///
    /// Every stuck element still has an unemitted defined dependency,
    /// which is itself stuck, so walking dependencies inside the stuck
    /// set must revisit a node; that closed walk, reversed, is the
    /// reported chain.
    fn cycle_error(&self) -> Error {
        let slots = self.graph.slots();
        let mut stuck: Vec<usize> = (0..slots.len())
            .filter(|&i| i != HEAD && slots[i].is_defined() && self.in_degree[i] > 0)
            .collect();
        stuck.sort_by(|&a, &b| {
            let a = slots[a].element().map(|n| &n.id);
            let b = slots[b].element().map(|n| &n.id);
            a.cmp(&b)
        });

        let mut walk = vec![stuck[0]];
        let mut seen: HashSet<usize> = walk.iter().copied().collect();
        let mut current = stuck[0];
        loop {
            let pred = stuck
                .iter()
                .copied()
                .find(|&s| slots[s].dependents().contains(&current));
            let Some(pred) = pred else {
                // unreachable for a genuine stall; defend against it
                break;
            };
            walk.push(pred);
            if !seen.insert(pred) {
                break;
            }
            current = pred;
        }

        // Trim the walk to the closed portion and flip it so the chain
        // reads dependency-first.
        let closing = walk[walk.len() - 1];
        let start = walk.iter().position(|&s| s == closing).unwrap_or(0);
        let mut path: Vec<NodeId> = walk[start..]
            .iter()
            .filter_map(|&s| slots[s].element().map(|n| n.id.clone()))
            .collect();
        path.reverse();

        Error::Cycle { path }
    }
}

impl<'a> Iterator for DependencyOrder<'a> {
    type Item = Result<&'a BodyNode>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, State::Done) {
            return None;
        }

        if matches!(self.state, State::Start) {
            self.state = State::Running;
            match self.pop_min() {
                Some(HEAD) => self.release(HEAD),
                _ => {
                    self.state = State::Done;
                    return Some(Err(Error::Invariant(
                        "canonical order did not begin with the scope entry node".to_string(),
                    )));
                }
            }
        }

        match self.pop_min() {
            Some(slot) => {
                self.release(slot);
                self.remaining -= 1;
                match self.graph.slots()[slot].element() {
                    Some(node) => {
                        trace!(id = %node.id, "element emitted");
                        Some(Ok(node))
                    }
                    None => {
                        self.state = State::Done;
                        Some(Err(Error::Invariant(
                            "undefined node reached the ordering frontier".to_string(),
                        )))
                    }
                }
            }
            None => {
                self.state = State::Done;
                if self.remaining > 0 {
                    Some(Err(self.cycle_error()))
                } else {
                    None
                }
            }
        }
    }
}
