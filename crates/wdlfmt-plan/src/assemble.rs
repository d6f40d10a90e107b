//! Recursive assembly of ordered scopes into a render plan.
//!
//! This is the top of the ordering engine: one scope goes through graph
//! construction and canonical ordering, consecutive declarations collapse
//! into a single batch for compact rendering, and section elements recurse
//! into their bodies so the plan tree mirrors the document's nesting.

use tracing::debug;

use wdlfmt_ast::{BodyNode, ElementData, RenderItem, RenderPlan};

use crate::error::Result;
use crate::graph::BodyGraph;
use crate::order::dependency_order;

/// Assembles one scope of body elements into a render plan.
///
/// Each conditional or scatter body is assembled through its own
/// independent graph, exactly as if it were a top-level scope.
///
/// # Errors
///
/// Construction and ordering errors ([`crate::Error`]) propagate
/// unchanged from any nesting level.
pub fn assemble(elements: &[BodyNode]) -> Result<RenderPlan> {
    debug!(elements = elements.len(), "assembling scope");

    let graph = BodyGraph::build(elements.iter().cloned())?;

    let mut items = Vec::new();
    let mut decls: Vec<BodyNode> = Vec::new();

    for node in dependency_order(&graph) {
        let node = node?;
        match &node.data {
            ElementData::Decl { .. } => decls.push(node.clone()),
            ElementData::Call { .. } => {
                flush_decls(&mut items, &mut decls);
                items.push(RenderItem::Call(node.clone()));
            }
            ElementData::Conditional { body, .. } | ElementData::Scatter { body, .. } => {
                flush_decls(&mut items, &mut decls);
                let nested = assemble(body)?;
                items.push(RenderItem::Section {
                    node: node.clone(),
                    body: nested,
                });
            }
        }
    }
    flush_decls(&mut items, &mut decls);

    Ok(RenderPlan { items })
}

/// Closes the open declaration batch, if any.
fn flush_decls(items: &mut Vec<RenderItem>, decls: &mut Vec<BodyNode>) {
    if !decls.is_empty() {
        items.push(RenderItem::Decls(std::mem::take(decls)));
    }
}
