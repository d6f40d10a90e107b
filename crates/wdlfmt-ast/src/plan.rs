//! Render plan handed to the text renderer.
//!
//! The ordering engine flattens each scope into an ordered list of render
//! items. Nested sections carry their own independently ordered plans, so
//! the tree mirrors the document's nesting exactly. Turning the plan into
//! text (indentation, keywords, expression layout) is the renderer's job.

use serde::{Deserialize, Serialize};

use crate::element::BodyNode;

/// Ordered render instructions for one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Items in canonical order.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Number of items in this scope's plan (nested plans not counted).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One render instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderItem {
    /// A run of consecutive declarations, rendered as one compact block.
    Decls(Vec<BodyNode>),
    /// A single call.
    Call(BodyNode),
    /// A nested section: the section node (for its header) and the plan
    /// for its body.
    Section {
        /// The conditional or scatter element itself.
        node: BodyNode,
        /// Independently ordered plan for the section's body.
        body: RenderPlan,
    },
}
