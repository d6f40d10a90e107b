// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Data model for the wdlfmt body ordering engine
//!
//! This crate contains the workflow body element descriptors consumed by
//! the ordering engine and the render plan tree it hands to the text
//! renderer. Pure data, no algorithms.

pub mod element;
pub mod plan;

// Re-export commonly used types
pub use element::{BodyNode, ElementData, ElementKind, NodeId};
pub use plan::{RenderItem, RenderPlan};
