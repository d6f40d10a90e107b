//! Workflow body element descriptors.
//!
//! One [`BodyNode`] describes one element of a workflow body: a value
//! declaration, a call, a conditional section, or a scatter section.
//! Elements reference each other by identity through their dependency
//! lists; section elements own their nested bodies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a body element, unique within one scope.
///
/// Identities are opaque to the ordering engine: they only need to be
/// stable and unique per scope. The document model derives them from its
/// workflow node ids.
///
/// # Examples
///
/// ```
/// # use wdlfmt_ast::NodeId;
/// let id = NodeId::from("call-align");
/// assert_eq!(id.as_str(), "call-align");
/// assert_eq!(id.to_string(), "call-align");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create an identity from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The kind of a body element, without payload.
///
/// Used for dispatch in the assembler and for the deterministic tie-break
/// order of the canonical sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A value declaration.
    Decl,
    /// A call to a task or sub-workflow.
    Call,
    /// A conditional section.
    Conditional,
    /// A scatter section.
    Scatter,
}

/// Kind-specific payload of a body element.
///
/// Expression fields are pre-rendered strings: expression formatting
/// belongs to the parser and renderer, not the ordering engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementData {
    /// A value declaration (`Float coverage = depth / total`).
    Decl {
        /// Declared type, as source text.
        ty: String,
        /// Declared name.
        name: String,
        /// Initializer expression, if any.
        expr: Option<String>,
    },
    /// A call (`call align as align_tumor`).
    Call {
        /// Name of the called task or sub-workflow.
        target: String,
        /// Alias the call is bound to, if any.
        alias: Option<String>,
    },
    /// A conditional section with its nested body (`if (do_align) { .. }`).
    Conditional {
        /// Guard expression, as source text.
        expr: String,
        /// Nested body, owned exclusively by this section.
        body: Vec<BodyNode>,
    },
    /// A scatter section with its nested body (`scatter (s in samples) { .. }`).
    Scatter {
        /// Iteration variable name.
        variable: String,
        /// Iteration source expression, as source text.
        expr: String,
        /// Nested body, owned exclusively by this section.
        body: Vec<BodyNode>,
    },
}

impl ElementData {
    /// The fieldless kind tag for this payload.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementData::Decl { .. } => ElementKind::Decl,
            ElementData::Call { .. } => ElementKind::Call,
            ElementData::Conditional { .. } => ElementKind::Conditional,
            ElementData::Scatter { .. } => ElementKind::Scatter,
        }
    }
}

/// One element of a workflow body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyNode {
    /// Identity of this element, unique within its scope.
    pub id: NodeId,
    /// Identities this element must appear after. Empty means the element
    /// depends only on scope entry.
    pub dependencies: Vec<NodeId>,
    /// Kind-specific payload; sections own their nested bodies here.
    pub data: ElementData,
}

impl BodyNode {
    /// Create a body element.
    pub fn new(id: impl Into<NodeId>, dependencies: Vec<NodeId>, data: ElementData) -> Self {
        Self {
            id: id.into(),
            dependencies,
            data,
        }
    }

    /// The element's kind tag.
    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }
}
