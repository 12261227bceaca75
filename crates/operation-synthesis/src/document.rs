//! The synthesized document and the tree it is rendered from.
//!
//! Construction and rendering are deliberately separate steps: an operation
//! is assembled as an explicit tree of nodes first, and only then serialized
//! to text, so the shape can be inspected and tested without parsing.

use serde_json::{Map, Value};

/// A ready-to-send operation: the document text and the variables to send
/// alongside it.
///
/// Constructed fresh per synthesis call and never mutated. Callers that want
/// caching key it on the request themselves.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OperationDocument {
    pub text: String,
    pub variables: Map<String, Value>,
    /// Dotted field paths of relationship branches dropped by the expansion
    /// depth limit. Empty in the common case.
    pub truncated: Vec<String>,
}

/// Root node of a document under construction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OperationNode {
    pub(crate) ty: OperationType,
    pub(crate) variable_definitions: Vec<VariableDefinition>,
    pub(crate) selection_set: Vec<FieldNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperationType {
    Query,
    Mutation,
}

impl OperationType {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
        }
    }
}

/// One `$name: Type` entry of the operation's variable definition list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VariableDefinition {
    pub(crate) name: String,
    pub(crate) type_display: String,
}

/// One field selection, possibly aliased, with its arguments and nested
/// selection set.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldNode {
    pub(crate) alias: Option<String>,
    pub(crate) name: String,
    pub(crate) arguments: Vec<ArgumentNode>,
    pub(crate) selection_set: Vec<FieldNode>,
}

impl FieldNode {
    pub(crate) fn leaf(name: impl Into<String>) -> Self {
        FieldNode {
            alias: None,
            name: name.into(),
            arguments: Vec::new(),
            selection_set: Vec::new(),
        }
    }
}

/// An argument bound to a variable reference. Synthesized documents never
/// inline literal values: everything user-supplied travels as a variable.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ArgumentNode {
    pub(crate) name: String,
    pub(crate) variable: String,
}
