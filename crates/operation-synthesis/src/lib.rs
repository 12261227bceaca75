//! Synthesis of GraphQL operation documents from a schema model.
//!
//! Every read or write of a platform object goes through a document built
//! here: given an immutable [`SchemaModel`] and a [`SynthesisRequest`], the
//! crate assembles an operation tree (selection, arguments, variable
//! definitions), serializes it and returns the text together with the
//! variable bindings as an [`OperationDocument`].
//!
//! Synthesis is pure and synchronous. The transport that sends the document
//! and whatever caching sits in front of it are the caller's business.
//!
//! Relationship fields expand recursively into the selection, but only up to
//! a configurable depth limit: content types routinely reference themselves,
//! and a bounded expansion that drops the too-deep branch beats an unbounded
//! one. Dropped branches are reported on the document, not thrown.

mod document;
mod error;
mod render;
mod request;

pub use document::OperationDocument;
pub use error::Error;
pub use request::{SynthesisOptions, SynthesisRequest, DEFAULT_DEPTH_LIMIT};

use document::{ArgumentNode, FieldNode, OperationNode, OperationType, VariableDefinition};
use graphql_schema_model::{FieldType, NormalizedField, OperationEntry, OperationKind, SchemaModel};
use heck::ToSnakeCase;
use itertools::Itertools;
use render::render;
use serde_json::{Map, Value};

/// Synthesize a single operation document.
pub fn synthesize(
    model: &SchemaModel,
    request: &SynthesisRequest,
    options: &SynthesisOptions,
) -> Result<OperationDocument, Error> {
    let mut ctx = SynthesisContext::new(model, options);
    let root = ctx.root_field(request, None)?;

    Ok(ctx.finish(operation_type_of(request.kind), vec![root]))
}

/// Combine several requests into one aliased document.
///
/// All requests must be of the same attachment, queries or mutations. Alias
/// and variable names are pure functions of each request's operation kind,
/// object type and position, so the same logical batch always produces the
/// same document and responses correlate back to requests positionally.
pub fn synthesize_batch(
    model: &SchemaModel,
    requests: &[SynthesisRequest],
    options: &SynthesisOptions,
) -> Result<OperationDocument, Error> {
    let Some(first) = requests.first() else {
        return Err(Error::EmptyBatch);
    };

    let ty = operation_type_of(first.kind);
    if requests.iter().any(|request| operation_type_of(request.kind) != ty) {
        return Err(Error::MixedOperationTypes);
    }

    let mut ctx = SynthesisContext::new(model, options);
    let mut selection_set = Vec::with_capacity(requests.len());
    for (index, request) in requests.iter().enumerate() {
        selection_set.push(ctx.root_field(request, Some(index))?);
    }

    Ok(ctx.finish(ty, selection_set))
}

fn operation_type_of(kind: OperationKind) -> OperationType {
    if kind.is_mutation() {
        OperationType::Mutation
    } else {
        OperationType::Query
    }
}

fn batch_alias(kind: OperationKind, object_type: &str, index: usize) -> String {
    format!("{kind}_{}_{index}", object_type.to_snake_case())
}

struct SynthesisContext<'a> {
    model: &'a SchemaModel,
    options: &'a SynthesisOptions,
    variable_definitions: Vec<VariableDefinition>,
    variables: Map<String, Value>,
    truncated: Vec<String>,
}

impl<'a> SynthesisContext<'a> {
    fn new(model: &'a SchemaModel, options: &'a SynthesisOptions) -> Self {
        SynthesisContext {
            model,
            options,
            variable_definitions: Vec::new(),
            variables: Map::new(),
            truncated: Vec::new(),
        }
    }

    fn root_field(&mut self, request: &SynthesisRequest, batch_index: Option<usize>) -> Result<FieldNode, Error> {
        let model = self.model;

        let Some(object_type) = model.object_type(&request.object_type) else {
            return Err(Error::UnknownObjectType(request.object_type.clone()));
        };

        let Some(entry) = object_type.operations.entry(request.kind) else {
            return Err(Error::OperationNotSupported {
                object_type: request.object_type.clone(),
                kind: request.kind,
            });
        };

        tracing::debug!(
            object_type = request.object_type.as_str(),
            kind = %request.kind,
            root_field = entry.root_field.as_str(),
            "synthesizing operation"
        );

        let suffix = batch_index.map(|index| format!("_{index}")).unwrap_or_default();

        let mut arguments = Vec::with_capacity(request.arguments.len());
        for (name, value) in request.arguments.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            let Some(declared) = entry.arguments.iter().find(|arg| arg.name == *name) else {
                return Err(Error::UnknownArgument {
                    root_field: entry.root_field.clone(),
                    name: name.clone(),
                });
            };

            let variable = format!("{name}{suffix}");
            self.variable_definitions.push(VariableDefinition {
                name: variable.clone(),
                type_display: declared.type_display.clone(),
            });
            self.variables.insert(variable.clone(), value.clone());
            arguments.push(ArgumentNode {
                name: name.clone(),
                variable,
            });
        }

        let selection_set = self.selection(entry, request)?;

        let alias = match batch_index {
            Some(index) => Some(batch_alias(request.kind, &request.object_type, index)),
            None => request.alias.clone(),
        };

        Ok(FieldNode {
            alias,
            name: entry.root_field.clone(),
            arguments,
            selection_set,
        })
    }

    fn selection(&mut self, entry: &'a OperationEntry, request: &SynthesisRequest) -> Result<Vec<FieldNode>, Error> {
        let object_type = request.object_type.as_str();

        let selected: Vec<&'a NormalizedField> = match &request.selection {
            Some(names) => names
                .iter()
                .sorted()
                .dedup()
                .map(|name| {
                    entry.returns.get(name).ok_or_else(|| Error::FieldNotFound {
                        object_type: object_type.to_owned(),
                        field: name.clone(),
                    })
                })
                .collect::<Result<_, _>>()?,
            None => entry.returns.values().collect(),
        };

        let mut selection_set = Vec::with_capacity(selected.len());
        for field in selected {
            if let Some(node) = self.expand_field(field, 0, object_type) {
                selection_set.push(node);
            }
        }

        if selection_set.is_empty() {
            return Err(Error::EmptySelection {
                object_type: object_type.to_owned(),
            });
        }

        Ok(selection_set)
    }

    /// Expand one field into a selection node. `hops` counts the relationship
    /// hops taken to reach the field's parent type. Returns `None` when the
    /// field is a relationship branch that has to be dropped.
    fn expand_field(&mut self, field: &NormalizedField, hops: usize, path: &str) -> Option<FieldNode> {
        let target = match &field.ty {
            FieldType::Scalar(_) | FieldType::Enum { .. } => return Some(FieldNode::leaf(&field.name)),
            FieldType::Relation { object_type } => object_type,
        };

        let field_path = format!("{path}.{}", field.name);

        if hops + 1 > self.options.depth_limit {
            self.truncated.push(field_path);
            return None;
        }

        let Some(target) = self.model.object_type(target) else {
            tracing::debug!(path = field_path.as_str(), "relationship target is not in the model, dropping");
            self.truncated.push(field_path);
            return None;
        };

        let fields: Vec<&NormalizedField> = target.fields.values().collect();
        let mut selection_set = Vec::with_capacity(fields.len());
        for nested in fields {
            if let Some(node) = self.expand_field(nested, hops + 1, &field_path) {
                selection_set.push(node);
            }
        }

        // An empty body is not renderable; the branch goes the same way as a
        // too-deep one.
        if selection_set.is_empty() {
            self.truncated.push(field_path);
            return None;
        }

        Some(FieldNode {
            alias: None,
            name: field.name.clone(),
            arguments: Vec::new(),
            selection_set,
        })
    }

    fn finish(self, ty: OperationType, selection_set: Vec<FieldNode>) -> OperationDocument {
        let SynthesisContext {
            variable_definitions,
            variables,
            truncated,
            ..
        } = self;

        if !truncated.is_empty() {
            tracing::warn!(paths = ?truncated, "relationship expansion truncated at the depth limit");
        }

        let operation = OperationNode {
            ty,
            variable_definitions,
            selection_set,
        };

        OperationDocument {
            text: render(&operation),
            variables,
            truncated,
        }
    }
}
