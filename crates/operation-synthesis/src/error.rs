use graphql_schema_model::{OperationKind, SchemaShapeError};

/// Errors returned by synthesis.
///
/// Synthesis is a pure computation with no partial-success notion, so all of
/// these are returned eagerly. Depth-limit truncation is deliberately not an
/// error: it is reported on the synthesized document instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The schema does not expose this operation for this object type. The
    /// caller should disable the corresponding action rather than retry.
    #[error("{object_type} does not support the {kind} operation")]
    OperationNotSupported {
        object_type: String,
        kind: OperationKind,
    },

    /// The selection references a field the operation's return type does not
    /// have. Selections are never silently narrowed.
    #[error("{object_type} has no field named {field}")]
    FieldNotFound { object_type: String, field: String },

    /// A value was supplied for an argument the root field does not declare.
    #[error("root field {root_field} does not declare an argument named {name}")]
    UnknownArgument { root_field: String, name: String },

    /// The object type is not part of the schema model.
    #[error("unknown object type {0}")]
    UnknownObjectType(String),

    /// Relationship expansion dropped every selected field, which would leave
    /// an empty selection set.
    #[error("the selection for {object_type} is empty after relationship expansion")]
    EmptySelection { object_type: String },

    /// A document holds either queries or mutations, never both.
    #[error("cannot batch queries and mutations into one document")]
    MixedOperationTypes,

    #[error("cannot synthesize an empty batch")]
    EmptyBatch,

    #[error(transparent)]
    SchemaShape(#[from] SchemaShapeError),
}
