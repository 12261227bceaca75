use graphql_schema_model::OperationKind;
use serde_json::{Map, Value};

/// One synthesis request: which operation to perform on which object type,
/// with what selection and arguments.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub object_type: String,
    pub kind: OperationKind,
    /// Fields to select on the return type. `None` selects everything the
    /// operation exposes.
    pub selection: Option<Vec<String>>,
    /// Values for the root field's declared arguments. Each one is bound as a
    /// document variable.
    pub arguments: Map<String, Value>,
    /// Root field alias. Ignored by batching, which assigns its own
    /// deterministic aliases.
    pub alias: Option<String>,
}

impl SynthesisRequest {
    pub fn new(object_type: impl Into<String>, kind: OperationKind) -> Self {
        SynthesisRequest {
            object_type: object_type.into(),
            kind,
            selection: None,
            arguments: Map::new(),
            alias: None,
        }
    }

    pub fn with_selection(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.selection = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// How many relationship hops to expand before truncating a branch.
pub const DEFAULT_DEPTH_LIMIT: usize = 2;

/// Options for [`synthesize()`](crate::synthesize()).
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Relationship expansion depth limit. Branches past the limit are
    /// dropped from the selection, which keeps self-referential content
    /// types from expanding without bound.
    pub depth_limit: usize,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        SynthesisOptions {
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl SynthesisOptions {
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }
}
