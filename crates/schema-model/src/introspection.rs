//! Serde data model for the platform's schema introspection response.
//!
//! This mirrors the `__schema` portion of the standard introspection query.
//! Nothing here fetches anything: the caller runs the introspection query
//! against the platform, deserializes the response into [`Introspection`] and
//! hands it to the model builder. Fetching, caching and schema versioning stay
//! on the caller's side.

use serde::Deserialize;

/// The `__schema` object of an introspection response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Introspection {
    pub query_type: Option<RootTypeRef>,
    #[serde(default)]
    pub mutation_type: Option<RootTypeRef>,
    pub types: Vec<TypeDef>,
}

impl Introspection {
    /// Look up a named type definition.
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|def| def.name.as_deref() == Some(name))
    }
}

/// Reference to a root operation type, e.g. `queryType { name }`.
#[derive(Debug, Clone, Deserialize)]
pub struct RootTypeRef {
    pub name: String,
}

/// Kind discriminator reported by introspection for type definitions and type
/// references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    /// Kinds this crate does not know about. Kept as data so the builder can
    /// report them with context instead of failing at the serde layer.
    #[serde(other)]
    Unknown,
}

/// One named type definition from the `types` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    pub kind: TypeKind,
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldDef>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValueDef>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValueDef>>,
}

/// An output field of an object or interface type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub args: Vec<InputValueDef>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// An argument of a field, or a field of an input object type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValueDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// One value of an enum type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueDef {
    pub name: String,
}

/// A possibly wrapped reference to a named type. `LIST` and `NON_NULL` kinds
/// nest through `ofType` down to the terminal named type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}
