use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    introspection::{Introspection, TypeDef, TypeKind, TypeRef},
    wrapping::{unwrap_type_ref, Wrapping},
    ScalarMappings, ScalarType, SchemaShapeError,
};

/// One field of an object type after normalization.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NormalizedField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub wrapping: Wrapping,
}

impl NormalizedField {
    pub fn is_list(&self) -> bool {
        self.wrapping.is_list()
    }

    pub fn is_required(&self) -> bool {
        self.wrapping.is_required()
    }
}

/// Semantic type of a normalized field: scalars carry their semantic tag,
/// enums their allowed values, relationships the name of the type they point
/// at.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum FieldType {
    Scalar(ScalarType),
    Enum { values: Vec<String> },
    Relation { object_type: String },
}

impl FieldType {
    pub fn is_relation(&self) -> bool {
        matches!(self, FieldType::Relation { .. })
    }
}

/// Build the normalized field map of an object, interface or input object
/// type, keyed and sorted by field name.
///
/// Every field reachable from the raw definition maps to exactly one
/// [`NormalizedField`]. Unrecognized scalar names degrade to the generic
/// `String` tag; malformed wrapper chains are an error.
pub fn build_field_type_map(
    type_def: &TypeDef,
    introspection: &Introspection,
    scalars: &ScalarMappings,
) -> Result<IndexMap<String, NormalizedField>, SchemaShapeError> {
    let type_name = type_def.name.as_deref().unwrap_or("<unnamed>");

    let named_refs: Vec<(&str, &TypeRef)> = match type_def.kind {
        TypeKind::Object | TypeKind::Interface => type_def
            .fields
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|field| (field.name.as_str(), &field.ty))
            .collect(),
        TypeKind::InputObject => type_def
            .input_fields
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|field| (field.name.as_str(), &field.ty))
            .collect(),
        _ => {
            return Err(SchemaShapeError::new(format!(
                "cannot build a field map for {type_name}: not an object, interface or input object type"
            )))
        }
    };

    named_refs
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(name, ty)| {
            normalize_field(name, ty, introspection, scalars)
                .map(|field| (name.to_owned(), field))
                .map_err(|err| SchemaShapeError::new(format!("{type_name}.{name}: {}", err.message())))
        })
        .collect()
}

fn normalize_field(
    name: &str,
    ty: &TypeRef,
    introspection: &Introspection,
    scalars: &ScalarMappings,
) -> Result<NormalizedField, SchemaShapeError> {
    let (wrapping, terminal) = unwrap_type_ref(ty)?;

    let ty = match terminal.kind {
        // Unknown terminal kinds degrade like unrecognized scalars do.
        TypeKind::Scalar | TypeKind::Unknown => {
            FieldType::Scalar(scalars.classify(terminal.name.as_deref().unwrap_or_default()))
        }
        TypeKind::Enum => {
            let values = terminal
                .name
                .as_deref()
                .and_then(|enum_name| introspection.type_def(enum_name))
                .and_then(|def| def.enum_values.as_deref())
                .map(|values| values.iter().map(|value| value.name.clone()).collect())
                .unwrap_or_default();

            FieldType::Enum { values }
        }
        TypeKind::Object | TypeKind::Interface | TypeKind::Union | TypeKind::InputObject => {
            let Some(object_type) = terminal.name.clone() else {
                return Err(SchemaShapeError::new("named type reference without a name"));
            };

            FieldType::Relation { object_type }
        }
        TypeKind::List | TypeKind::NonNull => {
            return Err(SchemaShapeError::new("wrapper kind where a named type was expected"));
        }
    };

    Ok(NormalizedField {
        name: name.to_owned(),
        ty,
        wrapping,
    })
}
