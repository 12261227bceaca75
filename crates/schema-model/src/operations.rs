use std::collections::{hash_map::Entry, BTreeSet, HashMap};

use indexmap::IndexMap;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{
    build_field_type_map,
    diagnostics::Diagnostics,
    introspection::{FieldDef, Introspection, TypeDef, TypeKind},
    wrapping::unwrap_type_ref,
    NormalizedField, ScalarMappings, SchemaShapeError,
};

/// The five canonical operations the platform can expose per object type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Get,
    List,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// The conventional root field prefix for this operation.
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            OperationKind::Get => "get",
            OperationKind::List => "list",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }

    pub fn is_mutation(self) -> bool {
        matches!(self, OperationKind::Create | OperationKind::Update | OperationKind::Delete)
    }
}

/// A root field argument as declared by the schema, with its rendered type,
/// e.g. `uid: String!`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ArgumentDef {
    pub name: String,
    pub type_display: String,
}

/// The input object argument of a create or update operation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct InputShape {
    /// Name of the argument the input object binds to, e.g. `data`.
    pub argument: String,
    pub type_display: String,
    /// Normalized fields of the input object type, sorted by name.
    pub fields: IndexMap<String, NormalizedField>,
}

/// One exposed operation: the root field to invoke, what it accepts and what
/// it returns.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OperationEntry {
    pub kind: OperationKind,
    pub root_field: String,
    /// Declared arguments of the root field, sorted by name.
    pub arguments: Vec<ArgumentDef>,
    /// Normalized fields of the operation's return type, sorted by name.
    pub returns: IndexMap<String, NormalizedField>,
    /// Present for create and update when the root field declares an input
    /// object argument.
    pub input: Option<InputShape>,
}

/// Which of the five canonical operations exist for one object type.
///
/// An entry is present only when the schema actually exposes the
/// corresponding root field; absence is never papered over with a
/// placeholder.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ObjectOperations {
    pub get: Option<OperationEntry>,
    pub list: Option<OperationEntry>,
    pub create: Option<OperationEntry>,
    pub update: Option<OperationEntry>,
    pub delete: Option<OperationEntry>,
}

impl ObjectOperations {
    pub fn entry(&self, kind: OperationKind) -> Option<&OperationEntry> {
        match kind {
            OperationKind::Get => self.get.as_ref(),
            OperationKind::List => self.list.as_ref(),
            OperationKind::Create => self.create.as_ref(),
            OperationKind::Update => self.update.as_ref(),
            OperationKind::Delete => self.delete.as_ref(),
        }
    }

    fn entry_mut(&mut self, kind: OperationKind) -> &mut Option<OperationEntry> {
        match kind {
            OperationKind::Get => &mut self.get,
            OperationKind::List => &mut self.list,
            OperationKind::Create => &mut self.create,
            OperationKind::Update => &mut self.update,
            OperationKind::Delete => &mut self.delete,
        }
    }

    /// Iterate the operations that exist, in canonical order.
    pub fn available(&self) -> impl Iterator<Item = &OperationEntry> {
        OperationKind::iter().filter_map(|kind| self.entry(kind))
    }
}

/// Index of the schema's root fields, keyed by the operation they perform and
/// the object type they target.
///
/// Built by scanning the query and mutation root types once. Associating a
/// root field with an object type goes through the names the schema itself
/// reports; the conventional `<operation><Type>` shape only picks the
/// operation kind and breaks ties when several root fields target the same
/// type.
pub(crate) struct RootFieldIndex<'a> {
    entries: HashMap<(OperationKind, &'a str), &'a FieldDef>,
}

const QUERY_KINDS: [OperationKind; 2] = [OperationKind::Get, OperationKind::List];
const MUTATION_KINDS: [OperationKind; 3] = [OperationKind::Create, OperationKind::Update, OperationKind::Delete];

impl<'a> RootFieldIndex<'a> {
    pub(crate) fn new(
        introspection: &'a Introspection,
        scope: &BTreeSet<&'a str>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, SchemaShapeError> {
        let Some(query_type) = introspection.query_type.as_ref() else {
            return Err(SchemaShapeError::new("introspection reports no query root type"));
        };

        let query_root = introspection.type_def(&query_type.name).ok_or_else(|| {
            SchemaShapeError::new(format!("query root type {} is not in the types list", query_type.name))
        })?;

        let mut entries = HashMap::new();
        ingest_root(query_root, &QUERY_KINDS, scope, &mut entries);

        if let Some(mutation_type) = introspection.mutation_type.as_ref() {
            match introspection.type_def(&mutation_type.name) {
                Some(mutation_root) => ingest_root(mutation_root, &MUTATION_KINDS, scope, &mut entries),
                None => diagnostics.push_warning(format!(
                    "mutation root type {} is not in the types list",
                    mutation_type.name
                )),
            }
        }

        Ok(RootFieldIndex { entries })
    }

    pub(crate) fn lookup(&self, kind: OperationKind, object_type: &str) -> Option<&'a FieldDef> {
        self.entries.get(&(kind, object_type)).copied()
    }
}

fn ingest_root<'a>(
    root: &'a TypeDef,
    kinds: &[OperationKind],
    scope: &BTreeSet<&'a str>,
    entries: &mut HashMap<(OperationKind, &'a str), &'a FieldDef>,
) {
    let fields = root.fields.as_deref().unwrap_or_default();

    // Sorted iteration keeps conflict resolution independent of declaration
    // order.
    for field in fields.iter().sorted_by_key(|field| field.name.as_str()) {
        let Some((kind, object_type)) = classify_root_field(&field.name, kinds, scope) else {
            continue;
        };

        match entries.entry((kind, object_type)) {
            Entry::Vacant(slot) => {
                slot.insert(field);
            }
            Entry::Occupied(mut slot) => {
                // `getEpisode` wins over `getEpisodeByTitle`; otherwise the
                // first field in sorted order stays.
                if is_conventional_name(&field.name, kind, object_type)
                    && !is_conventional_name(&slot.get().name, kind, object_type)
                {
                    slot.insert(field);
                }
            }
        }
    }
}

fn classify_root_field<'a>(
    name: &str,
    kinds: &[OperationKind],
    scope: &BTreeSet<&'a str>,
) -> Option<(OperationKind, &'a str)> {
    for kind in kinds {
        let Some(rest) = name.strip_prefix(kind.prefix()) else {
            continue;
        };

        // `getEpisode` targets `Episode`; fields that merely start with the
        // prefix word (`getaway`) don't count.
        if !rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            continue;
        }

        if let Some(object_type) = scope.get(rest) {
            return Some((*kind, *object_type));
        }

        if matches!(kind, OperationKind::List) {
            for suffix in ["s", "es"] {
                if let Some(object_type) = rest.strip_suffix(suffix).and_then(|singular| scope.get(singular)) {
                    return Some((OperationKind::List, *object_type));
                }
            }
        }
    }

    None
}

fn is_conventional_name(name: &str, kind: OperationKind, object_type: &str) -> bool {
    let Some(rest) = name.strip_prefix(kind.prefix()) else {
        return false;
    };

    rest == object_type
        || (matches!(kind, OperationKind::List)
            && rest
                .strip_suffix('s')
                .map(|singular| singular == object_type)
                .unwrap_or(false))
}

/// All object types a caller would consider content types: everything except
/// introspection internals and the operation root types themselves.
pub(crate) fn default_scope(introspection: &Introspection) -> BTreeSet<&str> {
    let root_names: Vec<&str> = introspection
        .query_type
        .iter()
        .chain(introspection.mutation_type.iter())
        .map(|root| root.name.as_str())
        .collect();

    introspection
        .types
        .iter()
        .filter(|def| matches!(def.kind, TypeKind::Object))
        .filter_map(|def| def.name.as_deref())
        .filter(|name| !name.starts_with("__"))
        .filter(|name| !root_names.contains(name))
        .collect()
}

/// The canonical operation table for one object type.
///
/// Non-fatal problems, like a root field whose return type does not resolve,
/// omit the affected entry and are reported through `diagnostics`.
pub fn object_operations(
    object_type: &str,
    introspection: &Introspection,
    scalars: &ScalarMappings,
    diagnostics: &mut Diagnostics,
) -> Result<ObjectOperations, SchemaShapeError> {
    let scope = default_scope(introspection);
    let index = RootFieldIndex::new(introspection, &scope, diagnostics)?;

    operations_for(object_type, &index, introspection, scalars, diagnostics)
}

pub(crate) fn operations_for(
    object_type: &str,
    index: &RootFieldIndex<'_>,
    introspection: &Introspection,
    scalars: &ScalarMappings,
    diagnostics: &mut Diagnostics,
) -> Result<ObjectOperations, SchemaShapeError> {
    let mut operations = ObjectOperations::default();

    for kind in OperationKind::iter() {
        let Some(field) = index.lookup(kind, object_type) else {
            continue;
        };

        *operations.entry_mut(kind) = operation_entry(kind, field, object_type, introspection, scalars, diagnostics)?;
    }

    Ok(operations)
}

fn operation_entry(
    kind: OperationKind,
    field: &FieldDef,
    object_type: &str,
    introspection: &Introspection,
    scalars: &ScalarMappings,
    diagnostics: &mut Diagnostics,
) -> Result<Option<OperationEntry>, SchemaShapeError> {
    let (_, terminal) = unwrap_type_ref(&field.ty)
        .map_err(|err| SchemaShapeError::new(format!("root field {}: {}", field.name, err.message())))?;

    let return_def = terminal
        .name
        .as_deref()
        .and_then(|name| introspection.type_def(name))
        .filter(|def| matches!(def.kind, TypeKind::Object | TypeKind::Interface));

    let Some(return_def) = return_def else {
        tracing::warn!(object_type, root_field = field.name.as_str(), "omitting unresolvable operation");
        diagnostics.push_warning(format!(
            "{object_type}: omitting the {kind} operation: the return type of root field {} does not resolve to a known object type",
            field.name
        ));
        return Ok(None);
    };

    let returns = build_field_type_map(return_def, introspection, scalars)?;

    let mut arguments = Vec::with_capacity(field.args.len());
    for arg in &field.args {
        let (wrapping, terminal) = unwrap_type_ref(&arg.ty).map_err(|err| {
            SchemaShapeError::new(format!("argument {} of root field {}: {}", arg.name, field.name, err.message()))
        })?;

        let Some(name) = terminal.name.as_deref() else {
            return Err(SchemaShapeError::new(format!(
                "argument {} of root field {} has no named type",
                arg.name, field.name
            )));
        };

        arguments.push(ArgumentDef {
            name: arg.name.clone(),
            type_display: wrapping.type_display(name).to_string(),
        });
    }
    arguments.sort_by(|a, b| a.name.cmp(&b.name));

    let input = if matches!(kind, OperationKind::Create | OperationKind::Update) {
        input_shape(field, introspection, scalars, diagnostics)?
    } else {
        None
    };

    Ok(Some(OperationEntry {
        kind,
        root_field: field.name.clone(),
        arguments,
        returns,
        input,
    }))
}

fn input_shape(
    field: &FieldDef,
    introspection: &Introspection,
    scalars: &ScalarMappings,
    diagnostics: &mut Diagnostics,
) -> Result<Option<InputShape>, SchemaShapeError> {
    for arg in &field.args {
        let (wrapping, terminal) = unwrap_type_ref(&arg.ty)?;

        if !matches!(terminal.kind, TypeKind::InputObject) {
            continue;
        }

        let Some(name) = terminal.name.as_deref() else {
            continue;
        };

        let Some(def) = introspection.type_def(name) else {
            diagnostics.push_warning(format!(
                "input type {name} of root field {} is not in the types list",
                field.name
            ));
            return Ok(None);
        };

        let fields = build_field_type_map(def, introspection, scalars)?;

        return Ok(Some(InputShape {
            argument: arg.name.clone(),
            type_display: wrapping.type_display(name).to_string(),
            fields,
        }));
    }

    Ok(None)
}
