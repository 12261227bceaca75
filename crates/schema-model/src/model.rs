use std::collections::BTreeSet;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    build_field_type_map,
    diagnostics::Diagnostics,
    introspection::{Introspection, TypeKind},
    operations::{default_scope, operations_for, ObjectOperations, RootFieldIndex},
    NormalizedField, ScalarMappings,
};

/// The built-in scalars every introspection result is expected to report.
const BUILT_IN_SCALARS: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// Options for [`SchemaModel::build()`].
#[derive(Debug, Default)]
pub struct ModelConfig {
    scope: Option<Vec<String>>,
    scalars: ScalarMappings,
}

impl ModelConfig {
    /// Restrict the model to the given object types. Defaults to every object
    /// type in the schema except introspection internals and the root types.
    pub fn with_scope(mut self, object_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scope = Some(object_types.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the scalar classification table.
    pub fn with_scalars(mut self, scalars: ScalarMappings) -> Self {
        self.scalars = scalars;
        self
    }

    pub fn scalars(&self) -> &ScalarMappings {
        &self.scalars
    }
}

/// Everything the model knows about one object type.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ObjectTypeModel {
    pub name: String,
    /// Normalized fields of the type itself, sorted by name.
    pub fields: IndexMap<String, NormalizedField>,
    pub operations: ObjectOperations,
}

/// An immutable snapshot of the normalized schema: one entry per in-scope
/// object type, sorted by type name.
///
/// Built once per schema version. The caller owns the snapshot and swaps it
/// wholesale (e.g. behind an `Arc`) when the schema changes; nothing here is
/// ever mutated after the build.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SchemaModel {
    object_types: IndexMap<String, ObjectTypeModel>,
}

impl SchemaModel {
    /// Normalize an introspected schema into a model.
    ///
    /// Structural problems are not thrown: they are collected into the
    /// result's [`Diagnostics`] next to whatever part of the model could
    /// still be built.
    pub fn build(introspection: &Introspection, config: &ModelConfig) -> ModelBuildResult {
        let mut diagnostics = Diagnostics::default();
        let mut model = SchemaModel::default();

        let missing: Vec<&str> = BUILT_IN_SCALARS
            .iter()
            .copied()
            .filter(|name| {
                !introspection
                    .type_def(name)
                    .map(|def| matches!(def.kind, TypeKind::Scalar))
                    .unwrap_or_default()
            })
            .collect();

        if !missing.is_empty() {
            diagnostics.push_fatal(format!(
                "introspection is missing the built-in scalar types: {}",
                missing.iter().join(", ")
            ));
            return ModelBuildResult { model, diagnostics };
        }

        let scope: BTreeSet<&str> = match &config.scope {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => default_scope(introspection),
        };

        let index = match RootFieldIndex::new(introspection, &scope, &mut diagnostics) {
            Ok(index) => index,
            Err(err) => {
                diagnostics.push_fatal(err.message().to_owned());
                return ModelBuildResult { model, diagnostics };
            }
        };

        for type_name in &scope {
            let Some(type_def) = introspection.type_def(type_name) else {
                diagnostics.push_warning(format!("object type {type_name} is not in the introspection types list"));
                continue;
            };

            let fields = match build_field_type_map(type_def, introspection, &config.scalars) {
                Ok(fields) => fields,
                Err(err) => {
                    diagnostics.push_fatal(err.message().to_owned());
                    continue;
                }
            };

            let operations = match operations_for(type_name, &index, introspection, &config.scalars, &mut diagnostics)
            {
                Ok(operations) => operations,
                Err(err) => {
                    diagnostics.push_fatal(err.message().to_owned());
                    continue;
                }
            };

            model.object_types.insert(
                (*type_name).to_owned(),
                ObjectTypeModel {
                    name: (*type_name).to_owned(),
                    fields,
                    operations,
                },
            );
        }

        tracing::debug!(object_types = model.object_types.len(), "built schema model");

        ModelBuildResult { model, diagnostics }
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectTypeModel> {
        self.object_types.get(name)
    }

    /// Iterate object types in name order.
    pub fn object_types(&self) -> impl Iterator<Item = &ObjectTypeModel> {
        self.object_types.values()
    }

    pub fn is_empty(&self) -> bool {
        self.object_types.is_empty()
    }
}

/// The result of a [`SchemaModel::build()`] invocation.
pub struct ModelBuildResult {
    model: SchemaModel,
    diagnostics: Diagnostics,
}

impl ModelBuildResult {
    /// Simplify the result to a yes-no answer: did the build succeed without
    /// fatal errors?
    ///
    /// `Ok()` contains the [SchemaModel]. `Err()` contains all [Diagnostics].
    pub fn into_result(self) -> Result<SchemaModel, Diagnostics> {
        if self.diagnostics.any_fatal() {
            Err(self.diagnostics)
        } else {
            Ok(self.model)
        }
    }

    /// The model and the diagnostics, regardless of fatality. The model may
    /// be partial when fatal diagnostics are present.
    pub fn into_parts(self) -> (SchemaModel, Diagnostics) {
        (self.model, self.diagnostics)
    }

    /// Build warnings and errors.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The (possibly partial) model.
    pub fn model(&self) -> &SchemaModel {
        &self.model
    }
}
