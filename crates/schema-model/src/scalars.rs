use std::str::FromStr;

use indexmap::IndexMap;

/// Semantic interpretation of a scalar field, as the content editors present
/// it. The platform reports several custom scalar names for the same semantic
/// type; [`ScalarMappings`] maps them onto this closed set. Names nothing
/// matches degrade to `String` rather than failing the build.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, strum_macros::Display, strum_macros::EnumString,
)]
pub enum ScalarType {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    Date,
    Time,
    Email,
    Phone,
    Url,
    Json,
}

/// The scalar-name to semantic-type table used during normalization.
///
/// The exact alias set is deployment-specific, so the table is data rather
/// than code: the defaults cover the names the platform ships with, and
/// callers can override or extend them before building a model.
#[derive(Debug, Clone)]
pub struct ScalarMappings {
    aliases: IndexMap<String, ScalarType>,
}

impl Default for ScalarMappings {
    fn default() -> Self {
        let aliases = [
            ("DateTime", ScalarType::DateTime),
            ("Timestamp", ScalarType::DateTime),
            ("ISO8601DateTime", ScalarType::DateTime),
            ("Date", ScalarType::Date),
            ("Time", ScalarType::Time),
            ("Email", ScalarType::Email),
            ("EmailAddress", ScalarType::Email),
            ("Phone", ScalarType::Phone),
            ("PhoneNumber", ScalarType::Phone),
            ("URL", ScalarType::Url),
            ("Url", ScalarType::Url),
            ("Link", ScalarType::Url),
            ("JSON", ScalarType::Json),
            ("JSONObject", ScalarType::Json),
        ]
        .into_iter()
        .map(|(name, ty)| (name.to_owned(), ty))
        .collect();

        ScalarMappings { aliases }
    }
}

impl ScalarMappings {
    /// Add an alias, overriding any default for the same name.
    pub fn with_alias(mut self, scalar_name: impl Into<String>, ty: ScalarType) -> Self {
        self.aliases.insert(scalar_name.into(), ty);
        self
    }

    /// Classify a scalar by name: built-in GraphQL scalars first, then the
    /// alias table, then the `String` fallback.
    pub fn classify(&self, scalar_name: &str) -> ScalarType {
        match scalar_name {
            "String" | "ID" => return ScalarType::String,
            "Int" => return ScalarType::Int,
            "Float" => return ScalarType::Float,
            "Boolean" => return ScalarType::Boolean,
            _ => (),
        }

        if let Some(ty) = self.aliases.get(scalar_name) {
            return *ty;
        }

        ScalarType::from_str(scalar_name).ok().unwrap_or_else(|| {
            tracing::debug!(scalar = scalar_name, "unrecognized scalar name, treating as String");
            ScalarType::String
        })
    }
}
