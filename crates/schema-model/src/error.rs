/// The introspection input does not have the shape the model builder expects.
///
/// Fatal to the build step that encounters it. Structural problems the builder
/// can degrade around are reported through [`Diagnostics`](crate::Diagnostics)
/// instead.
#[derive(Debug, thiserror::Error)]
#[error("malformed schema introspection: {message}")]
pub struct SchemaShapeError {
    message: String,
}

impl SchemaShapeError {
    pub fn new(message: impl Into<String>) -> Self {
        SchemaShapeError {
            message: message.into(),
        }
    }

    /// The bare message, without the error prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}
