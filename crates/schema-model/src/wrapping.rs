use std::fmt;

use crate::{
    introspection::{TypeKind, TypeRef},
    SchemaShapeError,
};

/// Compact representation of the list and non-null wrappers around a named
/// type: the `[...!]!` part of `[Episode!]!`.
///
/// List wrappers are stored innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Wrapping {
    inner_is_required: bool,
    list_wrappings: Vec<ListWrapping>,
}

/// Nullability of one list wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ListWrapping {
    List,
    ListNonNull,
}

impl Wrapping {
    pub fn nullable() -> Self {
        Wrapping::default()
    }

    pub fn required() -> Self {
        Wrapping {
            inner_is_required: true,
            list_wrappings: Vec::new(),
        }
    }

    pub fn list(mut self) -> Self {
        self.list_wrappings.push(ListWrapping::List);
        self
    }

    pub fn list_non_null(mut self) -> Self {
        self.list_wrappings.push(ListWrapping::ListNonNull);
        self
    }

    pub fn is_list(&self) -> bool {
        !self.list_wrappings.is_empty()
    }

    pub fn inner_is_required(&self) -> bool {
        self.inner_is_required
    }

    /// Whether the outermost wrapper is non-null.
    pub fn is_required(&self) -> bool {
        self.list_wrappings
            .last()
            .map(|wrapper| matches!(wrapper, ListWrapping::ListNonNull))
            .unwrap_or(self.inner_is_required)
    }

    /// `name` wrapped for display, e.g. `[Episode!]!`.
    pub fn type_display<'a>(&'a self, name: &'a str) -> impl fmt::Display + 'a {
        TypeDisplay { wrapping: self, name }
    }
}

struct TypeDisplay<'a> {
    wrapping: &'a Wrapping,
    name: &'a str,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in &self.wrapping.list_wrappings {
            f.write_str("[")?;
        }

        f.write_str(self.name)?;

        if self.wrapping.inner_is_required {
            f.write_str("!")?;
        }

        for wrapper in &self.wrapping.list_wrappings {
            f.write_str("]")?;

            if matches!(wrapper, ListWrapping::ListNonNull) {
                f.write_str("!")?;
            }
        }

        Ok(())
    }
}

/// Unwrap the `ofType` chain of a type reference, separating the wrappers from
/// the terminal named type.
pub(crate) fn unwrap_type_ref(ty: &TypeRef) -> Result<(Wrapping, &TypeRef), SchemaShapeError> {
    let mut wrappers = Vec::new();
    let mut current = ty;

    loop {
        match current.kind {
            TypeKind::NonNull | TypeKind::List => {
                let Some(inner) = current.of_type.as_deref() else {
                    let kind = if matches!(current.kind, TypeKind::List) {
                        "LIST"
                    } else {
                        "NON_NULL"
                    };
                    return Err(SchemaShapeError::new(format!("{kind} wrapper without an ofType")));
                };

                wrappers.push(current.kind);
                current = inner;
            }
            TypeKind::Unknown if current.of_type.is_some() => {
                return Err(SchemaShapeError::new("unknown wrapper kind in a type reference"));
            }
            _ => break,
        }
    }

    let mut wrappers = wrappers.into_iter().rev().peekable();

    let mut wrapping = if wrappers.next_if(|kind| matches!(kind, TypeKind::NonNull)).is_some() {
        Wrapping::required()
    } else {
        Wrapping::nullable()
    };

    while let Some(next) = wrappers.next() {
        if !matches!(next, TypeKind::List) {
            return Err(SchemaShapeError::new(
                "consecutive NON_NULL wrappers in a type reference",
            ));
        }

        wrapping = if wrappers.next_if(|kind| matches!(kind, TypeKind::NonNull)).is_some() {
            wrapping.list_non_null()
        } else {
            wrapping.list()
        };
    }

    Ok((wrapping, current))
}
