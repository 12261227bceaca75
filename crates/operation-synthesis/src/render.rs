//! Serialization of an operation tree into document text.
//!
//! The output is compact: one line, single spaces, selection sets wrapped in
//! `{ }`. Field order is whatever the tree says; ordering decisions belong to
//! the builder, not the renderer.

use crate::document::{FieldNode, OperationNode};

pub(crate) fn render(operation: &OperationNode) -> String {
    let mut rendered = String::new();

    rendered.push_str(operation.ty.keyword());

    let variable_count = operation.variable_definitions.len();
    for (i, variable) in operation.variable_definitions.iter().enumerate() {
        if i == 0 {
            rendered.push('(');
        }

        rendered.push('$');
        rendered.push_str(&variable.name);
        rendered.push_str(": ");
        rendered.push_str(&variable.type_display);

        if i == variable_count - 1 {
            rendered.push(')');
        } else {
            rendered.push_str(", ");
        }
    }

    render_selection(&operation.selection_set, &mut rendered);

    rendered
}

fn render_selection(selection_set: &[FieldNode], rendered: &mut String) {
    let selection_count = selection_set.len();
    for (i, field) in selection_set.iter().enumerate() {
        if i == 0 {
            rendered.push_str(" {");
        }

        rendered.push(' ');

        if let Some(alias) = &field.alias {
            rendered.push_str(alias);
            rendered.push_str(": ");
        }

        rendered.push_str(&field.name);

        let argument_count = field.arguments.len();
        for (i, argument) in field.arguments.iter().enumerate() {
            if i == 0 {
                rendered.push('(');
            }

            rendered.push_str(&argument.name);
            rendered.push_str(": $");
            rendered.push_str(&argument.variable);

            if i == argument_count - 1 {
                rendered.push(')');
            } else {
                rendered.push_str(", ");
            }
        }

        render_selection(&field.selection_set, rendered);

        if i == selection_count - 1 {
            rendered.push_str(" }");
        }
    }
}
