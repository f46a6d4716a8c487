//! Field definition builder

use tracing::debug;

use crate::template::builtin::FIELD_DEFINITION;
use crate::template::Bindings;

use super::{ElementType, FieldOptions, Snippet, SnippetError};

impl Snippet {
    /// Append a field definition.
    ///
    /// A qualified `Table::Field` name keeps only the field part, since the
    /// definition is pasted into whichever table is open.
    pub fn field(&mut self, name: &str, options: &FieldOptions) -> Result<String, SnippetError> {
        let name = match name.trim().split_once("::") {
            Some((_, field)) => field.trim(),
            None => name.trim(),
        };
        if name.is_empty() {
            return Err(SnippetError::input("field name is required").at_column(1));
        }
        if options.repetitions == 0 {
            return Err(SnippetError::input("field repetitions must be at least 1").at_column(5));
        }
        self.expect_type(ElementType::FieldDefinitionList)?;

        let calculation = options.calculation.as_deref().filter(|c| !c.is_empty());
        let field_type = if calculation.is_some() {
            "Calculated"
        } else {
            "Normal"
        };
        let bindings = Bindings::new()
            .with("name", name)
            .with("data_type", options.data_type)
            .with("field_type", field_type)
            .with("global", if options.is_global { "True" } else { "False" })
            .with("repetitions", options.repetitions)
            .with_opt("comment", options.comment.as_deref())
            .with_opt("calculation", calculation);

        let xml = self.templates.render(FIELD_DEFINITION, &bindings)?;
        debug!(name, field_type, "appended field definition");
        self.append(xml.clone());
        Ok(xml)
    }
}
