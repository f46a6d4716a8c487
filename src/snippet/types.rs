//! Option types consumed by the snippet builders

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::interpolate::Interpolation;
use crate::layout::Justification;

use super::SnippetError;

/// A `table::field` reference, optionally pointing at one repetition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub table: String,
    pub field: String,
    pub repetition: Option<u32>,
}

impl FieldRef {
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
            repetition: None,
        }
    }

    /// True when the text contains a `::` separator
    pub fn is_qualified(text: &str) -> bool {
        text.contains("::")
    }

    /// Parse `table::field`; both halves must be non-empty
    pub fn parse(qualified: &str) -> Result<Self, SnippetError> {
        let qualified = qualified.trim();
        match qualified.split_once("::") {
            Some((table, field)) if !table.is_empty() && !field.is_empty() => {
                Ok(Self::new(table, field))
            }
            _ => Err(SnippetError::input(format!(
                "expected a fully qualified field name like Table::Field, got '{}'",
                qualified
            ))),
        }
    }

    /// Same field at a specific repetition
    pub fn with_repetition(&self, rep: u32) -> Self {
        Self {
            repetition: Some(rep),
            ..self.clone()
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.table, self.field)?;
        if let Some(rep) = self.repetition {
            write!(f, "[{}]", rep)?;
        }
        Ok(())
    }
}

/// Storage type of a field definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    #[default]
    Text,
    Number,
    Date,
    Time,
    Timestamp,
    Container,
}

impl FromStr for DataType {
    type Err = SnippetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(DataType::Text),
            "number" => Ok(DataType::Number),
            "date" => Ok(DataType::Date),
            "time" => Ok(DataType::Time),
            "timestamp" => Ok(DataType::Timestamp),
            "container" | "binary" => Ok(DataType::Container),
            other => Err(SnippetError::input(format!("unknown field type '{}'", other))),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Text => "Text",
            DataType::Number => "Number",
            DataType::Date => "Date",
            DataType::Time => "Time",
            DataType::Timestamp => "TimeStamp",
            DataType::Container => "Binary",
        };
        f.write_str(name)
    }
}

/// Attributes of a field definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    pub data_type: DataType,
    pub is_global: bool,
    pub comment: Option<String>,
    pub repetitions: u32,
    /// Makes the field a calculated field
    pub calculation: Option<String>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            data_type: DataType::Text,
            is_global: false,
            comment: None,
            repetitions: 1,
            calculation: None,
        }
    }
}

/// Attributes of a field layout object; unset values fall back to [`crate::LayoutConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutFieldOptions {
    pub field: FieldRef,
    pub tooltip: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<u32>,
    pub object_name: Option<String>,
    pub height: Option<i64>,
    pub width: Option<i64>,
    /// Explicit top; leave unset to stack under the previous object
    pub top: Option<i64>,
    pub left: Option<i64>,
    pub margin_top: Option<i64>,
    /// CSS padding of the inner border, e.g. `0em`
    pub padding: Option<String>,
}

impl LayoutFieldOptions {
    pub fn new(field: FieldRef) -> Self {
        Self {
            field,
            tooltip: None,
            font: None,
            font_size: None,
            object_name: None,
            height: None,
            width: None,
            top: None,
            left: None,
            margin_top: None,
            padding: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_font(mut self, font: impl Into<String>, size: u32) -> Self {
        self.font = Some(font.into());
        self.font_size = Some(size);
        self
    }

    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }
}

/// Attributes of a text layout object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    pub top: Option<i64>,
    pub left: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub font: Option<String>,
    pub font_size: Option<u32>,
    pub justification: Option<Justification>,
    /// Paragraph padding inside the object
    pub left_margin: Option<i64>,
    pub right_margin: Option<i64>,
    pub text_color: Option<String>,
}

/// Script performed when a button is clicked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBinding {
    /// FileMaker's internal script id, found on the script's own clipboard snippet
    pub id: String,
    pub name: Option<String>,
    /// Script parameter calculation
    pub parameter: Option<String>,
}

impl ScriptBinding {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }
}

/// Attributes of a repeating-field grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOptions {
    /// Base field; each cell points at one of its repetitions
    pub field: FieldRef,
    pub rows: NonZeroU32,
    pub cols: u32,
    pub rep_start: u32,
    pub height: Option<i64>,
    pub width: Option<i64>,
    pub margin_top: Option<i64>,
    pub margin_left: Option<i64>,
    pub font: Option<String>,
    pub font_size: Option<u32>,
    /// Cells become buttons when this is set and non-empty
    pub script_id: Option<String>,
    pub script_name: Option<String>,
    pub script_parameter: Option<Interpolation>,
    pub tooltip: Option<Interpolation>,
    pub object_name: Option<Interpolation>,
    pub padding: Option<String>,
}

impl GridOptions {
    pub fn new(field: FieldRef, rows: NonZeroU32, cols: u32) -> Self {
        Self {
            field,
            rows,
            cols,
            rep_start: 1,
            height: None,
            width: None,
            margin_top: None,
            margin_left: None,
            font: None,
            font_size: None,
            script_id: None,
            script_name: None,
            script_parameter: None,
            tooltip: None,
            object_name: None,
            padding: None,
        }
    }
}

/// Sort order of one sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = SnippetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            other => Err(SnippetError::input(format!(
                "unknown sort direction '{}' (expected ascending or descending)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("Ascending"),
            SortDirection::Descending => f.write_str("Descending"),
        }
    }
}

/// One field of a Sort Records step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: FieldRef,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: FieldRef, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}
