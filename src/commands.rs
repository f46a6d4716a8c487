//! Tab-delimited row commands
//!
//! Each command reads newline-separated rows of tab-separated columns and
//! feeds them to one [`Snippet`] builder. Empty columns count as absent, so
//! a row may leave optional columns blank while filling later ones. Numeric
//! columns accept a trailing `pt`.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use tracing::debug;

use crate::error::Error;
use crate::interpolate::Interpolation;
use crate::layout::{GridError, LayoutConfig};
use crate::snippet::{
    DataType, ElementType, FieldOptions, FieldRef, GridOptions, LayoutFieldOptions, ScriptBinding,
    Snippet, SnippetError, SortDirection, SortKey, TextOptions,
};

/// A snippet-generating command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fields,
    LayoutFields,
    LayoutFieldsLabeled,
    LayoutFieldButtons,
    SetField,
    SetVariable,
    Sort,
    SortWithTests,
    FieldGrid,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Fields,
        Command::LayoutFields,
        Command::LayoutFieldsLabeled,
        Command::LayoutFieldButtons,
        Command::SetField,
        Command::SetVariable,
        Command::Sort,
        Command::SortWithTests,
        Command::FieldGrid,
    ];

    /// Kind of snippet the command produces
    pub fn element_type(&self) -> ElementType {
        match self {
            Command::Fields => ElementType::FieldDefinitionList,
            Command::LayoutFields
            | Command::LayoutFieldsLabeled
            | Command::LayoutFieldButtons
            | Command::FieldGrid => ElementType::LayoutObjectList,
            Command::SetField | Command::SetVariable | Command::Sort | Command::SortWithTests => {
                ElementType::ScriptStepList
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Fields => "fields",
            Command::LayoutFields => "layout-fields",
            Command::LayoutFieldsLabeled => "layout-fields-labeled",
            Command::LayoutFieldButtons => "layout-field-buttons",
            Command::SetField => "set-field",
            Command::SetVariable => "set-variable",
            Command::Sort => "sort",
            Command::SortWithTests => "sort-with-tests",
            Command::FieldGrid => "field-grid",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = SnippetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| SnippetError::input(format!("unknown command '{}'", s)))
    }
}

/// One input row; columns are addressed 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    /// 1-based line number in the input
    pub number: usize,
    columns: Vec<&'a str>,
}

impl<'a> Row<'a> {
    pub fn new(number: usize, line: &'a str) -> Self {
        Self {
            number,
            columns: line.trim_end_matches('\r').split('\t').collect(),
        }
    }

    /// Column text, or `None` when missing or blank
    pub fn get(&self, column: usize) -> Option<&'a str> {
        column
            .checked_sub(1)
            .and_then(|i| self.columns.get(i))
            .copied()
            .filter(|text| !text.trim().is_empty())
    }

    fn error(&self, column: usize, message: impl Into<String>) -> SnippetError {
        SnippetError::input_at(self.number, column, message)
    }

    pub fn required(&self, column: usize, what: &str) -> Result<&'a str, SnippetError> {
        self.get(column)
            .map(str::trim)
            .ok_or_else(|| self.error(column, format!("{} is required", what)))
    }

    fn text(&self, column: usize) -> Option<String> {
        self.get(column).map(|text| text.trim().to_string())
    }

    /// Parse a numeric column, ignoring a trailing `pt`
    pub fn number<T: FromStr>(&self, column: usize, what: &str) -> Result<Option<T>, SnippetError> {
        let Some(text) = self.get(column) else {
            return Ok(None);
        };
        let trimmed = text.trim();
        let digits = trimmed.strip_suffix("pt").unwrap_or(trimmed).trim();
        digits.parse().map(Some).map_err(|_| {
            self.error(column, format!("{} must be a number, got '{}'", what, trimmed))
        })
    }

    /// A position or size in points, limited to the `i32` range
    fn coordinate(&self, column: usize, what: &str) -> Result<Option<i64>, SnippetError> {
        Ok(self.number::<i32>(column, what)?.map(i64::from))
    }

    fn flag(&self, column: usize, what: &str) -> Result<bool, SnippetError> {
        match self.get(column).map(|t| t.trim().to_ascii_lowercase()) {
            None => Ok(false),
            Some(text) => match text.as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(self.error(column, format!("{} must be True or False", what))),
            },
        }
    }

    fn parsed<T>(&self, column: usize) -> Result<Option<T>, SnippetError>
    where
        T: FromStr<Err = SnippetError>,
    {
        self.get(column)
            .map(|text| text.parse().map_err(|e: SnippetError| e.at_row(self.number).at_column(column)))
            .transpose()
    }

    /// A field given as `Table::Field` in one column, or as a table and a
    /// field in two. Returns the field and the next unread column.
    pub fn field_ref(&self, column: usize) -> Result<(FieldRef, usize), SnippetError> {
        let first = self.required(column, "field")?;
        if FieldRef::is_qualified(first) {
            let field = FieldRef::parse(first)
                .map_err(|e| e.at_row(self.number).at_column(column))?;
            return Ok((field, column + 1));
        }
        let field = self.get(column + 1).map(str::trim).ok_or_else(|| {
            self.error(
                column + 1,
                format!("'{}' is not Table::Field and no field column follows", first),
            )
        })?;
        Ok((FieldRef::new(first, field), column + 2))
    }

    /// A field written as `Table::Field` in a single column
    pub fn qualified_field(&self, column: usize) -> Result<FieldRef, SnippetError> {
        let text = self.required(column, "field")?;
        FieldRef::parse(text).map_err(|e| e.at_row(self.number).at_column(column))
    }

    fn expression(&self, column: usize) -> Result<Option<Interpolation>, Error> {
        let source = self.get(column).map(str::trim);
        Interpolation::parse_optional(source).map_err(|error| Error::Expression {
            row: self.number,
            column,
            source_text: source.unwrap_or_default().to_string(),
            error,
        })
    }
}

/// Split input into non-blank rows
pub fn rows(input: &str) -> Vec<Row<'_>> {
    input
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| Row::new(i + 1, line))
        .collect()
}

/// Split input into groups of rows separated by blank lines
pub fn row_groups(input: &str) -> Vec<Vec<Row<'_>>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for (i, line) in input.split('\n').enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(Row::new(i + 1, line));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Run a command over the input and return the built snippet
pub fn run(command: Command, input: &str, config: &LayoutConfig) -> Result<Snippet, Error> {
    let mut doc = Snippet::typed(command.element_type(), config.clone());
    debug!(%command, "running command");
    match command {
        Command::Fields => fields(&mut doc, input)?,
        Command::LayoutFields => layout_fields(&mut doc, input)?,
        Command::LayoutFieldsLabeled => layout_fields_labeled(&mut doc, input)?,
        Command::LayoutFieldButtons => layout_field_buttons(&mut doc, input)?,
        Command::SetField => set_field(&mut doc, input)?,
        Command::SetVariable => set_variable(&mut doc, input)?,
        Command::Sort => sort(&mut doc, input)?,
        Command::SortWithTests => sort_with_tests(&mut doc, input)?,
        Command::FieldGrid => field_grid(&mut doc, input)?,
    }
    debug!(%command, fragments = doc.len(), "command finished");
    Ok(doc)
}

fn fields(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    for row in rows(input) {
        let name = row.required(1, "field name")?;
        let options = FieldOptions {
            data_type: row.parsed::<DataType>(2)?.unwrap_or_default(),
            is_global: row.flag(3, "global")?,
            comment: row.text(4),
            repetitions: row.number(5, "repetitions")?.unwrap_or(1),
            calculation: row.text(6),
        };
        doc.field(name, &options).map_err(|e| e.at_row(row.number))?;
    }
    Ok(())
}

fn layout_fields(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    for row in rows(input) {
        let field = row.qualified_field(1)?;
        let options = LayoutFieldOptions {
            tooltip: row.text(2),
            font: row.text(3),
            font_size: row.number(4, "font size")?,
            object_name: row.text(5),
            height: row.coordinate(6, "height")?,
            width: row.coordinate(7, "width")?,
            margin_top: row.coordinate(8, "margin top")?,
            ..LayoutFieldOptions::new(field)
        };
        doc.layout_field(&options).map_err(|e| e.at_row(row.number))?;
    }
    Ok(())
}

fn layout_fields_labeled(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    for row in rows(input) {
        let field = row.qualified_field(1)?;
        let label = row.get(2).unwrap_or("");
        let options = LayoutFieldOptions {
            tooltip: row.text(3),
            font: row.text(4),
            font_size: row.number(5, "font size")?,
            object_name: row.text(6),
            ..LayoutFieldOptions::new(field)
        };
        let label_options = TextOptions {
            font: options.font.clone(),
            font_size: options.font_size,
            ..TextOptions::default()
        };
        doc.layout_field_with_label(&options, label, &label_options)
            .map_err(|e| e.at_row(row.number))?;
    }
    Ok(())
}

fn layout_field_buttons(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    for row in rows(input) {
        let field = row.qualified_field(1)?;
        let options = LayoutFieldOptions {
            tooltip: row.text(2),
            font: row.text(3),
            font_size: row.number(4, "font size")?,
            object_name: row.text(5),
            height: row.coordinate(6, "height")?,
            width: row.coordinate(7, "width")?,
            margin_top: row.coordinate(8, "margin top")?,
            ..LayoutFieldOptions::new(field)
        };
        let result = match row.text(9) {
            Some(script_id) => {
                let script = ScriptBinding {
                    id: script_id,
                    name: None,
                    parameter: row.text(10),
                };
                doc.layout_field_button(&options, &script)
            }
            None => doc.layout_field(&options),
        };
        result.map_err(|e| e.at_row(row.number))?;
    }
    Ok(())
}

fn set_field(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    for row in rows(input) {
        let (field, next) = row.field_ref(1)?;
        doc.step_set_field(&field, row.get(next), row.get(next + 1))
            .map_err(|e| e.at_row(row.number))?;
    }
    Ok(())
}

fn set_variable(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    for row in rows(input) {
        let name = row.required(1, "variable name")?;
        doc.step_set_variable(name, row.get(2), row.get(3))
            .map_err(|e| e.at_row(row.number))?;
    }
    Ok(())
}

fn sort_key(row: &Row<'_>, column: usize) -> Result<SortKey, SnippetError> {
    let (field, next) = row.field_ref(column)?;
    let direction = row.parsed::<SortDirection>(next)?.unwrap_or_default();
    Ok(SortKey::new(field, direction))
}

fn sort(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    for group in row_groups(input) {
        let keys = group
            .iter()
            .map(|row| sort_key(row, 1))
            .collect::<Result<Vec<_>, _>>()?;
        let first_row = group.first().map(|r| r.number).unwrap_or(1);
        doc.step_sort(&keys).map_err(|e| e.at_row(first_row))?;
    }
    Ok(())
}

fn sort_with_tests(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    let rows = rows(input);
    for (i, row) in rows.iter().enumerate() {
        let test = row.required(1, "test calculation")?;
        let key = sort_key(row, 2)?;
        let result = if i == 0 {
            doc.step_if(test)
        } else {
            doc.step_else_if(test)
        };
        result.map_err(|e| e.at_row(row.number))?;
        doc.step_sort(&[key]).map_err(|e| e.at_row(row.number))?;
    }
    if !rows.is_empty() {
        doc.step_end_if()?;
    }
    Ok(())
}

fn field_grid(doc: &mut Snippet, input: &str) -> Result<(), Error> {
    for row in rows(input) {
        let field = row.qualified_field(1)?;
        let row_count: u32 = row
            .number(2, "row count")?
            .ok_or_else(|| row.error(2, "row count is required"))?;
        let rows = NonZeroU32::new(row_count)
            .ok_or_else(|| row.error(2, "row count must be at least 1"))?;
        let cols = row
            .number(3, "column count")?
            .ok_or_else(|| row.error(3, "column count is required"))?;

        let mut options = GridOptions::new(field, rows, cols);
        options.rep_start = row.number(4, "rep start")?.unwrap_or(1);
        options.height = row.coordinate(5, "height")?;
        options.width = row.coordinate(6, "width")?;
        options.margin_top = row.coordinate(7, "margin top")?;
        options.margin_left = row.coordinate(8, "margin left")?;
        options.script_id = row.text(9);
        options.script_parameter = row.expression(10)?;
        options.tooltip = row.expression(11)?;
        options.object_name = row.expression(12)?;
        options.padding = row.text(13);

        doc.layout_field_grid(&options).map_err(|e| match e {
            SnippetError::Grid(grid) => row.error(grid_column(&grid), grid.to_string()),
            other => other.at_row(row.number),
        })?;
    }
    Ok(())
}

/// Input column holding the value that made a grid overflow
fn grid_column(error: &GridError) -> usize {
    match error {
        GridError::TooManyCells { .. } => 3,
        GridError::RepetitionOverflow { .. } => 4,
        GridError::HeightOverflow => 5,
        GridError::WidthOverflow => 6,
    }
}
