//! Layout object builders: fields, labels, buttons, and grids

use tracing::debug;

use crate::layout::{Bounds, GridSpec, LayoutConfig, LayoutEngine, Placement};
use crate::template::builtin::{GROUP_BUTTON, LAYOUT_FIELD, LAYOUT_TEXT};
use crate::template::Bindings;

use super::{
    ElementType, GridOptions, LayoutFieldOptions, ScriptBinding, Snippet, SnippetError,
    TextOptions,
};

/// Field options with every default filled in
struct ResolvedField<'a> {
    font: &'a str,
    font_size: u32,
    placement: Placement,
}

impl Snippet {
    fn resolve_field<'a>(
        &'a self,
        options: &'a LayoutFieldOptions,
        default_margin_top: i64,
    ) -> ResolvedField<'a> {
        let config = &self.config;
        let font_size = options.font_size.unwrap_or(config.font_size);
        ResolvedField {
            font: options.font.as_deref().unwrap_or(&config.font),
            font_size,
            placement: Placement {
                top: options.top,
                left: options.left.unwrap_or(config.field_left),
                width: options.width.unwrap_or(config.field_width),
                height: options
                    .height
                    .unwrap_or_else(|| LayoutConfig::height_for(font_size)),
                margin_top: options.margin_top.unwrap_or(default_margin_top),
            },
        }
    }

    fn render_field(
        &mut self,
        options: &LayoutFieldOptions,
        font: &str,
        font_size: u32,
        bounds: Bounds,
        object_name: Option<&str>,
    ) -> Result<String, SnippetError> {
        let bindings = bounds_bindings(bounds)
            .with("object_name", object_name.unwrap_or(""))
            .with("field", &options.field)
            .with("font", font)
            .with("font_size", font_size)
            .with_opt("tooltip", options.tooltip.as_deref())
            .with_opt("padding", options.padding.as_deref());
        Ok(self.templates.render(LAYOUT_FIELD, &bindings)?)
    }

    /// Append a field layout object.
    ///
    /// Without an explicit top the field stacks under the previous object.
    /// Returns the rendered fragment.
    pub fn layout_field(&mut self, options: &LayoutFieldOptions) -> Result<String, SnippetError> {
        self.append_field(options).map(|(xml, _)| xml)
    }

    fn append_field(
        &mut self,
        options: &LayoutFieldOptions,
    ) -> Result<(String, Bounds), SnippetError> {
        self.expect_type(ElementType::LayoutObjectList)?;
        let (font, font_size, placement) = {
            let resolved = self.resolve_field(options, self.config.field_margin_top);
            (resolved.font.to_string(), resolved.font_size, resolved.placement)
        };

        let bounds = self.layout.place(&placement);
        let xml = self.render_field(
            options,
            &font,
            font_size,
            bounds,
            options.object_name.as_deref(),
        )?;
        debug!(field = %options.field, %bounds, "appended layout field");
        self.layout.record(bounds);
        self.append(xml.clone());
        Ok((xml, bounds))
    }

    /// Append a text object at its explicit position (origin by default)
    pub fn layout_text(&mut self, text: &str, options: &TextOptions) -> Result<String, SnippetError> {
        self.expect_type(ElementType::LayoutObjectList)?;
        let font_size = options.font_size.unwrap_or(self.config.font_size);
        let bounds = Bounds::from_size(
            options.top.unwrap_or(0),
            options.left.unwrap_or(0),
            options.width.unwrap_or(self.config.text_width),
            options
                .height
                .unwrap_or_else(|| LayoutConfig::height_for(font_size)),
        );
        self.append_text(text, options, font_size, bounds)
    }

    fn append_text(
        &mut self,
        text: &str,
        options: &TextOptions,
        font_size: u32,
        bounds: Bounds,
    ) -> Result<String, SnippetError> {
        let config = &self.config;
        let bindings = bounds_bindings(bounds)
            .with("text", text)
            .with("font", options.font.as_deref().unwrap_or(&config.font))
            .with("font_size", font_size)
            .with(
                "text_align",
                options.justification.unwrap_or(config.justification).css(),
            )
            .with(
                "text_color",
                options.text_color.as_deref().unwrap_or(&config.text_color),
            )
            .with_opt("left_margin", options.left_margin)
            .with_opt("right_margin", options.right_margin);

        let xml = self.templates.render(LAYOUT_TEXT, &bindings)?;
        debug!(text, %bounds, "appended text object");
        self.layout.record(bounds);
        self.append(xml.clone());
        Ok(xml)
    }

    /// Append a field and a text label to its left.
    ///
    /// The label is top-aligned with the field and ends `label_gap` points
    /// before the field's left edge. An empty label falls back to the
    /// unqualified field name. Returns the label fragment.
    pub fn layout_field_with_label(
        &mut self,
        field: &LayoutFieldOptions,
        label: &str,
        label_options: &TextOptions,
    ) -> Result<String, SnippetError> {
        let (_, field_bounds) = self.append_field(field)?;

        let font_size = label_options.font_size.unwrap_or(self.config.font_size);
        let width = label_options.width.unwrap_or(self.config.label_width);
        let height = label_options
            .height
            .unwrap_or_else(|| LayoutConfig::height_for(font_size));
        let mut bounds =
            LayoutEngine::label_bounds(&field_bounds, width, height, self.config.label_gap);
        if let Some(top) = label_options.top {
            bounds = Bounds::from_size(top, bounds.left, width, height);
        }
        if let Some(left) = label_options.left {
            bounds = Bounds::from_size(bounds.top, left, width, height);
        }

        let text = match label.trim() {
            "" => field.field.field.as_str(),
            text => text,
        };
        self.append_text(text, label_options, font_size, bounds)
    }

    /// Append a button that wraps a field and performs a script.
    ///
    /// The wrapped field is rendered at the button's local origin and is not
    /// appended on its own; only the button is placed in the layout.
    pub fn layout_field_button(
        &mut self,
        options: &LayoutFieldOptions,
        script: &ScriptBinding,
    ) -> Result<String, SnippetError> {
        self.expect_type(ElementType::LayoutObjectList)?;
        let (font, font_size, placement) = {
            let resolved = self.resolve_field(options, self.config.button_margin_top);
            (resolved.font.to_string(), resolved.font_size, resolved.placement)
        };

        let inner_placement = Placement {
            left: 0,
            ..placement
        };
        let inner_bounds = self.layout.place_nested(&inner_placement, 0);
        let inner = self.render_field(options, &font, font_size, inner_bounds, None)?;

        let bounds = self.layout.place(&placement);
        let bindings = bounds_bindings(bounds)
            .with("object_name", options.object_name.as_deref().unwrap_or(""))
            .with("script_id", &script.id)
            .with("script_name", script.name.as_deref().unwrap_or(""))
            .with(
                "script_parameter",
                script.parameter.as_deref().unwrap_or(""),
            )
            .with("field", inner.trim_end_matches('\n'));

        let xml = self.templates.render(GROUP_BUTTON, &bindings)?;
        debug!(field = %options.field, script_id = %script.id, %bounds, "appended field button");
        self.layout.record(bounds);
        self.append(xml.clone());
        Ok(xml)
    }

    /// Append a grid of fields, one per repetition of the base field.
    ///
    /// Cells fill column by column. Tooltip, object name, and script
    /// parameter are evaluated per repetition. Cells become buttons when a
    /// script id is given. Returns the serialized snippet.
    pub fn layout_field_grid(&mut self, options: &GridOptions) -> Result<String, SnippetError> {
        self.expect_type(ElementType::LayoutObjectList)?;
        let font_size = options.font_size.unwrap_or(self.config.font_size);
        let spec = GridSpec {
            rows: options.rows,
            cols: options.cols,
            rep_start: options.rep_start,
            cell_width: options.width.unwrap_or(self.config.field_width),
            cell_height: options
                .height
                .unwrap_or_else(|| LayoutConfig::height_for(font_size)),
            margin_top: options.margin_top.unwrap_or(self.config.grid_margin_top),
            margin_left: options.margin_left.unwrap_or(self.config.grid_margin_left),
        };
        let script_id = options.script_id.as_deref().filter(|id| !id.trim().is_empty());

        let cells = spec.cells()?;

        debug!(
            field = %options.field,
            rows = spec.rows.get(),
            cols = spec.cols,
            rep_start = spec.rep_start,
            rep_end = ?spec.rep_end(),
            buttons = script_id.is_some(),
            "building field grid"
        );

        for cell in cells {
            let cell_options = LayoutFieldOptions {
                field: options.field.with_repetition(cell.rep),
                tooltip: options.tooltip.as_ref().map(|t| t.evaluate(cell.rep)),
                font: options.font.clone(),
                font_size: Some(font_size),
                object_name: options.object_name.as_ref().map(|n| n.evaluate(cell.rep)),
                height: Some(spec.cell_height),
                width: Some(spec.cell_width),
                top: Some(cell.bounds.top),
                left: Some(cell.bounds.left),
                margin_top: None,
                padding: options.padding.clone(),
            };
            match script_id {
                Some(id) => {
                    let script = ScriptBinding {
                        id: id.to_string(),
                        name: options.script_name.clone(),
                        parameter: options
                            .script_parameter
                            .as_ref()
                            .map(|p| p.evaluate(cell.rep)),
                    };
                    self.layout_field_button(&cell_options, &script)?;
                }
                None => {
                    self.layout_field(&cell_options)?;
                }
            }
        }
        Ok(self.to_xml())
    }
}

fn bounds_bindings(bounds: Bounds) -> Bindings {
    Bindings::new()
        .with("top", bounds.top)
        .with("left", bounds.left)
        .with("bottom", bounds.bottom)
        .with("right", bounds.right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::Interpolation;
    use crate::layout::GridError;
    use crate::snippet::FieldRef;
    use std::num::NonZeroU32;

    fn field(name: &str) -> LayoutFieldOptions {
        LayoutFieldOptions::new(FieldRef::parse(name).unwrap())
    }

    #[test]
    fn test_layout_field_defaults() {
        let mut doc = Snippet::new();
        let xml = doc.layout_field(&field("Contacts::Company")).unwrap();
        assert!(xml.contains(r#"<Bounds top="0" left="0" bottom="22" right="120"/>"#));
        assert!(xml.contains("font-family: -fm-font-family(Verdana);"));
        assert!(xml.contains("font-size: 12;"));
        assert!(xml.contains("<Name>Contacts::Company</Name>"));
        assert!(!xml.contains("<ToolTip>"));
        assert!(!xml.contains("inner_border"));
    }

    #[test]
    fn test_fields_stack_vertically() {
        let mut doc = Snippet::new();
        doc.layout_field(&field("Contacts::Company")).unwrap();
        let second = doc
            .layout_field(&field("Contacts::Title").with_font("Helvetica", 14))
            .unwrap();
        assert!(second.contains(r#"<Bounds top="24" left="0" bottom="48" right="120"/>"#));
        assert!(second.contains("-fm-font-family(Helvetica)"));
    }

    #[test]
    fn test_tooltip_in_cdata() {
        let mut doc = Snippet::new();
        let xml = doc
            .layout_field(&field("Contacts::Company").with_tooltip(r#""Website: " & Contacts::Website"#))
            .unwrap();
        assert!(xml.contains(r#"<Calculation><![CDATA["Website: " & Contacts::Website]]></Calculation>"#));
    }

    #[test]
    fn test_label_left_of_field() {
        let mut doc = Snippet::new();
        doc.layout_field(&field("Contacts::Company")).unwrap();
        let label = doc
            .layout_field_with_label(&field("Contacts::Title"), "", &TextOptions::default())
            .unwrap();
        assert!(label.contains(r#"<Bounds top="24" left="-111" bottom="46" right="-11"/>"#));
        assert!(label.contains("<Data>Title</Data>"));
        assert!(label.contains("text-align: right;"));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_label_explicit_text() {
        let mut doc = Snippet::new();
        let label = doc
            .layout_field_with_label(
                &field("Contacts::Company"),
                "Company Name",
                &TextOptions::default(),
            )
            .unwrap();
        assert!(label.contains("<Data>Company Name</Data>"));
    }

    #[test]
    fn test_button_wraps_field_at_origin() {
        let mut doc = Snippet::new();
        doc.layout_field(&field("Contacts::Company")).unwrap();
        let xml = doc
            .layout_field_button(
                &field("Contacts::Title").with_object_name("btn"),
                &ScriptBinding::new("86").with_parameter(r#""go""#),
            )
            .unwrap();
        // Button follows the flow with the -1 button margin
        assert!(xml.contains(r#"<Bounds top="21" left="0" bottom="43" right="120"/>"#));
        // Wrapped field sits at the local origin
        assert!(xml.contains(r#"<Bounds top="0" left="0" bottom="22" right="120"/>"#));
        assert!(xml.contains(r#"<Script id="86" name=""/>"#));
        assert!(xml.contains(r#"<Calculation><![CDATA["go"]]></Calculation>"#));
        assert!(xml.contains(r#"<Object type="GroupButton" key="" LabelKey="0" name="btn""#));
        // Only the button is appended
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_grid_emits_one_fragment_per_rep() {
        let mut doc = Snippet::new();
        let mut options = GridOptions::new(
            FieldRef::parse("Contacts::Global").unwrap(),
            NonZeroU32::new(2).unwrap(),
            2,
        );
        options.width = Some(40);
        options.height = Some(20);
        options.margin_top = Some(0);
        options.margin_left = Some(0);
        options.tooltip = Some(Interpolation::parse(r#""Cell " & rep"#).unwrap());
        let xml = doc.layout_field_grid(&options).unwrap();

        assert_eq!(doc.len(), 4);
        assert!(doc.fragments()[0].contains("<Name>Contacts::Global[1]</Name>"));
        assert!(doc.fragments()[1].contains(r#"<Bounds top="20" left="0" bottom="40" right="40"/>"#));
        assert!(doc.fragments()[2].contains(r#"<Bounds top="0" left="40" bottom="20" right="80"/>"#));
        assert!(doc.fragments()[3].contains("<![CDATA[Cell 4]]>"));
        assert!(xml.contains(r#"enclosingRectBottom="40" enclosingRectRight="80""#));
    }

    #[test]
    fn test_grid_buttons_when_script_id_set() {
        let mut doc = Snippet::new();
        let mut options = GridOptions::new(
            FieldRef::parse("Contacts::Global").unwrap(),
            NonZeroU32::new(1).unwrap(),
            3,
        );
        options.script_id = Some("86".to_string());
        options.script_parameter = Some(Interpolation::parse("rep").unwrap());
        options.object_name = Some(Interpolation::parse(r#""cell_" & rep"#).unwrap());
        doc.layout_field_grid(&options).unwrap();

        assert_eq!(doc.len(), 3);
        for (i, fragment) in doc.fragments().iter().enumerate() {
            let rep = i + 1;
            assert!(fragment.contains(r#"type="GroupButton""#));
            assert!(fragment.contains(&format!("<![CDATA[{}]]>", rep)));
            assert!(fragment.contains(&format!(r#"name="cell_{}""#, rep)));
        }
    }

    #[test]
    fn test_grid_blank_script_id_means_plain_fields() {
        let mut doc = Snippet::new();
        let mut options = GridOptions::new(
            FieldRef::parse("Contacts::Global").unwrap(),
            NonZeroU32::new(2).unwrap(),
            1,
        );
        options.script_id = Some(" ".to_string());
        doc.layout_field_grid(&options).unwrap();
        assert!(doc.fragments().iter().all(|f| f.contains(r#"type="Field""#)));
    }

    #[test]
    fn test_grid_does_not_move_flow() {
        let mut doc = Snippet::new();
        let options = GridOptions::new(
            FieldRef::parse("Contacts::Global").unwrap(),
            NonZeroU32::new(3).unwrap(),
            1,
        );
        doc.layout_field_grid(&options).unwrap();
        assert_eq!(doc.layout().cursor().bound_bottom, None);
    }

    #[test]
    fn test_grid_overflow_appends_nothing() {
        let mut doc = Snippet::new();
        let mut options = GridOptions::new(
            FieldRef::parse("Contacts::Global").unwrap(),
            NonZeroU32::new(1).unwrap(),
            2,
        );
        options.rep_start = u32::MAX;
        let err = doc.layout_field_grid(&options).unwrap_err();
        assert!(matches!(
            err,
            SnippetError::Grid(GridError::RepetitionOverflow { .. })
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_text_object() {
        let mut doc = Snippet::new();
        let options = TextOptions {
            top: Some(5),
            left: Some(10),
            left_margin: Some(2),
            ..TextOptions::default()
        };
        let xml = doc.layout_text("Hello", &options).unwrap();
        assert!(xml.contains(r#"<Bounds top="5" left="10" bottom="27" right="130"/>"#));
        assert!(xml.contains("-fm-paragraph-margin-left: 2;"));
        assert!(!xml.contains("margin-right"));
        assert!(xml.contains("<Color>#000000</Color>"));
    }
}
