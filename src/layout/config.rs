//! Configuration for the layout engine

use serde::Deserialize;

use super::types::Justification;

/// Defaults applied to layout objects before rendering
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Font family for fields and labels
    pub font: String,

    /// Font size in points; default object height is this plus 10
    pub font_size: u32,

    /// Width of generated fields
    pub field_width: i64,

    /// Left edge of generated fields
    pub field_left: i64,

    /// Gap between stacked fields
    pub field_margin_top: i64,

    /// Gap between stacked buttons; -1 overlaps the borders
    pub button_margin_top: i64,

    /// Width of field labels
    pub label_width: i64,

    /// Space between a label's right edge and its field
    pub label_gap: i64,

    /// Width of free-standing text objects
    pub text_width: i64,

    pub text_color: String,

    pub justification: Justification,

    /// Vertical gap between grid cells
    pub grid_margin_top: i64,

    /// Horizontal gap between grid cells
    pub grid_margin_left: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font: "Verdana".to_string(),
            font_size: 12,
            field_width: 120,
            field_left: 0,
            field_margin_top: 2,
            button_margin_top: -1,
            label_width: 100,
            label_gap: 11,
            text_width: 120,
            text_color: "#000000".to_string(),
            justification: Justification::Right,
            grid_margin_top: -1,
            grid_margin_left: -1,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default object height for a font size
    pub fn height_for(font_size: u32) -> i64 {
        i64::from(font_size) + 10
    }

    /// Set the default font
    pub fn with_font(mut self, font: impl Into<String>, size: u32) -> Self {
        self.font = font.into();
        self.font_size = size;
        self
    }

    /// Set the default field width
    pub fn with_field_width(mut self, width: i64) -> Self {
        self.field_width = width;
        self
    }

    /// Set the gap between stacked fields
    pub fn with_field_margin_top(mut self, margin: i64) -> Self {
        self.field_margin_top = margin;
        self
    }

    /// Set label width and gap
    pub fn with_label(mut self, width: i64, gap: i64) -> Self {
        self.label_width = width;
        self.label_gap = gap;
        self
    }

    /// Set grid cell spacing
    pub fn with_grid_margins(mut self, top: i64, left: i64) -> Self {
        self.grid_margin_top = top;
        self.grid_margin_left = left;
        self
    }
}
