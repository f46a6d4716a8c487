//! Core types for the layout engine

use std::fmt;

use serde::Deserialize;

/// An absolute rectangle in layout points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub top: i64,
    pub left: i64,
    pub bottom: i64,
    pub right: i64,
}

impl Bounds {
    pub fn new(top: i64, left: i64, bottom: i64, right: i64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Build from an origin and a size; `bottom = top + height`, `right = left + width`.
    ///
    /// Edges saturate at the `i64` range.
    pub fn from_size(top: i64, left: i64, width: i64, height: i64) -> Self {
        Self::new(top, left, top.saturating_add(height), left.saturating_add(width))
    }

    pub fn width(&self) -> i64 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i64 {
        self.bottom.saturating_sub(self.top)
    }

    /// Compute the union of two rectangles (smallest rectangle containing both)
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.top.min(other.top),
            self.left.min(other.left),
            self.bottom.max(other.bottom),
            self.right.max(other.right),
        )
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top={} left={} bottom={} right={}",
            self.top, self.left, self.bottom, self.right
        )
    }
}

/// Horizontal text alignment, keyed by FileMaker's numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum Justification {
    Left = 1,
    Center = 2,
    Right = 3,
    Full = 4,
}

impl Justification {
    /// CSS `text-align` keyword
    pub fn css(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
            Justification::Full => "justify",
        }
    }
}

impl TryFrom<u8> for Justification {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Justification::Left),
            2 => Ok(Justification::Center),
            3 => Ok(Justification::Right),
            4 => Ok(Justification::Full),
            other => Err(format!("unknown justification code {} (expected 1-4)", other)),
        }
    }
}

/// A placement request handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Explicit top; `None` follows the vertical flow
    pub top: Option<i64>,
    pub left: i64,
    pub width: i64,
    pub height: i64,
    /// Gap above this object when following the flow
    pub margin_top: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size() {
        let b = Bounds::from_size(10, 5, 120, 22);
        assert_eq!(b, Bounds::new(10, 5, 32, 125));
        assert_eq!(b.width(), 120);
        assert_eq!(b.height(), 22);
    }

    #[test]
    fn test_from_size_saturates() {
        let b = Bounds::from_size(10, -5, i64::MAX, i64::MAX);
        assert_eq!(b, Bounds::new(10, -5, i64::MAX, i64::MAX));
    }

    #[test]
    fn test_union() {
        let a = Bounds::from_size(0, 0, 10, 10);
        let b = Bounds::from_size(20, -111, 100, 22);
        assert_eq!(a.union(&b), Bounds::new(0, -111, 42, 10));
    }

    #[test]
    fn test_justification_codes() {
        assert_eq!(Justification::try_from(3), Ok(Justification::Right));
        assert_eq!(Justification::Right.css(), "right");
        assert!(Justification::try_from(9).is_err());
    }
}
