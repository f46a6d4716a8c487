//! Layout computation engine
//!
//! Objects are stacked top to bottom. Each object that does not carry an
//! explicit top is placed `margin_top` below the bottom of the previous
//! flowed object; the first flowed object sits at 0:
//!
//! ```text
//! top(n)    = bottom(n-1) + margin_top(n)
//! bottom(n) = top(n) + height(n)
//! ```
//!
//! An explicit top (a grid cell, or a field nested inside a button) is used
//! as-is and leaves the flow untouched.

use tracing::trace;

use super::types::{Bounds, Placement};

/// Running position of the vertical flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryCursor {
    pub bound_top: i64,
    /// `None` until the first flowed placement
    pub bound_bottom: Option<i64>,
    pub bound_left: i64,
}

impl GeometryCursor {
    /// Top of the next flowed object
    pub fn next_top(&self, margin_top: i64) -> i64 {
        match self.bound_bottom {
            None => 0,
            Some(bottom) => bottom.saturating_add(margin_top),
        }
    }

    fn advance(&mut self, top: i64, height: i64, left: i64) {
        self.bound_top = top;
        self.bound_bottom = Some(top.saturating_add(height));
        self.bound_left = left;
    }
}

/// Places layout objects and tracks the area they cover
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    cursor: GeometryCursor,
    extent: Option<Bounds>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> &GeometryCursor {
        &self.cursor
    }

    /// Smallest rectangle covering every recorded object
    pub fn extent(&self) -> Option<Bounds> {
        self.extent
    }

    /// Compute bounds for a placement, advancing the flow when no top is given
    pub fn place(&mut self, placement: &Placement) -> Bounds {
        let bounds = match placement.top {
            Some(top) => Bounds::from_size(top, placement.left, placement.width, placement.height),
            None => {
                let top = self.cursor.next_top(placement.margin_top);
                self.cursor.advance(top, placement.height, placement.left);
                Bounds::from_size(top, placement.left, placement.width, placement.height)
            }
        };
        trace!(%bounds, flowed = placement.top.is_none(), "placed object");
        bounds
    }

    /// Compute bounds without touching the flow, as if nested at `top`
    pub fn place_nested(&self, placement: &Placement, top: i64) -> Bounds {
        Bounds::from_size(top, placement.left, placement.width, placement.height)
    }

    /// Extend the covered area with an object that was appended to the document
    pub fn record(&mut self, bounds: Bounds) {
        self.extent = Some(match self.extent {
            Some(extent) => extent.union(&bounds),
            None => bounds,
        });
    }

    /// Bounds of a label sitting to the left of `field`, top-aligned with it
    pub fn label_bounds(field: &Bounds, width: i64, height: i64, gap: i64) -> Bounds {
        Bounds::from_size(
            field.top,
            field.left.saturating_sub(width).saturating_sub(gap),
            width,
            height,
        )
    }
}
