//! Grid tiling for repeating fields
//!
//! Repetitions fill a grid column-major: a whole column is filled top to
//! bottom before the next column starts. For the `n`th generated repetition
//! (1-based) in a grid of `R` rows:
//!
//! ```text
//! col = ceil(n / R)
//! row = n mod R, or R when that is 0
//! ```

use std::num::NonZeroU32;

use thiserror::Error;

use super::types::Bounds;

/// A grid whose repetitions or coordinates do not fit the number types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("{rows} rows by {cols} columns is too many cells")]
    TooManyCells { rows: u32, cols: u32 },

    #[error("repetitions starting at {rep_start} run past {}", u32::MAX)]
    RepetitionOverflow { rep_start: u32, cells: u32 },

    #[error("grid is too tall to place")]
    HeightOverflow,

    #[error("grid is too wide to place")]
    WidthOverflow,
}

/// Shape and spacing of a field grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub rows: NonZeroU32,
    pub cols: u32,
    /// Repetition number of the top-left cell
    pub rep_start: u32,
    pub cell_width: i64,
    pub cell_height: i64,
    pub margin_top: i64,
    pub margin_left: i64,
}

/// One generated cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub rep: u32,
    /// 1-based row
    pub row: u32,
    /// 1-based column
    pub col: u32,
    pub bounds: Bounds,
}

/// Row and column (both 1-based) of the `ordinal`th repetition
pub fn cell_position(ordinal: u32, rows: NonZeroU32) -> (u32, u32) {
    let r = rows.get();
    let col = ordinal.div_ceil(r);
    let row = match ordinal % r {
        0 => r,
        row => row,
    };
    (row, col)
}

impl GridSpec {
    /// Number of cells the grid produces, or `None` when it overflows
    pub fn len(&self) -> Option<u32> {
        self.rows.get().checked_mul(self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.cols == 0
    }

    /// Last repetition number generated
    pub fn rep_end(&self) -> Option<u32> {
        let len = self.len()?;
        if len == 0 {
            return None;
        }
        self.rep_start.checked_add(len - 1)
    }

    /// Offset of the `index`th (0-based) row or column along one axis
    fn offset(index: u32, size: i64, margin: i64) -> Option<i64> {
        i64::from(index).checked_mul(size.checked_add(margin)?)
    }

    /// Check that every repetition number and every cell edge fits
    pub fn validate(&self) -> Result<(), GridError> {
        let cells = self.len().ok_or(GridError::TooManyCells {
            rows: self.rows.get(),
            cols: self.cols,
        })?;
        if cells == 0 {
            return Ok(());
        }
        if self.rep_end().is_none() {
            return Err(GridError::RepetitionOverflow {
                rep_start: self.rep_start,
                cells,
            });
        }
        // Offsets are linear in the index, so the last row and column bound the rest
        Self::offset(self.rows.get() - 1, self.cell_height, self.margin_top)
            .and_then(|top| top.checked_add(self.cell_height))
            .ok_or(GridError::HeightOverflow)?;
        Self::offset(self.cols - 1, self.cell_width, self.margin_left)
            .and_then(|left| left.checked_add(self.cell_width))
            .ok_or(GridError::WidthOverflow)?;
        Ok(())
    }

    /// Cells in repetition order
    pub fn cells(&self) -> Result<impl Iterator<Item = GridCell> + '_, GridError> {
        self.validate()?;
        let count = self.len().unwrap_or(0);
        Ok((1..=count).map(move |ordinal| {
            let (row, col) = cell_position(ordinal, self.rows);
            let left = i64::from(col - 1) * (self.cell_width + self.margin_left);
            let top = i64::from(row - 1) * (self.cell_height + self.margin_top);
            GridCell {
                rep: self.rep_start + (ordinal - 1),
                row,
                col,
                bounds: Bounds::from_size(top, left, self.cell_width, self.cell_height),
            }
        }))
    }
}
