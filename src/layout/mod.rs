//! Layout engine for computing object positions
//!
//! This module owns the geometry of layout snippets: the vertical flow
//! cursor, label placement, and column-major grid tiling.

pub mod config;
pub mod engine;
pub mod grid;
pub mod types;

pub use config::LayoutConfig;
pub use engine::{GeometryCursor, LayoutEngine};
pub use grid::{cell_position, GridCell, GridError, GridSpec};
pub use types::*;
