//! Pure geometry for Slidegate
//!
//! Logical-pixel points, sizes and rectangles shared by the input layer,
//! the widgets and the platform adapters.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
