//! Layout engines: pure transformations from a [`Score`](crate::Score)
//! into positioned geometry.
//!
//! Both engines walk the same flattened note stream (parts concatenated,
//! not aligned in time) and wrap onto new rows when the canvas width is
//! used up. Nothing here draws; the renderers consume these structures.

pub mod circles;
pub mod position;
pub mod staff;

pub use circles::{compute_circles_layout, CircleEntry, CircleRow, CirclesLayout, CirclesLayoutConfig, SubCircle};
pub use position::{staff_position, REST_POSITION, STAFF_BOTTOM_POSITION, STAFF_TOP_POSITION};
pub use staff::{compute_staff_layout, NoteLayout, StaffLayout, StaffLayoutConfig, StaffSystem};

/// Canvas width used when the caller does not supply one.
pub const DEFAULT_WIDTH: f64 = 800.0;

/// Resolve an optional caller-supplied width to a usable one.
pub(crate) fn resolve_width(width: Option<f64>) -> f64 {
    match width {
        Some(w) if w > 0.0 && w.is_finite() => w,
        _ => DEFAULT_WIDTH,
    }
}
