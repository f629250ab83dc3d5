//! Shared constants for the slide-to-verify gesture.
//!
//! Values are in logical pixels. The grab point is always the horizontal
//! centre of the handle, so there is a single width constant and no separate
//! half-width.

/// Width of the draggable handle, including its inset inside the track.
pub const SLIDER_HANDLE_WIDTH: f32 = 40.0;

/// Distance from the far edge within which a drag counts as complete.
///
/// With the default handle and a 300px track, any offset of 255px or more
/// verifies.
pub const SLIDER_SUCCESS_TOLERANCE: f32 = 5.0;

/// Visual padding between the track edge and the painted handle.
pub const SLIDER_HANDLE_INSET: f32 = 4.0;
