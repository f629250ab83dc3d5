//! Assertion helpers for robot tests.

use slidegate_ui::{SliderCaptcha, TrackGeometry};
use slidegate_ui_graphics::Rect;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a rectangle contains a point.
pub fn assert_rect_contains_point(rect: Rect, x: f32, y: f32, msg: &str) {
    assert!(
        rect.contains(x, y),
        "{}: point ({}, {}) not in rect {:?}",
        msg,
        x,
        y,
        rect
    );
}

/// Assert that the widget's offset lies inside `[0, max_offset]` for `track`.
///
/// A track narrower than the handle counts as `max_offset == 0`.
pub fn assert_offset_within_track(captcha: &SliderCaptcha, track: Rect, msg: &str) {
    let max_offset = TrackGeometry::from_rect(track)
        .max_offset(&captcha.spec().constraints())
        .max(0.0);
    let offset = captcha.offset();
    assert!(
        (0.0..=max_offset).contains(&offset),
        "{}: offset {} outside [0, {}]",
        msg,
        offset,
        max_offset
    );
}
