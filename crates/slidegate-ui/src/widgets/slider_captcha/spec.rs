use slidegate_foundation::gesture_constants::{
    SLIDER_HANDLE_INSET, SLIDER_HANDLE_WIDTH, SLIDER_SUCCESS_TOLERANCE,
};
use slidegate_foundation::DragConstraints;
use std::fmt;

/// Configuration for a [`SliderCaptcha`](super::SliderCaptcha).
///
/// ```
/// use slidegate_ui::SliderCaptchaSpec;
///
/// let spec = SliderCaptchaSpec::default()
///     .with_handle_width(48.0)
///     .with_labels("Drag to continue", "Done");
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SliderCaptchaSpec {
    pub handle_width: f32,
    pub success_tolerance: f32,
    pub handle_inset: f32,
    pub hint_label: String,
    pub verified_label: String,
}

impl Default for SliderCaptchaSpec {
    fn default() -> Self {
        Self {
            handle_width: SLIDER_HANDLE_WIDTH,
            success_tolerance: SLIDER_SUCCESS_TOLERANCE,
            handle_inset: SLIDER_HANDLE_INSET,
            hint_label: "Slide to verify".to_string(),
            verified_label: "Verified".to_string(),
        }
    }
}

impl SliderCaptchaSpec {
    pub fn with_handle_width(mut self, width: f32) -> Self {
        self.handle_width = width;
        self
    }

    pub fn with_success_tolerance(mut self, tolerance: f32) -> Self {
        self.success_tolerance = tolerance;
        self
    }

    pub fn with_handle_inset(mut self, inset: f32) -> Self {
        self.handle_inset = inset;
        self
    }

    pub fn with_labels(mut self, hint: impl Into<String>, verified: impl Into<String>) -> Self {
        self.hint_label = hint.into();
        self.verified_label = verified.into();
        self
    }

    pub fn constraints(&self) -> DragConstraints {
        DragConstraints::new(self.handle_width, self.success_tolerance)
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        if !self.handle_width.is_finite() || self.handle_width <= 0.0 {
            return Err(SpecError::InvalidHandleWidth(self.handle_width));
        }
        if !self.success_tolerance.is_finite() || self.success_tolerance < 0.0 {
            return Err(SpecError::InvalidTolerance(self.success_tolerance));
        }
        // The painted handle must keep a positive width after insetting both sides.
        if !self.handle_inset.is_finite()
            || self.handle_inset < 0.0
            || self.handle_inset * 2.0 >= self.handle_width
        {
            return Err(SpecError::InvalidInset {
                inset: self.handle_inset,
                handle_width: self.handle_width,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecError {
    InvalidHandleWidth(f32),
    InvalidTolerance(f32),
    InvalidInset { inset: f32, handle_width: f32 },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::InvalidHandleWidth(width) => {
                write!(f, "handle width must be positive and finite, got {width}")
            }
            SpecError::InvalidTolerance(tolerance) => {
                write!(f, "success tolerance must be non-negative and finite, got {tolerance}")
            }
            SpecError::InvalidInset {
                inset,
                handle_width,
            } => write!(
                f,
                "handle inset {inset} does not fit a handle {handle_width} wide"
            ),
        }
    }
}

impl std::error::Error for SpecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_valid() {
        let spec = SliderCaptchaSpec::default();
        assert_eq!(spec.validate(), Ok(()));
        assert_eq!(spec.constraints(), DragConstraints::new(40.0, 5.0));
        assert_eq!(spec.hint_label, "Slide to verify");
        assert_eq!(spec.verified_label, "Verified");
    }

    #[test]
    fn rejects_bad_handle_width() {
        for width in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let spec = SliderCaptchaSpec::default().with_handle_width(width);
            assert!(matches!(
                spec.validate(),
                Err(SpecError::InvalidHandleWidth(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_tolerance() {
        let spec = SliderCaptchaSpec::default().with_success_tolerance(-1.0);
        assert_eq!(spec.validate(), Err(SpecError::InvalidTolerance(-1.0)));
        let zero = SliderCaptchaSpec::default().with_success_tolerance(0.0);
        assert_eq!(zero.validate(), Ok(()));
    }

    #[test]
    fn rejects_inset_swallowing_handle() {
        let spec = SliderCaptchaSpec::default().with_handle_inset(20.0);
        assert_eq!(
            spec.validate(),
            Err(SpecError::InvalidInset {
                inset: 20.0,
                handle_width: 40.0
            })
        );
        assert_eq!(
            spec.validate().unwrap_err().to_string(),
            "handle inset 20 does not fit a handle 40 wide"
        );
    }
}
