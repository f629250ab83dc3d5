pub mod slider_captcha;

pub use slider_captcha::{
    HandleIcon, SliderCaptcha, SliderCaptchaSpec, SliderCaptchaVisuals, SpecError,
};
