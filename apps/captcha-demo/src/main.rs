use anyhow::Context;
use captcha_demo::{builtin_scenarios, run_scenario, DEFAULT_TRACK_WIDTH, TRACK_WIDTH_ENV};
use slidegate_ui::{Rect, SliderCaptchaSpec};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let track_width = match std::env::var(TRACK_WIDTH_ENV) {
        Ok(raw) => raw
            .trim()
            .parse::<f32>()
            .with_context(|| format!("{TRACK_WIDTH_ENV} must be a number, got {raw:?}"))?,
        Err(_) => DEFAULT_TRACK_WIDTH,
    };
    let track = Rect::new(0.0, 0.0, track_width, 40.0);
    let spec = SliderCaptchaSpec::default();

    println!("=== Slidegate slide-to-verify demo ===");
    println!("track {track_width}px, handle {}px", spec.handle_width);
    println!();

    for scenario in builtin_scenarios(track_width) {
        let report = run_scenario(&scenario, track, spec.clone())
            .with_context(|| format!("scenario {:?} failed", scenario.name))?;
        println!("{report}");
    }
    Ok(())
}
