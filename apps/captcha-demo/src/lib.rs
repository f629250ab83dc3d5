//! Scripted slide-to-verify sessions for the demo binary.
//!
//! Each [`Scenario`] is a list of host-level input steps replayed against a
//! fresh widget wired to a [`VerificationGate`], the way a login form would
//! gate its submit button.

use anyhow::bail;
use slidegate_ui::{
    DragPhase, GlobalPointerListeners, PointerEvent, PointerEventKind, Rect, SharedBounds,
    SliderCaptcha, SliderCaptchaSpec, VerificationGate,
};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

pub const TRACK_WIDTH_ENV: &str = "SLIDEGATE_TRACK_WIDTH";
pub const DEFAULT_TRACK_WIDTH: f32 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    PressHandle,
    /// Window-level move that puts the handle at this offset on the current track.
    MoveToOffset(f32),
    Release,
    ResizeTrack(f32),
}

#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: &'static str,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub name: &'static str,
    pub phase: DragPhase,
    pub offset: f32,
    pub completions: u32,
    pub listeners: usize,
    pub submit_allowed: bool,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<28} phase={:<8} offset={:>6.1} callbacks={} listeners={} submit={}",
            self.name,
            format!("{:?}", self.phase),
            self.offset,
            self.completions,
            self.listeners,
            if self.submit_allowed {
                "enabled"
            } else {
                "blocked"
            }
        )
    }
}

/// Scenarios sized for a track `track_width` wide with the default handle.
pub fn builtin_scenarios(track_width: f32) -> Vec<Scenario> {
    let max_offset = track_width - SliderCaptchaSpec::default().handle_width;
    let glide = |to: f32| -> Vec<Step> {
        (1..=8)
            .map(|i| Step::MoveToOffset(to * i as f32 / 8.0))
            .collect()
    };

    let mut complete = vec![Step::PressHandle];
    complete.extend(glide(max_offset));
    complete.push(Step::Release);

    let mut halfway = vec![Step::PressHandle];
    halfway.extend(glide(max_offset / 2.0));
    halfway.push(Step::Release);

    let mut retry = halfway.clone();
    retry.extend(complete.iter().copied());

    let mut reflow = vec![Step::PressHandle, Step::MoveToOffset(max_offset * 0.8)];
    reflow.push(Step::ResizeTrack(track_width * 0.8));
    reflow.push(Step::MoveToOffset(max_offset * 0.8));
    reflow.push(Step::Release);

    let mut press_after_success = complete.clone();
    press_after_success.push(Step::PressHandle);
    press_after_success.extend(glide(10.0));
    press_after_success.push(Step::Release);

    vec![
        Scenario {
            name: "complete slide",
            steps: complete,
        },
        Scenario {
            name: "release halfway",
            steps: halfway,
        },
        Scenario {
            name: "retry after short release",
            steps: retry,
        },
        Scenario {
            name: "track shrinks mid-drag",
            steps: reflow,
        },
        Scenario {
            name: "press after success",
            steps: press_after_success,
        },
    ]
}

pub fn run_scenario(
    scenario: &Scenario,
    track: Rect,
    spec: SliderCaptchaSpec,
) -> anyhow::Result<Report> {
    let listeners = GlobalPointerListeners::new();
    let bounds = SharedBounds::new(track);
    let gate = VerificationGate::new();
    let completions = Rc::new(Cell::new(0));
    let grab = spec.constraints().grab_offset();

    let on_success = {
        let completions = Rc::clone(&completions);
        let open_gate = gate.on_success();
        move || {
            completions.set(completions.get() + 1);
            open_gate();
        }
    };
    let captcha = SliderCaptcha::with_spec(
        spec,
        Rc::new(listeners.clone()),
        Rc::new(bounds.clone()),
        on_success,
    )?;

    let mut cursor_y = track.center().y;
    for step in &scenario.steps {
        match *step {
            Step::PressHandle => {
                let Some(handle) = captcha.handle_rect() else {
                    bail!("track is not laid out");
                };
                let center = handle.center();
                cursor_y = center.y;
                let started =
                    captcha.pointer_down(&PointerEvent::at(PointerEventKind::Down, center.x, center.y));
                log::debug!("{}: press handle -> drag started: {started}", scenario.name);
            }
            Step::MoveToOffset(offset) => {
                let Some(current) = bounds.get() else {
                    bail!("track is not laid out");
                };
                let x = current.x + grab + offset;
                listeners.dispatch(&PointerEvent::at(PointerEventKind::Move, x, cursor_y));
            }
            Step::Release => {
                listeners.dispatch(&PointerEvent::at(PointerEventKind::Up, 0.0, cursor_y));
            }
            Step::ResizeTrack(width) => {
                log::debug!("{}: track resized to {width}px", scenario.name);
                bounds.set_width(width);
            }
        }
    }

    Ok(Report {
        name: scenario.name,
        phase: captcha.phase(),
        offset: captcha.offset(),
        completions: completions.get(),
        listeners: listeners.listener_count(),
        submit_allowed: gate.require().is_ok(),
    })
}
