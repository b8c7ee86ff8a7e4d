//! Rotary encoder with push button.
//!
//! Edge producers (an interrupt handler on hardware, key events on the
//! desktop) only touch atomics through `&self`. The control loop calls
//! `drain` once per iteration and turns the sample into commands.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::Command;

const NEVER: u64 = u64::MAX;

pub struct RotaryEncoder {
    origin: Instant,
    steps: AtomicI32,
    pressed: AtomicBool,
    last_step_ms: AtomicU64,
    last_press_ms: AtomicU64,
    step_debounce_ms: u64,
    press_debounce_ms: u64,
}

/// Everything recorded since the previous drain.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EncoderSample {
    /// Net detents; positive is clockwise.
    pub steps: i32,
    pub pressed: bool,
}

impl EncoderSample {
    /// Clockwise turns raise the volume, counter-clockwise lower it, and the
    /// button toggles play/pause.
    pub fn commands(&self) -> Vec<Command> {
        let turn = if self.steps >= 0 {
            Command::VolumeUp
        } else {
            Command::VolumeDown
        };
        let mut cmds = vec![turn; self.steps.unsigned_abs() as usize];
        if self.pressed {
            cmds.push(Command::TogglePlayPause);
        }
        cmds
    }
}

impl RotaryEncoder {
    pub fn new(step_debounce: Duration, press_debounce: Duration) -> Self {
        Self {
            origin: Instant::now(),
            steps: AtomicI32::new(0),
            pressed: AtomicBool::new(false),
            last_step_ms: AtomicU64::new(NEVER),
            last_press_ms: AtomicU64::new(NEVER),
            step_debounce_ms: step_debounce.as_millis() as u64,
            press_debounce_ms: press_debounce.as_millis() as u64,
        }
    }

    fn millis(&self, at: Instant) -> u64 {
        at.saturating_duration_since(self.origin).as_millis() as u64
    }

    /// Accept `now` unless the previous accepted edge is closer than `window`.
    fn debounce(last: &AtomicU64, now: u64, window: u64) -> bool {
        let prev = last.load(Ordering::Relaxed);
        if prev != NEVER && now.saturating_sub(prev) < window {
            return false;
        }
        last.store(now, Ordering::Relaxed);
        true
    }

    pub fn record_step(&self, clockwise: bool) -> bool {
        self.record_step_at(clockwise, Instant::now())
    }

    pub fn record_step_at(&self, clockwise: bool, at: Instant) -> bool {
        let now = self.millis(at);
        if !Self::debounce(&self.last_step_ms, now, self.step_debounce_ms) {
            return false;
        }
        self.steps
            .fetch_add(if clockwise { 1 } else { -1 }, Ordering::AcqRel);
        true
    }

    pub fn record_press(&self) -> bool {
        self.record_press_at(Instant::now())
    }

    pub fn record_press_at(&self, at: Instant) -> bool {
        let now = self.millis(at);
        if !Self::debounce(&self.last_press_ms, now, self.press_debounce_ms) {
            return false;
        }
        self.pressed.store(true, Ordering::Release);
        true
    }

    pub fn drain(&self) -> EncoderSample {
        EncoderSample {
            steps: self.steps.swap(0, Ordering::AcqRel),
            pressed: self.pressed.swap(false, Ordering::AcqRel),
        }
    }
}
