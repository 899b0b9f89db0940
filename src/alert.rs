//! Audible alert pattern sequencer.
//!
//! A finite step sequence re-entered from step 0 whenever the system state
//! changes. Excess (high) states play short high-pitched pulse bursts;
//! deficit (low) states play a single long low-pitched pulse. Both templates
//! repeat after a long rest. `Normal` silences the buzzer immediately.
//!
//! The sequencer is polled against a stored deadline: it performs at most
//! one step per scheduler pass and is a no-op otherwise.

use crate::state::SystemState;
use crate::time::{Duration, Instant};

/// Abstraction over the buzzer hardware.
///
/// Handle any hardware errors internally; these methods cannot fail.
pub trait Buzzer {
    /// Start sounding a tone at the given frequency, replacing any current
    /// tone.
    fn start_tone(&mut self, freq_hz: u32);

    /// Stop sounding.
    fn stop(&mut self);
}

// =============================================================================
// Pattern Templates
// =============================================================================

/// Pitch of the excess (high threshold) pulses.
const EXCESS_TONE_HZ: u32 = 2_000;

/// Pitch of the deficit (low threshold) pulse.
const DEFICIT_TONE_HZ: u32 = 400;

/// One step of an alert pattern: a tone (or silence) held for a duration.
#[derive(Clone, Copy)]
struct AlertStep {
    tone_hz: Option<u32>,
    hold: Duration,
}

const fn pulse(freq_hz: u32, millis: u64) -> AlertStep {
    AlertStep {
        tone_hz: Some(freq_hz),
        hold: Duration::from_millis(millis),
    }
}

const fn rest(millis: u64) -> AlertStep {
    AlertStep {
        tone_hz: None,
        hold: Duration::from_millis(millis),
    }
}

/// Three short high pulses, then a long rest.
const EXCESS_PATTERN: [AlertStep; 6] = [
    pulse(EXCESS_TONE_HZ, 100),
    rest(100),
    pulse(EXCESS_TONE_HZ, 100),
    rest(100),
    pulse(EXCESS_TONE_HZ, 100),
    rest(1_000),
];

/// One long low pulse, then a long rest.
const DEFICIT_PATTERN: [AlertStep; 2] = [pulse(DEFICIT_TONE_HZ, 500), rest(1_000)];

const fn pattern_for(state: SystemState) -> Option<&'static [AlertStep]> {
    if state.is_excess() {
        Some(&EXCESS_PATTERN)
    } else if state.is_deficit() {
        Some(&DEFICIT_PATTERN)
    } else {
        None
    }
}

// =============================================================================
// Sequencer
// =============================================================================

/// Deadline-polled driver for the alert buzzer.
pub struct AlertSequencer<B: Buzzer> {
    buzzer: B,
    pattern: Option<&'static [AlertStep]>,
    step: usize,
    deadline: Instant,
}

impl<B: Buzzer> AlertSequencer<B> {
    /// Create an idle, silent sequencer.
    pub const fn new(buzzer: B) -> Self {
        Self {
            buzzer,
            pattern: None,
            step: 0,
            deadline: Instant::EPOCH,
        }
    }

    /// Re-select the pattern for a new system state.
    ///
    /// Call on every state change. The matching template restarts from step
    /// 0; `Normal` forces the idle/silent state immediately.
    pub fn sync_state(&mut self, state: SystemState, now: Instant) {
        self.pattern = pattern_for(state);
        self.step = 0;
        match self.pattern {
            Some(pattern) => self.enter_step(pattern[0], now),
            None => self.buzzer.stop(),
        }
    }

    /// Advance at most one step if the current step's deadline has passed.
    /// Returns `true` if a step transition happened.
    pub fn service(&mut self, now: Instant) -> bool {
        let Some(pattern) = self.pattern else {
            return false;
        };
        if now < self.deadline {
            return false;
        }
        self.step = (self.step + 1) % pattern.len();
        self.enter_step(pattern[self.step], now);
        true
    }

    /// True while a non-idle pattern is selected.
    pub const fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    fn enter_step(&mut self, step: AlertStep, now: Instant) {
        match step.tone_hz {
            Some(freq) => self.buzzer.start_tone(freq),
            None => self.buzzer.stop(),
        }
        self.deadline = now + step.hold;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
