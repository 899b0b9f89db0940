//! Tri-color indicator LED.
//!
//! One RGB LED with three on/off channels mirrors the system state at a
//! glance. The scheduler rewrites it only when the state changes.

use crate::state::SystemState;

/// Abstraction over the indicator hardware (three GPIO channels).
///
/// Handle any hardware errors internally; this method cannot fail.
pub trait StatusLed {
    fn set_rgb(&mut self, r: bool, g: bool, b: bool);
}

/// Channel levels for a system state.
pub const fn state_rgb(state: SystemState) -> (bool, bool, bool) {
    match state {
        SystemState::Normal => (false, true, false),       // green
        SystemState::TempHigh => (true, false, false),     // red
        SystemState::TempLow => (false, false, true),      // blue
        SystemState::HumidityHigh => (true, false, true),  // magenta
        SystemState::HumidityLow => (true, true, false),   // yellow
        SystemState::PressureHigh => (true, true, true),   // white
        SystemState::PressureLow => (false, true, true),   // cyan
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_is_green() {
        assert_eq!(state_rgb(SystemState::Normal), (false, true, false));
    }

    #[test]
    fn test_every_state_lights_something() {
        for raw in 0..7 {
            let (r, g, b) = state_rgb(SystemState::from_u8(raw));
            assert!(r || g || b);
        }
    }

    #[test]
    fn test_states_are_distinguishable() {
        for a in 0..7u8 {
            for b in (a + 1)..7 {
                assert_ne!(
                    state_rgb(SystemState::from_u8(a)),
                    state_rgb(SystemState::from_u8(b)),
                    "states {a} and {b} share an indicator color"
                );
            }
        }
    }
}
