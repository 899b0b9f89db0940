//! Light-matrix animation sequencer.
//!
//! Drives a 5x5 WS2812 matrix through a [`PixelStrip`] implementation, one
//! atomic frame per write. States fall into two classes:
//!
//! - **Static** states render a fixed bitmap once, only when the state
//!   changed since the previous call. Re-rendering the same bitmap twice is
//!   suppressed.
//! - **Continuous** states (the falling-rain animation for `TempLow` and
//!   `HumidityHigh`) re-render every animation frame and carry per-column
//!   particle state across frames. The frame interval is enforced here, not
//!   by the caller; early calls are no-ops.

use embedded_graphics::pixelcolor::Rgb888;

use crate::config::MATRIX_FRAME_INTERVAL;
use crate::state::SystemState;
use crate::time::Instant;

/// Matrix rows.
pub const MATRIX_ROWS: usize = 5;

/// Matrix columns.
pub const MATRIX_COLS: usize = 5;

/// Total pixels per frame.
pub const PIXEL_COUNT: usize = MATRIX_ROWS * MATRIX_COLS;

/// Probability of spawning a rain particle in an empty column, per frame,
/// expressed in tenths (2 => 20%).
const RAIN_SPAWN_TENTHS: u32 = 2;

/// Abstraction over the LED-strip hardware.
///
/// Implementations receive a complete frame and commit it as one write.
/// Handle any hardware errors internally; this method cannot fail.
pub trait PixelStrip {
    fn write_frame(&mut self, frame: &[Rgb888; PIXEL_COUNT]);
}

// =============================================================================
// Patterns and Colors
// =============================================================================

// 5x5 bitmaps, one byte per row, bit 4 = leftmost column.

/// "!" pattern for alert states.
const PATTERN_ALERT: [u8; MATRIX_ROWS] = [0b00100, 0b00100, 0b00100, 0b00000, 0b00100];

/// "X" pattern for the low-pressure state.
const PATTERN_CROSS: [u8; MATRIX_ROWS] = [0b10001, 0b01010, 0b00100, 0b01010, 0b10001];

/// Centered 3x3 square for the calm states.
const PATTERN_SQUARE: [u8; MATRIX_ROWS] = [0b00000, 0b01110, 0b01110, 0b01110, 0b00000];

const COLOR_OFF: Rgb888 = Rgb888::new(0, 0, 0);
const COLOR_GREEN: Rgb888 = Rgb888::new(0, 150, 0);
const COLOR_RED: Rgb888 = Rgb888::new(190, 0, 0);
const COLOR_BLUE: Rgb888 = Rgb888::new(0, 0, 200);
const COLOR_VIOLET: Rgb888 = Rgb888::new(130, 0, 130);
const COLOR_AMBER: Rgb888 = Rgb888::new(255, 140, 0);
const COLOR_WHITE: Rgb888 = Rgb888::new(255, 255, 255);
const COLOR_SLATE: Rgb888 = Rgb888::new(40, 35, 35);

/// What one state renders as.
#[derive(Clone, Copy)]
enum FramePlan {
    Static {
        pattern: &'static [u8; MATRIX_ROWS],
        color: Rgb888,
    },
    Rain {
        color: Rgb888,
    },
}

const fn plan_for(state: SystemState) -> FramePlan {
    match state {
        SystemState::Normal => FramePlan::Static {
            pattern: &PATTERN_SQUARE,
            color: COLOR_GREEN,
        },
        SystemState::TempHigh => FramePlan::Static {
            pattern: &PATTERN_ALERT,
            color: COLOR_RED,
        },
        SystemState::TempLow => FramePlan::Rain { color: COLOR_BLUE },
        SystemState::HumidityHigh => FramePlan::Rain { color: COLOR_VIOLET },
        SystemState::HumidityLow => FramePlan::Static {
            pattern: &PATTERN_ALERT,
            color: COLOR_AMBER,
        },
        SystemState::PressureHigh => FramePlan::Static {
            pattern: &PATTERN_SQUARE,
            color: COLOR_WHITE,
        },
        SystemState::PressureLow => FramePlan::Static {
            pattern: &PATTERN_CROSS,
            color: COLOR_SLATE,
        },
    }
}

// =============================================================================
// Sequencer
// =============================================================================

/// Xorshift generator for the rain spawn rolls. The corpus carries no PRNG
/// crate and the animation needs no statistical quality, only variety.
struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    const fn new(seed: u32) -> Self {
        // A zero state would be a fixed point
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Frame-by-frame driver for the light matrix.
pub struct MatrixSequencer<S: PixelStrip> {
    strip: S,
    last_state: Option<SystemState>,
    /// Particle position per column: 0 = none, 1..=5 = row + 1.
    drops: [u8; MATRIX_COLS],
    last_frame_at: Option<Instant>,
    rng: XorShift32,
}

impl<S: PixelStrip> MatrixSequencer<S> {
    /// Create a sequencer. Nothing is written until the first `service`.
    pub const fn new(strip: S, seed: u32) -> Self {
        Self {
            strip,
            last_state: None,
            drops: [0; MATRIX_COLS],
            last_frame_at: None,
            rng: XorShift32::new(seed),
        }
    }

    /// Advance the matrix for the current state. Returns `true` if a frame
    /// was written to the strip.
    ///
    /// Static states write only on state change; continuous states write at
    /// most once per [`MATRIX_FRAME_INTERVAL`]. Animation state resets
    /// whenever the system state changes.
    pub fn service(&mut self, state: SystemState, now: Instant) -> bool {
        let changed = self.last_state != Some(state);
        if changed {
            self.last_state = Some(state);
            self.drops = [0; MATRIX_COLS];
            self.last_frame_at = None;
        }

        match plan_for(state) {
            FramePlan::Static { pattern, color } => {
                if !changed {
                    return false;
                }
                self.strip.write_frame(&pattern_frame(pattern, color));
                true
            }
            FramePlan::Rain { color } => {
                if let Some(last) = self.last_frame_at
                    && now.duration_since(last) < MATRIX_FRAME_INTERVAL
                {
                    return false;
                }
                self.last_frame_at = Some(now);
                let frame = self.rain_frame(color);
                self.strip.write_frame(&frame);
                true
            }
        }
    }

    /// Blank the matrix and forget the rendered state.
    pub fn clear(&mut self) {
        self.strip.write_frame(&[COLOR_OFF; PIXEL_COUNT]);
        self.last_state = None;
        self.drops = [0; MATRIX_COLS];
        self.last_frame_at = None;
    }

    /// Render one rain frame and advance the particles.
    fn rain_frame(&mut self, color: Rgb888) -> [Rgb888; PIXEL_COUNT] {
        let mut frame = [COLOR_OFF; PIXEL_COUNT];

        for col in 0..MATRIX_COLS {
            if self.drops[col] > 0 {
                let row = (self.drops[col] - 1) as usize;
                frame[pixel_index(row, col)] = color;
            }
        }

        for col in 0..MATRIX_COLS {
            if self.drops[col] > 0 {
                self.drops[col] += 1;
                if self.drops[col] as usize > MATRIX_ROWS {
                    self.drops[col] = 0;
                }
            } else if self.rng.next() % 10 < RAIN_SPAWN_TENTHS {
                self.drops[col] = 1;
            }
        }

        frame
    }
}

/// Expand a row-bitmap pattern into a full frame.
fn pattern_frame(pattern: &[u8; MATRIX_ROWS], color: Rgb888) -> [Rgb888; PIXEL_COUNT] {
    let mut frame = [COLOR_OFF; PIXEL_COUNT];
    for row in 0..MATRIX_ROWS {
        for col in 0..MATRIX_COLS {
            if pattern[row] & (1 << (MATRIX_COLS - 1 - col)) != 0 {
                frame[pixel_index(row, col)] = color;
            }
        }
    }
    frame
}

/// Map a logical (row, col) with row 0 at the top to the physical pixel
/// index. The matrix is mounted upside down, so rows are flipped.
const fn pixel_index(row: usize, col: usize) -> usize {
    (MATRIX_ROWS - 1 - row) * MATRIX_COLS + col
}

// =============================================================================
// Unit Tests
// =============================================================================
