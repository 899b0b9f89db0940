//! Shared single-writer, multi-reader state cells.
//!
//! Interrupt handlers, the scheduler and the telemetry transport all touch a
//! small set of scalars: latest readings, the derived system state, the
//! classification thresholds, calibration offsets, per-chart zoom factors,
//! the active page and the redraw flag. Each field has exactly one writer at
//! a time and any number of readers, so plain relaxed atomics are sufficient:
//! no locks, no critical sections. Composite invariants spanning several
//! fields are deliberately not atomic and must not be relied upon across a
//! tick boundary.
//!
//! Floats are stored as their bit patterns in `AtomicU32`.
//!
//! Configuration is volatile: every restart begins from the compiled-in
//! defaults.

use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::config::{ZOOM_MAX, ZOOM_MIN};
use crate::pages::{CHART_COUNT, Page};
use crate::state::{Metric, Reading, SystemState, Thresholds};

// =============================================================================
// Cell Primitive
// =============================================================================

/// One `f32` stored as bits in an `AtomicU32`.
struct F32Cell(AtomicU32);

impl F32Cell {
    const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

// =============================================================================
// Configuration Payloads
// =============================================================================

/// Additive correction applied to raw sensor values before classification
/// and storage. Externally configurable, volatile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationOffsets {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
}

impl CalibrationOffsets {
    /// No correction.
    pub const ZERO: Self = Self {
        temperature: 0.0,
        humidity: 0.0,
        pressure: 0.0,
    };
}

/// Rejected external configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A threshold band with `min >= max`.
    InvertedRange {
        metric: &'static str,
    },
    /// A NaN or infinite value.
    NonFinite {
        metric: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedRange { metric } => {
                write!(f, "{metric} threshold minimum is not below its maximum")
            }
            Self::NonFinite { metric } => {
                write!(f, "{metric} value is not finite")
            }
        }
    }
}

/// Read-only view served to the telemetry transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub reading: Reading,
    pub state: SystemState,
    pub thresholds: Thresholds,
}

// =============================================================================
// Shared State
// =============================================================================

/// The cell block. One instance lives for the process lifetime; every
/// component receives a reference at construction.
pub struct SharedState {
    // Latest calibrated reading, written by the scheduler
    temperature: F32Cell,
    humidity: F32Cell,
    pressure: F32Cell,

    // Derived state, written by the scheduler
    state: AtomicU8,

    // Classification boundary, written by the telemetry transport
    temp_min: F32Cell,
    temp_max: F32Cell,
    humidity_min: F32Cell,
    humidity_max: F32Cell,
    pressure_min: F32Cell,
    pressure_max: F32Cell,

    // Calibration, written by the telemetry transport
    offset_temperature: F32Cell,
    offset_humidity: F32Cell,
    offset_pressure: F32Cell,

    // UI intents, written by the input path
    zoom: [F32Cell; CHART_COUNT],
    page: AtomicU8,
    redraw: AtomicBool,
}

impl SharedState {
    /// Cells initialized to the compiled-in defaults.
    pub const fn new() -> Self {
        let defaults = Thresholds::DEFAULT;
        Self {
            temperature: F32Cell::new(0.0),
            humidity: F32Cell::new(0.0),
            pressure: F32Cell::new(0.0),
            state: AtomicU8::new(SystemState::Normal.as_u8()),
            temp_min: F32Cell::new(defaults.temp_min),
            temp_max: F32Cell::new(defaults.temp_max),
            humidity_min: F32Cell::new(defaults.humidity_min),
            humidity_max: F32Cell::new(defaults.humidity_max),
            pressure_min: F32Cell::new(defaults.pressure_min),
            pressure_max: F32Cell::new(defaults.pressure_max),
            offset_temperature: F32Cell::new(0.0),
            offset_humidity: F32Cell::new(0.0),
            offset_pressure: F32Cell::new(0.0),
            zoom: [F32Cell::new(1.0), F32Cell::new(1.0), F32Cell::new(1.0)],
            page: AtomicU8::new(Page::Overview.as_u8()),
            redraw: AtomicBool::new(false),
        }
    }

    // -------------------------------------------------------------------------
    // Readings and state (writer: scheduler)
    // -------------------------------------------------------------------------

    pub fn set_reading(&self, reading: Reading) {
        self.temperature.store(reading.temperature);
        self.humidity.store(reading.humidity);
        self.pressure.store(reading.pressure);
    }

    pub fn reading(&self) -> Reading {
        Reading {
            temperature: self.temperature.load(),
            humidity: self.humidity.load(),
            pressure: self.pressure.load(),
        }
    }

    pub fn set_system_state(&self, state: SystemState) {
        self.state.store(state.as_u8(), Ordering::Relaxed);
    }

    pub fn system_state(&self) -> SystemState {
        SystemState::from_u8(self.state.load(Ordering::Relaxed))
    }

    // -------------------------------------------------------------------------
    // External configuration (writer: telemetry transport)
    // -------------------------------------------------------------------------

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            temp_min: self.temp_min.load(),
            temp_max: self.temp_max.load(),
            humidity_min: self.humidity_min.load(),
            humidity_max: self.humidity_max.load(),
            pressure_min: self.pressure_min.load(),
            pressure_max: self.pressure_max.load(),
        }
    }

    /// Replace the classification thresholds.
    ///
    /// Invalid updates (non-finite values, `min >= max`) are rejected whole;
    /// no field is written.
    pub fn apply_thresholds(&self, update: Thresholds) -> Result<(), ConfigError> {
        validate_band("temperature", update.temp_min, update.temp_max)?;
        validate_band("humidity", update.humidity_min, update.humidity_max)?;
        validate_band("pressure", update.pressure_min, update.pressure_max)?;

        self.temp_min.store(update.temp_min);
        self.temp_max.store(update.temp_max);
        self.humidity_min.store(update.humidity_min);
        self.humidity_max.store(update.humidity_max);
        self.pressure_min.store(update.pressure_min);
        self.pressure_max.store(update.pressure_max);
        Ok(())
    }

    pub fn calibration(&self) -> CalibrationOffsets {
        CalibrationOffsets {
            temperature: self.offset_temperature.load(),
            humidity: self.offset_humidity.load(),
            pressure: self.offset_pressure.load(),
        }
    }

    /// Replace the calibration offsets. Non-finite values are rejected whole.
    pub fn apply_calibration(&self, update: CalibrationOffsets) -> Result<(), ConfigError> {
        for (metric, value) in [
            ("temperature", update.temperature),
            ("humidity", update.humidity),
            ("pressure", update.pressure),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { metric });
            }
        }

        self.offset_temperature.store(update.temperature);
        self.offset_humidity.store(update.humidity);
        self.offset_pressure.store(update.pressure);
        Ok(())
    }

    /// Consistent-enough view for the telemetry transport. Fields are read
    /// independently; a concurrent writer may land between reads, which the
    /// transport tolerates.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            reading: self.reading(),
            state: self.system_state(),
            thresholds: self.thresholds(),
        }
    }

    // -------------------------------------------------------------------------
    // UI intents (writer: input path)
    // -------------------------------------------------------------------------

    /// Zoom factor of the chart for `metric`.
    pub fn zoom(&self, metric: Metric) -> f32 {
        self.zoom[metric.index()].load()
    }

    /// Nudge the zoom factor of the chart for `metric`, clamped to the
    /// supported range. Returns the new value.
    pub fn adjust_zoom(&self, metric: Metric, delta: f32) -> f32 {
        let next = (self.zoom[metric.index()].load() + delta).clamp(ZOOM_MIN, ZOOM_MAX);
        self.zoom[metric.index()].store(next);
        next
    }

    pub fn page(&self) -> Page {
        Page::from_u8(self.page.load(Ordering::Relaxed))
    }

    pub fn set_page(&self, page: Page) {
        self.page.store(page.as_u8(), Ordering::Relaxed);
    }

    /// Ask the display channel to redraw on its next opportunity.
    pub fn request_redraw(&self) {
        self.redraw.store(true, Ordering::Relaxed);
    }

    /// Consume the redraw request. Returns whether one was pending.
    pub fn take_redraw(&self) -> bool {
        self.redraw.swap(false, Ordering::Relaxed)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_band(metric: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::NonFinite { metric });
    }
    if min >= max {
        return Err(ConfigError::InvertedRange { metric });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let shared = SharedState::new();
        assert_eq!(shared.thresholds(), Thresholds::DEFAULT);
        assert_eq!(shared.calibration(), CalibrationOffsets::ZERO);
        assert_eq!(shared.system_state(), SystemState::Normal);
        assert_eq!(shared.page(), Page::Overview);
        assert_eq!(shared.zoom(Metric::Temperature), 1.0);
        assert!(!shared.take_redraw());
    }

    #[test]
    fn test_reading_round_trip() {
        let shared = SharedState::new();
        let reading = Reading {
            temperature: 21.5,
            humidity: 48.0,
            pressure: 1_012.3,
        };
        shared.set_reading(reading);
        assert_eq!(shared.reading(), reading);
    }

    #[test]
    fn test_state_round_trip() {
        let shared = SharedState::new();
        shared.set_system_state(SystemState::PressureLow);
        assert_eq!(shared.system_state(), SystemState::PressureLow);
    }

    #[test]
    fn test_valid_threshold_update() {
        let shared = SharedState::new();
        let update = Thresholds {
            temp_min: 18.0,
            temp_max: 26.0,
            ..Thresholds::DEFAULT
        };
        assert!(shared.apply_thresholds(update).is_ok());
        assert_eq!(shared.thresholds(), update);
    }

    #[test]
    fn test_inverted_threshold_rejected_whole() {
        let shared = SharedState::new();
        let update = Thresholds {
            temp_min: 18.0,
            temp_max: 26.0,
            humidity_min: 80.0,
            humidity_max: 20.0,
            ..Thresholds::DEFAULT
        };
        assert_eq!(
            shared.apply_thresholds(update),
            Err(ConfigError::InvertedRange { metric: "humidity" })
        );
        // Nothing was written, including the valid temperature band
        assert_eq!(shared.thresholds(), Thresholds::DEFAULT);
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let shared = SharedState::new();
        let update = Thresholds {
            pressure_max: f32::NAN,
            ..Thresholds::DEFAULT
        };
        assert_eq!(
            shared.apply_thresholds(update),
            Err(ConfigError::NonFinite { metric: "pressure" })
        );
    }

    #[test]
    fn test_calibration_update_and_rejection() {
        let shared = SharedState::new();
        let offsets = CalibrationOffsets {
            temperature: -0.8,
            humidity: 2.0,
            pressure: 1.5,
        };
        assert!(shared.apply_calibration(offsets).is_ok());
        assert_eq!(shared.calibration(), offsets);

        let bad = CalibrationOffsets {
            humidity: f32::INFINITY,
            ..offsets
        };
        assert_eq!(
            shared.apply_calibration(bad),
            Err(ConfigError::NonFinite { metric: "humidity" })
        );
        assert_eq!(shared.calibration(), offsets);
    }

    #[test]
    fn test_zoom_is_clamped_per_metric() {
        let shared = SharedState::new();
        for _ in 0..50 {
            shared.adjust_zoom(Metric::Humidity, 0.25);
        }
        assert_eq!(shared.zoom(Metric::Humidity), ZOOM_MAX);
        // Other charts untouched
        assert_eq!(shared.zoom(Metric::Temperature), 1.0);

        for _ in 0..50 {
            shared.adjust_zoom(Metric::Humidity, -0.25);
        }
        assert_eq!(shared.zoom(Metric::Humidity), ZOOM_MIN);
    }

    #[test]
    fn test_redraw_flag_consumed_once() {
        let shared = SharedState::new();
        shared.request_redraw();
        assert!(shared.take_redraw());
        assert!(!shared.take_redraw());
    }

    #[test]
    fn test_snapshot_reflects_cells() {
        let shared = SharedState::new();
        shared.set_reading(Reading {
            temperature: 30.0,
            humidity: 40.0,
            pressure: 1_000.0,
        });
        shared.set_system_state(SystemState::TempHigh);
        let snap = shared.snapshot();
        assert_eq!(snap.state, SystemState::TempHigh);
        assert_eq!(snap.reading.temperature, 30.0);
        assert_eq!(snap.thresholds, Thresholds::DEFAULT);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvertedRange { metric: "humidity" };
        assert_eq!(
            format!("{err}"),
            "humidity threshold minimum is not below its maximum"
        );
        let err = ConfigError::NonFinite { metric: "pressure" };
        assert_eq!(format!("{err}"), "pressure value is not finite");
    }
}
