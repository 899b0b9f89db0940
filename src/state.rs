//! Reading types, thresholds and the system state classifier.
//!
//! Every output channel keys off the single [`SystemState`] produced here
//! once per sampling tick. Classification priority is fixed and load-bearing:
//! when several thresholds are breached at once, the state (and therefore the
//! one active alert channel) is decided by temperature first, then humidity,
//! then pressure.

use crate::config::{
    DEFAULT_HUMIDITY_MAX,
    DEFAULT_HUMIDITY_MIN,
    DEFAULT_PRESSURE_MAX,
    DEFAULT_PRESSURE_MIN,
    DEFAULT_TEMP_MAX,
    DEFAULT_TEMP_MIN,
};

// =============================================================================
// Readings
// =============================================================================

/// One calibrated sensor sample: temperature (C), relative humidity (%),
/// pressure (hPa).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reading {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
}

/// The three monitored metrics, used to index per-metric storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
    Pressure,
}

impl Metric {
    /// All metrics in storage order.
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Humidity, Self::Pressure];

    /// Index into per-metric arrays.
    pub const fn index(self) -> usize {
        match self {
            Self::Temperature => 0,
            Self::Humidity => 1,
            Self::Pressure => 2,
        }
    }

    /// Display unit for this metric.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "C",
            Self::Humidity => "%",
            Self::Pressure => "hPa",
        }
    }
}

impl Reading {
    /// Value of one metric.
    pub const fn get(&self, metric: Metric) -> f32 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Pressure => self.pressure,
        }
    }
}

// =============================================================================
// System State
// =============================================================================

/// Discrete classification of the current environmental condition.
///
/// Exactly one value is current process-wide at any time; it is superseded
/// atomically on the next classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemState {
    #[default]
    Normal,
    TempHigh,
    TempLow,
    HumidityHigh,
    HumidityLow,
    PressureHigh,
    PressureLow,
}

impl SystemState {
    /// True for states representing an excess (a maximum threshold breach).
    pub const fn is_excess(self) -> bool {
        matches!(self, Self::TempHigh | Self::HumidityHigh | Self::PressureHigh)
    }

    /// True for states representing a deficit (a minimum threshold breach).
    pub const fn is_deficit(self) -> bool {
        matches!(self, Self::TempLow | Self::HumidityLow | Self::PressureLow)
    }

    /// Short label for the status display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::TempHigh => "TEMP HIGH",
            Self::TempLow => "TEMP LOW",
            Self::HumidityHigh => "HUMID HIGH",
            Self::HumidityLow => "HUMID LOW",
            Self::PressureHigh => "PRESS HIGH",
            Self::PressureLow => "PRESS LOW",
        }
    }

    /// Discriminant for storage in an atomic cell.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::TempHigh => 1,
            Self::TempLow => 2,
            Self::HumidityHigh => 3,
            Self::HumidityLow => 4,
            Self::PressureHigh => 5,
            Self::PressureLow => 6,
        }
    }

    /// Inverse of [`as_u8`](Self::as_u8). Unknown values decode as `Normal`.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::TempHigh,
            2 => Self::TempLow,
            3 => Self::HumidityHigh,
            4 => Self::HumidityLow,
            5 => Self::PressureHigh,
            6 => Self::PressureLow,
            _ => Self::Normal,
        }
    }
}

// =============================================================================
// Thresholds
// =============================================================================

/// The six classification boundaries. Externally configurable at runtime;
/// read without locking by the classifier (last write wins).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub temp_min: f32,
    pub temp_max: f32,
    pub humidity_min: f32,
    pub humidity_max: f32,
    pub pressure_min: f32,
    pub pressure_max: f32,
}

impl Thresholds {
    /// Compiled-in defaults, restored on every restart.
    pub const DEFAULT: Self = Self {
        temp_min: DEFAULT_TEMP_MIN,
        temp_max: DEFAULT_TEMP_MAX,
        humidity_min: DEFAULT_HUMIDITY_MIN,
        humidity_max: DEFAULT_HUMIDITY_MAX,
        pressure_min: DEFAULT_PRESSURE_MIN,
        pressure_max: DEFAULT_PRESSURE_MAX,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Classifier
// =============================================================================

/// Map a reading to a system state against the given thresholds.
///
/// Evaluation order is a fixed priority: temperature (high, then low) before
/// humidity before pressure. The first matching rule wins.
pub fn classify(reading: &Reading, thresholds: &Thresholds) -> SystemState {
    if reading.temperature > thresholds.temp_max {
        SystemState::TempHigh
    } else if reading.temperature < thresholds.temp_min {
        SystemState::TempLow
    } else if reading.humidity > thresholds.humidity_max {
        SystemState::HumidityHigh
    } else if reading.humidity < thresholds.humidity_min {
        SystemState::HumidityLow
    } else if reading.pressure > thresholds.pressure_max {
        SystemState::PressureHigh
    } else if reading.pressure < thresholds.pressure_min {
        SystemState::PressureLow
    } else {
        SystemState::Normal
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
