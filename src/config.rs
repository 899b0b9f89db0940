//! Application configuration constants.
//!
//! Cadences, buffer capacities, default thresholds and display layout are
//! collected here as `const` values so the rest of the code never computes
//! layout or timing parameters at runtime.

use crate::time::Duration;

// =============================================================================
// Channel Cadences
// =============================================================================

/// Interval between sensor samples.
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(2_000);

/// Minimum interval between light-matrix animation frames.
/// Decoupled from the sampling rate; the matrix sequencer enforces it
/// internally and ignores earlier calls.
pub const MATRIX_FRAME_INTERVAL: Duration = Duration::from_millis(150);

/// Interval between display refreshes when nothing requested a redraw.
pub const DISPLAY_PERIOD: Duration = Duration::from_millis(500);

// =============================================================================
// Input Timing
// =============================================================================

/// Minimum re-trigger interval for the navigation buttons.
pub const BUTTON_RETRIGGER: Duration = Duration::from_millis(250);

/// Minimum re-trigger interval for the zoom axis.
pub const ZOOM_RETRIGGER: Duration = Duration::from_millis(150);

// =============================================================================
// History Capacities
// =============================================================================

/// Samples kept per metric for the on-device charts.
pub const CHART_CAPACITY: usize = 30;

/// Samples kept per metric for the exported history.
pub const HISTORY_CAPACITY: usize = 100;

// =============================================================================
// Zoom
// =============================================================================

/// Lower bound of the per-chart zoom factor.
pub const ZOOM_MIN: f32 = 0.25;

/// Upper bound of the per-chart zoom factor.
pub const ZOOM_MAX: f32 = 4.0;

/// Zoom change applied per accepted axis deflection.
pub const ZOOM_STEP: f32 = 0.25;

/// Raw ADC mid-point of the zoom axis (12-bit reading).
pub const ZOOM_AXIS_CENTER: u16 = 2048;

/// Half-width of the dead zone around [`ZOOM_AXIS_CENTER`].
pub const ZOOM_AXIS_DEAD_ZONE: u16 = 500;

// =============================================================================
// Default Thresholds
// =============================================================================

/// Temperature band considered normal (degrees Celsius).
pub const DEFAULT_TEMP_MIN: f32 = 15.0;
pub const DEFAULT_TEMP_MAX: f32 = 30.0;

/// Relative humidity band considered normal (percent).
pub const DEFAULT_HUMIDITY_MIN: f32 = 30.0;
pub const DEFAULT_HUMIDITY_MAX: f32 = 70.0;

/// Pressure band considered normal (hectopascal).
pub const DEFAULT_PRESSURE_MIN: f32 = 980.0;
pub const DEFAULT_PRESSURE_MAX: f32 = 1_030.0;

// Thresholds must describe non-empty bands
const _: () = assert!(DEFAULT_TEMP_MIN < DEFAULT_TEMP_MAX);
const _: () = assert!(DEFAULT_HUMIDITY_MIN < DEFAULT_HUMIDITY_MAX);
const _: () = assert!(DEFAULT_PRESSURE_MIN < DEFAULT_PRESSURE_MAX);

// =============================================================================
// Display Layout (128x64 monochrome OLED)
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

/// Height of the title row at the top of every page.
pub const TITLE_HEIGHT: u32 = 12;

/// Left edge of the chart plot area; the strip to the left holds tick labels.
pub const PLOT_X: i32 = 30;

/// Top edge of the chart plot area.
pub const PLOT_Y: i32 = TITLE_HEIGHT as i32 + 2;

/// Chart plot width in pixels. Pre-computed to avoid per-frame arithmetic.
pub const PLOT_WIDTH: u32 = SCREEN_WIDTH - PLOT_X as u32 - 1;

/// Chart plot height in pixels.
pub const PLOT_HEIGHT: u32 = SCREEN_HEIGHT - PLOT_Y as u32 - 1;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_area_fits_screen() {
        assert!(PLOT_X as u32 + PLOT_WIDTH <= SCREEN_WIDTH);
        assert!(PLOT_Y as u32 + PLOT_HEIGHT <= SCREEN_HEIGHT);
    }

    #[test]
    fn test_zoom_bounds_ordered() {
        assert!(ZOOM_MIN < ZOOM_MAX);
        assert!(ZOOM_STEP > 0.0);
    }

    #[test]
    fn test_cadences_nonzero() {
        assert!(SAMPLE_PERIOD.as_millis() > 0);
        assert!(MATRIX_FRAME_INTERVAL.as_millis() > 0);
        assert!(DISPLAY_PERIOD.as_millis() > 0);
    }
}
