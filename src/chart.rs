//! Auto-scaling axis mathematics for the time-series charts.
//!
//! Turns a chronological sample sequence plus a zoom factor into a snapped
//! axis range, a human-readable tick set and pixel-mapping helpers. Pure
//! math; drawing lives in [`crate::display`].

#[allow(unused_imports)]
use micromath::F32Ext;

use heapless::Vec;

use crate::config::{ZOOM_MAX, ZOOM_MIN};
use crate::state::Metric;

/// Upper bound on the tick set, regardless of step count.
pub const MAX_TICKS: usize = 4;

/// Floor applied to the snapped range to avoid division by zero.
const RANGE_EPSILON: f32 = 1e-3;

// =============================================================================
// Per-Metric Scaling Parameters
// =============================================================================

/// Metric-specific scaling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec {
    /// Minimum span; narrower data is widened symmetrically around its
    /// midpoint so flat series never produce a degenerate chart.
    pub span_floor: f32,

    /// Minimum tick step; the nice step never drops below this.
    pub min_step: f32,
}

impl ChartSpec {
    pub const TEMPERATURE: Self = Self {
        span_floor: 2.0,
        min_step: 0.5,
    };

    pub const HUMIDITY: Self = Self {
        span_floor: 10.0,
        min_step: 1.0,
    };

    pub const PRESSURE: Self = Self {
        span_floor: 10.0,
        min_step: 1.0,
    };

    /// Parameters for the given metric.
    pub const fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Temperature => Self::TEMPERATURE,
            Metric::Humidity => Self::HUMIDITY,
            Metric::Pressure => Self::PRESSURE,
        }
    }
}

// =============================================================================
// Scale Computation
// =============================================================================

/// A computed axis: snapped bounds, step and tick values.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScale {
    /// Snapped axis minimum (floor-aligned to the step).
    pub min: f32,
    /// Snapped axis maximum (ceil-aligned to the step).
    pub max: f32,
    /// Chosen nice step.
    pub step: f32,
    /// `max - min`, floored to a small epsilon.
    pub range: f32,
    /// Tick values, ascending, at most [`MAX_TICKS`].
    pub ticks: Vec<f32, MAX_TICKS>,
}

impl ChartScale {
    /// Compute the axis for a sample sequence.
    ///
    /// Returns `None` when the sequence holds no finite sample; callers
    /// render a placeholder instead of a chart. Non-finite samples are
    /// skipped. `zoom` is clamped to the supported range; values above 1
    /// magnify (narrow the visible range), values below 1 widen it.
    pub fn compute<I>(samples: I, zoom: f32, spec: ChartSpec) -> Option<Self>
    where
        I: Iterator<Item = f32>,
    {
        let mut bounds: Option<(f32, f32)> = None;
        for v in samples {
            if !v.is_finite() {
                continue;
            }
            bounds = match bounds {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            };
        }
        let (raw_min, raw_max) = bounds?;

        let midpoint = (raw_min + raw_max) * 0.5;
        let span = (raw_max - raw_min).max(spec.span_floor);

        let zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let visible = span / zoom;
        let half = visible * 0.5;

        let step = nice_step(visible / 3.0).max(spec.min_step);

        let snapped_min = ((midpoint - half) / step).floor() * step;
        let snapped_max = ((midpoint + half) / step).ceil() * step;
        let range = (snapped_max - snapped_min).max(RANGE_EPSILON);

        let mut ticks: Vec<f32, MAX_TICKS> = Vec::new();
        let mut tick = snapped_min;
        // Half-step slack absorbs accumulated float error at the top end
        while tick <= snapped_max + step * 0.5 {
            if ticks.push(tick).is_err() {
                break;
            }
            tick += step;
        }

        Some(Self {
            min: snapped_min,
            max: snapped_max,
            step,
            range,
            ticks,
        })
    }

    /// Pixel column for sample `index` of `count`, spread across `width`.
    pub fn x_for(&self, index: usize, count: usize, width: u32) -> i32 {
        if count <= 1 || width == 0 {
            return 0;
        }
        let span = (width - 1) as f32;
        (index as f32 * span / (count - 1) as f32).round() as i32
    }

    /// Pixel row for `value` across `height`, inverted so larger values map
    /// to smaller row indices (screen origin is top-left). May fall outside
    /// `0..height` for values beyond the snapped bounds; callers clamp or
    /// drop as appropriate.
    pub fn y_for(&self, value: f32, height: u32) -> i32 {
        if height == 0 {
            return 0;
        }
        let span = (height - 1) as f32;
        let norm = (value - self.min) / self.range;
        (span * (1.0 - norm)).round() as i32
    }

    /// Tick values paired with their pixel rows. Ticks whose row falls
    /// outside the plot bounds are dropped, not clamped.
    pub fn tick_rows(&self, height: u32) -> Vec<(f32, i32), MAX_TICKS> {
        let mut rows = Vec::new();
        for &tick in &self.ticks {
            let row = self.y_for(tick, height);
            if row >= 0 && row < height as i32 {
                // Capacity matches self.ticks, push cannot fail
                rows.push((tick, row)).ok();
            }
        }
        rows
    }
}

/// Round a raw step to 1, 2, 5 or 10 times a power of ten, whichever
/// mantissa is nearest (standard engineering nice-number rule).
fn nice_step(raw: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let magnitude = 10.0f32.powf(raw.log10().floor());
    let mantissa = raw / magnitude;

    let mut best = 1.0f32;
    for candidate in [2.0f32, 5.0, 10.0] {
        if (mantissa - candidate).abs() < (mantissa - best).abs() {
            best = candidate;
        }
    }
    best * magnitude
}

// =============================================================================
// Unit Tests
// =============================================================================
