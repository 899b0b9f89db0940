//! The cooperative coordination loop.
//!
//! A single thread owns the scheduler and calls [`Scheduler::tick`] as fast
//! as it likes; every channel (sampling, matrix animation, alert stepping,
//! display refresh) keeps its own deadline and simply skips its work when
//! invoked early. Nothing blocks, nothing queues: rate limiting by skipping
//! is the backpressure model. Once a channel's work for a tick begins it
//! runs to completion.
//!
//! The scheduler is the only component aware of wall-clock time: the
//! platform reads its clock once per loop iteration and passes the instant
//! in; sequencers receive it as a parameter.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::alert::{AlertSequencer, Buzzer};
use crate::config::{CHART_CAPACITY, DISPLAY_PERIOD, HISTORY_CAPACITY, SAMPLE_PERIOD};
use crate::display;
use crate::history::TimeSeriesBuffer;
use crate::indicator::{StatusLed, state_rgb};
use crate::matrix::{MatrixSequencer, PixelStrip};
use crate::shared::SharedState;
use crate::state::{Metric, Reading, SystemState, classify};
use crate::time::Instant;

/// Abstraction over the sensor hardware.
///
/// Yields calibrated float readings. Transient read failures are handled by
/// the implementation (log and return a zeroed or last-known reading); this
/// method cannot fail, so the sampling cadence never stalls.
pub trait SensorSource {
    fn sample(&mut self) -> Reading;
}

/// The cooperative loop binding sensors, classifier and output channels.
pub struct Scheduler<'a, SRC, STRIP, BUZ, LED>
where
    SRC: SensorSource,
    STRIP: PixelStrip,
    BUZ: Buzzer,
    LED: StatusLed,
{
    shared: &'a SharedState,
    sensors: SRC,
    matrix: MatrixSequencer<STRIP>,
    alert: AlertSequencer<BUZ>,
    indicator: LED,

    charts: [TimeSeriesBuffer<CHART_CAPACITY>; 3],
    history: [TimeSeriesBuffer<HISTORY_CAPACITY>; 3],

    last_reading: Reading,
    state: SystemState,

    next_sample: Instant,
    next_display: Instant,
}

impl<'a, SRC, STRIP, BUZ, LED> Scheduler<'a, SRC, STRIP, BUZ, LED>
where
    SRC: SensorSource,
    STRIP: PixelStrip,
    BUZ: Buzzer,
    LED: StatusLed,
{
    /// Wire up the channels. The first `tick` samples and draws immediately.
    pub fn new(
        shared: &'a SharedState,
        sensors: SRC,
        strip: STRIP,
        buzzer: BUZ,
        mut indicator: LED,
        seed: u32,
    ) -> Self {
        let state = SystemState::Normal;
        let (r, g, b) = state_rgb(state);
        indicator.set_rgb(r, g, b);

        Self {
            shared,
            sensors,
            matrix: MatrixSequencer::new(strip, seed),
            alert: AlertSequencer::new(buzzer),
            indicator,
            charts: [
                TimeSeriesBuffer::new(),
                TimeSeriesBuffer::new(),
                TimeSeriesBuffer::new(),
            ],
            history: [
                TimeSeriesBuffer::new(),
                TimeSeriesBuffer::new(),
                TimeSeriesBuffer::new(),
            ],
            last_reading: Reading::default(),
            state,
            next_sample: Instant::EPOCH,
            next_display: Instant::EPOCH,
        }
    }

    /// Run every channel that is due at `now`. Returns promptly; each
    /// channel's per-pass work is bounded by the chart buffer size.
    pub fn tick<D>(&mut self, now: Instant, canvas: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if now >= self.next_sample {
            self.run_sample(now);
            self.next_sample = now + SAMPLE_PERIOD;
        }

        self.matrix.service(self.state, now);
        self.alert.service(now);

        let redraw_requested = self.shared.take_redraw();
        if redraw_requested || now >= self.next_display {
            self.draw(canvas);
            self.next_display = now + DISPLAY_PERIOD;
        }
    }

    /// The state produced by the most recent classification.
    pub const fn system_state(&self) -> SystemState {
        self.state
    }

    /// On-device chart samples for one metric.
    pub const fn chart(&self, metric: Metric) -> &TimeSeriesBuffer<CHART_CAPACITY> {
        &self.charts[metric.index()]
    }

    /// Exported history samples for one metric. The telemetry transport
    /// borrows this between ticks.
    pub const fn history(&self, metric: Metric) -> &TimeSeriesBuffer<HISTORY_CAPACITY> {
        &self.history[metric.index()]
    }

    fn run_sample(&mut self, now: Instant) {
        let raw = self.sensors.sample();
        let offsets = self.shared.calibration();
        let mut reading = Reading {
            temperature: raw.temperature + offsets.temperature,
            humidity: raw.humidity + offsets.humidity,
            pressure: raw.pressure + offsets.pressure,
        };

        // Non-finite components fall back to the last accepted value so a
        // glitching sensor cannot poison the buffers or the scaler
        if !reading.temperature.is_finite() {
            reading.temperature = self.last_reading.temperature;
        }
        if !reading.humidity.is_finite() {
            reading.humidity = self.last_reading.humidity;
        }
        if !reading.pressure.is_finite() {
            reading.pressure = self.last_reading.pressure;
        }
        self.last_reading = reading;

        self.shared.set_reading(reading);
        for metric in Metric::ALL {
            self.charts[metric.index()].push(reading.get(metric));
            self.history[metric.index()].push(reading.get(metric));
        }

        let state = classify(&reading, &self.shared.thresholds());
        if state != self.state {
            self.state = state;
            self.shared.set_system_state(state);
            self.alert.sync_state(state, now);
            let (r, g, b) = state_rgb(state);
            self.indicator.set_rgb(r, g, b);
            self.shared.request_redraw();
        }
    }

    fn draw<D>(&self, canvas: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let page = self.shared.page();
        match page.chart_metric() {
            None => display::draw_overview(canvas, &self.shared.reading(), self.state),
            Some(metric) => display::draw_chart(
                canvas,
                page.title(),
                metric,
                &self.charts[metric.index()],
                self.shared.zoom(metric),
            ),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
