//! Status display rendering.
//!
//! Draws the active page onto any `DrawTarget<Color = BinaryColor>` (the
//! node carries a 128x64 monochrome OLED; the simulator provides an SDL
//! window). Drawing is fire-and-forget: errors from the target are
//! swallowed, text goes through fixed-size heapless buffers, and all layout
//! comes from pre-computed constants in [`crate::config`].
//!
//! Presentation (flushing the framebuffer to the panel) is the platform's
//! job after the draw call returns.

use core::fmt::Write;

#[allow(unused_imports)]
use micromath::F32Ext;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use profont::{PROFONT_7_POINT, PROFONT_10_POINT};

use crate::chart::{ChartScale, ChartSpec};
use crate::config::{CHART_CAPACITY, PLOT_HEIGHT, PLOT_WIDTH, PLOT_X, PLOT_Y, SCREEN_WIDTH};
use crate::history::TimeSeriesBuffer;
use crate::state::{Metric, Reading, SystemState};

const STROKE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

/// Draw the overview page: live readings plus the current state label.
pub fn draw_overview<D>(canvas: &mut D, reading: &Reading, state: SystemState)
where
    D: DrawTarget<Color = BinaryColor>,
{
    canvas.clear(BinaryColor::Off).ok();

    let title_style = MonoTextStyle::new(&PROFONT_10_POINT, BinaryColor::On);
    let body_style = MonoTextStyle::new(&PROFONT_7_POINT, BinaryColor::On);

    Text::with_baseline("STATION", Point::new(2, 1), title_style, Baseline::Top)
        .draw(canvas)
        .ok();

    let mut line: String<24> = String::new();
    write!(line, "T {:6.1} C", reading.temperature).ok();
    Text::with_baseline(&line, Point::new(2, 16), body_style, Baseline::Top)
        .draw(canvas)
        .ok();

    line.clear();
    write!(line, "H {:6.1} %", reading.humidity).ok();
    Text::with_baseline(&line, Point::new(2, 27), body_style, Baseline::Top)
        .draw(canvas)
        .ok();

    line.clear();
    write!(line, "P {:6.1} hPa", reading.pressure).ok();
    Text::with_baseline(&line, Point::new(2, 38), body_style, Baseline::Top)
        .draw(canvas)
        .ok();

    line.clear();
    write!(line, "> {}", state.label()).ok();
    Text::with_baseline(&line, Point::new(2, 52), body_style, Baseline::Top)
        .draw(canvas)
        .ok();
}

/// Draw one chart page: title, latest value, axis ticks and the sample
/// polyline. An empty buffer renders a placeholder instead of a chart.
pub fn draw_chart<D>(
    canvas: &mut D,
    title: &str,
    metric: Metric,
    samples: &TimeSeriesBuffer<CHART_CAPACITY>,
    zoom: f32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    canvas.clear(BinaryColor::Off).ok();

    let title_style = MonoTextStyle::new(&PROFONT_10_POINT, BinaryColor::On);
    let label_style = MonoTextStyle::new(&PROFONT_7_POINT, BinaryColor::On);

    Text::with_baseline(title, Point::new(2, 1), title_style, Baseline::Top)
        .draw(canvas)
        .ok();

    if let Some(latest) = samples.latest() {
        let mut value: String<16> = String::new();
        write!(value, "{:.1}{}", latest, metric.unit()).ok();
        let x = SCREEN_WIDTH as i32 - 2 - value.len() as i32 * 6;
        Text::with_baseline(&value, Point::new(x, 3), label_style, Baseline::Top)
            .draw(canvas)
            .ok();
    }

    let Some(scale) = ChartScale::compute(samples.iter(), zoom, ChartSpec::for_metric(metric))
    else {
        Text::with_baseline(
            "NO DATA",
            Point::new(PLOT_X + PLOT_WIDTH as i32 / 2 - 21, PLOT_Y + PLOT_HEIGHT as i32 / 2),
            label_style,
            Baseline::Middle,
        )
        .draw(canvas)
        .ok();
        return;
    };

    // Vertical axis
    Line::new(
        Point::new(PLOT_X - 1, PLOT_Y),
        Point::new(PLOT_X - 1, PLOT_Y + PLOT_HEIGHT as i32 - 1),
    )
    .into_styled(STROKE)
    .draw(canvas)
    .ok();

    // Tick labels and marks
    for &(value, row) in scale.tick_rows(PLOT_HEIGHT).iter() {
        let y = PLOT_Y + row;

        let mut label: String<8> = String::new();
        if scale.step < 1.0 {
            write!(label, "{value:.1}").ok();
        } else {
            write!(label, "{value:.0}").ok();
        }
        Text::with_baseline(&label, Point::new(0, y), label_style, Baseline::Middle)
            .draw(canvas)
            .ok();

        Line::new(Point::new(PLOT_X - 3, y), Point::new(PLOT_X - 1, y))
            .into_styled(STROKE)
            .draw(canvas)
            .ok();
    }

    // Sample polyline, oldest to newest across the plot width
    let count = samples.len();
    let mut prev: Option<Point> = None;
    for (i, value) in samples.iter().enumerate() {
        let x = PLOT_X + scale.x_for(i, count, PLOT_WIDTH);
        let y = PLOT_Y + scale.y_for(value, PLOT_HEIGHT).clamp(0, PLOT_HEIGHT as i32 - 1);
        let point = Point::new(x, y);
        if let Some(prev) = prev {
            Line::new(prev, point).into_styled(STROKE).draw(canvas).ok();
        }
        prev = Some(point);
    }

    // Zoom annotation when not at the neutral factor
    if (zoom - 1.0).abs() > f32::EPSILON {
        let mut label: String<8> = String::new();
        write!(label, "x{zoom:.2}").ok();
        let x = SCREEN_WIDTH as i32 - 2 - label.len() as i32 * 6;
        Text::with_baseline(&label, Point::new(x, 13), label_style, Baseline::Top)
            .draw(canvas)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
