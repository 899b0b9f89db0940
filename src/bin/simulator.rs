//! Host simulator for the monitoring node.
//!
//! Runs the full coordination loop against synthetic sensor signals and an
//! SDL window standing in for the 128x64 OLED. The light matrix, buzzer and
//! indicator report to stdout.
//!
//! # Controls
//!
//! | Key   | Action                          |
//! |-------|---------------------------------|
//! | `N`   | Next page                       |
//! | `P`   | Previous page                   |
//! | Up    | Zoom in (chart pages only)      |
//! | Down  | Zoom out (chart pages only)     |

use std::thread;
use std::time::Duration as StdDuration;
use std::time::Instant as StdInstant;

use embedded_graphics::pixelcolor::{BinaryColor, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    BinaryColorTheme,
    OutputSettingsBuilder,
    SimulatorDisplay,
    SimulatorEvent,
    Window,
};

use enviro_station::alert::Buzzer;
use enviro_station::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use enviro_station::indicator::StatusLed;
use enviro_station::input::{InputDebouncer, NavButton};
use enviro_station::matrix::{MATRIX_COLS, MATRIX_ROWS, PIXEL_COUNT, PixelStrip};
use enviro_station::scheduler::SensorSource;
use enviro_station::state::Reading;
use enviro_station::{Instant, Scheduler, SharedState};

/// Synthetic sensors sweeping through every band so all states show up.
struct SyntheticSensors {
    started: StdInstant,
}

impl SensorSource for SyntheticSensors {
    fn sample(&mut self) -> Reading {
        let t = self.started.elapsed().as_secs_f32();
        Reading {
            temperature: fake_signal(t, 5.0, 38.0, 0.020),
            humidity: fake_signal(t, 20.0, 85.0, 0.013),
            pressure: fake_signal(t, 965.0, 1_045.0, 0.008),
        }
    }
}

/// Sinusoid between `min` and `max` at frequency `freq`.
fn fake_signal(t: f32, min: f32, max: f32, freq: f32) -> f32 {
    let normalized = (t * freq * core::f32::consts::TAU).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Prints the matrix as an ASCII grid whenever the rendered shape changes.
struct ConsoleStrip {
    last_printed: Option<[bool; PIXEL_COUNT]>,
}

impl PixelStrip for ConsoleStrip {
    fn write_frame(&mut self, frame: &[Rgb888; PIXEL_COUNT]) {
        let shape: [bool; PIXEL_COUNT] =
            core::array::from_fn(|i| frame[i] != Rgb888::new(0, 0, 0));
        if self.last_printed == Some(shape) {
            return;
        }
        self.last_printed = Some(shape);

        println!("matrix:");
        for row in 0..MATRIX_ROWS {
            let mut line = String::with_capacity(MATRIX_COLS * 2);
            for col in 0..MATRIX_COLS {
                // Physical rows are flipped; print top row first
                let idx = (MATRIX_ROWS - 1 - row) * MATRIX_COLS + col;
                line.push(if shape[idx] { '#' } else { '.' });
                line.push(' ');
            }
            println!("  {line}");
        }
    }
}

struct ConsoleBuzzer;

impl Buzzer for ConsoleBuzzer {
    fn start_tone(&mut self, freq_hz: u32) {
        println!("buzzer: {freq_hz} Hz");
    }

    fn stop(&mut self) {
        println!("buzzer: off");
    }
}

struct ConsoleLed;

impl StatusLed for ConsoleLed {
    fn set_rgb(&mut self, r: bool, g: bool, b: bool) {
        println!(
            "indicator: {}{}{}",
            if r { "R" } else { "-" },
            if g { "G" } else { "-" },
            if b { "B" } else { "-" }
        );
    }
}

fn main() {
    let mut display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new()
        .theme(BinaryColorTheme::OledBlue)
        .scale(4)
        .build();
    let mut window = Window::new("Enviro Station", &output_settings);

    let shared = SharedState::new();
    let mut input = InputDebouncer::new();
    let started = StdInstant::now();
    let mut scheduler = Scheduler::new(
        &shared,
        SyntheticSensors { started },
        ConsoleStrip { last_printed: None },
        ConsoleBuzzer,
        ConsoleLed,
        started.elapsed().subsec_nanos() | 1,
    );

    'running: loop {
        let now = Instant::from_millis(started.elapsed().as_millis() as u64);

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::N => {
                            input.on_nav_press(NavButton::Next, now, &shared);
                        }
                        Keycode::P => {
                            input.on_nav_press(NavButton::Prev, now, &shared);
                        }
                        Keycode::Up => {
                            input.on_zoom_sample(4_000, now, &shared);
                        }
                        Keycode::Down => {
                            input.on_zoom_sample(100, now, &shared);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        scheduler.tick(now, &mut display);
        window.update(&display);

        thread::sleep(StdDuration::from_millis(10));
    }
}
