//! Coordination core for an environmental monitoring node.
//!
//! Samples temperature, humidity and pressure on a fixed cadence, classifies
//! the aggregate reading into a [`SystemState`](state::SystemState), and fans
//! that state out to four independently paced output channels:
//!
//! - a paged status display with auto-scaling time-series charts ([`display`])
//! - a tri-color indicator LED ([`indicator`])
//! - an animated 5x5 light matrix ([`matrix`])
//! - an audible alert pattern ([`alert`])
//!
//! The [`scheduler`] module binds them together in a single cooperative,
//! non-blocking loop. Hardware access is abstracted behind small traits
//! ([`scheduler::SensorSource`], [`matrix::PixelStrip`], [`alert::Buzzer`],
//! [`indicator::StatusLed`]) and any `embedded_graphics::DrawTarget` serves
//! as the display canvas, so the whole core runs unchanged on the device,
//! in the SDL simulator, and under the host test harness.
//!
//! # Testing
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the
//! standard test framework while the actual firmware runs as `no_std`.
//! Components never read a clock; the platform loop passes `Instant` values
//! in, which makes every timing path drivable from tests.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod alert;
pub mod chart;
pub mod config;
pub mod display;
pub mod history;
pub mod indicator;
pub mod input;
pub mod matrix;
pub mod pages;
pub mod scheduler;
pub mod shared;
pub mod state;
pub mod time;

// Re-export the types most platform code touches
pub use pages::Page;
pub use scheduler::{Scheduler, SensorSource};
pub use shared::SharedState;
pub use state::{Metric, Reading, SystemState, Thresholds};
pub use time::{Duration, Instant};
