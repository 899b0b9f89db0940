//! Shared mock collaborators for integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::{BinaryColor, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use enviro_station::alert::Buzzer;
use enviro_station::indicator::StatusLed;
use enviro_station::matrix::{PIXEL_COUNT, PixelStrip};
use enviro_station::scheduler::SensorSource;
use enviro_station::state::Reading;

/// Sensor that replays a script, holding the last entry once exhausted.
pub struct ScriptedSensor {
    script: Vec<Reading>,
    position: usize,
}

impl ScriptedSensor {
    pub fn new(script: Vec<Reading>) -> Self {
        assert!(!script.is_empty());
        Self { script, position: 0 }
    }
}

impl SensorSource for ScriptedSensor {
    fn sample(&mut self) -> Reading {
        let reading = self.script[self.position.min(self.script.len() - 1)];
        self.position += 1;
        reading
    }
}

/// Strip that records every committed frame.
#[derive(Clone, Default)]
pub struct RecordingStrip {
    pub frames: Rc<RefCell<Vec<[Rgb888; PIXEL_COUNT]>>>,
}

impl PixelStrip for RecordingStrip {
    fn write_frame(&mut self, frame: &[Rgb888; PIXEL_COUNT]) {
        self.frames.borrow_mut().push(*frame);
    }
}

/// Buzzer that records tone starts and stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerEvent {
    Tone(u32),
    Stop,
}

#[derive(Clone, Default)]
pub struct RecordingBuzzer {
    pub events: Rc<RefCell<Vec<BuzzerEvent>>>,
}

impl Buzzer for RecordingBuzzer {
    fn start_tone(&mut self, freq_hz: u32) {
        self.events.borrow_mut().push(BuzzerEvent::Tone(freq_hz));
    }

    fn stop(&mut self) {
        self.events.borrow_mut().push(BuzzerEvent::Stop);
    }
}

/// Indicator that remembers the current channel levels.
#[derive(Clone, Default)]
pub struct RecordingLed {
    pub rgb: Rc<RefCell<(bool, bool, bool)>>,
}

impl StatusLed for RecordingLed {
    fn set_rgb(&mut self, r: bool, g: bool, b: bool) {
        *self.rgb.borrow_mut() = (r, g, b);
    }
}

/// 128x64 framebuffer canvas for asserting on rendered output.
pub struct TestCanvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<bool>,
}

impl TestCanvas {
    pub fn new() -> Self {
        Self {
            width: 128,
            height: 64,
            pixels: vec![false; 128 * 64],
        }
    }

    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
}

impl Dimensions for TestCanvas {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }
}

impl DrawTarget for TestCanvas {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..self.width as i32).contains(&point.x)
                && (0..self.height as i32).contains(&point.y)
            {
                self.pixels[(point.y as u32 * self.width + point.x as u32) as usize] =
                    color.is_on();
            }
        }
        Ok(())
    }
}
