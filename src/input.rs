//! Debounced input intents.
//!
//! Raw edges from the navigation buttons and samples from the analog zoom
//! axis arrive in interrupt context, where they may preempt the main loop at
//! any point. Handlers therefore do the minimum possible work: rate-limit,
//! then record an intent into the shared single-writer cells (page index,
//! zoom factor, redraw flag). Nothing here draws or blocks; the scheduler
//! picks the intents up on its next pass.

use crate::config::{
    BUTTON_RETRIGGER,
    ZOOM_AXIS_CENTER,
    ZOOM_AXIS_DEAD_ZONE,
    ZOOM_RETRIGGER,
    ZOOM_STEP,
};
use crate::shared::SharedState;
use crate::time::{Duration, Instant};

/// The two navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    /// Advance to the next page.
    Next,
    /// Go back to the previous page.
    Prev,
}

/// Per-control minimum re-trigger interval.
struct RateLimiter {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl RateLimiter {
    const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Accept this event if enough time passed since the last accepted one.
    fn try_accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted
            && now.duration_since(last) < self.interval
        {
            return false;
        }
        self.last_accepted = Some(now);
        true
    }
}

/// Converts raw input edges into debounced, rate-limited intents.
pub struct InputDebouncer {
    next_button: RateLimiter,
    prev_button: RateLimiter,
    zoom_axis: RateLimiter,
}

impl InputDebouncer {
    pub const fn new() -> Self {
        Self {
            next_button: RateLimiter::new(BUTTON_RETRIGGER),
            prev_button: RateLimiter::new(BUTTON_RETRIGGER),
            zoom_axis: RateLimiter::new(ZOOM_RETRIGGER),
        }
    }

    /// Handle a navigation button press edge. Returns `true` if the press
    /// was accepted.
    ///
    /// Safe to call from interrupt context: only writes shared cells.
    pub fn on_nav_press(&mut self, button: NavButton, now: Instant, shared: &SharedState) -> bool {
        let limiter = match button {
            NavButton::Next => &mut self.next_button,
            NavButton::Prev => &mut self.prev_button,
        };
        if !limiter.try_accept(now) {
            return false;
        }

        let page = shared.page();
        shared.set_page(match button {
            NavButton::Next => page.next(),
            NavButton::Prev => page.prev(),
        });
        shared.request_redraw();
        true
    }

    /// Handle a raw zoom-axis sample (12-bit ADC). Returns `true` if a zoom
    /// change was applied.
    ///
    /// Only acts while a chart page is active. Samples inside the dead zone
    /// around the center are ignored and do not consume the rate limit.
    pub fn on_zoom_sample(&mut self, raw: u16, now: Instant, shared: &SharedState) -> bool {
        let Some(metric) = shared.page().chart_metric() else {
            return false;
        };

        let delta = if raw > ZOOM_AXIS_CENTER.saturating_add(ZOOM_AXIS_DEAD_ZONE) {
            ZOOM_STEP
        } else if raw < ZOOM_AXIS_CENTER.saturating_sub(ZOOM_AXIS_DEAD_ZONE) {
            -ZOOM_STEP
        } else {
            return false;
        };

        if !self.zoom_axis.try_accept(now) {
            return false;
        }

        shared.adjust_zoom(metric, delta);
        shared.request_redraw();
        true
    }
}

impl Default for InputDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ZOOM_MAX, ZOOM_MIN};
    use crate::pages::{PAGE_COUNT, Page};
    use crate::state::Metric;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    const ZOOM_UP: u16 = ZOOM_AXIS_CENTER + ZOOM_AXIS_DEAD_ZONE + 100;
    const ZOOM_DOWN: u16 = ZOOM_AXIS_CENTER - ZOOM_AXIS_DEAD_ZONE - 100;

    #[test]
    fn test_nav_advances_page() {
        let shared = SharedState::new();
        let mut input = InputDebouncer::new();

        assert!(input.on_nav_press(NavButton::Next, at(0), &shared));
        assert_eq!(shared.page(), Page::TempChart);
        assert!(shared.take_redraw());
    }

    #[test]
    fn test_nav_wraps_both_directions() {
        let shared = SharedState::new();
        let mut input = InputDebouncer::new();
        let step = BUTTON_RETRIGGER.as_millis();

        // Forward through every page back to the start
        for i in 0..PAGE_COUNT as u64 {
            assert!(input.on_nav_press(NavButton::Next, at(i * step), &shared));
        }
        assert_eq!(shared.page(), Page::Overview);

        // Backwards wraps immediately to the last page
        assert!(input.on_nav_press(NavButton::Prev, at(0), &shared));
        assert_eq!(shared.page(), Page::PressureChart);
    }

    #[test]
    fn test_nav_bounce_suppressed() {
        let shared = SharedState::new();
        let mut input = InputDebouncer::new();

        assert!(input.on_nav_press(NavButton::Next, at(0), &shared));
        // Contact bounce: edges inside the re-trigger window are dropped
        assert!(!input.on_nav_press(NavButton::Next, at(10), &shared));
        assert!(!input.on_nav_press(NavButton::Next, at(200), &shared));
        assert_eq!(shared.page(), Page::TempChart);

        assert!(input.on_nav_press(
            NavButton::Next,
            at(BUTTON_RETRIGGER.as_millis()),
            &shared
        ));
        assert_eq!(shared.page(), Page::HumidityChart);
    }

    #[test]
    fn test_buttons_rate_limited_independently() {
        let shared = SharedState::new();
        let mut input = InputDebouncer::new();

        assert!(input.on_nav_press(NavButton::Next, at(0), &shared));
        // The other button has its own limiter and fires right away
        assert!(input.on_nav_press(NavButton::Prev, at(1), &shared));
        assert_eq!(shared.page(), Page::Overview);
    }

    #[test]
    fn test_zoom_ignored_on_overview() {
        let shared = SharedState::new();
        let mut input = InputDebouncer::new();

        assert!(!input.on_zoom_sample(ZOOM_UP, at(0), &shared));
        assert_eq!(shared.zoom(Metric::Temperature), 1.0);
    }

    #[test]
    fn test_zoom_dead_zone() {
        let shared = SharedState::new();
        shared.set_page(Page::TempChart);
        let mut input = InputDebouncer::new();

        assert!(!input.on_zoom_sample(ZOOM_AXIS_CENTER, at(0), &shared));
        assert!(!input.on_zoom_sample(ZOOM_AXIS_CENTER + ZOOM_AXIS_DEAD_ZONE, at(1), &shared));
        assert!(!input.on_zoom_sample(ZOOM_AXIS_CENTER - ZOOM_AXIS_DEAD_ZONE, at(2), &shared));
        assert_eq!(shared.zoom(Metric::Temperature), 1.0);

        // Dead-zone samples must not consume the rate limit
        assert!(input.on_zoom_sample(ZOOM_UP, at(3), &shared));
        assert_eq!(shared.zoom(Metric::Temperature), 1.0 + ZOOM_STEP);
    }

    #[test]
    fn test_zoom_clamped_at_bounds() {
        let shared = SharedState::new();
        shared.set_page(Page::HumidityChart);
        let mut input = InputDebouncer::new();
        let step = ZOOM_RETRIGGER.as_millis();

        let mut t = 0;
        for _ in 0..40 {
            input.on_zoom_sample(ZOOM_UP, at(t), &shared);
            t += step;
        }
        assert_eq!(shared.zoom(Metric::Humidity), ZOOM_MAX);

        for _ in 0..40 {
            input.on_zoom_sample(ZOOM_DOWN, at(t), &shared);
            t += step;
        }
        assert_eq!(shared.zoom(Metric::Humidity), ZOOM_MIN);
    }

    #[test]
    fn test_zoom_rate_limited() {
        let shared = SharedState::new();
        shared.set_page(Page::TempChart);
        let mut input = InputDebouncer::new();

        assert!(input.on_zoom_sample(ZOOM_UP, at(0), &shared));
        assert!(!input.on_zoom_sample(ZOOM_UP, at(50), &shared));
        assert_eq!(shared.zoom(Metric::Temperature), 1.25);
    }

    #[test]
    fn test_zoom_targets_active_chart_only() {
        let shared = SharedState::new();
        shared.set_page(Page::PressureChart);
        let mut input = InputDebouncer::new();

        input.on_zoom_sample(ZOOM_UP, at(0), &shared);
        assert_eq!(shared.zoom(Metric::Pressure), 1.25);
        assert_eq!(shared.zoom(Metric::Temperature), 1.0);
        assert_eq!(shared.zoom(Metric::Humidity), 1.0);
    }
}
