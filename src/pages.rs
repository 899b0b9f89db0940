//! Page navigation for the multi-screen status display.
//!
//! The two navigation buttons cycle through pages, wrapping in both
//! directions.

use crate::state::Metric;

/// Number of chart pages (one per metric), each with its own zoom factor.
pub const CHART_COUNT: usize = 3;

/// Available pages on the status display.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// Live readings plus the current system state.
    #[default]
    Overview,

    /// Temperature time-series chart.
    TempChart,

    /// Humidity time-series chart.
    HumidityChart,

    /// Pressure time-series chart.
    PressureChart,
}

/// Total number of pages.
pub const PAGE_COUNT: u8 = 4;

impl Page {
    /// Next page, wrapping from the last back to the first.
    pub const fn next(self) -> Self {
        match self {
            Self::Overview => Self::TempChart,
            Self::TempChart => Self::HumidityChart,
            Self::HumidityChart => Self::PressureChart,
            Self::PressureChart => Self::Overview,
        }
    }

    /// Previous page, wrapping from the first back to the last.
    pub const fn prev(self) -> Self {
        match self {
            Self::Overview => Self::PressureChart,
            Self::TempChart => Self::Overview,
            Self::HumidityChart => Self::TempChart,
            Self::PressureChart => Self::HumidityChart,
        }
    }

    /// Index for storage in an atomic cell.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Overview => 0,
            Self::TempChart => 1,
            Self::HumidityChart => 2,
            Self::PressureChart => 3,
        }
    }

    /// Inverse of [`as_u8`](Self::as_u8). Unknown values decode as `Overview`.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::TempChart,
            2 => Self::HumidityChart,
            3 => Self::PressureChart,
            _ => Self::Overview,
        }
    }

    /// The metric charted on this page, `None` for the overview.
    pub const fn chart_metric(self) -> Option<Metric> {
        match self {
            Self::Overview => None,
            Self::TempChart => Some(Metric::Temperature),
            Self::HumidityChart => Some(Metric::Humidity),
            Self::PressureChart => Some(Metric::Pressure),
        }
    }

    /// Title shown on the page header.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "STATION",
            Self::TempChart => "TEMP",
            Self::HumidityChart => "HUMIDITY",
            Self::PressureChart => "PRESSURE",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        assert_eq!(Page::default(), Page::Overview);
    }

    #[test]
    fn test_next_cycles_through_all_pages() {
        let mut page = Page::Overview;
        for _ in 0..PAGE_COUNT {
            page = page.next();
        }
        assert_eq!(page, Page::Overview);
    }

    #[test]
    fn test_prev_is_inverse_of_next() {
        for raw in 0..PAGE_COUNT {
            let page = Page::from_u8(raw);
            assert_eq!(page.next().prev(), page);
            assert_eq!(page.prev().next(), page);
        }
    }

    #[test]
    fn test_prev_wraps_backwards() {
        assert_eq!(Page::Overview.prev(), Page::PressureChart);
    }

    #[test]
    fn test_u8_round_trip() {
        for raw in 0..PAGE_COUNT {
            let page = Page::from_u8(raw);
            assert_eq!(Page::from_u8(page.as_u8()), page);
        }
        assert_eq!(Page::from_u8(42), Page::Overview);
    }

    #[test]
    fn test_chart_metric_only_on_chart_pages() {
        assert!(Page::Overview.chart_metric().is_none());
        assert_eq!(Page::TempChart.chart_metric(), Some(Metric::Temperature));
        assert_eq!(Page::HumidityChart.chart_metric(), Some(Metric::Humidity));
        assert_eq!(Page::PressureChart.chart_metric(), Some(Metric::Pressure));
    }
}
