//! Presentation matcher: chart type and chart/table view.

use jv_protocol::filters::{ChartType, FilterState, ViewMode};

use crate::normalize::matches_any;

/// Chart phrases, checked in order.
const CHART_PHRASES: [(&[&str], ChartType); 3] = [
    (&["bar chart", "bar graph"], ChartType::Bar),
    (&["line chart", "line graph"], ChartType::Line),
    (&["area chart", "area graph"], ChartType::Area),
];

const TABLE_PHRASES: &[&str] = &["table", "tabular"];

/// Requested presentation; `None` fields keep the caller's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presentation {
    pub chart_type: Option<ChartType>,
    pub view_mode: Option<ViewMode>,
}

impl Presentation {
    pub fn detect(text: &str) -> Self {
        if let Some((_, chart_type)) = CHART_PHRASES
            .iter()
            .find(|(phrases, _)| matches_any(text, phrases))
        {
            return Self {
                chart_type: Some(*chart_type),
                view_mode: Some(ViewMode::Chart),
            };
        }

        if matches_any(text, TABLE_PHRASES) {
            return Self {
                chart_type: None,
                view_mode: Some(ViewMode::Table),
            };
        }

        Self::default()
    }

    pub fn apply(&self, state: &mut FilterState) {
        if let Some(chart_type) = self.chart_type {
            state.chart_type = chart_type;
        }
        if let Some(view_mode) = self.view_mode {
            state.view_mode = view_mode;
        }
    }
}
