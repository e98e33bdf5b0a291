use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{Provider, Service};

/// Chart rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Area,
    Bar,
    Line,
}

/// Whether costs render as a chart or a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Chart,
    Table,
}

/// Date range presets accepted by the cost API.
///
/// The query interpreter only ever detects the first four; the rolling
/// windows are reachable through explicit command parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePreset {
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    #[serde(rename = "last_30_days")]
    Last30Days,
    #[serde(rename = "last_90_days")]
    Last90Days,
}

impl DatePreset {
    /// Wire value, as used in `?preset=` query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            DatePreset::ThisWeek => "this_week",
            DatePreset::LastWeek => "last_week",
            DatePreset::ThisMonth => "this_month",
            DatePreset::LastMonth => "last_month",
            DatePreset::Last30Days => "last_30_days",
            DatePreset::Last90Days => "last_90_days",
        }
    }

    /// Resolve to an inclusive `(start, end)` date pair relative to `today`.
    ///
    /// Weeks start on Monday.
    pub fn date_range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let since_monday = i64::from(today.weekday().num_days_from_monday());
        let first_of_month = today - Duration::days(i64::from(today.day0()));

        match self {
            DatePreset::ThisWeek => (today - Duration::days(since_monday), today),
            DatePreset::LastWeek => {
                let start = today - Duration::days(since_monday + 7);
                (start, start + Duration::days(6))
            }
            DatePreset::ThisMonth => (first_of_month, today),
            DatePreset::LastMonth => {
                let end = first_of_month - Duration::days(1);
                let start = end - Duration::days(i64::from(end.day0()));
                (start, end)
            }
            DatePreset::Last30Days => (today - Duration::days(30), today),
            DatePreset::Last90Days => (today - Duration::days(90), today),
        }
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost data granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

/// Dashboard filter state produced by the query interpreter.
///
/// Both sets iterate in catalog order, which is also the rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_providers: BTreeSet<Provider>,
    pub selected_services: BTreeSet<Service>,
    /// `None` means "keep whatever preset the view already shows".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_preset: Option<DatePreset>,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub view_mode: ViewMode,
}

impl Default for FilterState {
    /// The reset baseline: every provider and service, no preset, area chart.
    fn default() -> Self {
        Self {
            selected_providers: Provider::ALL.into_iter().collect(),
            selected_services: Service::ALL.into_iter().collect(),
            date_preset: None,
            chart_type: ChartType::default(),
            view_mode: ViewMode::default(),
        }
    }
}

impl FilterState {
    /// Baseline narrowed to one provider and its full service list.
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            selected_providers: BTreeSet::from([provider]),
            selected_services: provider.services().iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn with_preset(mut self, preset: Option<DatePreset>) -> Self {
        self.date_preset = preset;
        self
    }

    /// Whether a cost record for `provider`/`service` passes this filter.
    pub fn admits(&self, provider: Provider, service: Service) -> bool {
        self.selected_providers.contains(&provider) && self.selected_services.contains(&service)
    }

    pub fn has_all_providers(&self) -> bool {
        Provider::ALL
            .iter()
            .all(|p| self.selected_providers.contains(p))
    }

    /// Every selected service belongs to a selected provider.
    pub fn services_match_providers(&self) -> bool {
        self.selected_services
            .iter()
            .all(|s| self.selected_providers.contains(&s.provider()))
    }
}

/// Input to the query interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    /// Raw chat query; `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub query: String,
    /// Natural-language answer from the AI cost assistant, if any.
    #[serde(
        default,
        alias = "aiResponseText",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_response_text: Option<String>,
    /// Preset currently shown by the view; kept when the query names none.
    #[serde(
        default,
        alias = "previousPreset",
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_preset: Option<DatePreset>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl FilterRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.ai_response_text = Some(text.into());
        self
    }

    pub fn with_previous_preset(mut self, preset: DatePreset) -> Self {
        self.previous_preset = Some(preset);
        self
    }
}
