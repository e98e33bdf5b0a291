//! Quick-action buttons shown under the chat input.
//!
//! A quick action is a fixed label run through a restricted assembler:
//! provider matching plus "last month" detection, nothing else.

use jv_protocol::filters::{DatePreset, FilterState};

use crate::matchers::ProviderMatch;
use crate::matchers::temporal::detect_preset;
use crate::normalize::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    CostsLastMonth,
    CompareAllProviders,
    AwsCosts,
    AzureCosts,
    GcpCosts,
}

impl QuickAction {
    /// Display order.
    pub const ALL: [QuickAction; 5] = [
        QuickAction::CostsLastMonth,
        QuickAction::CompareAllProviders,
        QuickAction::AwsCosts,
        QuickAction::AzureCosts,
        QuickAction::GcpCosts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuickAction::CostsLastMonth => "Show costs last month",
            QuickAction::CompareAllProviders => "Compare all providers",
            QuickAction::AwsCosts => "Show AWS costs",
            QuickAction::AzureCosts => "Show Azure costs",
            QuickAction::GcpCosts => "Show GCP costs",
        }
    }

    /// Case-insensitive label lookup; surrounding whitespace is ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.label().eq_ignore_ascii_case(wanted))
    }

    pub fn filters(self) -> FilterState {
        assemble_quick_action(self.label())
    }
}

/// Restricted assembler for quick-action labels.
///
/// Only a detected `last_month` preset is kept; services follow the provider
/// decision and presentation stays at its defaults.
pub fn assemble_quick_action(label: &str) -> FilterState {
    let text = normalize(label);
    let mut state = FilterState::default();

    ProviderMatch::detect(&text).apply(&mut state);
    state.date_preset = detect_preset(&text).filter(|preset| *preset == DatePreset::LastMonth);

    state
}
