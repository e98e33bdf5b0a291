//! Filter assembler: composes the matchers into one `FilterState`.

use jv_protocol::filters::{DatePreset, FilterState};

use crate::matchers::temporal::detect_preset;
use crate::matchers::{Presentation, ProviderMatch, ServiceDecision};
use crate::normalize::normalize;

/// Build dashboard filters from a chat query.
///
/// Starts from the reset baseline and applies, in order: provider matching,
/// service matching (query first, then `ai_response_text`), date preset
/// detection (falling back to `previous_preset`) and presentation matching.
/// Never fails; unrecognized input yields `FilterState::default()`.
pub fn assemble(
    query: &str,
    ai_response_text: Option<&str>,
    previous_preset: Option<DatePreset>,
) -> FilterState {
    let query = normalize(query);
    let mut state = FilterState::default();

    let providers = ProviderMatch::detect(&query);
    providers.apply(&mut state);

    let services = ServiceDecision::decide(&query, ai_response_text);
    services.apply(&mut state);

    state.date_preset = detect_preset(&query).or(previous_preset);

    Presentation::detect(&query).apply(&mut state);

    include_service_owners(&mut state);

    tracing::debug!(
        providers = ?state.selected_providers,
        services = ?state.selected_services,
        preset = ?state.date_preset,
        chart = ?state.chart_type,
        view = ?state.view_mode,
        "filters assembled"
    );

    state
}

/// Add the owning provider of every selected service, so no service is
/// selected while its provider is filtered out.
fn include_service_owners(state: &mut FilterState) {
    let owners: Vec<_> = state
        .selected_services
        .iter()
        .map(|service| service.provider())
        .collect();
    state.selected_providers.extend(owners);
}
