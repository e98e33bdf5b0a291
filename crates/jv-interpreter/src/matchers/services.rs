//! Service matcher.
//!
//! Looks for catalog service names in the query first. Only when the query
//! names none does it fall back to the AI assistant's answer, where a
//! "most expensive"/"top" question narrows to the first service mentioned.

use std::collections::BTreeSet;

use jv_protocol::catalog::{Service, owner_of};
use jv_protocol::filters::FilterState;

use crate::normalize::{matches_any, normalize};

/// Query phrases asking for the single biggest cost driver.
const TOP_INTENT_TOKENS: &[&str] = &["most expensive", "expensive", "top"];

/// Catalog services named in `text`, in table order (not text order).
pub fn find_services(text: &str) -> Vec<Service> {
    Service::ALL
        .into_iter()
        .filter(|service| text.contains(&service.name().to_lowercase()))
        .collect()
}

/// How the service selection should change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceDecision {
    /// Nothing named; keep the provider-level default.
    Keep,
    /// Services named in the query itself.
    FromQuery(Vec<Service>),
    /// "Top service" question: the first service in the answer, with the
    /// provider selection narrowed to its owner.
    TopFromResponse(Service),
    /// Services named in the answer, provider selection untouched.
    FromResponse(Vec<Service>),
}

impl ServiceDecision {
    /// Decide from the normalized query and the raw response text.
    pub fn decide(query: &str, response: Option<&str>) -> Self {
        let from_query = find_services(query);
        if !from_query.is_empty() {
            return ServiceDecision::FromQuery(from_query);
        }

        let Some(response) = response.filter(|r| !r.is_empty()) else {
            return ServiceDecision::Keep;
        };
        let from_response = find_services(&normalize(response));
        match from_response.first() {
            None => ServiceDecision::Keep,
            Some(first) if matches_any(query, TOP_INTENT_TOKENS) => {
                ServiceDecision::TopFromResponse(*first)
            }
            Some(_) => ServiceDecision::FromResponse(from_response),
        }
    }

    pub fn apply(&self, state: &mut FilterState) {
        match self {
            ServiceDecision::Keep => {}
            ServiceDecision::FromQuery(services) | ServiceDecision::FromResponse(services) => {
                state.selected_services = services.iter().copied().collect();
            }
            ServiceDecision::TopFromResponse(service) => {
                state.selected_services = BTreeSet::from([*service]);
                // Replaces any multi-provider selection made from the query.
                if let Some(owner) = owner_of(*service) {
                    state.selected_providers = BTreeSet::from([owner]);
                }
            }
        }
    }
}
