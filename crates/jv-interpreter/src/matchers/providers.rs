//! Provider matcher.

use std::collections::BTreeSet;

use jv_protocol::catalog::{Provider, Service};
use jv_protocol::filters::FilterState;

use crate::normalize::matches_any;

/// Tokens that name each provider.
const PROVIDER_TOKENS: [(Provider, &[&str]); 3] = [
    (Provider::Aws, &["aws"]),
    (Provider::Azure, &["azure"]),
    (Provider::Gcp, &["gcp", "google"]),
];

/// Phrases signalling the user wants every provider side by side.
const COMPARISON_TOKENS: &[&str] = &["compare", "all"];

/// Providers named in a query plus whether it asks for a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderMatch {
    pub mentioned: BTreeSet<Provider>,
    pub comparison: bool,
}

impl ProviderMatch {
    pub fn detect(text: &str) -> Self {
        let mentioned = PROVIDER_TOKENS
            .iter()
            .filter(|(_, tokens)| matches_any(text, tokens))
            .map(|(provider, _)| *provider)
            .collect();

        Self {
            mentioned,
            comparison: matches_any(text, COMPARISON_TOKENS),
        }
    }

    /// The one provider to focus on, if the query names exactly one and
    /// does not ask for a comparison.
    pub fn single(&self) -> Option<Provider> {
        if self.comparison || self.mentioned.len() != 1 {
            return None;
        }
        self.mentioned.first().copied()
    }

    /// Set providers and their default services on `state`.
    ///
    /// Naming two providers without "compare" still selects all three;
    /// disjunctions are not supported.
    pub fn apply(&self, state: &mut FilterState) {
        match self.single() {
            Some(provider) => {
                state.selected_providers = BTreeSet::from([provider]);
                state.selected_services = provider.services().iter().copied().collect();
            }
            None => {
                state.selected_providers = Provider::ALL.into_iter().collect();
                state.selected_services = Service::ALL.into_iter().collect();
            }
        }
    }
}
