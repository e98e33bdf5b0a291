//! Individual keyword matchers. Each takes already-normalized text.

pub mod presentation;
pub mod providers;
pub mod services;
pub mod temporal;

pub use presentation::Presentation;
pub use providers::ProviderMatch;
pub use services::ServiceDecision;
