//! Natural-language → dashboard filter inference.
//!
//! Maps free-text chat queries ("show me azure costs as a bar chart") and,
//! optionally, the AI assistant's answer into a structured `FilterState`.
//!
//! Matching is plain case-insensitive substring search over a fixed
//! vocabulary. Stages run in a fixed order:
//! providers → services → date preset → presentation.

pub mod assembler;
pub mod matchers;
pub mod normalize;
pub mod quick_actions;

use jv_protocol::filters::{FilterRequest, FilterState};

/// Interprets chat requests into dashboard filters.
///
/// Implementations must be deterministic and side-effect free.
pub trait QueryInterpreter: Send + Sync {
    fn interpret(&self, request: &FilterRequest) -> FilterState;

    /// Name of this interpreter (for logging).
    fn name(&self) -> &str;
}

/// Substring-matching interpreter over the fixed provider/service vocabulary.
pub struct KeywordInterpreter;

impl KeywordInterpreter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeywordInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryInterpreter for KeywordInterpreter {
    fn interpret(&self, request: &FilterRequest) -> FilterState {
        assembler::assemble(
            &request.query,
            request.ai_response_text.as_deref(),
            request.previous_preset,
        )
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

pub use assembler::assemble;
pub use quick_actions::{QuickAction, assemble_quick_action};
