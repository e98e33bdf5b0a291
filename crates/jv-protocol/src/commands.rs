use serde::{Deserialize, Serialize};

use crate::filters::{DatePreset, FilterState};
use crate::finops::{ChartPoint, CostSummary};
use crate::tickets::{NewTicket, Ticket, TicketDraft};

/// Chat assistant actions, one variant per action with typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChatCommand {
    /// Fetch every ticket and show the ticket view.
    GetTickets,
    /// Create a ticket, then refresh the ticket list.
    CreateTicket(NewTicket),
    /// Show the FinOps view with reset filters.
    NavigateToFinOps,
    /// Show the cost summary for a preset (last month when absent).
    ShowCostSummary {
        #[serde(default)]
        preset: Option<DatePreset>,
    },
    /// Show every provider side by side.
    CompareProviders {
        #[serde(default)]
        preset: Option<DatePreset>,
    },
    /// Ask the AI cost assistant and derive dashboard filters from the exchange.
    QueryFinOpsCosts { query: String },
    /// Open the ticket form, pre-filled with whatever the user already said.
    OpenCreateTicketForm(TicketDraft),
}

impl ChatCommand {
    /// Action name (for logging).
    pub fn name(&self) -> &'static str {
        match self {
            ChatCommand::GetTickets => "get_tickets",
            ChatCommand::CreateTicket(_) => "create_ticket",
            ChatCommand::NavigateToFinOps => "navigate_to_fin_ops",
            ChatCommand::ShowCostSummary { .. } => "show_cost_summary",
            ChatCommand::CompareProviders { .. } => "compare_providers",
            ChatCommand::QueryFinOpsCosts { .. } => "query_fin_ops_costs",
            ChatCommand::OpenCreateTicketForm(_) => "open_create_ticket_form",
        }
    }
}

/// Top-level dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum View {
    #[default]
    #[serde(rename = "dashboard")]
    Dashboard,
    #[serde(rename = "tickets")]
    Tickets,
    #[serde(rename = "finops")]
    FinOps,
    #[serde(rename = "greenops")]
    GreenOps,
}

/// What the dashboard should show after a command ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CommandOutcome {
    pub view: View,
    /// Short human-readable summary for the chat transcript.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<Ticket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<CostSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<Vec<ChartPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_form: Option<TicketDraft>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl CommandOutcome {
    pub fn navigate(view: View, message: impl Into<String>) -> Self {
        Self {
            view,
            message: message.into(),
            ..Self::default()
        }
    }
}
