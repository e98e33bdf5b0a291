//! Chat command handler: runs one `ChatCommand` against the backend and
//! describes what the dashboard should show next.

use tokio::sync::RwLock;

use jv_interpreter::{QueryInterpreter, QuickAction};
use jv_protocol::commands::{ChatCommand, CommandOutcome, View};
use jv_protocol::filters::{DatePreset, FilterRequest, FilterState, Granularity};
use jv_protocol::finops::chart_series;
use jv_protocol::tickets::{NewTicket, Ticket, TicketCounts, TicketDraft};

use crate::backend::{BackendResult, DashboardBackend};

/// Preset used when a cost command names none.
pub const DEFAULT_PRESET: DatePreset = DatePreset::LastMonth;

pub struct CommandHandler<'a> {
    backend: &'a dyn DashboardBackend,
    interpreter: &'a dyn QueryInterpreter,
    /// Last fetched ticket list, shared with `GET /api/v1/tickets`.
    tickets: &'a RwLock<Vec<Ticket>>,
}

impl<'a> CommandHandler<'a> {
    pub fn new(
        backend: &'a dyn DashboardBackend,
        interpreter: &'a dyn QueryInterpreter,
        tickets: &'a RwLock<Vec<Ticket>>,
    ) -> Self {
        Self {
            backend,
            interpreter,
            tickets,
        }
    }

    pub async fn handle(&self, command: ChatCommand) -> BackendResult<CommandOutcome> {
        tracing::info!(action = command.name(), "dispatching chat command");

        match command {
            ChatCommand::GetTickets => self.get_tickets().await,
            ChatCommand::CreateTicket(ticket) => self.create_ticket(ticket).await,
            ChatCommand::NavigateToFinOps => Ok(CommandOutcome {
                filters: Some(FilterState::default()),
                ..CommandOutcome::navigate(View::FinOps, "Opening the FinOps dashboard")
            }),
            ChatCommand::ShowCostSummary { preset } => self.cost_summary(preset).await,
            ChatCommand::CompareProviders { preset } => self.compare_providers(preset).await,
            ChatCommand::QueryFinOpsCosts { query } => self.query_costs(&query).await,
            ChatCommand::OpenCreateTicketForm(draft) => Ok(open_ticket_form(draft)),
        }
    }

    async fn refresh_tickets(&self) -> BackendResult<Vec<Ticket>> {
        let tickets = self.backend.list_tickets().await?;
        *self.tickets.write().await = tickets.clone();
        Ok(tickets)
    }

    async fn get_tickets(&self) -> BackendResult<CommandOutcome> {
        let tickets = self.refresh_tickets().await?;
        let counts = TicketCounts::tally(&tickets);
        let message = format!(
            "Found {} tickets ({} pending, {} active, {} done)",
            counts.total, counts.pending, counts.active, counts.done
        );
        Ok(CommandOutcome {
            tickets: Some(tickets),
            ..CommandOutcome::navigate(View::Tickets, message)
        })
    }

    async fn create_ticket(&self, ticket: NewTicket) -> BackendResult<CommandOutcome> {
        self.backend.create_ticket(&ticket).await?;
        let tickets = self.refresh_tickets().await?;
        tracing::info!(title = %ticket.title, total = tickets.len(), "ticket created");
        Ok(CommandOutcome {
            tickets: Some(tickets),
            ..CommandOutcome::navigate(View::Tickets, format!("Created ticket \"{}\"", ticket.title))
        })
    }

    async fn cost_summary(&self, preset: Option<DatePreset>) -> BackendResult<CommandOutcome> {
        let preset = preset.unwrap_or(DEFAULT_PRESET);
        let summary = self.backend.cost_summary(preset).await?;
        let message = format!(
            "Total spend for {}: ${:.2} ({})",
            preset, summary.total_cost, summary.trend
        );
        Ok(CommandOutcome {
            filters: Some(FilterState::default().with_preset(Some(preset))),
            summary: Some(summary),
            ..CommandOutcome::navigate(View::FinOps, message)
        })
    }

    async fn compare_providers(&self, preset: Option<DatePreset>) -> BackendResult<CommandOutcome> {
        let preset = preset.unwrap_or(DEFAULT_PRESET);
        let filters = QuickAction::CompareAllProviders.filters().with_preset(Some(preset));
        let summary = self.backend.cost_summary(preset).await?;
        Ok(CommandOutcome {
            filters: Some(filters),
            summary: Some(summary),
            ..CommandOutcome::navigate(
                View::FinOps,
                format!("Comparing AWS, Azure and GCP for {preset}"),
            )
        })
    }

    async fn query_costs(&self, query: &str) -> BackendResult<CommandOutcome> {
        let answer = self.backend.ai_query(query).await?;

        let request = FilterRequest::new(query).with_response(answer.response.clone());
        let mut filters = self.interpreter.interpret(&request);
        let preset = filters.date_preset.unwrap_or(DEFAULT_PRESET);
        // The chart below is for this preset, so the view shows it too.
        filters.date_preset = Some(preset);

        let costs = self.backend.costs(preset, Granularity::Daily).await?;
        let chart = chart_series(&costs.data, &filters);
        tracing::info!(
            interpreter = self.interpreter.name(),
            preset = %preset,
            providers = filters.selected_providers.len(),
            services = filters.selected_services.len(),
            points = chart.len(),
            "cost query answered"
        );

        Ok(CommandOutcome {
            filters: Some(filters),
            chart: Some(chart),
            recommendations: answer.recommendations,
            ..CommandOutcome::navigate(View::FinOps, answer.response)
        })
    }
}

fn open_ticket_form(draft: TicketDraft) -> CommandOutcome {
    CommandOutcome {
        ticket_form: Some(draft),
        ..CommandOutcome::navigate(View::Tickets, "Opening the ticket form")
    }
}
