use serde::{Deserialize, Serialize};

/// A ticket as returned by `GET /tickets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub operation: String,
    pub requester: String,
}

impl Ticket {
    pub fn status_category(&self) -> StatusCategory {
        StatusCategory::classify(&self.status)
    }

    pub fn operation_kind(&self) -> OperationKind {
        OperationKind::classify(&self.operation)
    }
}

/// Body for `POST /tickets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    pub title: String,
    /// e.g. "Pending Approval", "Open", "In Progress", "Completed", "Closed".
    pub status: String,
    /// e.g. "bug_fix", "feature", "task", "request_gitlab_access".
    pub operation: String,
    pub requester: String,
}

impl NewTicket {
    pub fn new(
        title: impl Into<String>,
        status: impl Into<String>,
        operation: impl Into<String>,
        requester: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            status: status.into(),
            operation: operation.into(),
            requester: requester.into(),
        }
    }
}

/// Partially filled ticket form, opened by the assistant for the user to finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TicketDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<String>,
}

/// Badge grouping for free-text ticket statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Pending,
    Active,
    Done,
    Other,
}

impl StatusCategory {
    /// Ordered substring checks over the status with case, `_` and
    /// whitespace removed ("Pending_Approval" → "pendingapproval").
    pub fn classify(status: &str) -> Self {
        let normalized: String = status
            .to_lowercase()
            .chars()
            .filter(|c| *c != '_' && !c.is_whitespace())
            .collect();

        if ["pending", "approval"].iter().any(|p| normalized.contains(p)) {
            StatusCategory::Pending
        } else if ["progress", "open"].iter().any(|p| normalized.contains(p)) {
            StatusCategory::Active
        } else if ["complete", "closed", "done"]
            .iter()
            .any(|p| normalized.contains(p))
        {
            StatusCategory::Done
        } else {
            StatusCategory::Other
        }
    }
}

/// Icon grouping for ticket operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Bug,
    Feature,
    Task,
    AccessRequest,
    Other,
}

impl OperationKind {
    pub fn classify(operation: &str) -> Self {
        let lower = operation.to_lowercase();
        if lower.contains("bug") {
            OperationKind::Bug
        } else if lower.contains("feature") {
            OperationKind::Feature
        } else if lower.contains("task") {
            OperationKind::Task
        } else if lower.contains("request") {
            OperationKind::AccessRequest
        } else {
            OperationKind::Other
        }
    }
}

/// Ticket totals per status category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketCounts {
    pub total: usize,
    pub pending: usize,
    pub active: usize,
    pub done: usize,
    pub other: usize,
}

impl TicketCounts {
    pub fn tally(tickets: &[Ticket]) -> Self {
        let mut counts = Self {
            total: tickets.len(),
            ..Self::default()
        };
        for ticket in tickets {
            match ticket.status_category() {
                StatusCategory::Pending => counts.pending += 1,
                StatusCategory::Active => counts.active += 1,
                StatusCategory::Done => counts.done += 1,
                StatusCategory::Other => counts.other += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: i64, status: &str) -> Ticket {
        Ticket {
            id,
            title: format!("ticket {id}"),
            status: status.into(),
            operation: "task".into(),
            requester: "ops".into(),
        }
    }

    #[test]
    fn status_classification() {
        assert_eq!(StatusCategory::classify("Pending Approval"), StatusCategory::Pending);
        assert_eq!(StatusCategory::classify("IN_PROGRESS"), StatusCategory::Active);
        assert_eq!(StatusCategory::classify("Open"), StatusCategory::Active);
        assert_eq!(StatusCategory::classify("Completed"), StatusCategory::Done);
        assert_eq!(StatusCategory::classify("closed"), StatusCategory::Done);
        assert_eq!(StatusCategory::classify("Blocked"), StatusCategory::Other);
    }

    #[test]
    fn status_checks_are_ordered() {
        // "approval" wins over "done" because pending is checked first.
        assert_eq!(
            StatusCategory::classify("done pending approval"),
            StatusCategory::Pending
        );
    }

    #[test]
    fn operation_classification() {
        assert_eq!(OperationKind::classify("bug_fix"), OperationKind::Bug);
        assert_eq!(OperationKind::classify("Feature"), OperationKind::Feature);
        assert_eq!(OperationKind::classify("task"), OperationKind::Task);
        assert_eq!(
            OperationKind::classify("request_gitlab_access"),
            OperationKind::AccessRequest
        );
        assert_eq!(OperationKind::classify("documentation"), OperationKind::Other);
    }

    #[test]
    fn tally_counts_each_category() {
        let tickets = [
            ticket(1, "Pending Approval"),
            ticket(2, "Open"),
            ticket(3, "In Progress"),
            ticket(4, "Closed"),
            ticket(5, "Unknown"),
        ];
        let counts = TicketCounts::tally(&tickets);
        assert_eq!(
            counts,
            TicketCounts {
                total: 5,
                pending: 1,
                active: 2,
                done: 1,
                other: 1,
            }
        );
    }

    #[test]
    fn draft_deserializes_from_empty_object() {
        let draft: TicketDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(draft, TicketDraft::default());
        assert_eq!(serde_json::to_string(&draft).unwrap(), "{}");
    }
}
