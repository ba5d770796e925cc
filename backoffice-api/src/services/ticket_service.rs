// Support ticket service - ticket queue, status workflow and comments
use backoffice_core::models::{AuthorRole, SupportTicket, TicketComment, TicketStatus};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::services::guard::{Action, ActionOutcome, ProcessingGuard};
use crate::services::{ACTING_ADMIN_ID, ACTING_ADMIN_NAME};
use crate::store::Store;

pub struct TicketService {
    store: Store,
    guard: ProcessingGuard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketCounts {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
    pub total: usize,
}

impl TicketService {
    pub fn new(store: Store, guard: ProcessingGuard) -> Self {
        Self { store, guard }
    }

    pub async fn list_tickets(&self, status: Option<TicketStatus>) -> Vec<SupportTicket> {
        self.store.tickets(status).await
    }

    pub async fn get_ticket(&self, id: &str) -> Result<SupportTicket> {
        self.store
            .ticket(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))
    }

    pub async fn ticket_counts(&self) -> TicketCounts {
        let mut counts = TicketCounts::default();
        for status in TicketStatus::ALL {
            let count = self.store.count_tickets(|t| t.status == status).await;
            match status {
                TicketStatus::Open => counts.open = count,
                TicketStatus::InProgress => counts.in_progress = count,
                TicketStatus::Resolved => counts.resolved = count,
                TicketStatus::Closed => counts.closed = count,
            }
        }
        counts.total = self.store.count_tickets(|_| true).await;
        counts
    }

    pub async fn update_status(&self, id: &str, status: TicketStatus) -> Result<ActionOutcome<SupportTicket>> {
        let Some(_permit) = self.guard.try_begin(Action::UpdateTicketStatus, id) else {
            return Ok(ActionOutcome::Ignored);
        };

        let ticket = self
            .store
            .update_ticket(id, |ticket| ticket.set_status(status, ACTING_ADMIN_ID, Utc::now()))
            .await
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

        info!(ticket_id = %id, status = status.as_str(), "ticket status updated");
        Ok(ActionOutcome::Applied(ticket))
    }

    pub async fn add_comment(&self, id: &str, message: &str) -> Result<ActionOutcome<SupportTicket>> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::BadRequest("Comment message is required".to_string()));
        }
        let Some(_permit) = self.guard.try_begin(Action::AddTicketComment, id) else {
            return Ok(ActionOutcome::Ignored);
        };

        let comment = TicketComment {
            id: format!("comment-{}", Uuid::new_v4()),
            ticket_id: id.to_string(),
            author: ACTING_ADMIN_NAME.to_string(),
            author_role: AuthorRole::Admin,
            message: message.to_string(),
            created_at: Utc::now(),
        };
        let ticket = self
            .store
            .update_ticket(id, move |ticket| ticket.push_comment(comment))
            .await
            .ok_or_else(|| AppError::NotFound(format!("Ticket {} not found", id)))?;

        info!(ticket_id = %id, comments = ticket.comments.len(), "comment added");
        Ok(ActionOutcome::Applied(ticket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;
    use crate::store::MemoryKvStore;
    use std::sync::Arc;

    async fn service() -> (TicketService, ProcessingGuard) {
        let store = Store::open(Arc::new(MemoryKvStore::new()), LatencyConfig::NONE)
            .await
            .unwrap();
        let guard = ProcessingGuard::new();
        (TicketService::new(store, guard.clone()), guard)
    }

    #[tokio::test]
    async fn test_counts() {
        let (service, _) = service().await;
        let counts = service.ticket_counts().await;
        assert_eq!(
            counts,
            TicketCounts {
                open: 2,
                in_progress: 2,
                resolved: 1,
                closed: 1,
                total: 6,
            }
        );
    }

    #[tokio::test]
    async fn test_resolving_stamps_resolution() {
        let (service, _) = service().await;
        let outcome = service.update_status("ticket-001", TicketStatus::Resolved).await.unwrap();
        let ActionOutcome::Applied(ticket) = outcome else {
            panic!("expected applied outcome");
        };
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.resolved_by.as_deref(), Some(ACTING_ADMIN_ID));
        assert!(ticket.resolved_at.is_some());
        assert_eq!(service.ticket_counts().await.open, 1);
    }

    #[tokio::test]
    async fn test_in_progress_leaves_resolution_empty() {
        let (service, _) = service().await;
        let outcome = service.update_status("ticket-003", TicketStatus::InProgress).await.unwrap();
        let ActionOutcome::Applied(ticket) = outcome else {
            panic!("expected applied outcome");
        };
        assert!(ticket.resolved_at.is_none());
    }

    #[tokio::test]
    async fn test_add_comment() {
        let (service, _) = service().await;
        assert!(matches!(
            service.add_comment("ticket-001", "  ").await,
            Err(AppError::BadRequest(_))
        ));

        let outcome = service.add_comment("ticket-002", "Any update?").await.unwrap();
        let ActionOutcome::Applied(ticket) = outcome else {
            panic!("expected applied outcome");
        };
        assert_eq!(ticket.comments.len(), 2);
        let comment = ticket.comments.last().unwrap();
        assert_eq!(comment.author, ACTING_ADMIN_NAME);
        assert_eq!(comment.author_role, AuthorRole::Admin);
        assert_eq!(ticket.updated_at, comment.created_at);
    }

    #[tokio::test]
    async fn test_missing_ticket() {
        let (service, _) = service().await;
        assert!(matches!(
            service.update_status("ticket-999", TicketStatus::Closed).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_guarded_status_update_is_ignored() {
        let (service, guard) = service().await;
        let _permit = guard.try_begin(Action::UpdateTicketStatus, "ticket-001").unwrap();
        let outcome = service.update_status("ticket-001", TicketStatus::Closed).await.unwrap();
        assert!(outcome.is_ignored());
        assert_eq!(service.get_ticket("ticket-001").await.unwrap().status, TicketStatus::Open);
    }
}
