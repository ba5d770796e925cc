// Contact request service - pending and resolved tabs, operator actions
use backoffice_core::models::{ContactOperation, ContactRequest, OperationRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};
use crate::services::guard::{Action, ActionOutcome, ProcessingGuard};
use crate::services::ACTING_ADMIN_ID;
use crate::store::Store;

/// Which tab of the contact screen a listing is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactTab {
    #[default]
    Pending,
    Resolved,
}

pub struct ContactService {
    store: Store,
    guard: ProcessingGuard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactCounts {
    pub total: usize,
    pub no_operation: usize,
    pub resolved: usize,
}

impl ContactService {
    pub fn new(store: Store, guard: ProcessingGuard) -> Self {
        Self { store, guard }
    }

    pub async fn list(&self, tab: ContactTab) -> Vec<ContactRequest> {
        match tab {
            ContactTab::Pending => self.pending().await,
            ContactTab::Resolved => self.resolved().await,
        }
    }

    /// Requests nobody has acted on, newest first.
    pub async fn pending(&self) -> Vec<ContactRequest> {
        let mut requests: Vec<ContactRequest> = self
            .store
            .contact_requests()
            .await
            .into_iter()
            .filter(ContactRequest::is_unhandled)
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    /// Resolved requests, most recently operated first.
    pub async fn resolved(&self) -> Vec<ContactRequest> {
        let mut requests: Vec<ContactRequest> = self
            .store
            .contact_requests()
            .await
            .into_iter()
            .filter(ContactRequest::is_resolved)
            .collect();
        requests.sort_by(|a, b| b.operated_at().cmp(&a.operated_at()));
        requests
    }

    pub async fn get(&self, id: &str) -> Result<ContactRequest> {
        self.store
            .contact_request(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Contact request {} not found", id)))
    }

    pub async fn counts(&self) -> ContactCounts {
        ContactCounts {
            total: self.store.count_contact_requests(|_| true).await,
            no_operation: self.store.count_contact_requests(ContactRequest::is_unhandled).await,
            resolved: self.store.count_contact_requests(ContactRequest::is_resolved).await,
        }
    }

    pub async fn set_operation(
        &self,
        id: &str,
        operation: ContactOperation,
    ) -> Result<ActionOutcome<ContactRequest>> {
        let Some(_permit) = self.guard.try_begin(Action::SetContactOperation, id) else {
            return Ok(ActionOutcome::Ignored);
        };

        let record = OperationRecord {
            operation,
            operated_at: Utc::now(),
            operated_by: ACTING_ADMIN_ID.to_string(),
        };
        let request = self
            .store
            .update_contact_request(id, move |request| request.operation = Some(record))
            .await
            .ok_or_else(|| AppError::NotFound(format!("Contact request {} not found", id)))?;

        info!(contact_id = %id, operation = operation.as_str(), "contact operation set");
        Ok(ActionOutcome::Applied(request))
    }

    /// Returns the request to the pending tab.
    pub async fn clear_operation(&self, id: &str) -> Result<ActionOutcome<ContactRequest>> {
        let Some(_permit) = self.guard.try_begin(Action::ClearContactOperation, id) else {
            return Ok(ActionOutcome::Ignored);
        };

        let request = self
            .store
            .update_contact_request(id, |request| request.operation = None)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Contact request {} not found", id)))?;

        info!(contact_id = %id, "contact operation cleared");
        Ok(ActionOutcome::Applied(request))
    }
}
