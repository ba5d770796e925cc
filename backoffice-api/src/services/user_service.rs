// User service - verification queue and account removal
use backoffice_core::models::{DeletedUser, Deletion, User, VerificationStatus};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, Result};
use crate::services::guard::{Action, ActionOutcome, ProcessingGuard};
use crate::services::{DeletedUserService, ACTING_ADMIN_ID};
use crate::store::Store;

pub struct UserService {
    store: Store,
    guard: ProcessingGuard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerificationCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
}

impl UserService {
    pub fn new(store: Store, guard: ProcessingGuard) -> Self {
        Self { store, guard }
    }

    pub async fn list_users(&self, status: Option<VerificationStatus>) -> Vec<User> {
        match status {
            Some(status) => self.store.users_by_status(status).await,
            None => self.store.users().await,
        }
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.store
            .user(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn verification_counts(&self) -> VerificationCounts {
        let pending = self.store.count_users(|u| u.status == VerificationStatus::Pending).await;
        let approved = self.store.count_users(|u| u.status == VerificationStatus::Approved).await;
        let rejected = self.store.count_users(|u| u.status == VerificationStatus::Rejected).await;
        let total = self.store.count_users(|_| true).await;

        VerificationCounts {
            pending,
            approved,
            rejected,
            total,
        }
    }

    /// Approves a pending submission. Blank remarks are stored as none.
    pub async fn approve_user(&self, id: &str, remarks: Option<String>) -> Result<ActionOutcome<User>> {
        let Some(_permit) = self.guard.try_begin(Action::ApproveUser, id) else {
            return Ok(ActionOutcome::Ignored);
        };

        self.ensure_reviewable(id).await?;
        let remarks = remarks.filter(|r| !r.trim().is_empty());
        let user = self
            .store
            .update_user(id, move |user| {
                user.status = VerificationStatus::Approved;
                user.remarks = remarks;
            })
            .await
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        info!(user_id = %id, "user approved");
        Ok(ActionOutcome::Applied(user))
    }

    pub async fn reject_user(&self, id: &str, remarks: &str) -> Result<ActionOutcome<User>> {
        if remarks.trim().is_empty() {
            return Err(AppError::BadRequest("Remarks are required to reject a user".to_string()));
        }
        let Some(_permit) = self.guard.try_begin(Action::RejectUser, id) else {
            return Ok(ActionOutcome::Ignored);
        };

        self.ensure_reviewable(id).await?;
        let remarks = remarks.trim().to_string();
        let user = self
            .store
            .update_user(id, move |user| {
                user.status = VerificationStatus::Rejected;
                user.remarks = Some(remarks);
            })
            .await
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        info!(user_id = %id, "user rejected");
        Ok(ActionOutcome::Applied(user))
    }

    /// Removes the user and records an admin-initiated entry in the
    /// deleted-user log. The log is written before the user is removed.
    pub async fn delete_user(&self, id: &str, reason: &str) -> Result<ActionOutcome<DeletedUser>> {
        if reason.trim().is_empty() {
            return Err(AppError::BadRequest("A reason is required to delete a user".to_string()));
        }
        let Some(_permit) = self.guard.try_begin(Action::DeleteUser, id) else {
            return Ok(ActionOutcome::Ignored);
        };

        let user = self.get_user(id).await?;
        let record = DeletedUser {
            user_id: user.id.clone(),
            user,
            deleted_at: Utc::now(),
            deletion: Deletion::AdminInitiated {
                admin_reason: reason.trim().to_string(),
                deleted_by: ACTING_ADMIN_ID.to_string(),
            },
        };

        DeletedUserService::new(self.store.clone())
            .record(record.clone())
            .await?;
        self.store.remove_user(id).await;

        info!(user_id = %id, deleted_by = ACTING_ADMIN_ID, "user deleted");
        Ok(ActionOutcome::Applied(record))
    }

    async fn ensure_reviewable(&self, id: &str) -> Result<()> {
        let user = self.get_user(id).await?;
        if !user.status.is_reviewable() {
            return Err(AppError::BadRequest(format!(
                "User {} has already been {}",
                id,
                user.status.as_str()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;
    use crate::store::MemoryKvStore;
    use backoffice_core::models::DeletionType;
    use std::sync::Arc;

    async fn service() -> (UserService, Store, ProcessingGuard) {
        let store = Store::open(Arc::new(MemoryKvStore::new()), LatencyConfig::NONE)
            .await
            .unwrap();
        let guard = ProcessingGuard::new();
        (UserService::new(store.clone(), guard.clone()), store, guard)
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let (service, _, _) = service().await;
        assert_eq!(service.list_users(Some(VerificationStatus::Pending)).await.len(), 5);
        assert_eq!(service.list_users(Some(VerificationStatus::Approved)).await.len(), 3);
        assert_eq!(service.list_users(None).await.len(), 11);
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let (service, _, _) = service().await;
        assert!(matches!(service.get_user("404").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_approve_with_blank_remarks() {
        let (service, _, _) = service().await;
        let outcome = service.approve_user("1", Some("   ".to_string())).await.unwrap();
        let ActionOutcome::Applied(user) = outcome else {
            panic!("expected applied outcome");
        };
        assert_eq!(user.status, VerificationStatus::Approved);
        assert_eq!(user.remarks, None);

        let counts = service.verification_counts().await;
        assert_eq!(counts.pending, 4);
        assert_eq!(counts.approved, 4);
        assert_eq!(counts.total, 11);
    }

    #[tokio::test]
    async fn test_reject_requires_remarks() {
        let (service, _, _) = service().await;
        assert!(matches!(
            service.reject_user("2", " ").await,
            Err(AppError::BadRequest(_))
        ));

        let outcome = service.reject_user("2", "Blurry scan").await.unwrap();
        let ActionOutcome::Applied(user) = outcome else {
            panic!("expected applied outcome");
        };
        assert_eq!(user.status, VerificationStatus::Rejected);
        assert_eq!(user.remarks.as_deref(), Some("Blurry scan"));
    }

    #[tokio::test]
    async fn test_already_reviewed_user_is_rejected() {
        let (service, _, _) = service().await;
        assert!(matches!(
            service.approve_user("6", None).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_in_flight_action_is_ignored() {
        let (service, _, guard) = service().await;
        let _permit = guard.try_begin(Action::ApproveUser, "3").unwrap();

        let outcome = service.approve_user("3", None).await.unwrap();
        assert!(outcome.is_ignored());
        assert_eq!(service.get_user("3").await.unwrap().status, VerificationStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_user_records_admin_deletion() {
        let (service, store, _) = service().await;

        let outcome = service.delete_user("1", "Repeated harassment").await.unwrap();
        let ActionOutcome::Applied(record) = outcome else {
            panic!("expected applied outcome");
        };
        assert_eq!(record.kind(), DeletionType::AdminInitiated);
        assert!(store.user("1").await.is_none());

        let log = store.deleted_users().await;
        assert_eq!(log.len(), 19);
        assert_eq!(log.last().map(|d| d.user_id.as_str()), Some("1"));

        assert!(matches!(
            service.delete_user("1", "again").await,
            Err(AppError::NotFound(_))
        ));
    }
}
