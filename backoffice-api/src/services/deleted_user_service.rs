// Deleted user service - audit log of removed accounts
use backoffice_core::models::{DeletedUser, DeletionType};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::store::Store;

pub struct DeletedUserService {
    store: Store,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletionCounts {
    pub total: usize,
    pub user_initiated: usize,
    pub admin_initiated: usize,
}

impl DeletedUserService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Records of `kind` (all when `None`), most recent deletion first.
    pub async fn list(&self, kind: Option<DeletionType>) -> Vec<DeletedUser> {
        let mut records: Vec<DeletedUser> = self
            .store
            .deleted_users()
            .await
            .into_iter()
            .filter(|record| kind.map_or(true, |k| record.kind() == k))
            .collect();
        records.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        records
    }

    pub async fn count(&self, kind: Option<DeletionType>) -> usize {
        self.store
            .count_deleted_users(|record| kind.map_or(true, |k| record.kind() == k))
            .await
    }

    pub async fn counts(&self) -> DeletionCounts {
        DeletionCounts {
            total: self.count(None).await,
            user_initiated: self.count(Some(DeletionType::UserInitiated)).await,
            admin_initiated: self.count(Some(DeletionType::AdminInitiated)).await,
        }
    }

    pub async fn record(&self, record: DeletedUser) -> Result<()> {
        let user_id = record.user_id.clone();
        let kind = record.kind();
        self.store.record_deletion(record).await?;
        info!(user_id = %user_id, kind = kind.as_str(), "deletion recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;
    use crate::store::MemoryKvStore;
    use backoffice_core::models::Deletion;
    use chrono::Utc;
    use std::sync::Arc;

    async fn service() -> (DeletedUserService, Store) {
        let store = Store::open(Arc::new(MemoryKvStore::new()), LatencyConfig::NONE)
            .await
            .unwrap();
        (DeletedUserService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_filtered() {
        let (service, _) = service().await;

        let all = service.list(None).await;
        assert_eq!(all.len(), 18);
        assert!(all.windows(2).all(|w| w[0].deleted_at >= w[1].deleted_at));
        assert_eq!(all[0].user_id, "del-001");

        let admin = service.list(Some(DeletionType::AdminInitiated)).await;
        let ids: Vec<&str> = admin.iter().map(|d| d.user_id.as_str()).collect();
        assert_eq!(ids, vec!["del-002", "del-004", "del-006", "del-008"]);
    }

    #[tokio::test]
    async fn test_counts_by_kind() {
        let (service, _) = service().await;
        let counts = service.counts().await;
        assert_eq!(counts.total, 18);
        assert_eq!(counts.user_initiated, 14);
        assert_eq!(counts.admin_initiated, 4);
    }

    #[tokio::test]
    async fn test_record_appears_first() {
        let (service, store) = service().await;
        let user = store.user("7").await.unwrap();
        service
            .record(DeletedUser {
                user_id: user.id.clone(),
                user,
                deleted_at: Utc::now(),
                deletion: Deletion::UserInitiated {
                    user_message: "Moving abroad".to_string(),
                },
            })
            .await
            .unwrap();

        let all = service.list(None).await;
        assert_eq!(all[0].user_id, "7");
        assert_eq!(service.count(Some(DeletionType::UserInitiated)).await, 15);
    }
}
