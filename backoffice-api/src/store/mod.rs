//! Mock data sources
//!
//! [`Store`] owns every collection the back-office reads and mutates. It is
//! built once at startup and shared through `AppState`; clones share the same
//! data. Each call sleeps for the configured latency before touching the data
//! so the UI sees realistic loading states.

pub mod kv;
pub(crate) mod seed;

use std::sync::Arc;
use std::time::Duration;

use backoffice_core::models::{
    ContactRequest, DeletedUser, Report, SupportTicket, TicketStatus, User, VerificationStatus,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::LatencyConfig;

pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore, StorageError};

/// Key the deleted-user log is persisted under.
pub const DELETED_USERS_KEY: &str = "deletedUsers";

#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    users: RwLock<Vec<User>>,
    tickets: RwLock<Vec<SupportTicket>>,
    contact_requests: RwLock<Vec<ContactRequest>>,
    deleted_users: RwLock<Vec<DeletedUser>>,
    kv: Arc<dyn KeyValueStore>,
    latency: LatencyConfig,
}

impl Store {
    /// Seeds the in-memory collections and loads the deleted-user log from
    /// `kv`, writing the sample log there first if nothing is stored yet.
    pub async fn open(kv: Arc<dyn KeyValueStore>, latency: LatencyConfig) -> anyhow::Result<Self> {
        let deleted_users = load_deleted_users(&kv).await?;

        Ok(Self {
            inner: Arc::new(Inner {
                users: RwLock::new(seed::users()?),
                tickets: RwLock::new(seed::tickets()?),
                contact_requests: RwLock::new(seed::contact_requests()?),
                deleted_users: RwLock::new(deleted_users),
                kv,
                latency,
            }),
        })
    }

    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    // Users

    pub async fn users(&self) -> Vec<User> {
        self.pause(self.inner.latency.read()).await;
        self.inner.users.read().await.clone()
    }

    pub async fn users_by_status(&self, status: VerificationStatus) -> Vec<User> {
        self.pause(self.inner.latency.read()).await;
        self.inner
            .users
            .read()
            .await
            .iter()
            .filter(|user| user.status == status)
            .cloned()
            .collect()
    }

    pub async fn user(&self, id: &str) -> Option<User> {
        self.pause(self.inner.latency.lookup()).await;
        self.inner.users.read().await.iter().find(|user| user.id == id).cloned()
    }

    pub async fn count_users<F>(&self, predicate: F) -> usize
    where
        F: Fn(&User) -> bool + Send,
    {
        self.pause(self.inner.latency.count()).await;
        self.inner.users.read().await.iter().filter(|user| predicate(user)).count()
    }

    /// Applies `change` to the user and returns the updated record.
    pub async fn update_user<F>(&self, id: &str, change: F) -> Option<User>
    where
        F: FnOnce(&mut User) + Send,
    {
        self.pause(self.inner.latency.write()).await;
        let mut users = self.inner.users.write().await;
        let user = users.iter_mut().find(|user| user.id == id)?;
        change(user);
        Some(user.clone())
    }

    pub async fn remove_user(&self, id: &str) -> Option<User> {
        self.pause(self.inner.latency.write()).await;
        let mut users = self.inner.users.write().await;
        let index = users.iter().position(|user| user.id == id)?;
        Some(users.remove(index))
    }

    // Reports

    /// Reports generated from the current users, plus the users they resolve
    /// against. Both come from one read so they are consistent.
    pub async fn reports(&self) -> (Vec<Arc<Report>>, Vec<User>) {
        self.pause(self.inner.latency.read()).await;
        let users = self.inner.users.read().await.clone();
        (seed::reports_for(&users), users)
    }

    // Support tickets

    pub async fn tickets(&self, status: Option<TicketStatus>) -> Vec<SupportTicket> {
        self.pause(self.inner.latency.read()).await;
        self.inner
            .tickets
            .read()
            .await
            .iter()
            .filter(|ticket| status.map_or(true, |s| ticket.status == s))
            .cloned()
            .collect()
    }

    pub async fn ticket(&self, id: &str) -> Option<SupportTicket> {
        self.pause(self.inner.latency.lookup()).await;
        self.inner.tickets.read().await.iter().find(|ticket| ticket.id == id).cloned()
    }

    pub async fn count_tickets<F>(&self, predicate: F) -> usize
    where
        F: Fn(&SupportTicket) -> bool + Send,
    {
        self.pause(self.inner.latency.count()).await;
        self.inner.tickets.read().await.iter().filter(|ticket| predicate(ticket)).count()
    }

    pub async fn update_ticket<F>(&self, id: &str, change: F) -> Option<SupportTicket>
    where
        F: FnOnce(&mut SupportTicket) + Send,
    {
        self.pause(self.inner.latency.write()).await;
        let mut tickets = self.inner.tickets.write().await;
        let ticket = tickets.iter_mut().find(|ticket| ticket.id == id)?;
        change(ticket);
        Some(ticket.clone())
    }

    // Contact requests

    pub async fn contact_requests(&self) -> Vec<ContactRequest> {
        self.pause(self.inner.latency.read()).await;
        self.inner.contact_requests.read().await.clone()
    }

    pub async fn contact_request(&self, id: &str) -> Option<ContactRequest> {
        self.pause(self.inner.latency.lookup()).await;
        self.inner
            .contact_requests
            .read()
            .await
            .iter()
            .find(|request| request.id == id)
            .cloned()
    }

    pub async fn count_contact_requests<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ContactRequest) -> bool + Send,
    {
        self.pause(self.inner.latency.count()).await;
        self.inner
            .contact_requests
            .read()
            .await
            .iter()
            .filter(|request| predicate(request))
            .count()
    }

    /// Contact operations are light-weight and use lookup latency.
    pub async fn update_contact_request<F>(&self, id: &str, change: F) -> Option<ContactRequest>
    where
        F: FnOnce(&mut ContactRequest) + Send,
    {
        self.pause(self.inner.latency.lookup()).await;
        let mut requests = self.inner.contact_requests.write().await;
        let request = requests.iter_mut().find(|request| request.id == id)?;
        change(request);
        Some(request.clone())
    }

    // Deleted-user log

    pub async fn deleted_users(&self) -> Vec<DeletedUser> {
        self.pause(self.inner.latency.read()).await;
        self.inner.deleted_users.read().await.clone()
    }

    pub async fn count_deleted_users<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DeletedUser) -> bool + Send,
    {
        self.pause(self.inner.latency.count()).await;
        self.inner
            .deleted_users
            .read()
            .await
            .iter()
            .filter(|record| predicate(record))
            .count()
    }

    /// Appends to the log and rewrites the persisted copy. Memory is only
    /// updated once the write succeeds.
    pub async fn record_deletion(&self, record: DeletedUser) -> Result<(), StorageError> {
        let mut log = self.inner.deleted_users.write().await;
        let mut next = log.clone();
        next.push(record);
        self.inner.kv.set_json(DELETED_USERS_KEY, &next).await?;
        *log = next;
        Ok(())
    }
}

async fn load_deleted_users(kv: &Arc<dyn KeyValueStore>) -> anyhow::Result<Vec<DeletedUser>> {
    match kv.get_json::<Vec<DeletedUser>>(DELETED_USERS_KEY).await {
        Ok(Some(records)) if !records.is_empty() => {
            info!(count = records.len(), "loaded deleted-user log");
            return Ok(records);
        }
        Ok(_) => {}
        Err(StorageError::Malformed { key, source }) => {
            warn!(%key, error = %source, "discarding unreadable deleted-user log");
        }
        Err(e) => return Err(e.into()),
    }

    let records = seed::deleted_users()?;
    kv.set_json(DELETED_USERS_KEY, &records).await?;
    info!(count = records.len(), "seeded deleted-user log");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::models::Deletion;
    use chrono::Utc;

    async fn store_with(kv: Arc<dyn KeyValueStore>) -> Store {
        Store::open(kv, LatencyConfig::NONE).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_seeds_empty_kv() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        let store = store_with(kv.clone()).await;

        assert_eq!(store.users().await.len(), 11);
        assert_eq!(store.deleted_users().await.len(), 18);

        let persisted: Vec<DeletedUser> = kv.get_json(DELETED_USERS_KEY).await.unwrap().unwrap();
        assert_eq!(persisted.len(), 18);
    }

    #[tokio::test]
    async fn test_open_reseeds_malformed_log() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        kv.set(DELETED_USERS_KEY, "not json".to_string()).await.unwrap();

        let store = store_with(kv).await;
        assert_eq!(store.deleted_users().await.len(), 18);
    }

    #[tokio::test]
    async fn test_open_recovers_from_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = store_with(Arc::new(FileKvStore::new(&path))).await;
        assert_eq!(store.deleted_users().await.len(), 18);

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let entries: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(entries.get(DELETED_USERS_KEY).is_some());
    }

    #[tokio::test]
    async fn test_record_deletion_persists_whole_log() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());
        let store = store_with(kv.clone()).await;
        let user = store.user("6").await.unwrap();

        store
            .record_deletion(DeletedUser {
                user_id: user.id.clone(),
                user,
                deleted_at: Utc::now(),
                deletion: Deletion::UserInitiated {
                    user_message: "Closing shop".to_string(),
                },
            })
            .await
            .unwrap();

        let persisted: Vec<DeletedUser> = kv.get_json(DELETED_USERS_KEY).await.unwrap().unwrap();
        assert_eq!(persisted.len(), 19);
        assert_eq!(persisted.last().map(|d| d.user_id.as_str()), Some("6"));

        // a second store over the same kv sees the stored log, not the seed
        let reopened = store_with(kv).await;
        assert_eq!(reopened.deleted_users().await.len(), 19);
    }

    #[tokio::test]
    async fn test_update_and_remove_user() {
        let store = store_with(Arc::new(MemoryKvStore::new())).await;

        let updated = store
            .update_user("1", |user| user.status = VerificationStatus::Approved)
            .await
            .unwrap();
        assert_eq!(updated.status, VerificationStatus::Approved);
        assert!(store.update_user("missing", |_| {}).await.is_none());

        assert!(store.remove_user("1").await.is_some());
        assert!(store.user("1").await.is_none());
        assert!(store.remove_user("1").await.is_none());
    }

    #[tokio::test]
    async fn test_reports_track_current_users() {
        let store = store_with(Arc::new(MemoryKvStore::new())).await;
        let (reports, users) = store.reports().await;
        assert_eq!(reports.len(), 9);
        assert_eq!(users.len(), 11);

        store.remove_user("1").await;
        let (reports, _) = store.reports().await;
        assert_eq!(reports.len(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = store_with(Arc::new(MemoryKvStore::new())).await;
        let other = store.clone();
        other.remove_user("2").await;
        assert_eq!(store.users().await.len(), 10);
    }
}
