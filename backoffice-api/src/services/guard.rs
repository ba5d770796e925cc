// Processing guard - rejects repeated mutating actions while one is in flight
use std::fmt;
use std::sync::Arc;

use dashmap::DashSet;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ApproveUser,
    RejectUser,
    DeleteUser,
    UpdateTicketStatus,
    AddTicketComment,
    SetContactOperation,
    ClearContactOperation,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ApproveUser => "approve_user",
            Action::RejectUser => "reject_user",
            Action::DeleteUser => "delete_user",
            Action::UpdateTicketStatus => "update_ticket_status",
            Action::AddTicketComment => "add_ticket_comment",
            Action::SetContactOperation => "set_contact_operation",
            Action::ClearContactOperation => "clear_contact_operation",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a guarded action. `Ignored` means the same action on the same
/// entity was already in progress; nothing was changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "lowercase")]
pub enum ActionOutcome<T> {
    Applied(T),
    Ignored,
}

impl<T> ActionOutcome<T> {
    pub fn is_ignored(&self) -> bool {
        matches!(self, ActionOutcome::Ignored)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionOutcome<U> {
        match self {
            ActionOutcome::Applied(value) => ActionOutcome::Applied(f(value)),
            ActionOutcome::Ignored => ActionOutcome::Ignored,
        }
    }
}

/// Set of (action, entity) pairs currently being processed.
#[derive(Clone, Default)]
pub struct ProcessingGuard {
    in_flight: Arc<DashSet<(Action, String)>>,
}

impl ProcessingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `(action, entity_id)`. Returns `None` when it is already
    /// claimed; the claim is released when the returned permit drops.
    pub fn try_begin(&self, action: Action, entity_id: &str) -> Option<InFlight> {
        let key = (action, entity_id.to_string());
        if !self.in_flight.insert(key.clone()) {
            warn!(%action, entity_id, "action already in progress, ignoring");
            return None;
        }
        Some(InFlight {
            in_flight: Arc::clone(&self.in_flight),
            key,
        })
    }

    pub fn is_in_flight(&self, action: Action, entity_id: &str) -> bool {
        self.in_flight.contains(&(action, entity_id.to_string()))
    }
}

/// Permit for one in-flight action.
pub struct InFlight {
    in_flight: Arc<DashSet<(Action, String)>>,
    key: (Action, String),
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_is_rejected_until_release() {
        let guard = ProcessingGuard::new();

        let permit = guard.try_begin(Action::ApproveUser, "1");
        assert!(permit.is_some());
        assert!(guard.is_in_flight(Action::ApproveUser, "1"));
        assert!(guard.try_begin(Action::ApproveUser, "1").is_none());

        drop(permit);
        assert!(!guard.is_in_flight(Action::ApproveUser, "1"));
        assert!(guard.try_begin(Action::ApproveUser, "1").is_some());
    }

    #[test]
    fn test_claims_are_per_action_and_entity() {
        let guard = ProcessingGuard::new();
        let _approve = guard.try_begin(Action::ApproveUser, "1").unwrap();

        assert!(guard.try_begin(Action::ApproveUser, "2").is_some());
        assert!(guard.try_begin(Action::RejectUser, "1").is_some());
    }

    #[test]
    fn test_clones_share_claims() {
        let guard = ProcessingGuard::new();
        let other = guard.clone();
        let _permit = guard.try_begin(Action::DeleteUser, "7").unwrap();
        assert!(other.try_begin(Action::DeleteUser, "7").is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        let applied = serde_json::to_value(ActionOutcome::Applied(5)).unwrap();
        assert_eq!(applied, serde_json::json!({ "outcome": "applied", "data": 5 }));

        let ignored = serde_json::to_value(ActionOutcome::<u32>::Ignored).unwrap();
        assert_eq!(ignored, serde_json::json!({ "outcome": "ignored" }));
    }
}
