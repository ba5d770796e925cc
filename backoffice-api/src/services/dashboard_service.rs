// Dashboard service - headline numbers for the landing page
use serde::Serialize;

use crate::services::{
    ContactCounts, ContactService, DeletedUserService, DeletionCounts, ProcessingGuard,
    ReportService, TicketCounts, TicketService, UserService, VerificationCounts,
};
use crate::store::Store;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub verification: VerificationCounts,
    pub tickets: TicketCounts,
    pub contacts: ContactCounts,
    pub reported_users: usize,
    pub deleted_users: DeletionCounts,
}

pub struct DashboardService {
    store: Store,
    guard: ProcessingGuard,
}

impl DashboardService {
    pub fn new(store: Store, guard: ProcessingGuard) -> Self {
        Self { store, guard }
    }

    /// Counts are derived from the sources on every call.
    pub async fn stats(&self) -> DashboardStats {
        let users = UserService::new(self.store.clone(), self.guard.clone());
        let tickets = TicketService::new(self.store.clone(), self.guard.clone());
        let contacts = ContactService::new(self.store.clone(), self.guard.clone());
        let reports = ReportService::new(self.store.clone());
        let deleted = DeletedUserService::new(self.store.clone());

        let (verification, tickets, contacts, reported_users, deleted_users) = tokio::join!(
            users.verification_counts(),
            tickets.ticket_counts(),
            contacts.counts(),
            reports.reported_user_count(),
            deleted.counts(),
        );

        DashboardStats {
            verification,
            tickets,
            contacts,
            reported_users,
            deleted_users,
        }
    }
}
