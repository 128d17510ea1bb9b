// Role-scoped views - "what does this role need to act on right now"

//! # Role-Scoped Views
//!
//! Pure read-side projection of the document store: a role's inbox is
//! every document whose `current_handler` is that role and whose status is
//! one the role can act on. No side effects; results reflect the routing
//! engine's latest committed write.

use crate::models::{Document, DocumentStatus, Role};
use crate::Result;

use super::storage::DocumentStorage;

/// The statuses `role` can act on
///
/// Mirrors the routing table's `from` column per role, plus the terminal
/// `filed` stage for the records desk (filed documents stay visible there
/// even though no action remains). A consistency test below keeps this in
/// lockstep with the table.
pub fn actionable_statuses(role: Role) -> &'static [DocumentStatus] {
    match role {
        Role::RecordsOfficer => &[
            DocumentStatus::Received,
            DocumentStatus::SentToRecords,
            DocumentStatus::DecisionMade,
            DocumentStatus::Dispatched,
            DocumentStatus::Filed,
        ],
        Role::BoardSecretary => &[
            DocumentStatus::ForwardedToSecretary,
            DocumentStatus::ReturnedToSecretaryFromChair,
        ],
        Role::BoardChair => &[DocumentStatus::SentToChair],
        Role::BoardCommittee => &[DocumentStatus::SentToCommittee],
        Role::ChiefOfficer => &[DocumentStatus::Received],
        Role::Hr => &[
            DocumentStatus::SentToHr,
            DocumentStatus::ReturnedToHrFromCommittee,
        ],
    }
}

/// Documents currently awaiting action by `role`
pub async fn inbox(storage: &dyn DocumentStorage, role: Role) -> Result<Vec<Document>> {
    let held = storage.list_documents(Some(role)).await?;
    let statuses = actionable_statuses(role);
    Ok(held
        .into_iter()
        .filter(|doc| statuses.contains(&doc.status))
        .collect())
}
