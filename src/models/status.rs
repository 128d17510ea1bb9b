// DocumentStatus - pipeline stages and the status -> handler mapping

//! # Document Status
//!
//! The closed set of stages a document moves through, and the invariant
//! that binds each stage to the role allowed to hold the document there.
//! The routing engine is the only writer of status, so the
//! `(status, current_handler)` pair on a stored document is always one of
//! the combinations [`expected_handlers`](DocumentStatus::expected_handlers)
//! admits.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::role::Role;

/// A stage in the document routing pipeline
///
/// Wire names are the snake_case strings in the `rename` attributes. The
/// historical naming inconsistency around the chair's return leg is
/// resolved to the single canonical value `returned_to_secretary_from_chair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Registered at an intake desk, awaiting first forward
    #[serde(rename = "received")]
    Received,

    /// With the board secretary for review
    #[serde(rename = "forwarded_to_secretary")]
    ForwardedToSecretary,

    /// Put before the board chair
    #[serde(rename = "sent_to_chair")]
    SentToChair,

    /// Referred to the board committee
    #[serde(rename = "sent_to_committee")]
    SentToCommittee,

    /// Returned by the chair for the secretary to record the decision
    #[serde(rename = "returned_to_secretary_from_chair")]
    ReturnedToSecretaryFromChair,

    /// Referred by the chair to HR
    #[serde(rename = "sent_to_hr")]
    SentToHr,

    /// Returned by the committee to HR
    #[serde(rename = "returned_to_hr_from_committee")]
    ReturnedToHrFromCommittee,

    /// Back at the records desk, ready for dispatch
    #[serde(rename = "sent_to_records")]
    SentToRecords,

    /// Decision recorded, ready for dispatch
    #[serde(rename = "decision_made")]
    DecisionMade,

    /// Decision communicated to the initiator
    #[serde(rename = "dispatched")]
    Dispatched,

    /// Closed and archived; no outgoing edges
    #[serde(rename = "filed")]
    Filed,
}

impl DocumentStatus {
    /// All statuses, in pipeline order
    pub const ALL: [DocumentStatus; 11] = [
        DocumentStatus::Received,
        DocumentStatus::ForwardedToSecretary,
        DocumentStatus::SentToChair,
        DocumentStatus::SentToCommittee,
        DocumentStatus::ReturnedToSecretaryFromChair,
        DocumentStatus::SentToHr,
        DocumentStatus::ReturnedToHrFromCommittee,
        DocumentStatus::SentToRecords,
        DocumentStatus::DecisionMade,
        DocumentStatus::Dispatched,
        DocumentStatus::Filed,
    ];

    /// Canonical wire name for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Received => "received",
            DocumentStatus::ForwardedToSecretary => "forwarded_to_secretary",
            DocumentStatus::SentToChair => "sent_to_chair",
            DocumentStatus::SentToCommittee => "sent_to_committee",
            DocumentStatus::ReturnedToSecretaryFromChair => "returned_to_secretary_from_chair",
            DocumentStatus::SentToHr => "sent_to_hr",
            DocumentStatus::ReturnedToHrFromCommittee => "returned_to_hr_from_committee",
            DocumentStatus::SentToRecords => "sent_to_records",
            DocumentStatus::DecisionMade => "decision_made",
            DocumentStatus::Dispatched => "dispatched",
            DocumentStatus::Filed => "filed",
        }
    }

    /// Parse a wire name back into a status
    pub fn parse(value: &str) -> Option<DocumentStatus> {
        DocumentStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == value)
    }

    /// The roles allowed to hold a document in this status
    ///
    /// Every status has exactly one valid handler except `received`, which
    /// admits both intake points (records officer and chief officer). A
    /// stored document whose handler is outside this set is corrupted state
    /// the engine must never produce.
    pub fn expected_handlers(&self) -> &'static [Role] {
        match self {
            DocumentStatus::Received => &[Role::RecordsOfficer, Role::ChiefOfficer],
            DocumentStatus::ForwardedToSecretary => &[Role::BoardSecretary],
            DocumentStatus::SentToChair => &[Role::BoardChair],
            DocumentStatus::SentToCommittee => &[Role::BoardCommittee],
            DocumentStatus::ReturnedToSecretaryFromChair => &[Role::BoardSecretary],
            DocumentStatus::SentToHr => &[Role::Hr],
            DocumentStatus::ReturnedToHrFromCommittee => &[Role::Hr],
            DocumentStatus::SentToRecords => &[Role::RecordsOfficer],
            DocumentStatus::DecisionMade => &[Role::RecordsOfficer],
            DocumentStatus::Dispatched => &[Role::RecordsOfficer],
            DocumentStatus::Filed => &[Role::RecordsOfficer],
        }
    }

    /// Whether `handler` may hold a document in this status
    pub fn permits(&self, handler: Role) -> bool {
        self.expected_handlers().contains(&handler)
    }

    /// Whether dispatch is legal from this status
    pub fn is_dispatchable(&self) -> bool {
        matches!(
            self,
            DocumentStatus::SentToRecords | DocumentStatus::DecisionMade
        )
    }

    /// Whether this status has no outgoing edges
    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Filed)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
