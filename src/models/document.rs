// Document - one routed record and its descriptive attributes

//! # Document Model
//!
//! The persisted record of a routed document: its identity (reference
//! number), descriptive attributes, current `(status, current_handler)`
//! pair, and the append-only transition history. Status and handler are
//! mutated only through [`Document::apply`], which the storage layer calls
//! under its write lock on behalf of the routing engine - never directly
//! by an API action. Documents are never hard-deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;
use super::route::TransitionRecord;
use super::status::DocumentStatus;

/// Kind of document being routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Letter,
    Memo,
    Report,
    Application,
    Proposal,
    Other,
}

/// Handling priority assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

/// Who sent the document in
///
/// Descriptive fields only - departments are not workflow entities and
/// carry no routing logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiator {
    pub department: String,
    pub contact_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

/// Stored file attached at registration
///
/// The bytes themselves live with the file-storage collaborator; this is
/// only the pointer the attachment endpoint resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub path: String,
    pub mime_type: String,
}

/// One routed record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier for this document
    pub id: Uuid,

    /// Reference number, unique across the registry; either system-assigned
    /// or supplied by the initiator
    pub reference_number: String,

    /// Subject line
    pub subject: String,

    /// Kind of document
    pub document_type: DocumentType,

    /// Handling priority
    pub priority: Priority,

    /// Originating party
    pub initiator: Initiator,

    /// Date carried on the document itself
    pub document_date: NaiveDate,

    /// Optional stored attachment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,

    /// Current pipeline stage
    pub status: DocumentStatus,

    /// Role currently responsible for acting on the document
    pub current_handler: Role,

    /// Final decision text, set at dispatch and relayed to the initiator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_summary: Option<String>,

    /// Set when the outbound dispatch notification could not be delivered;
    /// never rolls back the dispatch itself
    pub notification_failed: bool,

    /// Optimistic-concurrency counter, bumped on every committed transition
    pub version: u64,

    /// When the document was registered
    pub created_at: DateTime<Utc>,

    /// When the document was last modified
    pub updated_at: DateTime<Utc>,

    /// Append-only record of every transition applied to this document
    #[serde(default)]
    pub history: Vec<TransitionRecord>,
}

impl Document {
    /// Register a new document at an intake desk
    ///
    /// The document starts in `received`, held by the intake role. Input
    /// validation (non-blank reference number and subject, intake-role
    /// check, reference uniqueness) is the routing engine's job; this
    /// constructor only assembles the record.
    #[allow(clippy::too_many_arguments)]
    pub fn register(
        reference_number: String,
        subject: String,
        document_type: DocumentType,
        priority: Priority,
        initiator: Initiator,
        document_date: NaiveDate,
        attachment: Option<Attachment>,
        intake_role: Role,
    ) -> Self {
        let now = Utc::now();

        Document {
            id: Uuid::new_v4(),
            reference_number,
            subject,
            document_type,
            priority,
            initiator,
            document_date,
            attachment,
            status: DocumentStatus::Received,
            current_handler: intake_role,
            decision_summary: None,
            notification_failed: false,
            version: 0,
            created_at: now,
            updated_at: now,
            history: vec![],
        }
    }

    /// Apply a committed transition: move status and handler, append the
    /// audit record, bump the version
    ///
    /// Called by the storage layer after its version check passed; the
    /// record's `to_status`/`to_handler` come from the routing table, so
    /// the status/handler invariant is preserved by construction.
    pub fn apply(&mut self, record: TransitionRecord) {
        self.status = record.to_status;
        self.current_handler = record.to_handler;
        self.history.push(record);
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Whether the current handler is valid for the current status
    pub fn handler_consistent(&self) -> bool {
        self.status.permits(self.current_handler)
    }

    /// The most recent transition, if any
    pub fn last_transition(&self) -> Option<&TransitionRecord> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::{find_edge, RouteAction};

    fn sample_document() -> Document {
        Document::register(
            "TNPSB/2024/001".to_string(),
            "Staff promotion request".to_string(),
            DocumentType::Letter,
            Priority::Normal,
            Initiator {
                department: "HR".to_string(),
                contact_name: "A. Kumar".to_string(),
                contact_email: Some("a.kumar@example.gov".to_string()),
                contact_phone: None,
            },
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            None,
            Role::RecordsOfficer,
        )
    }

    #[test]
    fn registration_starts_at_received() {
        let doc = sample_document();
        assert_eq!(doc.status, DocumentStatus::Received);
        assert_eq!(doc.current_handler, Role::RecordsOfficer);
        assert_eq!(doc.version, 0);
        assert!(doc.history.is_empty());
        assert!(doc.handler_consistent());
    }

    #[test]
    fn apply_moves_status_and_appends_history() {
        let mut doc = sample_document();
        let edge = find_edge(
            DocumentStatus::Received,
            Role::RecordsOfficer,
            RouteAction::Forward,
            Some(DocumentStatus::ForwardedToSecretary),
        )
        .unwrap();

        doc.apply(TransitionRecord::from_edge(
            edge,
            doc.current_handler,
            Some("registered and forwarded".to_string()),
        ));

        assert_eq!(doc.status, DocumentStatus::ForwardedToSecretary);
        assert_eq!(doc.current_handler, Role::BoardSecretary);
        assert_eq!(doc.version, 1);
        assert_eq!(doc.history.len(), 1);
        assert!(doc.handler_consistent());

        let last = doc.last_transition().unwrap();
        assert_eq!(last.from_status, DocumentStatus::Received);
        assert_eq!(last.to_status, DocumentStatus::ForwardedToSecretary);
        assert_eq!(last.notes.as_deref(), Some("registered and forwarded"));
    }

    #[test]
    fn chief_officer_intake_is_consistent() {
        let mut doc = sample_document();
        doc.current_handler = Role::ChiefOfficer;
        assert!(doc.handler_consistent());
    }
}
