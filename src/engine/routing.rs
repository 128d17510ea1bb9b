// RoutingEngine - the only writer of document status and handler

//! # Routing Engine
//!
//! Validates and applies every state change in the pipeline. The checks
//! run in a fixed order on every mutation:
//!
//! 1. the document exists
//! 2. **role gate** - the acting role holds the document right now
//!    ([`DocRouteError::UnauthorizedTransition`] otherwise; identity fails
//!    before the routing graph is consulted, so an unauthorized actor
//!    learns nothing about its shape)
//! 3. **edge legality** - the (status, role, action, target) quadruple is
//!    in [`ROUTING_TABLE`](crate::models::ROUTING_TABLE)
//!    ([`DocRouteError::InvalidTransition`] otherwise, naming the legal
//!    targets)
//!
//! The commit itself is an optimistic compare-and-swap on the document
//! version; a lost race surfaces as [`DocRouteError::Conflict`] and the
//! losing request changes nothing.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::{
    find_edge, targets_from, Attachment, CommentType, Document, DocumentStatus, DocumentType,
    Initiator, Priority, Recommendation, ReviewComment, Role, RouteAction, TransitionRecord,
};
use crate::{DocRouteError, Result};

use super::dispatch::{LoggingNotifier, Notifier};
use super::storage::{DocumentStorage, InMemoryStorage};
use super::views;

/// Fields required to register a document at an intake desk
#[derive(Debug, Clone)]
pub struct RegisterDocument {
    pub reference_number: String,
    pub subject: String,
    pub document_type: DocumentType,
    pub priority: Priority,
    pub initiator: Initiator,
    pub document_date: NaiveDate,
    pub attachment: Option<Attachment>,
    /// Role registering the document; must be an intake role
    pub intake_role: Role,
}

/// The workflow engine
///
/// Holds the storage backend and the dispatch notifier behind trait
/// objects; everything else (the routing table, the status/handler
/// mapping) is static data.
pub struct RoutingEngine {
    storage: Arc<dyn DocumentStorage>,
    notifier: Arc<dyn Notifier>,
}

impl RoutingEngine {
    pub fn new(storage: Arc<dyn DocumentStorage>, notifier: Arc<dyn Notifier>) -> Self {
        RoutingEngine { storage, notifier }
    }

    /// Engine backed by in-memory storage and the logging notifier
    pub fn in_memory() -> Self {
        RoutingEngine::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(LoggingNotifier::new()),
        )
    }

    /// Register a new document
    ///
    /// Creates it in `received`, held by the intake role. Rejects blank
    /// reference numbers or subjects, duplicate reference numbers, and
    /// registration by non-intake roles.
    pub async fn register(&self, request: RegisterDocument) -> Result<Document> {
        if request.reference_number.trim().is_empty() {
            return Err(DocRouteError::validation(
                "reference_number",
                "reference number must not be blank",
            ));
        }
        if request.subject.trim().is_empty() {
            return Err(DocRouteError::validation(
                "subject",
                "subject must not be blank",
            ));
        }
        if !request.intake_role.is_intake() {
            return Err(DocRouteError::validation(
                "acting_role",
                format!(
                    "role '{}' cannot register documents; intake is limited to \
                     'recordsOfficer' and 'chiefOfficer'",
                    request.intake_role
                ),
            ));
        }
        if self
            .storage
            .reference_exists(&request.reference_number)
            .await?
        {
            return Err(DocRouteError::validation(
                "reference_number",
                format!(
                    "reference number '{}' is already registered",
                    request.reference_number
                ),
            ));
        }

        let document = Document::register(
            request.reference_number,
            request.subject,
            request.document_type,
            request.priority,
            request.initiator,
            request.document_date,
            request.attachment,
            request.intake_role,
        );

        let document = self.storage.insert_document(document).await?;
        info!(
            id = %document.id,
            reference = %document.reference_number,
            intake = %document.current_handler,
            "📥 document registered"
        );
        Ok(document)
    }

    /// Fetch a document by id
    pub async fn document(&self, id: &Uuid) -> Result<Document> {
        self.storage
            .get_document(id)
            .await?
            .ok_or(DocRouteError::DocumentNotFound { id: *id })
    }

    /// Documents currently awaiting action by `role`
    pub async fn inbox(&self, role: Role) -> Result<Vec<Document>> {
        views::inbox(self.storage.as_ref(), role).await
    }

    /// Forward a document along a routing-table edge
    ///
    /// `to_handler` is optional; when supplied it must match the handler
    /// the table assigns for the edge - the caller cannot re-route a
    /// document by forging the payload.
    pub async fn forward(
        &self,
        id: &Uuid,
        acting_role: Role,
        to_status: DocumentStatus,
        to_handler: Option<Role>,
        notes: Option<String>,
    ) -> Result<Document> {
        let document = self.document(id).await?;
        self.check_role_gate(&document, acting_role)?;

        let edge = find_edge(document.status, acting_role, RouteAction::Forward, Some(to_status))
            .ok_or_else(|| DocRouteError::InvalidTransition {
                document_id: *id,
                status: document.status,
                action: RouteAction::Forward,
                detail: self.describe_targets(document.status, acting_role, to_status),
            })?;

        if let Some(handler) = to_handler {
            if handler != edge.handler {
                return Err(DocRouteError::validation(
                    "to_handler",
                    format!(
                        "status '{}' is handled by '{}', not '{}'",
                        edge.to, edge.handler, handler
                    ),
                ));
            }
        }

        let record = TransitionRecord::from_edge(edge, document.current_handler, notes);
        let updated = self
            .storage
            .apply_transition(id, document.version, record, None)
            .await?;

        info!(
            id = %updated.id,
            reference = %updated.reference_number,
            from = %document.status,
            to = %updated.status,
            handler = %updated.current_handler,
            "➡️  document forwarded"
        );
        Ok(updated)
    }

    /// Dispatch a decided document back to its initiator
    ///
    /// Legal only from the decision-bearing statuses, by the records
    /// officer, with a non-blank decision summary. Triggers exactly one
    /// notification attempt after the status change commits; a delivery
    /// failure marks the document but never rolls the dispatch back.
    pub async fn dispatch(
        &self,
        id: &Uuid,
        acting_role: Role,
        decision_summary: &str,
    ) -> Result<Document> {
        if decision_summary.trim().is_empty() {
            return Err(DocRouteError::validation(
                "decision_summary",
                "decision summary must not be blank",
            ));
        }

        let document = self.document(id).await?;
        self.check_role_gate(&document, acting_role)?;

        let edge = find_edge(document.status, acting_role, RouteAction::Dispatch, None).ok_or_else(
            || DocRouteError::InvalidTransition {
                document_id: *id,
                status: document.status,
                action: RouteAction::Dispatch,
                detail: "dispatch is legal only from 'sent_to_records' or 'decision_made'"
                    .to_string(),
            },
        )?;

        let record = TransitionRecord::from_edge(edge, document.current_handler, None);
        let mut updated = self
            .storage
            .apply_transition(id, document.version, record, Some(decision_summary.to_string()))
            .await?;

        info!(
            id = %updated.id,
            reference = %updated.reference_number,
            "📤 document dispatched"
        );

        // Exactly one outbound attempt; the dispatch stands either way
        if let Err(err) = self
            .notifier
            .notify_dispatched(&updated, decision_summary)
            .await
        {
            error!(
                id = %updated.id,
                reference = %updated.reference_number,
                "dispatch notification failed: {err:#}"
            );
            updated = self.storage.set_notification_failed(id).await?;
        }

        Ok(updated)
    }

    /// Archive a dispatched document
    pub async fn file(&self, id: &Uuid, acting_role: Role) -> Result<Document> {
        let document = self.document(id).await?;
        self.check_role_gate(&document, acting_role)?;

        let edge = find_edge(document.status, acting_role, RouteAction::File, None).ok_or_else(
            || DocRouteError::InvalidTransition {
                document_id: *id,
                status: document.status,
                action: RouteAction::File,
                detail: "only 'dispatched' documents can be filed".to_string(),
            },
        )?;

        let record = TransitionRecord::from_edge(edge, document.current_handler, None);
        let updated = self
            .storage
            .apply_transition(id, document.version, record, None)
            .await?;

        info!(id = %updated.id, reference = %updated.reference_number, "🗂️  document filed");
        Ok(updated)
    }

    /// Append a review comment to a document's trail
    ///
    /// Has no effect on status - forwarding stays a separate, explicit
    /// call. Recommendations are checked against the acting role's closed
    /// set.
    pub async fn add_comment(
        &self,
        document_id: &Uuid,
        role: Role,
        comment: &str,
        comment_type: CommentType,
        recommendation: Option<Recommendation>,
    ) -> Result<ReviewComment> {
        if comment.trim().is_empty() {
            return Err(DocRouteError::validation(
                "comment",
                "comment must not be blank",
            ));
        }
        if comment_type == CommentType::Recommendation && recommendation.is_none() {
            return Err(DocRouteError::validation(
                "recommendation",
                "a comment of type 'recommendation' must carry a recommendation value",
            ));
        }
        if let Some(value) = recommendation {
            let allowed = Recommendation::allowed_for(role);
            if !allowed.contains(&value) {
                let detail = if allowed.is_empty() {
                    format!("role '{role}' may not attach recommendations")
                } else {
                    let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
                    format!(
                        "role '{role}' may not recommend '{value}'; allowed values: {}",
                        names.join(", ")
                    )
                };
                return Err(DocRouteError::validation("recommendation", detail));
            }
        }

        // The document must exist; commenting on a missing record is a 404
        let document = self.document(document_id).await?;

        let comment = self
            .storage
            .append_comment(ReviewComment::new(
                document.id,
                comment.to_string(),
                comment_type,
                recommendation,
                role,
            ))
            .await?;

        info!(
            id = %document.id,
            reference = %document.reference_number,
            role = %role,
            "💬 review comment added"
        );
        Ok(comment)
    }

    /// Full ordered review trail for a document
    pub async fn comments(&self, document_id: &Uuid) -> Result<Vec<ReviewComment>> {
        // Surface a 404 for unknown documents rather than an empty trail
        self.document(document_id).await?;
        self.storage.list_comments(document_id).await
    }

    /// Identity check, run before any look at the routing graph
    fn check_role_gate(&self, document: &Document, acting_role: Role) -> Result<()> {
        if document.current_handler != acting_role {
            return Err(DocRouteError::UnauthorizedTransition {
                document_id: document.id,
                expected_role: document.current_handler,
                acting_role,
            });
        }
        Ok(())
    }

    /// Human-readable explanation of why a forward was refused
    fn describe_targets(
        &self,
        status: DocumentStatus,
        role: Role,
        requested: DocumentStatus,
    ) -> String {
        let targets = targets_from(status, role);
        if targets.is_empty() {
            format!("role '{role}' has no outgoing routes from '{status}'")
        } else {
            let names: Vec<&str> = targets.iter().map(|s| s.as_str()).collect();
            format!(
                "'{requested}' is not reachable; legal targets for '{role}' are: {}",
                names.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(reference: &str) -> RegisterDocument {
        RegisterDocument {
            reference_number: reference.to_string(),
            subject: "Staff promotion request".to_string(),
            document_type: DocumentType::Letter,
            priority: Priority::Normal,
            initiator: Initiator {
                department: "HR".to_string(),
                contact_name: "A. Kumar".to_string(),
                contact_email: None,
                contact_phone: None,
            },
            document_date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            attachment: None,
            intake_role: Role::RecordsOfficer,
        }
    }

    #[tokio::test]
    async fn registration_validates_required_fields() {
        let engine = RoutingEngine::in_memory();

        let mut blank_subject = register_request("REF/1");
        blank_subject.subject = "  ".to_string();
        let err = engine.register(blank_subject).await.unwrap_err();
        assert!(matches!(err, DocRouteError::Validation { ref field, .. } if field == "subject"));

        let mut blank_reference = register_request("REF/1");
        blank_reference.reference_number = "".to_string();
        let err = engine.register(blank_reference).await.unwrap_err();
        assert!(
            matches!(err, DocRouteError::Validation { ref field, .. } if field == "reference_number")
        );
    }

    #[tokio::test]
    async fn duplicate_reference_numbers_are_rejected() {
        let engine = RoutingEngine::in_memory();
        engine.register(register_request("REF/1")).await.unwrap();

        let err = engine.register(register_request("REF/1")).await.unwrap_err();
        assert!(
            matches!(err, DocRouteError::Validation { ref field, .. } if field == "reference_number")
        );
    }

    #[tokio::test]
    async fn non_intake_roles_cannot_register() {
        let engine = RoutingEngine::in_memory();
        let mut request = register_request("REF/1");
        request.intake_role = Role::BoardChair;

        let err = engine.register(request).await.unwrap_err();
        assert!(matches!(err, DocRouteError::Validation { ref field, .. } if field == "acting_role"));
    }

    #[tokio::test]
    async fn role_gate_fails_before_edge_legality() {
        let engine = RoutingEngine::in_memory();
        let doc = engine.register(register_request("REF/1")).await.unwrap();

        // The chair requests an edge that exists for the records officer;
        // identity must fail first, hiding the graph from the wrong actor
        let err = engine
            .forward(
                &doc.id,
                Role::BoardChair,
                DocumentStatus::ForwardedToSecretary,
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DocRouteError::UnauthorizedTransition {
                expected_role: Role::RecordsOfficer,
                acting_role: Role::BoardChair,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn illegal_skip_is_rejected_and_status_unchanged() {
        let engine = RoutingEngine::in_memory();
        let doc = engine.register(register_request("REF/1")).await.unwrap();

        let err = engine
            .forward(
                &doc.id,
                Role::RecordsOfficer,
                DocumentStatus::Dispatched,
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocRouteError::InvalidTransition { .. }));

        let stored = engine.document(&doc.id).await.unwrap();
        assert_eq!(stored.status, DocumentStatus::Received);
        assert_eq!(stored.version, 0);
    }

    #[tokio::test]
    async fn forged_to_handler_is_rejected() {
        let engine = RoutingEngine::in_memory();
        let doc = engine.register(register_request("REF/1")).await.unwrap();

        let err = engine
            .forward(
                &doc.id,
                Role::RecordsOfficer,
                DocumentStatus::ForwardedToSecretary,
                Some(Role::Hr),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocRouteError::Validation { ref field, .. } if field == "to_handler"));
    }

    #[tokio::test]
    async fn forward_records_transition_notes() {
        let engine = RoutingEngine::in_memory();
        let doc = engine.register(register_request("REF/1")).await.unwrap();

        let updated = engine
            .forward(
                &doc.id,
                Role::RecordsOfficer,
                DocumentStatus::ForwardedToSecretary,
                Some(Role::BoardSecretary),
                Some("registered and forwarded".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, DocumentStatus::ForwardedToSecretary);
        let last = updated.last_transition().unwrap();
        assert_eq!(last.acting_role, Role::RecordsOfficer);
        assert_eq!(last.notes.as_deref(), Some("registered and forwarded"));
    }

    #[tokio::test]
    async fn comment_validation() {
        let engine = RoutingEngine::in_memory();
        let doc = engine.register(register_request("REF/1")).await.unwrap();

        // Blank comment
        let err = engine
            .add_comment(&doc.id, Role::BoardSecretary, " ", CommentType::Note, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DocRouteError::Validation { ref field, .. } if field == "comment"));

        // Recommendation type without a value
        let err = engine
            .add_comment(
                &doc.id,
                Role::BoardSecretary,
                "looks fine",
                CommentType::Recommendation,
                None,
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, DocRouteError::Validation { ref field, .. } if field == "recommendation")
        );

        // Value outside the acting role's set
        let err = engine
            .add_comment(
                &doc.id,
                Role::BoardSecretary,
                "defer this",
                CommentType::Recommendation,
                Some(Recommendation::Defer),
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, DocRouteError::Validation { ref field, .. } if field == "recommendation")
        );

        // Non-reviewing roles may not recommend at all
        let err = engine
            .add_comment(
                &doc.id,
                Role::RecordsOfficer,
                "fine by records",
                CommentType::Recommendation,
                Some(Recommendation::Approve),
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, DocRouteError::Validation { ref field, .. } if field == "recommendation")
        );
    }

    #[tokio::test]
    async fn comments_do_not_move_the_document() {
        let engine = RoutingEngine::in_memory();
        let doc = engine.register(register_request("REF/1")).await.unwrap();

        engine
            .add_comment(
                &doc.id,
                Role::RecordsOfficer,
                "registered on receipt",
                CommentType::Note,
                None,
            )
            .await
            .unwrap();

        let stored = engine.document(&doc.id).await.unwrap();
        assert_eq!(stored.status, DocumentStatus::Received);
        assert_eq!(stored.version, 0);
        assert_eq!(engine.comments(&doc.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_document_is_not_found() {
        let engine = RoutingEngine::in_memory();
        let missing = Uuid::new_v4();

        let err = engine.document(&missing).await.unwrap_err();
        assert!(matches!(err, DocRouteError::DocumentNotFound { .. }));

        let err = engine.comments(&missing).await.unwrap_err();
        assert!(matches!(err, DocRouteError::DocumentNotFound { .. }));
    }
}
