// Storage abstraction for documents, comments and transitions

//! # Storage Abstraction Layer
//!
//! Persistence interface for the routing engine, following the repository
//! pattern: the [`DocumentStorage`] trait defines the operations, and
//! [`InMemoryStorage`] is the default backend for development, tests and
//! single-process deployments. All operations are async so a database or
//! network backend can implement the same trait.
//!
//! The one non-CRUD operation is [`DocumentStorage::apply_transition`]: it
//! performs the optimistic version check, the status/handler write and the
//! history append as a single atomic step, which is what keeps two
//! concurrent actors from both moving the same document.

use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::models::{Document, ReviewComment, Role, TransitionRecord};
use crate::{DocRouteError, Result};

/// Storage trait for document and comment persistence
///
/// Implementations must be thread-safe (`Send + Sync`); the engine shares
/// one instance across all request handlers.
#[async_trait::async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Persist a newly registered document
    async fn insert_document(&self, document: Document) -> Result<Document>;

    /// Fetch a document by id; `Ok(None)` when it does not exist
    async fn get_document(&self, id: &Uuid) -> Result<Option<Document>>;

    /// List documents, optionally restricted to a current handler
    ///
    /// Results are ordered by registration time (then id) so repeated reads
    /// with no intervening writes return identical results.
    async fn list_documents(&self, handler: Option<Role>) -> Result<Vec<Document>>;

    /// Whether a reference number is already registered
    async fn reference_exists(&self, reference_number: &str) -> Result<bool>;

    /// Atomically apply a validated transition
    ///
    /// Fails with [`DocRouteError::Conflict`] when the stored version no
    /// longer matches `expected_version` - another actor moved the document
    /// first and the caller must refetch. `decision_summary` is persisted in
    /// the same step for dispatch transitions.
    async fn apply_transition(
        &self,
        id: &Uuid,
        expected_version: u64,
        record: TransitionRecord,
        decision_summary: Option<String>,
    ) -> Result<Document>;

    /// Mark that the outbound dispatch notification failed
    ///
    /// A flag write only - it never touches status, handler or version.
    async fn set_notification_failed(&self, id: &Uuid) -> Result<Document>;

    /// Append a comment to a document's review trail
    async fn append_comment(&self, comment: ReviewComment) -> Result<ReviewComment>;

    /// Full ordered review trail for a document, all roles
    async fn list_comments(&self, document_id: &Uuid) -> Result<Vec<ReviewComment>>;
}

/// In-memory storage for development, tests and single-process deployments
///
/// Data is lost on restart and cannot be shared across processes; a
/// database-backed implementation of [`DocumentStorage`] replaces this
/// without touching the engine.
#[derive(Default)]
pub struct InMemoryStorage {
    documents: RwLock<HashMap<Uuid, Document>>,
    comments: RwLock<HashMap<Uuid, Vec<ReviewComment>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStorage for InMemoryStorage {
    async fn insert_document(&self, document: Document) -> Result<Document> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DocRouteError::Internal("document store lock poisoned".into()))?;
        documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn get_document(&self, id: &Uuid) -> Result<Option<Document>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DocRouteError::Internal("document store lock poisoned".into()))?;
        Ok(documents.get(id).cloned())
    }

    async fn list_documents(&self, handler: Option<Role>) -> Result<Vec<Document>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DocRouteError::Internal("document store lock poisoned".into()))?;

        let mut matched: Vec<Document> = documents
            .values()
            .filter(|doc| handler.map_or(true, |role| doc.current_handler == role))
            .cloned()
            .collect();

        // HashMap iteration order is arbitrary; sort for stable reads
        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matched)
    }

    async fn reference_exists(&self, reference_number: &str) -> Result<bool> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DocRouteError::Internal("document store lock poisoned".into()))?;
        Ok(documents
            .values()
            .any(|doc| doc.reference_number == reference_number))
    }

    async fn apply_transition(
        &self,
        id: &Uuid,
        expected_version: u64,
        record: TransitionRecord,
        decision_summary: Option<String>,
    ) -> Result<Document> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DocRouteError::Internal("document store lock poisoned".into()))?;

        let document = documents
            .get_mut(id)
            .ok_or(DocRouteError::DocumentNotFound { id: *id })?;

        // Optimistic concurrency: the engine validated against this version
        if document.version != expected_version {
            return Err(DocRouteError::Conflict { document_id: *id });
        }

        document.apply(record);
        if let Some(summary) = decision_summary {
            document.decision_summary = Some(summary);
        }

        Ok(document.clone())
    }

    async fn set_notification_failed(&self, id: &Uuid) -> Result<Document> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DocRouteError::Internal("document store lock poisoned".into()))?;

        let document = documents
            .get_mut(id)
            .ok_or(DocRouteError::DocumentNotFound { id: *id })?;
        document.notification_failed = true;
        Ok(document.clone())
    }

    async fn append_comment(&self, comment: ReviewComment) -> Result<ReviewComment> {
        let mut comments = self
            .comments
            .write()
            .map_err(|_| DocRouteError::Internal("comment store lock poisoned".into()))?;
        comments
            .entry(comment.document_id)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, document_id: &Uuid) -> Result<Vec<ReviewComment>> {
        let comments = self
            .comments
            .read()
            .map_err(|_| DocRouteError::Internal("comment store lock poisoned".into()))?;
        Ok(comments.get(document_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        find_edge, CommentType, DocumentStatus, DocumentType, Initiator, Priority, RouteAction,
    };
    use chrono::NaiveDate;

    fn sample_document(reference: &str) -> Document {
        Document::register(
            reference.to_string(),
            "Test subject".to_string(),
            DocumentType::Letter,
            Priority::Normal,
            Initiator {
                department: "HR".to_string(),
                contact_name: "A. Kumar".to_string(),
                contact_email: None,
                contact_phone: None,
            },
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            None,
            Role::RecordsOfficer,
        )
    }

    fn intake_record(doc: &Document) -> TransitionRecord {
        let edge = find_edge(
            DocumentStatus::Received,
            Role::RecordsOfficer,
            RouteAction::Forward,
            Some(DocumentStatus::ForwardedToSecretary),
        )
        .unwrap();
        TransitionRecord::from_edge(edge, doc.current_handler, None)
    }

    #[tokio::test]
    async fn insert_get_and_list() {
        let storage = InMemoryStorage::new();
        let doc = storage
            .insert_document(sample_document("REF/1"))
            .await
            .unwrap();

        let fetched = storage.get_document(&doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.reference_number, "REF/1");

        assert!(storage.reference_exists("REF/1").await.unwrap());
        assert!(!storage.reference_exists("REF/2").await.unwrap());

        let held = storage
            .list_documents(Some(Role::RecordsOfficer))
            .await
            .unwrap();
        assert_eq!(held.len(), 1);
        assert!(storage
            .list_documents(Some(Role::BoardChair))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn stale_version_is_a_conflict() {
        let storage = InMemoryStorage::new();
        let doc = storage
            .insert_document(sample_document("REF/1"))
            .await
            .unwrap();

        // First writer wins
        let updated = storage
            .apply_transition(&doc.id, doc.version, intake_record(&doc), None)
            .await
            .unwrap();
        assert_eq!(updated.version, 1);
        assert_eq!(updated.status, DocumentStatus::ForwardedToSecretary);

        // Second writer raced on the same starting version and loses
        let err = storage
            .apply_transition(&doc.id, doc.version, intake_record(&doc), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DocRouteError::Conflict { .. }));

        // The losing write changed nothing
        let stored = storage.get_document(&doc.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.history.len(), 1);
    }

    #[tokio::test]
    async fn comments_keep_insertion_order() {
        let storage = InMemoryStorage::new();
        let doc = storage
            .insert_document(sample_document("REF/1"))
            .await
            .unwrap();

        for text in ["first", "second", "third"] {
            storage
                .append_comment(ReviewComment::new(
                    doc.id,
                    text.to_string(),
                    CommentType::Note,
                    None,
                    Role::BoardSecretary,
                ))
                .await
                .unwrap();
        }

        let trail = storage.list_comments(&doc.id).await.unwrap();
        let texts: Vec<&str> = trail.iter().map(|c| c.comment.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn notification_flag_does_not_bump_version() {
        let storage = InMemoryStorage::new();
        let doc = storage
            .insert_document(sample_document("REF/1"))
            .await
            .unwrap();

        let flagged = storage.set_notification_failed(&doc.id).await.unwrap();
        assert!(flagged.notification_failed);
        assert_eq!(flagged.version, doc.version);
    }
}
