// docroute - document routing workflow engine
// Moves board records between role-scoped handlers along a closed routing table

//! # docroute
//!
//! A workflow engine for the document routing pipeline of a board records
//! office. A registered document starts at the records desk and moves
//! between role-scoped handlers (Records Officer → Board Secretary →
//! Board Chair / Board Committee → HR → dispatch → filed), accumulating an
//! immutable review trail at every hop.
//!
//! ## Core Components
//!
//! ### Domain Models
//! - [`Document`]: One routed record with its current status and handler
//! - [`DocumentStatus`] / [`Role`]: Closed enumerations shared by every layer
//! - [`ReviewComment`]: Role-authored, append-only review trail entries
//! - [`TransitionRecord`]: Per-hop audit event recorded on the document
//! - [`ROUTING_TABLE`]: The complete set of legal (status, role, action) edges
//!
//! ### Routing Engine
//! [`RoutingEngine`] is the only component allowed to change a document's
//! status or handler. Every mutation is validated against the routing table
//! (identity first, then edge legality) and committed with an optimistic
//! version check, so the `(status, current_handler)` pair can never drift
//! into a combination the table does not name.
//!
//! ### Storage Layer
//! [`DocumentStorage`] abstracts persistence; [`InMemoryStorage`] is the
//! default backend for development, tests and single-process deployments.
//!
//! ### API Layer
//! An axum REST server (`api` module) exposes registration, role inboxes,
//! comments, forward/dispatch/file actions and attachment retrieval.

// Core domain models: documents, roles, statuses, comments, routing table
pub mod models;

// Routing engine, storage abstraction, role views, dispatch notification
pub mod engine;

// REST API server (axum)
pub mod api;

// Re-export core domain types for easy access
pub use models::{
    Attachment,
    CommentType,
    Document,
    DocumentStatus,
    DocumentType,
    Initiator,
    Priority,
    Recommendation,
    ReviewComment,
    Role,
    RouteAction,
    RouteEdge,
    TransitionRecord,
    ROUTING_TABLE,
};

// Re-export engine types for convenience
pub use engine::{
    dispatch::{LoggingNotifier, Notifier},
    routing::{RegisterDocument, RoutingEngine},
    storage::{DocumentStorage, InMemoryStorage},
    views::actionable_statuses,
};

// Re-export API types for convenience
pub use api::{ApiConfig, ApiServer, ApiServerBuilder};

use thiserror::Error;
use uuid::Uuid;

/// Error taxonomy for routing operations
///
/// Every rejected action carries enough context for the caller to
/// understand what the engine expected:
/// - [`Validation`](DocRouteError::Validation) - malformed or missing input,
///   surfaced with the offending field (HTTP 400)
/// - [`UnauthorizedTransition`](DocRouteError::UnauthorizedTransition) - the
///   acting role does not currently hold the document (HTTP 403); checked
///   before edge legality so an unauthorized actor learns nothing about the
///   routing graph
/// - [`InvalidTransition`](DocRouteError::InvalidTransition) - the requested
///   edge is not in the routing table (HTTP 422); retrying the same request
///   will always fail
/// - [`Conflict`](DocRouteError::Conflict) - another actor moved the
///   document first (HTTP 409); refetch and retry once
#[derive(Error, Debug)]
pub enum DocRouteError {
    /// Malformed or missing required input
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Acting role does not match the document's current handler
    #[error(
        "document {document_id} is awaiting action by '{expected_role}'; \
         acting role '{acting_role}' cannot act on it"
    )]
    UnauthorizedTransition {
        document_id: Uuid,
        expected_role: Role,
        acting_role: Role,
    },

    /// Requested status change is not a legal edge from the current status
    #[error("document {document_id} in status '{status}' does not permit '{action}': {detail}")]
    InvalidTransition {
        document_id: Uuid,
        status: DocumentStatus,
        action: RouteAction,
        detail: String,
    },

    /// Concurrent modification detected by the optimistic version check
    #[error("document {document_id} was modified by another actor; refetch and retry")]
    Conflict { document_id: Uuid },

    /// Document lookup failed
    #[error("document not found: {id}")]
    DocumentNotFound { id: Uuid },

    /// Document exists but carries no attachment
    #[error("no attachment stored for document {id}")]
    AttachmentNotFound { id: Uuid },

    /// Storage-backend errors
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    /// JSON serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl DocRouteError {
    /// Shorthand for a field-level validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        DocRouteError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Type alias for Results that use the crate error type
pub type Result<T> = std::result::Result<T, DocRouteError>;
