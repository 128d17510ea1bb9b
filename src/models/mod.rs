// Core domain models for docroute
// Documents, roles, statuses, comments and the routing table

//! # Domain Models Module
//!
//! The data structures the routing engine operates on. Nothing in this
//! module performs I/O; statuses, roles, comment types and recommendations
//! are closed enumerations so a value outside the enumeration is a
//! deserialization failure, never a silently accepted string.

// Role - the closed set of workflow actors
pub mod role;

// DocumentStatus - the closed set of pipeline stages, with the
// status -> handler consistency mapping
pub mod status;

// Document and its descriptive attributes
pub mod document;

// ReviewComment - the append-only, role-authored review trail
pub mod comment;

// RouteEdge, ROUTING_TABLE and TransitionRecord - the legal edges and the
// per-hop audit event
pub mod route;

// Re-export main types for convenience

/// The workflow actor roles
pub use role::Role;

/// The pipeline stages a document can be in
pub use status::DocumentStatus;

/// The routed record and its descriptive fields
pub use document::{Attachment, Document, DocumentType, Initiator, Priority};

/// Review trail entries
pub use comment::{CommentType, Recommendation, ReviewComment};

/// The routing table and transition audit types
pub use route::{find_edge, targets_from, RouteAction, RouteEdge, TransitionRecord, ROUTING_TABLE};
