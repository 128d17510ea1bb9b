// ReviewComment - the append-only, role-authored review trail

//! # Review Comments
//!
//! The substantive review trail of a document: role-tagged remarks and
//! recommendations, immutable once created and ordered by creation time.
//! Multiple comments from multiple roles accumulate on one document - a
//! collaborative trail, not a single replaceable "latest remark". Adding a
//! comment never changes document status; forwarding is a separate,
//! explicit engine call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::role::Role;

/// What kind of remark a comment is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentType {
    /// Carries a role-scoped recommendation value
    Recommendation,
    /// Records a decision taken on the document
    Decision,
    /// Free-form remark
    Note,
}

/// A role-scoped enumerated opinion attached to a comment
///
/// Distinct from the transition itself: recommending approval does not
/// move the document. Each reviewing role has its own closed set, checked
/// by [`Recommendation::allowed_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    // Secretary and chair
    Approve,
    Reject,
    // Secretary only
    Revise,
    // Chair only
    Defer,
    // Committee
    Support,
    Oppose,
    Amend,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::Reject => "reject",
            Recommendation::Revise => "revise",
            Recommendation::Defer => "defer",
            Recommendation::Support => "support",
            Recommendation::Oppose => "oppose",
            Recommendation::Amend => "amend",
        }
    }

    /// The recommendation values `role` may attach
    ///
    /// Roles outside the three reviewing bodies get an empty set - they may
    /// comment, but not recommend.
    pub fn allowed_for(role: Role) -> &'static [Recommendation] {
        match role {
            Role::BoardSecretary => &[
                Recommendation::Approve,
                Recommendation::Reject,
                Recommendation::Revise,
            ],
            Role::BoardChair => &[
                Recommendation::Approve,
                Recommendation::Reject,
                Recommendation::Defer,
            ],
            Role::BoardCommittee => &[
                Recommendation::Support,
                Recommendation::Oppose,
                Recommendation::Amend,
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a document's review trail
///
/// Immutable once created; the storage layer only ever appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    /// Unique identifier for this comment
    pub id: Uuid,

    /// Document this comment belongs to
    pub document_id: Uuid,

    /// Free-text remark
    pub comment: String,

    /// Kind of remark
    pub comment_type: CommentType,

    /// Enumerated opinion, present when `comment_type` is `recommendation`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,

    /// Role of the author
    pub role: Role,

    /// When the comment was created (UTC); the trail is ordered by this
    pub created_at: DateTime<Utc>,
}

impl ReviewComment {
    /// Create a new trail entry
    ///
    /// Content validation (non-blank text, recommendation set membership)
    /// is the routing engine's job.
    pub fn new(
        document_id: Uuid,
        comment: String,
        comment_type: CommentType,
        recommendation: Option<Recommendation>,
        role: Role,
    ) -> Self {
        ReviewComment {
            id: Uuid::new_v4(),
            document_id,
            comment,
            comment_type,
            recommendation,
            role,
            created_at: Utc::now(),
        }
    }
}
