// Routing table - every legal edge of the workflow in one data structure

//! # Routing Table
//!
//! All legal transitions live in [`ROUTING_TABLE`], a static table of
//! (from status, acting role, action) → (to status, new handler) edges.
//! Adding a stage or a role is an edit to this table, not a hunt across
//! handlers. The table is consulted only by the routing engine; any
//! (status, role, action, target) combination it does not name is rejected,
//! never defaulted.
//!
//! [`TransitionRecord`] is the per-hop audit event appended to a document's
//! history when an edge is applied. Its `notes` are transition metadata
//! (e.g. "referred for personnel view") and are deliberately distinct from
//! the substantive review comments in the comment trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::role::Role;
use super::status::DocumentStatus;

/// The action kinds a routing edge can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteAction {
    /// Move the document to the next handler in the pipeline
    #[serde(rename = "forward")]
    Forward,

    /// Communicate the final decision back to the initiator
    #[serde(rename = "dispatch")]
    Dispatch,

    /// Archive a dispatched document
    #[serde(rename = "file")]
    File,
}

impl RouteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteAction::Forward => "forward",
            RouteAction::Dispatch => "dispatch",
            RouteAction::File => "file",
        }
    }
}

impl fmt::Display for RouteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One legal edge of the routing graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEdge {
    /// Status the document must currently be in
    pub from: DocumentStatus,

    /// Role that must currently hold the document
    pub role: Role,

    /// Action being performed
    pub action: RouteAction,

    /// Status the document moves to
    pub to: DocumentStatus,

    /// Role that holds the document afterwards
    pub handler: Role,
}

/// Every legal transition of the workflow
///
/// Dispatch is legal only from the two decision-bearing statuses, `filed`
/// is terminal, and `dispatched` moves only to `filed`.
pub const ROUTING_TABLE: &[RouteEdge] = &[
    // Intake desks forward to the secretary
    RouteEdge {
        from: DocumentStatus::Received,
        role: Role::RecordsOfficer,
        action: RouteAction::Forward,
        to: DocumentStatus::ForwardedToSecretary,
        handler: Role::BoardSecretary,
    },
    RouteEdge {
        from: DocumentStatus::Received,
        role: Role::ChiefOfficer,
        action: RouteAction::Forward,
        to: DocumentStatus::ForwardedToSecretary,
        handler: Role::BoardSecretary,
    },
    // Secretary routes to the chair or refers to the committee
    RouteEdge {
        from: DocumentStatus::ForwardedToSecretary,
        role: Role::BoardSecretary,
        action: RouteAction::Forward,
        to: DocumentStatus::SentToChair,
        handler: Role::BoardChair,
    },
    RouteEdge {
        from: DocumentStatus::ForwardedToSecretary,
        role: Role::BoardSecretary,
        action: RouteAction::Forward,
        to: DocumentStatus::SentToCommittee,
        handler: Role::BoardCommittee,
    },
    // Chair returns to the secretary, refers to HR, or sends straight to records
    RouteEdge {
        from: DocumentStatus::SentToChair,
        role: Role::BoardChair,
        action: RouteAction::Forward,
        to: DocumentStatus::ReturnedToSecretaryFromChair,
        handler: Role::BoardSecretary,
    },
    RouteEdge {
        from: DocumentStatus::SentToChair,
        role: Role::BoardChair,
        action: RouteAction::Forward,
        to: DocumentStatus::SentToHr,
        handler: Role::Hr,
    },
    RouteEdge {
        from: DocumentStatus::SentToChair,
        role: Role::BoardChair,
        action: RouteAction::Forward,
        to: DocumentStatus::SentToRecords,
        handler: Role::RecordsOfficer,
    },
    // Committee returns to HR
    RouteEdge {
        from: DocumentStatus::SentToCommittee,
        role: Role::BoardCommittee,
        action: RouteAction::Forward,
        to: DocumentStatus::ReturnedToHrFromCommittee,
        handler: Role::Hr,
    },
    // Secretary records the chair's decision and hands off for dispatch
    RouteEdge {
        from: DocumentStatus::ReturnedToSecretaryFromChair,
        role: Role::BoardSecretary,
        action: RouteAction::Forward,
        to: DocumentStatus::SentToRecords,
        handler: Role::RecordsOfficer,
    },
    RouteEdge {
        from: DocumentStatus::ReturnedToSecretaryFromChair,
        role: Role::BoardSecretary,
        action: RouteAction::Forward,
        to: DocumentStatus::DecisionMade,
        handler: Role::RecordsOfficer,
    },
    // HR hands off to records after acting on a referral
    RouteEdge {
        from: DocumentStatus::SentToHr,
        role: Role::Hr,
        action: RouteAction::Forward,
        to: DocumentStatus::SentToRecords,
        handler: Role::RecordsOfficer,
    },
    RouteEdge {
        from: DocumentStatus::ReturnedToHrFromCommittee,
        role: Role::Hr,
        action: RouteAction::Forward,
        to: DocumentStatus::SentToRecords,
        handler: Role::RecordsOfficer,
    },
    // Terminal leg: dispatch, then file
    RouteEdge {
        from: DocumentStatus::SentToRecords,
        role: Role::RecordsOfficer,
        action: RouteAction::Dispatch,
        to: DocumentStatus::Dispatched,
        handler: Role::RecordsOfficer,
    },
    RouteEdge {
        from: DocumentStatus::DecisionMade,
        role: Role::RecordsOfficer,
        action: RouteAction::Dispatch,
        to: DocumentStatus::Dispatched,
        handler: Role::RecordsOfficer,
    },
    RouteEdge {
        from: DocumentStatus::Dispatched,
        role: Role::RecordsOfficer,
        action: RouteAction::File,
        to: DocumentStatus::Filed,
        handler: Role::RecordsOfficer,
    },
];

/// Look up the edge for an action
///
/// For forwards the caller names the target status; dispatch and file have
/// a single implied target, so `to` is `None`. Returns `None` when the
/// table has no matching edge.
pub fn find_edge(
    from: DocumentStatus,
    role: Role,
    action: RouteAction,
    to: Option<DocumentStatus>,
) -> Option<&'static RouteEdge> {
    ROUTING_TABLE.iter().find(|edge| {
        edge.from == from
            && edge.role == role
            && edge.action == action
            && to.map_or(true, |target| edge.to == target)
    })
}

/// All statuses reachable from `from` by `role`, for error messages and
/// client hints
pub fn targets_from(from: DocumentStatus, role: Role) -> Vec<DocumentStatus> {
    ROUTING_TABLE
        .iter()
        .filter(|edge| edge.from == from && edge.role == role)
        .map(|edge| edge.to)
        .collect()
}

/// Per-hop audit event, appended to a document's history when an edge is
/// applied
///
/// Transition notes are metadata about the hop itself; substantive review
/// opinions belong in the comment trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Status before the transition
    pub from_status: DocumentStatus,

    /// Status after the transition
    pub to_status: DocumentStatus,

    /// Handler before the transition
    pub from_handler: Role,

    /// Handler after the transition
    pub to_handler: Role,

    /// Role that performed the action
    pub acting_role: Role,

    /// Action that was performed
    pub action: RouteAction,

    /// Optional hop metadata supplied by the actor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the transition was committed (UTC)
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Build the audit record for applying `edge`
    ///
    /// `from_handler` is the handler the document had when the edge was
    /// matched; for every edge in the table it equals the acting role.
    pub fn from_edge(edge: &RouteEdge, from_handler: Role, notes: Option<String>) -> Self {
        TransitionRecord {
            from_status: edge.from,
            to_status: edge.to,
            from_handler,
            to_handler: edge.handler,
            acting_role: edge.role,
            action: edge.action,
            notes,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_edges_are_handler_consistent() {
        // Both ends of every edge must satisfy the status/handler invariant
        for edge in ROUTING_TABLE {
            assert!(
                edge.from.permits(edge.role),
                "edge from '{}' names role '{}' which cannot hold that status",
                edge.from,
                edge.role
            );
            assert!(
                edge.to.permits(edge.handler),
                "edge to '{}' assigns handler '{}' which cannot hold that status",
                edge.to,
                edge.handler
            );
        }
    }

    #[test]
    fn terminal_status_has_no_outgoing_edges() {
        assert!(ROUTING_TABLE
            .iter()
            .all(|edge| edge.from != DocumentStatus::Filed));
    }

    #[test]
    fn dispatched_moves_only_to_filed() {
        let outgoing: Vec<_> = ROUTING_TABLE
            .iter()
            .filter(|edge| edge.from == DocumentStatus::Dispatched)
            .collect();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].to, DocumentStatus::Filed);
        assert_eq!(outgoing[0].action, RouteAction::File);
    }

    #[test]
    fn dispatch_is_legal_only_from_decision_statuses() {
        for edge in ROUTING_TABLE {
            if edge.action == RouteAction::Dispatch {
                assert!(edge.from.is_dispatchable());
                assert_eq!(edge.to, DocumentStatus::Dispatched);
            }
        }
    }

    #[test]
    fn edge_lookup() {
        let edge = find_edge(
            DocumentStatus::Received,
            Role::RecordsOfficer,
            RouteAction::Forward,
            Some(DocumentStatus::ForwardedToSecretary),
        )
        .expect("intake edge must exist");
        assert_eq!(edge.handler, Role::BoardSecretary);

        // No skipping stages by forging a target
        assert!(find_edge(
            DocumentStatus::Received,
            Role::RecordsOfficer,
            RouteAction::Forward,
            Some(DocumentStatus::Dispatched),
        )
        .is_none());

        // Dispatch target is implied
        let dispatch = find_edge(
            DocumentStatus::DecisionMade,
            Role::RecordsOfficer,
            RouteAction::Dispatch,
            None,
        )
        .expect("dispatch edge must exist");
        assert_eq!(dispatch.to, DocumentStatus::Dispatched);
    }

    #[test]
    fn secretary_has_two_routes_out_of_review() {
        let targets = targets_from(DocumentStatus::ForwardedToSecretary, Role::BoardSecretary);
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&DocumentStatus::SentToChair));
        assert!(targets.contains(&DocumentStatus::SentToCommittee));
    }

    #[test]
    fn both_intake_desks_can_forward_received_documents() {
        for role in [Role::RecordsOfficer, Role::ChiefOfficer] {
            assert!(find_edge(
                DocumentStatus::Received,
                role,
                RouteAction::Forward,
                Some(DocumentStatus::ForwardedToSecretary),
            )
            .is_some());
        }
    }
}
