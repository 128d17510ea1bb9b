// Role - the closed set of workflow actors

//! # Role
//!
//! One shared sum type for every actor in the routing pipeline. The same
//! enum is used by the document store, the routing engine and the
//! role-scoped views, so a role name cannot drift between components. The
//! wire names (`recordsOfficer`, `boardSecretary`, ...) are the canonical
//! strings clients send and receive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A workflow actor role
///
/// Every document is held by exactly one role at a time (its
/// `current_handler`); the routing table decides which role receives it
/// next. Roles are compared by identity, never by string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Registers incoming documents, dispatches and files decided ones
    #[serde(rename = "recordsOfficer")]
    RecordsOfficer,

    /// Reviews registered documents and routes them to the chair or committee
    #[serde(rename = "boardSecretary")]
    BoardSecretary,

    /// Decides on documents put before the board chair
    #[serde(rename = "boardChair")]
    BoardChair,

    /// Deliberates on documents referred to the board committee
    #[serde(rename = "boardCommittee")]
    BoardCommittee,

    /// Alternate intake point alongside the records officer
    #[serde(rename = "chiefOfficer")]
    ChiefOfficer,

    /// Receives personnel matters referred by the chair or committee
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    /// All roles, in pipeline order
    pub const ALL: [Role; 6] = [
        Role::RecordsOfficer,
        Role::BoardSecretary,
        Role::BoardChair,
        Role::BoardCommittee,
        Role::ChiefOfficer,
        Role::Hr,
    ];

    /// Canonical wire name for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::RecordsOfficer => "recordsOfficer",
            Role::BoardSecretary => "boardSecretary",
            Role::BoardChair => "boardChair",
            Role::BoardCommittee => "boardCommittee",
            Role::ChiefOfficer => "chiefOfficer",
            Role::Hr => "HR",
        }
    }

    /// Parse a wire name back into a role
    ///
    /// Returns `None` for anything outside the closed set - callers surface
    /// that as a validation error, never as a default role.
    pub fn parse(value: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|role| role.as_str() == value)
    }

    /// Whether this role may register new documents
    ///
    /// Intake is limited to the records desk and the chief officer; every
    /// other role only ever receives documents through the routing table.
    pub fn is_intake(&self) -> bool {
        matches!(self, Role::RecordsOfficer | Role::ChiefOfficer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(Role::parse("boardsecretary"), None);
        assert_eq!(Role::parse("hr"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::BoardSecretary).unwrap();
        assert_eq!(json, "\"boardSecretary\"");

        let role: Role = serde_json::from_str("\"HR\"").unwrap();
        assert_eq!(role, Role::Hr);

        // Values outside the enumeration fail to deserialize
        assert!(serde_json::from_str::<Role>("\"registrar\"").is_err());
    }

    #[test]
    fn intake_roles() {
        assert!(Role::RecordsOfficer.is_intake());
        assert!(Role::ChiefOfficer.is_intake());
        assert!(!Role::BoardSecretary.is_intake());
        assert!(!Role::Hr.is_intake());
    }
}
