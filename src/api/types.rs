// REST API types - request/response DTOs and the error -> HTTP mapping

//! # API Types
//!
//! Wire shapes for the REST interface. Status, role, comment-type and
//! recommendation fields deserialize straight into the closed domain
//! enums, so a value outside an enumeration is rejected at the boundary,
//! never silently accepted. Errors are rendered as
//! `{"error": {"message", "type", "code"}}` with a message naming the
//! role/status the engine expected.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    Attachment, CommentType, Document, DocumentStatus, DocumentType, Initiator, Priority,
    Recommendation, ReviewComment, Role,
};
use crate::engine::routing::RegisterDocument;
use crate::DocRouteError;

/// Body for `POST /v1/documents`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentRequest {
    pub reference_number: String,
    pub subject: String,
    pub document_type: DocumentType,
    pub priority: Priority,
    pub department: String,
    pub contact_name: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    pub document_date: NaiveDate,
    #[serde(default)]
    pub attachment: Option<Attachment>,
    /// Role registering the document; must be an intake role
    pub acting_role: Role,
}

impl From<CreateDocumentRequest> for RegisterDocument {
    fn from(request: CreateDocumentRequest) -> Self {
        RegisterDocument {
            reference_number: request.reference_number,
            subject: request.subject,
            document_type: request.document_type,
            priority: request.priority,
            initiator: Initiator {
                department: request.department,
                contact_name: request.contact_name,
                contact_email: request.contact_email,
                contact_phone: request.contact_phone,
            },
            document_date: request.document_date,
            attachment: request.attachment,
            intake_role: request.acting_role,
        }
    }
}

/// Body for `POST /v1/documents/:id/comments`
#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    pub comment: String,
    pub comment_type: CommentType,
    #[serde(default)]
    pub recommendation: Option<Recommendation>,
    pub acting_role: Role,
}

/// Body for `POST /v1/documents/:id/forward`
#[derive(Debug, Clone, Deserialize)]
pub struct ForwardRequest {
    pub to_status: DocumentStatus,
    /// Optional; when present it must match the routing table's handler
    #[serde(default)]
    pub to_handler: Option<Role>,
    #[serde(default)]
    pub notes: Option<String>,
    pub acting_role: Role,
}

/// Body for `POST /v1/documents/:id/dispatch`
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    pub decision_summary: String,
    pub acting_role: Role,
}

/// Body for `POST /v1/documents/:id/file`
#[derive(Debug, Clone, Deserialize)]
pub struct FileRequest {
    pub acting_role: Role,
}

/// Response for `GET /v1/documents/:id`: the document joined with its
/// review trail (transition history travels on the document itself)
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetail {
    pub document: Document,
    pub comments: Vec<ReviewComment>,
}

/// Machine-readable error category for the response body
fn error_type(error: &DocRouteError) -> &'static str {
    match error {
        DocRouteError::Validation { .. } => "validation_error",
        DocRouteError::UnauthorizedTransition { .. } => "unauthorized_transition",
        DocRouteError::InvalidTransition { .. } => "transition_error",
        DocRouteError::Conflict { .. } => "conflict",
        DocRouteError::DocumentNotFound { .. } => "not_found",
        DocRouteError::AttachmentNotFound { .. } => "not_found",
        DocRouteError::Storage(_) => "storage_error",
        DocRouteError::Serialization(_) => "serialization_error",
        DocRouteError::Internal(_) => "internal_error",
    }
}

/// HTTP status for each error variant
pub fn status_for(error: &DocRouteError) -> StatusCode {
    match error {
        DocRouteError::Validation { .. } => StatusCode::BAD_REQUEST,
        DocRouteError::UnauthorizedTransition { .. } => StatusCode::FORBIDDEN,
        DocRouteError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DocRouteError::Conflict { .. } => StatusCode::CONFLICT,
        DocRouteError::DocumentNotFound { .. } | DocRouteError::AttachmentNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for DocRouteError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let body = Json(serde_json::json!({
            "error": {
                "message": self.to_string(),
                "type": error_type(&self),
                "code": status.as_u16(),
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn error_status_mapping() {
        let id = Uuid::new_v4();
        assert_eq!(
            status_for(&DocRouteError::validation("subject", "blank")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DocRouteError::UnauthorizedTransition {
                document_id: id,
                expected_role: Role::BoardSecretary,
                acting_role: Role::BoardChair,
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DocRouteError::Conflict { document_id: id }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DocRouteError::DocumentNotFound { id }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn rejection_messages_name_the_expected_role() {
        let err = DocRouteError::UnauthorizedTransition {
            document_id: Uuid::new_v4(),
            expected_role: Role::BoardSecretary,
            acting_role: Role::BoardChair,
        };
        let message = err.to_string();
        assert!(message.contains("boardSecretary"));
        assert!(message.contains("boardChair"));
    }

    #[test]
    fn forward_request_deserializes_closed_enums() {
        let body = serde_json::json!({
            "to_status": "sent_to_chair",
            "acting_role": "boardSecretary",
            "notes": "for the chair's decision"
        });
        let request: ForwardRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.to_status, DocumentStatus::SentToChair);
        assert_eq!(request.acting_role, Role::BoardSecretary);
        assert_eq!(request.to_handler, None);

        // Unknown status values fail at the boundary
        let bad = serde_json::json!({
            "to_status": "sent_to_mars",
            "acting_role": "boardSecretary"
        });
        assert!(serde_json::from_value::<ForwardRequest>(bad).is_err());
    }
}
