// REST API handlers for the routing workflow

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::types::{
    AddCommentRequest, CreateDocumentRequest, DispatchRequest, DocumentDetail, FileRequest,
    ForwardRequest,
};
use crate::engine::routing::RoutingEngine;
use crate::models::{Document, ReviewComment, Role};
use crate::DocRouteError;

/// Shared application state for the REST API
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<RoutingEngine>,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "docroute",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Register a document - POST /v1/documents
pub async fn create_document(
    State(state): State<ApiState>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), DocRouteError> {
    let document = state.engine.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Fetch a document with its review trail - GET /v1/documents/:id
pub async fn get_document(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentDetail>, DocRouteError> {
    let document = state.engine.document(&id).await?;
    let comments = state.engine.comments(&id).await?;
    Ok(Json(DocumentDetail { document, comments }))
}

/// Role inbox - GET /v1/roles/:role/documents
pub async fn role_inbox(
    State(state): State<ApiState>,
    Path(role): Path<String>,
) -> Result<Json<Vec<Document>>, DocRouteError> {
    let role = Role::parse(&role).ok_or_else(|| {
        DocRouteError::validation("role", format!("unknown role '{role}'"))
    })?;
    debug!(role = %role, "listing role inbox");
    Ok(Json(state.engine.inbox(role).await?))
}

/// Add a review comment - POST /v1/documents/:id/comments
pub async fn add_comment(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<ReviewComment>), DocRouteError> {
    let comment = state
        .engine
        .add_comment(
            &id,
            request.acting_role,
            &request.comment,
            request.comment_type,
            request.recommendation,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Review trail - GET /v1/documents/:id/comments
pub async fn list_comments(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReviewComment>>, DocRouteError> {
    Ok(Json(state.engine.comments(&id).await?))
}

/// Forward along a routing-table edge - POST /v1/documents/:id/forward
pub async fn forward_document(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ForwardRequest>,
) -> Result<Json<Document>, DocRouteError> {
    let document = state
        .engine
        .forward(
            &id,
            request.acting_role,
            request.to_status,
            request.to_handler,
            request.notes,
        )
        .await?;
    Ok(Json(document))
}

/// Dispatch a decided document - POST /v1/documents/:id/dispatch
pub async fn dispatch_document(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DispatchRequest>,
) -> Result<Json<Document>, DocRouteError> {
    let document = state
        .engine
        .dispatch(&id, request.acting_role, &request.decision_summary)
        .await?;
    Ok(Json(document))
}

/// File a dispatched document - POST /v1/documents/:id/file
pub async fn file_document(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FileRequest>,
) -> Result<Json<Document>, DocRouteError> {
    let document = state.engine.file(&id, request.acting_role).await?;
    Ok(Json(document))
}

/// Stream the stored attachment - GET /v1/documents/:id/attachment
///
/// The bytes live with the file-storage collaborator; this handler only
/// resolves the stored path and mime type.
pub async fn view_attachment(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, DocRouteError> {
    let document = state.engine.document(&id).await?;
    let attachment = document
        .attachment
        .ok_or(DocRouteError::AttachmentNotFound { id })?;

    let bytes = tokio::fs::read(&attachment.path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            DocRouteError::AttachmentNotFound { id }
        } else {
            DocRouteError::Internal(format!(
                "failed to read attachment '{}': {err}",
                attachment.path
            ))
        }
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, attachment.mime_type)],
        bytes,
    ))
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": {
                "message": "no such endpoint",
                "type": "not_found",
                "code": 404,
            }
        })),
    )
}
