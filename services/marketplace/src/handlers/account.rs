use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use estate_domain::activity::{DocumentKind, DocumentStatus, NotificationKind};

use crate::domain::types::{Notification, VerificationDocument};
use crate::error::MarketplaceError;
use crate::handlers::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::account::{
    DocumentInput, ListNotificationsUseCase, MarkNotificationReadUseCase, StatusInput,
    UpdateVerificationStatusUseCase, UploadVerificationDocumentUseCase, VerificationStatus,
};

// ── Notifications ────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    #[serde(serialize_with = "estate_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            kind: n.kind,
            message: n.message,
            read: n.read,
            created_at: n.created_at,
        }
    }
}

pub async fn get_notifications(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationResponse>>, MarketplaceError> {
    let usecase = ListNotificationsUseCase {
        notifications: state.notification_repo(),
    };
    let notifications = usecase.execute(user.id).await?;
    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

pub async fn mark_notification_read(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationResponse>, MarketplaceError> {
    let usecase = MarkNotificationReadUseCase {
        notifications: state.notification_repo(),
    };
    let notification = usecase.execute(user.id, id).await?;
    Ok(Json(notification.into()))
}

// ── Verification ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub url: String,
    pub status: DocumentStatus,
    pub remarks: Option<String>,
    #[serde(serialize_with = "estate_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "estate_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<VerificationDocument> for DocumentResponse {
    fn from(d: VerificationDocument) -> Self {
        Self {
            id: d.id,
            kind: d.kind,
            url: d.url,
            status: d.status,
            remarks: d.remarks,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct VerificationStatusResponse {
    pub email: bool,
    pub phone: bool,
    pub identity: bool,
    pub documents: Vec<DocumentResponse>,
}

impl From<VerificationStatus> for VerificationStatusResponse {
    fn from(s: VerificationStatus) -> Self {
        Self {
            email: s.email_verified,
            phone: s.phone_verified,
            identity: s.identity_verified,
            documents: s.documents.into_iter().map(Into::into).collect(),
        }
    }
}

// ── POST /api/auth/verify/document ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct DocumentRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Base64 data URI.
    pub document: Option<String>,
}

pub async fn upload_verification_document(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<DocumentRequest>,
) -> Result<Json<VerificationStatusResponse>, MarketplaceError> {
    let usecase = UploadVerificationDocumentUseCase {
        documents: state.verification_repo(),
        media: state.media(),
    };
    let status = usecase
        .execute(
            &user,
            DocumentInput {
                kind: body.kind,
                document: body.document,
            },
        )
        .await?;
    Ok(Json(status.into()))
}

// ── PATCH /api/auth/verify/status ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub user_id: Option<String>,
    pub document_id: Option<String>,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

pub async fn update_verification_status(
    CurrentUser(admin): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<VerificationStatusResponse>, MarketplaceError> {
    let usecase = UpdateVerificationStatusUseCase {
        documents: state.verification_repo(),
        users: state.user_repo(),
    };
    let status = usecase
        .execute(
            &admin,
            StatusInput {
                user_id: body.user_id,
                document_id: body.document_id,
                status: body.status,
                remarks: body.remarks,
            },
        )
        .await?;
    Ok(Json(status.into()))
}
