use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use estate_core::error::{AppError, error_response};

/// Marketplace service error variants.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("{0}")]
    Validation(String),
    #[error("email already in use")]
    EmailAlreadyInUse,
    #[error("authentication required")]
    Unauthorized,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not authorized to modify this property")]
    NotPropertyOwner,
    #[error("forbidden")]
    Forbidden,
    #[error("property not found")]
    PropertyNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("notification not found")]
    NotificationNotFound,
    #[error("document not found")]
    DocumentNotFound,
    #[error("image storage failed")]
    Media(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MarketplaceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::EmailAlreadyInUse => "EMAIL_ALREADY_IN_USE",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotPropertyOwner => "NOT_PROPERTY_OWNER",
            Self::Forbidden => "FORBIDDEN",
            Self::PropertyNotFound => "PROPERTY_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            Self::Media(_) => "MEDIA_STORAGE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<AppError> for MarketplaceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Unauthorized => Self::Unauthorized,
            AppError::Forbidden => Self::Forbidden,
            AppError::Internal(e) => Self::Internal(e),
        }
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::EmailAlreadyInUse => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotPropertyOwner | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::PropertyNotFound
            | Self::UserNotFound
            | Self::NotificationNotFound
            | Self::DocumentNotFound => StatusCode::NOT_FOUND,
            Self::Media(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Media(e) => tracing::error!(
                error = %format!("{e:#}"),
                kind = "MEDIA_STORAGE",
                "image store error"
            ),
            Self::Internal(e) => tracing::error!(
                error = %format!("{e:#}"),
                kind = "INTERNAL",
                "internal error"
            ),
            _ => {}
        }
        error_response(status, self.kind(), self.to_string())
    }
}
