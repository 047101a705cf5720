use chrono::Utc;
use uuid::Uuid;

use estate_domain::activity::{DocumentKind, DocumentStatus};
use estate_domain::user::{Preferences, RewardTier};

use crate::domain::repository::{
    FavoriteRepository, MediaStore, NotificationRepository, UserRepository,
    VerificationRepository,
};
use crate::domain::types::{Notification, User, VerificationDocument};
use crate::error::MarketplaceError;
use crate::usecase::auth::Profile;
use crate::usecase::media::{VERIFICATION_FOLDER, discard, is_data_uri};

// ── Preferences ──────────────────────────────────────────────────────────────

pub struct UpdatePreferencesUseCase<U: UserRepository, F: FavoriteRepository> {
    pub users: U,
    pub favorites: F,
}

impl<U: UserRepository, F: FavoriteRepository> UpdatePreferencesUseCase<U, F> {
    pub async fn execute(
        &self,
        mut user: User,
        preferences: Preferences,
    ) -> Result<Profile, MarketplaceError> {
        if let Some(range) = preferences.price_range {
            let bad = |v: Option<f64>| v.is_some_and(|v| !v.is_finite() || v < 0.0);
            if bad(range.min) || bad(range.max) {
                return Err(MarketplaceError::validation(
                    "priceRange bounds must be non-negative numbers",
                ));
            }
            if matches!((range.min, range.max), (Some(min), Some(max)) if min > max) {
                return Err(MarketplaceError::validation(
                    "priceRange.min must not exceed priceRange.max",
                ));
            }
        }

        self.users.update_preferences(user.id, &preferences).await?;
        user.preferences = preferences;

        let favorites = self.favorites.list_for_user(user.id).await?;
        Ok(Profile { user, favorites })
    }
}

// ── Rewards ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewards {
    pub points: i64,
    pub tier: RewardTier,
}

pub fn rewards_for(user: &User) -> Rewards {
    Rewards {
        points: user.reward_points,
        tier: user.reward_tier(),
    }
}

// ── Notifications ────────────────────────────────────────────────────────────

pub struct ListNotificationsUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> ListNotificationsUseCase<N> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Notification>, MarketplaceError> {
        self.notifications.list(user_id).await
    }
}

pub struct MarkNotificationReadUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> MarkNotificationReadUseCase<N> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<Notification, MarketplaceError> {
        self.notifications
            .mark_read(user_id, notification_id)
            .await?
            .ok_or(MarketplaceError::NotificationNotFound)
    }
}

// ── Verification ─────────────────────────────────────────────────────────────

/// A user's verification flags plus every submitted document.
#[derive(Debug)]
pub struct VerificationStatus {
    pub email_verified: bool,
    pub phone_verified: bool,
    pub identity_verified: bool,
    pub documents: Vec<VerificationDocument>,
}

async fn status_for<V: VerificationRepository>(
    documents: &V,
    user: &User,
) -> Result<VerificationStatus, MarketplaceError> {
    Ok(VerificationStatus {
        email_verified: user.email_verified,
        phone_verified: user.phone_verified,
        identity_verified: user.identity_verified,
        documents: documents.list_for_user(user.id).await?,
    })
}

pub struct DocumentInput {
    pub kind: Option<String>,
    pub document: Option<String>,
}

pub struct UploadVerificationDocumentUseCase<V: VerificationRepository, M: MediaStore> {
    pub documents: V,
    pub media: M,
}

impl<V: VerificationRepository, M: MediaStore> UploadVerificationDocumentUseCase<V, M> {
    pub async fn execute(
        &self,
        user: &User,
        input: DocumentInput,
    ) -> Result<VerificationStatus, MarketplaceError> {
        let kind: DocumentKind = input
            .kind
            .as_deref()
            .ok_or_else(|| MarketplaceError::validation("type is required"))?
            .parse()
            .map_err(|_| MarketplaceError::validation("type must be one of ID, Address, Income"))?;
        let document = input
            .document
            .filter(|d| is_data_uri(d, ""))
            .ok_or_else(|| MarketplaceError::validation("document must be a base64 data URI"))?;

        let image = self.media.upload(&document, VERIFICATION_FOLDER).await?;
        let now = Utc::now();
        let record = VerificationDocument {
            id: Uuid::now_v7(),
            user_id: user.id,
            kind,
            url: image.url.clone(),
            public_id: image.public_id.clone(),
            status: DocumentStatus::Pending,
            remarks: None,
            created_at: now,
            updated_at: now,
        };
        if let Err(e) = self.documents.create(&record).await {
            discard(&self.media, std::slice::from_ref(&image)).await;
            return Err(e);
        }
        tracing::info!(
            user_id = %user.id,
            document_id = %record.id,
            kind = kind.as_str(),
            "verification document submitted"
        );

        status_for(&self.documents, user).await
    }
}

pub struct StatusInput {
    pub user_id: Option<String>,
    pub document_id: Option<String>,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

fn parse_id(field: &str, raw: Option<String>) -> Result<Uuid, MarketplaceError> {
    raw.as_deref()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or_else(|| MarketplaceError::validation(format!("{field} must be a valid id")))
}

pub struct UpdateVerificationStatusUseCase<V: VerificationRepository, U: UserRepository> {
    pub documents: V,
    pub users: U,
}

impl<V: VerificationRepository, U: UserRepository> UpdateVerificationStatusUseCase<V, U> {
    pub async fn execute(
        &self,
        actor: &User,
        input: StatusInput,
    ) -> Result<VerificationStatus, MarketplaceError> {
        if !actor.role.is_admin() {
            tracing::debug!(user_id = %actor.id, "non-admin attempted verification review");
            return Err(MarketplaceError::Forbidden);
        }
        let user_id = parse_id("userId", input.user_id)?;
        let document_id = parse_id("documentId", input.document_id)?;
        let status: DocumentStatus = input
            .status
            .as_deref()
            .ok_or_else(|| MarketplaceError::validation("status is required"))?
            .parse()
            .map_err(|_| {
                MarketplaceError::validation("status must be one of Pending, Verified, Rejected")
            })?;
        let remarks = input
            .remarks
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty());

        let target = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::UserNotFound)?;

        let updated = self
            .documents
            .update_status(user_id, document_id, status, remarks.as_deref())
            .await?;
        if !updated {
            return Err(MarketplaceError::DocumentNotFound);
        }
        tracing::info!(
            admin_id = %actor.id,
            %user_id,
            %document_id,
            status = status.as_str(),
            "verification document reviewed"
        );

        status_for(&self.documents, &target).await
    }
}
