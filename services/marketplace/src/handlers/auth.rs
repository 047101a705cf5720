use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use estate_domain::property::PropertyType;
use estate_domain::user::{Preferences, RewardTier, UserRole};

use crate::domain::types::{PropertyListing, User};
use crate::error::MarketplaceError;
use crate::handlers::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::account::{Rewards, UpdatePreferencesUseCase, rewards_for};
use crate::usecase::auth::{
    AuthSession, GetProfileUseCase, LoginInput, LoginUseCase, Profile, RegisterInput,
    RegisterUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct VerificationFlags {
    pub email: bool,
    pub phone: bool,
    pub identity: bool,
}

#[derive(Serialize)]
pub struct RewardsResponse {
    pub points: i64,
    pub tier: RewardTier,
}

impl From<Rewards> for RewardsResponse {
    fn from(r: Rewards) -> Self {
        Self {
            points: r.points,
            tier: r.tier,
        }
    }
}

/// Public view of an account. Never carries the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub verification: VerificationFlags,
    pub preferences: Preferences,
    pub rewards: RewardsResponse,
    #[serde(serialize_with = "estate_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let rewards = rewards_for(&user).into();
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            verification: VerificationFlags {
                email: user.email_verified,
                phone: user.phone_verified,
                identity: user.identity_verified,
            },
            preferences: user.preferences,
            rewards,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteSummary {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub location: String,
    pub images: Vec<String>,
    pub property_type: PropertyType,
}

impl From<PropertyListing> for FavoriteSummary {
    fn from(listing: PropertyListing) -> Self {
        let p = listing.property;
        Self {
            id: p.id,
            title: p.title,
            price: p.price,
            location: p.location,
            images: listing.images.into_iter().map(|i| i.url).collect(),
            property_type: p.property_type,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub favorite_properties: Vec<FavoriteSummary>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user: profile.user.into(),
            favorite_properties: profile.favorites.into_iter().map(Into::into).collect(),
        }
    }
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), MarketplaceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let session = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, MarketplaceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let session = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(session.into()))
}

// ── GET /api/auth/profile ────────────────────────────────────────────────────

pub async fn get_profile(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, MarketplaceError> {
    let usecase = GetProfileUseCase {
        favorites: state.favorite_repo(),
    };
    let profile = usecase.execute(user).await?;
    Ok(Json(profile.into()))
}

// ── PUT /api/auth/preferences ────────────────────────────────────────────────

pub async fn update_preferences(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<ProfileResponse>, MarketplaceError> {
    let usecase = UpdatePreferencesUseCase {
        users: state.user_repo(),
        favorites: state.favorite_repo(),
    };
    let profile = usecase.execute(user, preferences).await?;
    Ok(Json(profile.into()))
}

// ── GET /api/auth/rewards ────────────────────────────────────────────────────

pub async fn get_rewards(CurrentUser(user): CurrentUser) -> Json<RewardsResponse> {
    Json(rewards_for(&user).into())
}
