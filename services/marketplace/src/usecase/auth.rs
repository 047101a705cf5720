use anyhow::Context as _;
use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use chrono::Utc;
use uuid::Uuid;

use estate_auth_types::identity::JwtSecret;
use estate_auth_types::token::issue_token;
use estate_domain::user::{Preferences, UserRole};

use crate::domain::repository::{FavoriteRepository, UserRepository};
use crate::domain::types::{PropertyListing, User};
use crate::error::MarketplaceError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Trim and lower-case an email for storage and lookup.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `local@domain` with both parts non-empty and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Argon2id PHC string. Runs on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, MarketplaceError> {
    let hashed = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
    })
    .await
    .context("join password hashing task")?
    .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hashed)
}

/// `Ok(false)` on mismatch; `Err` only for a corrupt stored hash.
pub async fn verify_password(password: String, hash: String) -> Result<bool, MarketplaceError> {
    let verified = tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    })
    .await
    .context("join password verification task")?
    .map_err(|e| anyhow::anyhow!("verify password: {e}"))?;
    Ok(verified)
}

/// Token plus the account it was issued for.
#[derive(Debug)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

fn session_for(user: User, secret: &JwtSecret) -> Result<AuthSession, MarketplaceError> {
    let token = issue_token(user.id, user.role, secret.as_str()).context("sign access token")?;
    Ok(AuthSession { token, user })
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: JwtSecret,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthSession, MarketplaceError> {
        let name = input
            .name
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| MarketplaceError::validation("name is required"))?;
        let email = input
            .email
            .map(|e| normalize_email(&e))
            .filter(|e| !e.is_empty())
            .ok_or_else(|| MarketplaceError::validation("email is required"))?;
        if !is_valid_email(&email) {
            return Err(MarketplaceError::validation("email is invalid"));
        }
        let password = input
            .password
            .ok_or_else(|| MarketplaceError::validation("password is required"))?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(MarketplaceError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(MarketplaceError::EmailAlreadyInUse);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash: hash_password(password).await?,
            role: UserRole::User,
            email_verified: false,
            phone_verified: false,
            identity_verified: false,
            preferences: Preferences::default(),
            reward_points: 0,
            created_at: now,
            updated_at: now,
        };
        // A concurrent registration can still slip past the lookup; the
        // unique index turns that into `EmailAlreadyInUse` as well.
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");

        session_for(user, &self.jwt_secret)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: JwtSecret,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<AuthSession, MarketplaceError> {
        let (Some(email), Some(password)) = (input.email, input.password) else {
            return Err(MarketplaceError::validation("email and password are required"));
        };
        let user = self
            .users
            .find_by_email(&normalize_email(&email))
            .await?
            .ok_or(MarketplaceError::InvalidCredentials)?;

        if !verify_password(password, user.password_hash.clone()).await? {
            return Err(MarketplaceError::InvalidCredentials);
        }

        session_for(user, &self.jwt_secret)
    }
}

// ── Profile ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Profile {
    pub user: User,
    pub favorites: Vec<PropertyListing>,
}

pub struct GetProfileUseCase<F: FavoriteRepository> {
    pub favorites: F,
}

impl<F: FavoriteRepository> GetProfileUseCase<F> {
    pub async fn execute(&self, user: User) -> Result<Profile, MarketplaceError> {
        let favorites = self.favorites.list_for_user(user.id).await?;
        Ok(Profile { user, favorites })
    }
}
