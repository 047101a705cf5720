use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post, put},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use estate_core::health::{healthz, readyz};
use estate_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{
        get_notifications, mark_notification_read, update_verification_status,
        upload_verification_document,
    },
    auth::{get_profile, get_rewards, login, register, update_preferences},
    property::{
        add_rating, add_virtual_tour, create_property, delete_property, get_nearby_places,
        get_property, list_properties, toggle_favorite, update_property,
    },
};
use crate::state::AppState;

/// Transport settings that wrap the routes.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// `None` allows any origin.
    pub allowed_origins: Option<Vec<String>>,
    pub max_body_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            allowed_origins: None,
            max_body_bytes: 25 * 1024 * 1024,
        }
    }
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = allowed_origins else {
        return CorsLayer::permissive();
    };
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: AppState, settings: &HttpSettings) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth & account
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/profile", get(get_profile))
        .route("/api/auth/preferences", put(update_preferences))
        .route("/api/auth/rewards", get(get_rewards))
        .route("/api/auth/notifications", get(get_notifications))
        .route("/api/auth/notifications/{id}", patch(mark_notification_read))
        .route("/api/auth/verify/document", post(upload_verification_document))
        .route("/api/auth/verify/status", patch(update_verification_status))
        // Properties
        .route(
            "/api/properties",
            get(list_properties).post(create_property),
        )
        .route(
            "/api/properties/{id}",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
        .route("/api/properties/{id}/favorite", post(toggle_favorite))
        .route("/api/properties/{id}/ratings", post(add_rating))
        .route("/api/properties/{id}/virtual-tour", post(add_virtual_tour))
        .route("/api/properties/{id}/nearby", get(get_nearby_places))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(cors_layer(settings.allowed_origins.as_deref()))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
