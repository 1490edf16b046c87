use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::config::PaginationSettings;
use crate::core::Matcher;
use crate::error::ApiError;
use crate::models::{CreateProfileRequest, HealthResponse, ListProfilesQuery, UpdateProfileRequest};
use crate::services::ProfileStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
    pub matcher: Matcher,
    pub pagination: PaginationSettings,
}

/// Configure all profile-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/profiles", web::post().to(create_profile))
        .route("/profiles", web::get().to(list_profiles))
        .route("/profiles/{id}", web::get().to(get_profile))
        .route("/profiles/{id}", web::put().to(update_profile))
        .route("/profiles/{id}", web::delete().to(delete_profile))
        .route("/profiles/{id}/matches", web::get().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Create profile endpoint
///
/// POST /api/v1/profiles
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "age": 30,
///   "gender": "string",
///   "email": "user@example.com",
///   "city": "string",
///   "interests": ["string"]
/// }
/// ```
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<CreateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_profile: {}", errors);
        return Err(errors.into());
    }

    let profile = state.store.create(&req).await?;
    tracing::info!("Created profile {} ({})", profile.id, profile.email);

    Ok(HttpResponse::Ok().json(profile))
}

/// Get profile endpoint
///
/// GET /api/v1/profiles/{id}
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let profile = state.store.get(id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// List profiles endpoint
///
/// GET /api/v1/profiles?offset=0&limit=10
///
/// `limit` falls back to the configured default and is capped at the
/// configured maximum.
async fn list_profiles(
    state: web::Data<AppState>,
    query: web::Query<ListProfilesQuery>,
) -> Result<HttpResponse, ApiError> {
    let offset = query.offset.unwrap_or(0);
    let limit = query
        .limit
        .unwrap_or(state.pagination.default_limit)
        .min(state.pagination.max_limit);

    tracing::debug!("Listing profiles offset={} limit={}", offset, limit);

    let profiles = state.store.list(offset, limit).await?;

    Ok(HttpResponse::Ok().json(profiles))
}

/// Update profile endpoint
///
/// PUT /api/v1/profiles/{id}
///
/// Accepts a partial body; absent fields keep their stored values.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4(), profile_id = %path))]
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for update_profile: {}", errors);
        return Err(errors.into());
    }

    let id = path.into_inner();
    let profile = state.store.update(id, &req).await?;
    tracing::info!("Updated profile {}", profile.id);

    Ok(HttpResponse::Ok().json(profile))
}

/// Delete profile endpoint
///
/// DELETE /api/v1/profiles/{id}
///
/// Returns 204 with an empty body. Deleted ids are never reused.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4(), profile_id = %path))]
async fn delete_profile(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.store.delete(id).await?;
    tracing::info!("Deleted profile {}", id);

    Ok(HttpResponse::NoContent().finish())
}

/// Find matches endpoint
///
/// GET /api/v1/profiles/{id}/matches
///
/// Response body: a JSON array of eligible candidates scored against
/// the subject profile, best match first.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4(), subject_id = %path))]
async fn find_matches(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let subject = state.store.get(id).await?;
    let candidates = state
        .store
        .list_candidates(&subject.gender, subject.id)
        .await?;

    let outcome = state.matcher.find_matches(&subject, candidates);

    tracing::info!(
        "Found {} matches for profile {} out of {} candidates",
        outcome.matches.len(),
        id,
        outcome.total_candidates
    );

    Ok(HttpResponse::Ok().json(outcome.matches))
}
