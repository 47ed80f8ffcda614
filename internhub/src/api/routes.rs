//! API routes for the internhub server

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use internhub_store::{
    Education, InternshipFilter, InternshipRecord, InternshipStore, ProfileUpdate,
    RecommendationCache, UserRecord, UserStore,
};

use super::auth::{hash_password, verify_password};
use super::middleware::{AuthState, CurrentUser};
use super::wire::{Decoded, WireFormat};
use crate::error::ApiError;
use crate::recommend::{RecommendParams, RecommendationEngine};

/// Listing page size
const PAGE_SIZE: usize = 10;

/// Application state
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub internships: Arc<dyn InternshipStore>,
    pub cache: RecommendationCache,
    pub engine: RecommendationEngine,
    pub auth: AuthState,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Own-profile response (password hash excluded)
#[derive(Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub skills: Vec<String>,
    pub sectors: Vec<String>,
    pub education: Education,
    pub location: String,
}

/// Pagination envelope for the internship listing
#[derive(Serialize, Deserialize)]
pub struct ListPagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_internships: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Serialize, Deserialize)]
pub struct InternshipPageResponse {
    pub internships: Vec<InternshipRecord>,
    pub pagination: ListPagination,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

/// Search query parameters; also hashed into the search cache key
#[derive(Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub sector: Option<String>,
    pub location: Option<String>,
    pub mode: Option<String>,
    pub min_stipend: Option<i64>,
    pub max_stipend: Option<i64>,
    pub page: Option<u64>,
}

#[derive(Serialize, Deserialize)]
pub struct SearchPagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_results: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Serialize, Deserialize)]
pub struct SearchResponse {
    pub internships: Vec<InternshipRecord>,
    pub pagination: SearchPagination,
    pub search_params: SearchQuery,
}

#[derive(Deserialize)]
pub struct ClearCacheQuery {
    pub pattern: Option<String>,
    #[serde(rename = "type")]
    pub clear_type: Option<String>,
}

/// Service banner
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Internhub Internship Recommendation API",
        "status": "Server is running",
        "timestamp": Utc::now(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Registration endpoint
pub async fn register(
    State(state): State<Arc<AppState>>,
    Decoded(payload): Decoded<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.username.is_empty()
        || payload.email.is_empty()
        || payload.password.is_empty()
        || payload.confirm_password.is_empty()
    {
        return Err(ApiError::Validation(
            "Username, email, password, and confirm_password are required.".to_string(),
        ));
    }
    if payload.password != payload.confirm_password {
        return Err(ApiError::Validation("Passwords do not match.".to_string()));
    }

    let existing = state
        .users
        .find_by_username_or_email(&payload.username, &payload.email)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("User already exists.".to_string()));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let user = UserRecord::new(payload.username, payload.email, password_hash);

    state.users.insert(user).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// Login endpoint
pub async fn login(
    State(state): State<Arc<AppState>>,
    Decoded(payload): Decoded<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required.".to_string(),
        ));
    }

    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Invalid credentials.".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::Unauthenticated("Invalid credentials.".to_string()));
    }

    let token = state
        .auth
        .jwt_auth
        .generate_token(&user, None)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse { token }))
}

/// Own-profile endpoint (protected)
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .find_by_id(&current.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user_id: user.id,
        username: user.username,
        email: user.email,
        skills: user.skills,
        sectors: user.sectors,
        education: user.education,
        location: user.location,
    }))
}

/// Profile update endpoint (protected)
///
/// Partial update: at least one field required. A successful mutation
/// invalidates that identity's cached recommendations.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Decoded(update): Decoded<ProfileUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    if update.is_empty() {
        return Err(ApiError::Validation(
            "At least one field (skills, sectors, education, location) is required".to_string(),
        ));
    }

    let matched = state.users.update_profile(&current.id, &update).await?;
    if !matched {
        return Err(ApiError::NotFound("User not found.".to_string()));
    }

    // Profile changed: previously cached recommendations no longer apply
    let invalidated = state.cache.invalidate_user(&current.id).await?;
    info!(
        "Profile updated for {}, invalidated {} cached entries",
        current.id, invalidated
    );

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "updated_fields": update.updated_fields(),
        "invalidated_entries": invalidated,
    })))
}

/// Recommendation endpoint (protected)
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    wire: WireFormat,
    body: Option<Decoded<RecommendParams>>,
) -> Result<Response, ApiError> {
    let params = body.map(|Decoded(params)| params).unwrap_or_default();

    let result = state.engine.get_recommendations(&current.id, &params).await?;

    Ok(wire.respond(result))
}

/// Paginated internship listing
pub async fn list_internships(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let key = state.cache.page_key(page);

    if let Some(cached) = state.cache.get_typed::<InternshipPageResponse>(&key).await? {
        return Ok(Json(cached));
    }

    let skip = (page - 1) as usize * PAGE_SIZE;
    let filter = InternshipFilter::any();
    let (internships, total) = tokio::join!(
        state.internships.find(&filter, PAGE_SIZE, skip),
        state.internships.count(&filter),
    );
    let internships = internships?;
    let total = total?;

    let total_pages = total.div_ceil(PAGE_SIZE as u64);
    let response = InternshipPageResponse {
        internships,
        pagination: ListPagination {
            current_page: page,
            total_pages,
            total_internships: total,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    };

    state.cache.put_page(key, &response).await?;

    Ok(Json(response))
}

/// Unpersonalized recommended listing (natural order preserved)
pub async fn recommended_internships(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let key = state.cache.recommended_key();

    if let Some(cached) = state.cache.get_typed::<Vec<InternshipRecord>>(&key).await? {
        return Ok(Json(cached));
    }

    let recommended = state
        .internships
        .find(&InternshipFilter::any(), PAGE_SIZE, 0)
        .await?;

    state.cache.put_recommended(key, &recommended).await?;

    Ok(Json(recommended))
}

/// Single internship lookup
pub async fn internship_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    wire: WireFormat,
) -> Result<Response, ApiError> {
    let key = state.cache.detail_key(&id);

    if let Some(cached) = state.cache.get_typed::<InternshipRecord>(&key).await? {
        return Ok(wire.respond(cached));
    }

    let internship = state
        .internships
        .find_one(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Internship not found".to_string()))?;

    state.cache.put_detail(key, &internship).await?;

    Ok(wire.respond(internship))
}

/// Internship search with free text and field filters
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let key = state.cache.search_key(&query)?;

    if let Some(cached) = state.cache.get_typed::<SearchResponse>(&key).await? {
        return Ok(Json(cached));
    }

    let page = query.page.unwrap_or(1).max(1);
    let filter = InternshipFilter {
        text: query.q.clone(),
        sectors_any: query.sector.clone().map(|s| vec![s]),
        city_contains: query.location.clone(),
        mode_contains: query.mode.clone(),
        stipend_min: query.min_stipend,
        stipend_max: query.max_stipend,
        ..Default::default()
    };

    let skip = (page - 1) as usize * PAGE_SIZE;
    let (internships, total) = tokio::join!(
        state.internships.find(&filter, PAGE_SIZE, skip),
        state.internships.count(&filter),
    );
    let internships = internships?;
    let total = total?;

    let total_pages = total.div_ceil(PAGE_SIZE as u64);
    let response = SearchResponse {
        internships,
        pagination: SearchPagination {
            current_page: page,
            total_pages,
            total_results: total,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
        search_params: query,
    };

    state.cache.put_search(key, &response).await?;

    Ok(Json(response))
}

/// Cache health endpoint: round-trips a probe entry and reports stats
pub async fn cache_status(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let probe_key = "cache:status:probe".to_string();
    state
        .cache
        .put_typed(probe_key.clone(), &json!({ "probe": true }), std::time::Duration::from_secs(60))
        .await?;
    let probe: Option<serde_json::Value> = state.cache.get_typed(&probe_key).await?;

    let stats = state.cache.stats().await;

    Ok(Json(json!({
        "cache_type": "In-Memory Cache",
        "status": if probe.is_some() { "Working" } else { "Failed" },
        "stats": stats,
    })))
}

/// Cache clearing endpoint (protected): by pattern, expired-only, or all
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClearCacheQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (message, cleared) = if query.clear_type.as_deref() == Some("expired") {
        let cleared = state.cache.clear_expired().await;
        (format!("Cleared {} expired entries", cleared), json!(cleared))
    } else if let Some(pattern) = &query.pattern {
        let cleared = state.cache.clear_by_pattern(pattern).await?;
        (
            format!("Cleared {} entries matching pattern: {}", cleared, pattern),
            json!(cleared),
        )
    } else {
        state.cache.clear().await;
        ("All cache cleared successfully".to_string(), json!("all"))
    };

    Ok(Json(json!({
        "message": message,
        "cleared_count": cleared,
        "timestamp": Utc::now(),
    })))
}
