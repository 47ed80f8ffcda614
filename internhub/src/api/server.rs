//! API server for internhub

use anyhow::Result;
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use internhub_store::{
    start_auto_cleanup, MemoryInternshipStore, MemoryUserStore, RecommendationCache,
};

use super::middleware::{auth_middleware, AuthState};
use super::routes::{
    self, cache_status, clear_cache, health_check, internship_detail, list_internships, login,
    profile, recommend, recommended_internships, register, root, search, update_profile, AppState,
};
use crate::config::ApiServerConfig;
use crate::recommend::{HttpScoringService, RecommendationEngine};

/// Build the application router over the given state
pub fn router(auth_state: AuthState, app_state: Arc<AppState>) -> Router {
    let auth = from_fn_with_state(auth_state, auth_middleware);

    Router::new()
        // Public routes
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/recommendations/internships", get(list_internships))
        .route(
            "/recommendations/internships/recommended",
            get(recommended_internships),
        )
        .route("/recommendations/internships/:id", get(internship_detail))
        .route("/recommendations/search", get(search))
        .route("/recommendations/cache/status", get(cache_status))
        // Protected routes
        .route("/users/profile", get(profile).route_layer(auth.clone()))
        .route(
            "/users/profile/update",
            post(update_profile).route_layer(auth.clone()),
        )
        .route(
            "/recommendations/recommend",
            post(recommend).route_layer(auth.clone()),
        )
        .route(
            "/recommendations/cache/clear",
            delete(clear_cache).route_layer(auth),
        )
        .with_state(app_state)
        // Add CORS layer
        .layer(CorsLayer::permissive())
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
}

impl ApiServer {
    /// Create a new API server with configuration
    pub fn new(config: ApiServerConfig) -> Self {
        Self { config }
    }

    /// Create a new API server configured from the environment
    pub fn with_defaults() -> Self {
        Self {
            config: ApiServerConfig::from_env(),
        }
    }

    /// Assemble default application state for this configuration
    pub fn build_state(config: &ApiServerConfig) -> Result<Arc<AppState>> {
        let users = Arc::new(MemoryUserStore::new());
        let internships = Arc::new(MemoryInternshipStore::new());
        let cache = RecommendationCache::new(config.cache.clone());
        let scoring = Arc::new(HttpScoringService::new(
            config.model_url.clone(),
            config.model_timeout,
        )?);
        let auth = AuthState::new(&config.jwt_secret);

        let engine = RecommendationEngine::new(
            users.clone(),
            internships.clone(),
            cache.clone(),
            scoring,
        );

        Ok(Arc::new(routes::AppState {
            users,
            internships,
            cache,
            engine,
            auth,
        }))
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        let app_state = Self::build_state(&self.config)?;
        let auth_state = app_state.auth.clone();

        if self.config.cache.enable_auto_cleanup {
            tokio::spawn(start_auto_cleanup(app_state.cache.inner()));
        }

        let app = router(auth_state, app_state);

        let addr = format!("{}:{}", self.config.host, self.config.port);
        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Resolve when the process receives a termination signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
