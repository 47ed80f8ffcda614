pub mod api;
pub mod config;
pub mod error;
pub mod recommend;

pub use api::{ApiServer, AppState, AuthState, Claims, CurrentUser, JwtAuth};
pub use config::ApiServerConfig;
pub use error::ApiError;
pub use recommend::{
    FallbackRanker, HttpScoringService, RecommendParams, RecommendationEngine, ScoringError,
    ScoringPayload, ScoringResponse, ScoringService,
};
