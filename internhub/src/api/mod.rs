//! HTTP API: server, routes, authentication, and wire encoding

pub mod auth;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod wire;

pub use auth::{hash_password, verify_password, Claims, JwtAuth};
pub use middleware::{auth_middleware, AuthState, CurrentUser};
pub use routes::AppState;
pub use server::{router, ApiServer};
pub use wire::{Decoded, WireFormat, MSGPACK_CONTENT_TYPE};
