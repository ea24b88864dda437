pub mod auth;
pub mod cors;
pub mod response;

pub use auth::{require_auth, AuthUser};
pub use cors::cors_middleware;
pub use response::{ApiResponse, ApiResult, JsonBody, Paginated};
