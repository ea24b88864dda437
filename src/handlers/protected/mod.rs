// handlers/protected/mod.rs - Protected handlers (bearer ID token required)
//
// Every handler here receives the caller as `Extension<AuthUser>`, placed by
// `require_auth`. Mutations of a cause or product are limited to its owner;
// a guiver profile may only be changed by the guiver it belongs to.

pub mod cause;
pub mod guiver;
pub mod product;

pub use cause::*;
pub use guiver::*;
pub use product::*;

use crate::error::ApiError;
use crate::middleware::AuthUser;

/// 403 unless `owner_id` is the caller.
pub(crate) fn ensure_owner(user: &AuthUser, owner_id: &str, action: &str, resource: &str) -> Result<(), ApiError> {
    if user.uid == owner_id {
        return Ok(());
    }
    tracing::warn!("uid {} tried to {} {} owned by {}", user.uid, action, resource, owner_id);
    Err(ApiError::forbidden(format!("Not authorized to {} this {}", action, resource)))
}
