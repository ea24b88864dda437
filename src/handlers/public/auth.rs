// handlers/public/auth.rs - POST /auth/login, POST /auth/register
//
// Sign-in and sign-up go straight to the identity provider from the client,
// which then calls the protected API with the provider's ID token.

use crate::error::ApiError;

pub async fn login() -> ApiError {
    ApiError::not_implemented("Login is handled by the identity provider")
}

pub async fn register() -> ApiError {
    ApiError::not_implemented("Registration is handled by the identity provider")
}
