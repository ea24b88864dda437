// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Health check and the account placeholders. Account creation and sign-in
// happen against the identity provider directly; these routes only reserve
// the paths.
//
// Middleware: CORS only

pub mod auth;
pub mod health;

pub use auth::{login, register};
pub use health::health;
