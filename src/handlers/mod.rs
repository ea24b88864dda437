// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer ID token required)

pub mod protected;
pub mod public;
pub mod validate;

pub use protected::*;
pub use public::*;
