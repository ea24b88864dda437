pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod state;
pub mod types;

pub use app::{app, API_PREFIX};
pub use config::AppConfig;
pub use state::AppState;

#[cfg(test)]
pub mod testing;
