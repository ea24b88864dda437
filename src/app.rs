use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::{cors_middleware, require_auth};
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// The full HTTP surface under `/api/v1`.
pub fn app(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(guiver_routes())
        .merge(cause_routes())
        .merge(product_routes())
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let resource_routes = Router::new()
        .merge(auth_public_routes())
        .merge(protected_routes)
        // Outside auth so preflight never needs a token
        .layer(from_fn_with_state(state.cors(), cors_middleware));

    let api = Router::new()
        .merge(health_routes())
        .merge(resource_routes)
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health))
        .layer(CorsLayer::permissive())
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(public::login))
        .route("/auth/register", post(public::register))
}

fn guiver_routes() -> Router<AppState> {
    Router::new()
        .route("/guivers", post(protected::create_guiver))
        .route(
            "/guivers/:id",
            get(protected::get_guiver)
                .put(protected::update_guiver)
                .delete(protected::delete_guiver),
        )
        .route("/guivers/:id/causes", get(protected::list_guiver_causes))
        .route("/guivers/:id/products", get(protected::list_guiver_products))
}

fn cause_routes() -> Router<AppState> {
    Router::new()
        .route("/causes", post(protected::create_cause).get(protected::list_causes))
        .route(
            "/causes/:id",
            get(protected::get_cause)
                .put(protected::update_cause)
                .delete(protected::delete_cause),
        )
        .route("/causes/:id/updates", post(protected::add_cause_update))
        .route(
            "/causes/:id/comments",
            post(protected::add_cause_comment).get(protected::list_cause_comments),
        )
        .route("/causes/:id/like", post(protected::like_cause))
        .route("/causes/:id/unlike", post(protected::unlike_cause))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(protected::create_product).get(protected::list_products))
        .route(
            "/products/:id",
            get(protected::get_product)
                .put(protected::update_product)
                .delete(protected::delete_product),
        )
        .route("/products/cause/:causeId", get(protected::list_cause_products))
}
