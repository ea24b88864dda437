use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Deserialize;
use serde_json::Value;

use crate::database::StoreError;
use crate::error::ApiError;
use crate::handlers::validate::Validator;
use crate::middleware::response::message;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::models::{Cause, Guiver, GuiverType, Product};
use crate::state::AppState;
use crate::types::{blank_str, Patch};

use super::ensure_owner;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateGuiverRequest {
    /// Falls back to the email in the caller's token.
    pub email: String,
    pub display_name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    #[serde(rename = "type")]
    pub guiver_type: String,
    pub bio: String,
    pub whats_app: String,
    pub instagram: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateGuiverRequest {
    pub display_name: Patch<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Patch<String>,
    #[serde(rename = "type")]
    pub guiver_type: Patch<String>,
    pub bio: Patch<String>,
    pub whats_app: Patch<String>,
    pub instagram: Patch<String>,
}

/// POST /guivers - create the caller's own profile
pub async fn create_guiver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(req): JsonBody<CreateGuiverRequest>,
) -> ApiResult<Guiver> {
    let email = if req.email.trim().is_empty() {
        user.email.clone().unwrap_or_default()
    } else {
        req.email.trim().to_string()
    };

    let mut v = Validator::new();
    v.required("email", &email).email("email", &email);
    v.required("type", &req.guiver_type);
    let guiver_type = if req.guiver_type.trim().is_empty() {
        None
    } else {
        v.parse::<GuiverType>("type", &req.guiver_type)
    };
    v.url("photoURL", &req.photo_url);
    v.finish()?;

    let guiver = Guiver {
        id: user.uid.clone(),
        email,
        display_name: req.display_name.trim().to_string(),
        photo_url: req.photo_url.trim().to_string(),
        guiver_type: guiver_type.unwrap_or_default(),
        bio: req.bio,
        whats_app: non_blank(req.whats_app),
        instagram: non_blank(req.instagram),
        ..Default::default()
    };

    let guiver = state.guivers.create(guiver).await.map_err(|e| match e {
        StoreError::AlreadyExists { .. } => ApiError::conflict("Guiver profile already exists"),
        e => e.into(),
    })?;
    Ok(ApiResponse::success(guiver))
}

/// GET /guivers/:id
pub async fn get_guiver(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Guiver> {
    let guiver = state.guivers.get_by_id(&id).await?;
    Ok(ApiResponse::success(guiver))
}

/// PUT /guivers/:id - partial update of the caller's own profile
pub async fn update_guiver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateGuiverRequest>,
) -> ApiResult<Guiver> {
    let mut guiver = state.guivers.get_by_id(&id).await?;
    ensure_owner(&user, &guiver.id, "update", "guiver")?;

    let mut v = Validator::new();
    if let Some(photo) = req.photo_url.as_value() {
        v.url("photoURL", photo);
    }
    let guiver_type = match req.guiver_type.as_value().filter(|t| !t.trim().is_empty()) {
        Some(t) => v.parse::<GuiverType>("type", t),
        None => None,
    };
    v.finish()?;

    req.display_name.merge_into(&mut guiver.display_name, blank_str);
    req.photo_url.merge_or_clear(&mut guiver.photo_url, blank_str);
    req.bio.merge_or_clear(&mut guiver.bio, blank_str);
    req.whats_app.merge_into_option(&mut guiver.whats_app, blank_str);
    req.instagram.merge_into_option(&mut guiver.instagram, blank_str);
    if let Some(guiver_type) = guiver_type {
        guiver.guiver_type = guiver_type;
    }

    let guiver = state.guivers.update(guiver).await?;
    Ok(ApiResponse::success(guiver))
}

/// DELETE /guivers/:id - causes and products of the guiver are kept
pub async fn delete_guiver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let guiver = state.guivers.get_by_id(&id).await?;
    ensure_owner(&user, &guiver.id, "delete", "guiver")?;

    state.guivers.delete(&id).await?;
    Ok(ApiResponse::success(message("Guiver deleted successfully")))
}

/// GET /guivers/:id/causes
pub async fn list_guiver_causes(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<Cause>> {
    let causes = state.causes.list_by_guiver(&id).await?;
    Ok(ApiResponse::success(causes))
}

/// GET /guivers/:id/products
pub async fn list_guiver_products(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Vec<Product>> {
    let products = state.products.list_by_guiver(&id).await?;
    Ok(ApiResponse::success(products))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
