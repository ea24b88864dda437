use axum::{
    extract::{Path, Query, State},
    Extension,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::filter::{parse_param, CauseFilter, Pagination};
use crate::handlers::validate::Validator;
use crate::middleware::response::message;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody, Paginated};
use crate::models::{Cause, CauseStatus, CauseType, Comment, ContactInfo, Update};
use crate::state::AppState;
use crate::types::{blank_str, never_blank, Patch};

use super::ensure_owner;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCauseRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub cause_type: String,
    pub location: String,
    pub image_urls: Vec<String>,
    pub contact_info: ContactInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCauseRequest {
    pub title: Patch<String>,
    pub description: Patch<String>,
    #[serde(rename = "type")]
    pub cause_type: Patch<String>,
    pub location: Patch<String>,
    pub image_urls: Patch<Vec<String>>,
    pub status: Patch<String>,
    pub contact_info: Patch<ContactInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddUpdateRequest {
    pub content: String,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddCommentRequest {
    pub content: String,
}

/// Query string of GET /causes. Kept as raw strings so bad values become
/// field errors instead of a generic rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListCausesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "type")]
    pub cause_type: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A cause with its most recent comments attached.
#[derive(Debug, Serialize)]
pub struct CauseDetail {
    #[serde(flatten)]
    pub cause: Cause,
    pub comments: Vec<Comment>,
}

/// POST /causes
pub async fn create_cause(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(req): JsonBody<CreateCauseRequest>,
) -> ApiResult<Cause> {
    let mut v = Validator::new();
    v.required("title", &req.title)
        .required("description", &req.description)
        .required("location", &req.location)
        .required("type", &req.cause_type)
        .urls("imageUrls", &req.image_urls)
        .contact_info("contactInfo", &req.contact_info);
    let cause_type = if req.cause_type.trim().is_empty() {
        None
    } else {
        v.parse::<CauseType>("type", &req.cause_type)
    };
    v.finish()?;

    let cause = Cause {
        guiver_id: user.uid,
        title: req.title.trim().to_string(),
        description: req.description.trim().to_string(),
        cause_type: cause_type.unwrap_or_default(),
        location: req.location.trim().to_string(),
        image_urls: req.image_urls,
        contact_info: req.contact_info,
        status: CauseStatus::Active,
        ..Default::default()
    };

    let cause = state.causes.create(cause).await?;
    Ok(ApiResponse::success(cause))
}

/// GET /causes - filtered, newest first, paginated
pub async fn list_causes(
    State(state): State<AppState>,
    Query(query): Query<ListCausesQuery>,
) -> Result<Paginated<Cause>, ApiError> {
    let pagination = state.pagination(query.page.as_deref(), query.limit.as_deref())?;
    let filter = CauseFilter {
        cause_type: parse_param("type", query.cause_type.as_deref())?,
        status: parse_param("status", query.status.as_deref())?,
        location: query.location,
        search: query.search,
        pagination,
    };

    let page = state.causes.list(&filter).await?;
    Ok(Paginated::new(page, pagination))
}

/// GET /causes/:id
pub async fn get_cause(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<CauseDetail> {
    let cause = state.causes.get_by_id(&id).await?;
    let recent = Pagination::new(1, state.config.pagination.max_page_size);
    let comments = state.causes.list_comments(&id, recent).await?.items;
    Ok(ApiResponse::success(CauseDetail { cause, comments }))
}

/// PUT /causes/:id - partial update, owner only
pub async fn update_cause(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateCauseRequest>,
) -> ApiResult<Cause> {
    let mut cause = state.causes.get_by_id(&id).await?;
    ensure_owner(&user, &cause.guiver_id, "update", "cause")?;

    let mut v = Validator::new();
    let cause_type = match req.cause_type.as_value().filter(|t| !t.trim().is_empty()) {
        Some(t) => v.parse::<CauseType>("type", t),
        None => None,
    };
    let status = match req.status.as_value().filter(|s| !s.trim().is_empty()) {
        Some(s) => v.parse::<CauseStatus>("status", s),
        None => None,
    };
    if let Some(urls) = req.image_urls.as_value() {
        v.urls("imageUrls", urls);
    }
    if let Some(contact) = req.contact_info.as_value() {
        v.contact_info("contactInfo", contact);
    }
    v.finish()?;

    req.title.merge_into(&mut cause.title, blank_str);
    req.description.merge_into(&mut cause.description, blank_str);
    req.location.merge_into(&mut cause.location, blank_str);
    req.image_urls.merge_or_clear(&mut cause.image_urls, never_blank);
    req.contact_info.merge_or_clear(&mut cause.contact_info, ContactInfo::is_empty);
    if let Some(cause_type) = cause_type {
        cause.cause_type = cause_type;
    }
    if let Some(status) = status {
        cause.status = status;
    }

    let cause = state.causes.update(cause).await?;
    Ok(ApiResponse::success(cause))
}

/// DELETE /causes/:id - owner only; products and comments are kept
pub async fn delete_cause(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let cause = state.causes.get_by_id(&id).await?;
    ensure_owner(&user, &cause.guiver_id, "delete", "cause")?;

    state.causes.delete(&id).await?;
    Ok(ApiResponse::success(message("Cause deleted successfully")))
}

/// POST /causes/:id/updates - owner only
pub async fn add_cause_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<AddUpdateRequest>,
) -> ApiResult<Update> {
    let mut v = Validator::new();
    v.required("content", &req.content).urls("imageUrls", &req.image_urls);
    v.finish()?;

    let cause = state.causes.get_by_id(&id).await?;
    ensure_owner(&user, &cause.guiver_id, "update", "cause")?;

    let update = Update {
        content: req.content.trim().to_string(),
        image_urls: req.image_urls,
        ..Default::default()
    };
    let update = state.causes.add_update(&id, update).await?;
    Ok(ApiResponse::success(update))
}

/// POST /causes/:id/comments - any authenticated guiver
pub async fn add_cause_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<AddCommentRequest>,
) -> ApiResult<Comment> {
    let mut v = Validator::new();
    v.required("content", &req.content);
    v.finish()?;

    let comment = Comment {
        guiver_id: user.uid,
        content: req.content.trim().to_string(),
        ..Default::default()
    };
    let comment = state.causes.add_comment(&id, comment).await?;
    Ok(ApiResponse::success(comment))
}

/// GET /causes/:id/comments - newest first, paginated
pub async fn list_cause_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Paginated<Comment>, ApiError> {
    let pagination = state.pagination(query.page.as_deref(), query.limit.as_deref())?;
    let page = state.causes.list_comments(&id, pagination).await?;
    Ok(Paginated::new(page, pagination))
}

/// POST /causes/:id/like
pub async fn like_cause(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let likes = state.causes.update_likes(&id, true).await?;
    Ok(ApiResponse::success(json!({ "message": "Cause liked successfully", "likes": likes })))
}

/// POST /causes/:id/unlike - no-op at zero
pub async fn unlike_cause(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let likes = state.causes.update_likes(&id, false).await?;
    Ok(ApiResponse::success(json!({ "message": "Cause unliked successfully", "likes": likes })))
}
