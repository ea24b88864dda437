use axum::{
    extract::{Path, Query, State},
    Extension,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::filter::{parse_price, ProductFilter};
use crate::handlers::validate::Validator;
use crate::middleware::response::message;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody, Paginated};
use crate::models::{Cause, ContactInfo, Product};
use crate::state::AppState;
use crate::types::{blank_str, never_blank, Patch};

use super::ensure_owner;

const DONATION_MIN: i64 = 1;
const DONATION_MAX: i64 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub cause_id: String,
    pub title: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub donation_percentage: Option<i64>,
    pub image_urls: Vec<String>,
    pub contact_info: ContactInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub price: Patch<Decimal>,
    pub donation_percentage: Patch<i64>,
    pub image_urls: Patch<Vec<String>>,
    pub status: Patch<String>,
    pub contact_info: Patch<ContactInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub cause_id: Option<String>,
    pub guiver_id: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
}

/// Response of product creation: the product and the cause it supports.
#[derive(Debug, Serialize)]
pub struct CreatedProduct {
    pub product: Product,
    pub cause: Cause,
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(req): JsonBody<CreateProductRequest>,
) -> ApiResult<CreatedProduct> {
    let mut v = Validator::new();
    v.required("causeId", &req.cause_id)
        .required("title", &req.title)
        .required("description", &req.description)
        .check("price", req.price.is_some(), "price is required")
        .check("donationPercentage", req.donation_percentage.is_some(), "donationPercentage is required")
        .urls("imageUrls", &req.image_urls)
        .contact_info("contactInfo", &req.contact_info);
    if let Some(price) = req.price {
        v.check("price", !price.is_sign_negative() || price.is_zero(), "must not be negative");
    }
    if let Some(pct) = req.donation_percentage {
        v.range("donationPercentage", pct, DONATION_MIN, DONATION_MAX);
    }
    v.finish()?;

    let cause = match state.causes.get_by_id(req.cause_id.trim()).await {
        Ok(cause) => cause,
        Err(e) => {
            tracing::warn!("Product create by {} references unusable cause {}: {}", user.uid, req.cause_id, e);
            return Err(ApiError::bad_request("Invalid cause ID"));
        }
    };

    let product = Product {
        guiver_id: user.uid,
        cause_id: cause.id.clone(),
        title: req.title.trim().to_string(),
        description: req.description.trim().to_string(),
        price: req.price.unwrap_or_default(),
        donation_percentage: donation(req.donation_percentage.unwrap_or(DONATION_MIN)),
        image_urls: req.image_urls,
        status: "active".to_string(),
        contact_info: req.contact_info,
        ..Default::default()
    };

    let product = state.products.create(product).await?;
    Ok(ApiResponse::success(CreatedProduct { product, cause }))
}

/// GET /products - filtered, newest first, paginated
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Paginated<Product>, ApiError> {
    let pagination = state.pagination(query.page.as_deref(), query.limit.as_deref())?;
    let filter = ProductFilter {
        cause_id: query.cause_id,
        guiver_id: query.guiver_id,
        search: query.search,
        min_price: parse_price("minPrice", query.min_price.as_deref())?,
        max_price: parse_price("maxPrice", query.max_price.as_deref())?,
        pagination,
    };

    let page = state.products.list(&filter).await?;
    Ok(Paginated::new(page, pagination))
}

/// GET /products/:id
pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Product> {
    let product = state.products.get_by_id(&id).await?;
    Ok(ApiResponse::success(product))
}

/// GET /products/cause/:causeId
pub async fn list_cause_products(
    State(state): State<AppState>,
    Path(cause_id): Path<String>,
) -> ApiResult<Vec<Product>> {
    let products = state.products.list_by_cause(&cause_id).await?;
    Ok(ApiResponse::success(products))
}

/// PUT /products/:id - partial update, owner only
pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateProductRequest>,
) -> ApiResult<Product> {
    let mut product = state.products.get_by_id(&id).await?;
    ensure_owner(&user, &product.guiver_id, "update", "product")?;

    let mut v = Validator::new();
    if let Some(price) = req.price.as_value() {
        v.check("price", !price.is_sign_negative() || price.is_zero(), "must not be negative");
    }
    if let Some(pct) = req.donation_percentage.as_value() {
        v.range("donationPercentage", *pct, DONATION_MIN, DONATION_MAX);
    }
    if let Some(urls) = req.image_urls.as_value() {
        v.urls("imageUrls", urls);
    }
    if let Some(contact) = req.contact_info.as_value() {
        v.contact_info("contactInfo", contact);
    }
    v.finish()?;

    req.title.merge_into(&mut product.title, blank_str);
    req.description.merge_into(&mut product.description, blank_str);
    req.price.merge_into(&mut product.price, never_blank);
    if let Patch::Value(pct) = req.donation_percentage {
        product.donation_percentage = donation(pct);
    }
    req.status.merge_into(&mut product.status, blank_str);
    req.image_urls.merge_or_clear(&mut product.image_urls, never_blank);
    req.contact_info.merge_or_clear(&mut product.contact_info, ContactInfo::is_empty);

    let product = state.products.update(product).await?;
    Ok(ApiResponse::success(product))
}

/// DELETE /products/:id - owner only
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let product = state.products.get_by_id(&id).await?;
    ensure_owner(&user, &product.guiver_id, "delete", "product")?;

    state.products.delete(&id).await?;
    Ok(ApiResponse::success(message("Product deleted successfully")))
}

/// Range-checked by the validator before it gets here.
fn donation(pct: i64) -> u8 {
    pct.clamp(DONATION_MIN, DONATION_MAX) as u8
}
