use axum::{
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::filter::{Page, Pagination};

/// Wrapper for API responses that adds the success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response with 200 status
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_value(&self.data) {
            Ok(data) => (StatusCode::OK, Json(json!({ "status": "success", "data": data }))).into_response(),
            Err(e) => serialization_failure(e),
        }
    }
}

/// Paginated list envelope
#[derive(Debug)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub pagination: Pagination,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(page: Page<T>, pagination: Pagination) -> Self {
        Self {
            items: page.items,
            total_items: page.total,
            pagination,
        }
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.items) {
            Ok(value) => value,
            Err(e) => return serialization_failure(e),
        };

        Json(json!({
            "status": "success",
            "data": data,
            "totalItems": self.total_items,
            "page": self.pagination.page,
            "pageSize": self.pagination.page_size,
            "totalPages": self.pagination.total_pages(self.total_items),
        }))
        .into_response()
    }
}

fn serialization_failure(e: serde_json::Error) -> Response {
    tracing::error!("Failed to serialize response data: {}", e);
    ApiError::internal_server_error("Failed to serialize response data").into_response()
}

/// `axum::Json` whose rejections use the error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Plain `{message}` payload for deletes
pub fn message(text: &str) -> Value {
    json!({ "message": text })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_envelope() {
        let body = body_json(ApiResponse::success(json!({"id": "c1"})).into_response()).await;
        assert_eq!(body, json!({"status": "success", "data": {"id": "c1"}}));
    }

    #[tokio::test]
    async fn paginated_envelope_rounds_total_pages_up() {
        let page = Page {
            items: vec![1, 2, 3, 4, 5],
            total: 11,
        };
        let body = body_json(Paginated::new(page, Pagination::new(2, 5)).into_response()).await;
        assert_eq!(body["totalItems"], 11);
        assert_eq!(body["page"], 2);
        assert_eq!(body["pageSize"], 5);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }
}
