mod categories;
mod products;

pub use categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
pub use products::{
    create_product, delete_product, get_product, list_products, list_products_by_category,
    update_product,
};

use axum::Json;
use tracing::error;

use crate::{
    error::{AppError, StoreError},
    models::ApiMessage,
};

pub async fn healthcheck() -> Json<ApiMessage> {
    Json(ApiMessage {
        message: "ok".to_string(),
    })
}

fn storage_failure(err: StoreError, message: &str) -> AppError {
    error!(error = %err, "storage operation failed");
    AppError::operation_failed(message)
}

fn update_failure(err: StoreError, message: &str) -> AppError {
    match err {
        StoreError::Conflict => AppError::conflict("Este registro já foi atualizado."),
        other => storage_failure(other, message),
    }
}
