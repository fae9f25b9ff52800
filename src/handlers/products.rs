use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::{AppError, AppResult},
    handlers::{storage_failure, update_failure},
    models::{ApiMessage, Product, ProductPayload},
    state::AppState,
};

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state
        .repo
        .list_products()
        .await
        .map_err(|err| storage_failure(err, "Não foi possível listar os produtos."))?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = state
        .repo
        .get_product(id)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível buscar o produto."))?
        .ok_or_else(|| AppError::not_found("Produto não encontrado."))?;

    Ok(Json(product))
}

pub async fn list_products_by_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state
        .repo
        .list_products_by_category(id)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível listar os produtos."))?;

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<Product>> {
    payload.validate().map_err(AppError::Validation)?;

    let product = state
        .repo
        .create_product(payload)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível criar o produto."))?;

    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<Product>> {
    if payload.id != id {
        return Err(AppError::not_found("Produto não encontrado."));
    }

    payload.validate().map_err(AppError::Validation)?;

    let product = state
        .repo
        .update_product(payload)
        .await
        .map_err(|err| update_failure(err, "Não foi possível atualizar o produto."))?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiMessage>> {
    state
        .repo
        .get_product(id)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível excluir o produto."))?
        .ok_or_else(|| AppError::not_found("Produto não encontrado."))?;

    state
        .repo
        .delete_product(id)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível excluir o produto."))?;

    Ok(Json(ApiMessage {
        message: "Produto excluído com sucesso.".to_string(),
    }))
}
