use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::{AppError, AppResult},
    handlers::{storage_failure, update_failure},
    models::{ApiMessage, Category, CategoryPayload},
    state::AppState,
};

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state
        .repo
        .list_categories()
        .await
        .map_err(|err| storage_failure(err, "Não foi possível listar as categorias."))?;

    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    let category = state
        .repo
        .get_category(id)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível buscar a categoria."))?
        .ok_or_else(|| AppError::not_found("Categoria não encontrada."))?;

    Ok(Json(category))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<Json<Category>> {
    payload.validate().map_err(AppError::Validation)?;

    let category = state
        .repo
        .create_category(payload)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível criar a categoria."))?;

    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<Json<Category>> {
    if payload.id != id {
        return Err(AppError::not_found("Categoria não encontrada."));
    }

    payload.validate().map_err(AppError::Validation)?;

    let category = state
        .repo
        .update_category(payload)
        .await
        .map_err(|err| update_failure(err, "Não foi possível atualizar a categoria."))?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiMessage>> {
    state
        .repo
        .get_category(id)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível excluir a categoria."))?
        .ok_or_else(|| AppError::not_found("Categoria não encontrada."))?;

    state
        .repo
        .delete_category(id)
        .await
        .map_err(|err| storage_failure(err, "Não foi possível excluir a categoria."))?;

    Ok(Json(ApiMessage {
        message: "Categoria excluída com sucesso.".to_string(),
    }))
}
