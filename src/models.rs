use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ValidationErrors;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category_id: i32,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
}

impl CategoryPayload {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_title(&mut errors, &self.title);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category_id: i32,
}

impl ProductPayload {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_title(&mut errors, &self.title);
        if self.description.chars().count() > 1024 {
            errors.add(
                "description",
                "A descrição deve conter no máximo 1024 caracteres.",
            );
        }
        if self.price <= 0.0 {
            errors.add("price", "O preço deve ser maior que zero.");
        }
        if self.category_id < 1 {
            errors.add("categoryId", "Categoria inválida.");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

fn validate_title(errors: &mut ValidationErrors, title: &str) {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        errors.add("title", "O título é obrigatório.");
    } else if !(3..=60).contains(&trimmed.chars().count()) {
        errors.add("title", "O título deve conter entre 3 e 60 caracteres.");
    }
}
