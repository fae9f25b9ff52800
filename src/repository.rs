use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tokio::sync::RwLock;

use crate::{
    error::StoreError,
    models::{Category, CategoryPayload, Product, ProductPayload},
};

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ShopRepository: Send + Sync {
    async fn init(&self) -> StoreResult<()>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn get_category(&self, id: i32) -> StoreResult<Option<Category>>;
    async fn create_category(&self, payload: CategoryPayload) -> StoreResult<Category>;
    async fn update_category(&self, payload: CategoryPayload) -> StoreResult<Category>;
    async fn delete_category(&self, id: i32) -> StoreResult<()>;

    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn get_product(&self, id: i32) -> StoreResult<Option<Product>>;
    async fn list_products_by_category(&self, category_id: i32) -> StoreResult<Vec<Product>>;
    async fn create_product(&self, payload: ProductPayload) -> StoreResult<Product>;
    async fn update_product(&self, payload: ProductPayload) -> StoreResult<Product>;
    async fn delete_product(&self, id: i32) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct PgShopRepository {
    pool: PgPool,
}

impl PgShopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i32,
    title: String,
    description: String,
    price: f64,
    category_id: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            category_id: row.category_id,
            category: None,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductWithCategoryRow {
    id: i32,
    title: String,
    description: String,
    price: f64,
    category_id: i32,
    category_title: String,
}

impl From<ProductWithCategoryRow> for Product {
    fn from(row: ProductWithCategoryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            category_id: row.category_id,
            category: Some(Category {
                id: row.category_id,
                title: row.category_title,
            }),
        }
    }
}

const PRODUCT_WITH_CATEGORY_SELECT: &str = r#"
    SELECT
        p.id,
        p.title,
        p.description,
        p.price,
        p.category_id,
        c.title AS category_title
    FROM products p
    JOIN categories c ON c.id = p.category_id
"#;

#[async_trait]
impl ShopRepository for PgShopRepository {
    async fn init(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, title FROM categories")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn get_category(&self, id: i32) -> StoreResult<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, title FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(category)
    }

    async fn create_category(&self, payload: CategoryPayload) -> StoreResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (title) VALUES ($1) RETURNING id, title",
        )
        .bind(payload.title.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(map_pg_error)?;
        Ok(category)
    }

    async fn update_category(&self, payload: CategoryPayload) -> StoreResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET title = $2 WHERE id = $1 RETURNING id, title",
        )
        .bind(payload.id)
        .bind(payload.title.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_pg_error)?;

        category.ok_or(StoreError::Conflict)
    }

    async fn delete_category(&self, id: i32) -> StoreResult<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_pg_error)?;
        Ok(())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(PRODUCT_WITH_CATEGORY_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_product(&self, id: i32) -> StoreResult<Option<Product>> {
        let query = format!("{PRODUCT_WITH_CATEGORY_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProductWithCategoryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Product::from))
    }

    async fn list_products_by_category(&self, category_id: i32) -> StoreResult<Vec<Product>> {
        let query = format!("{PRODUCT_WITH_CATEGORY_SELECT} WHERE p.category_id = $1");
        let rows = sqlx::query_as::<_, ProductWithCategoryRow>(&query)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn create_product(&self, payload: ProductPayload) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (title, description, price, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, price, category_id
            "#,
        )
        .bind(payload.title.trim())
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_pg_error)?;
        Ok(row.into())
    }

    async fn update_product(&self, payload: ProductPayload) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET title = $2, description = $3, price = $4, category_id = $5
            WHERE id = $1
            RETURNING id, title, description, price, category_id
            "#,
        )
        .bind(payload.id)
        .bind(payload.title.trim())
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_pg_error)?;

        row.map(Product::from).ok_or(StoreError::Conflict)
    }

    async fn delete_product(&self, id: i32) -> StoreResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_pg_error)?;
        Ok(())
    }
}

fn map_pg_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return StoreError::ForeignKey;
    }
    StoreError::Database(err)
}

#[derive(Debug, Default)]
struct ShopTables {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    category_seq: i32,
    product_seq: i32,
}

impl ShopTables {
    fn attach_category(&self, product: &Product) -> Product {
        let mut product = product.clone();
        product.category = self.categories.get(&product.category_id).cloned();
        product
    }
}

#[derive(Debug, Default)]
pub struct InMemoryShopRepository {
    tables: RwLock<ShopTables>,
}

impl InMemoryShopRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShopRepository for InMemoryShopRepository {
    async fn init(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: i32) -> StoreResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn create_category(&self, payload: CategoryPayload) -> StoreResult<Category> {
        let mut tables = self.tables.write().await;
        tables.category_seq += 1;
        let category = Category {
            id: tables.category_seq,
            title: payload.title.trim().to_string(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, payload: CategoryPayload) -> StoreResult<Category> {
        let mut tables = self.tables.write().await;
        let Some(category) = tables.categories.get_mut(&payload.id) else {
            return Err(StoreError::Conflict);
        };
        category.title = payload.title.trim().to_string();
        Ok(category.clone())
    }

    async fn delete_category(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.products.values().any(|p| p.category_id == id) {
            return Err(StoreError::ForeignKey);
        }
        tables.categories.remove(&id);
        Ok(())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .map(|p| tables.attach_category(p))
            .collect())
    }

    async fn get_product(&self, id: i32) -> StoreResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).map(|p| tables.attach_category(p)))
    }

    async fn list_products_by_category(&self, category_id: i32) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .map(|p| tables.attach_category(p))
            .collect())
    }

    async fn create_product(&self, payload: ProductPayload) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&payload.category_id) {
            return Err(StoreError::ForeignKey);
        }
        tables.product_seq += 1;
        let product = Product {
            id: tables.product_seq,
            title: payload.title.trim().to_string(),
            description: payload.description,
            price: payload.price,
            category_id: payload.category_id,
            category: None,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, payload: ProductPayload) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&payload.id) {
            return Err(StoreError::Conflict);
        }
        if !tables.categories.contains_key(&payload.category_id) {
            return Err(StoreError::ForeignKey);
        }
        let product = Product {
            id: payload.id,
            title: payload.title.trim().to_string(),
            description: payload.description,
            price: payload.price,
            category_id: payload.category_id,
            category: None,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.products.remove(&id);
        Ok(())
    }
}
