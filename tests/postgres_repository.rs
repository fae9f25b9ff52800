use shop_backend::{
    error::StoreError,
    models::{CategoryPayload, ProductPayload},
    repository::{PgShopRepository, ShopRepository},
};
use sqlx::{PgPool, postgres::PgPoolOptions};

async fn maybe_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;

    PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .ok()
}

#[tokio::test]
async fn postgres_repository_crud_flow() {
    let Some(pool) = maybe_pool().await else {
        eprintln!(
            "Skipping postgres_repository_crud_flow: TEST_DATABASE_URL/DATABASE_URL is not set or database is unreachable."
        );
        return;
    };

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations should run");

    sqlx::query("TRUNCATE TABLE products, categories RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("truncate should succeed");

    let repo = PgShopRepository::new(pool.clone());

    let category = repo
        .create_category(CategoryPayload {
            id: 0,
            title: "Livros".to_string(),
        })
        .await
        .expect("create category should succeed");
    assert!(category.id > 0);

    let fetched = repo
        .get_category(category.id)
        .await
        .expect("get should succeed")
        .expect("category should exist");
    assert_eq!(fetched.title, "Livros");

    let product = repo
        .create_product(ProductPayload {
            id: 0,
            title: "O Hobbit".to_string(),
            description: "Edição de bolso".to_string(),
            price: 39.9,
            category_id: category.id,
        })
        .await
        .expect("create product should succeed");
    assert!(product.category.is_none());

    let listed = repo.list_products().await.expect("list should succeed");
    assert_eq!(listed.len(), 1);
    let attached = listed[0]
        .category
        .as_ref()
        .expect("listed product should carry its category");
    assert_eq!(attached.title, "Livros");

    let by_category = repo
        .list_products_by_category(category.id)
        .await
        .expect("list by category should succeed");
    assert_eq!(by_category.len(), 1);

    let empty = repo
        .list_products_by_category(category.id + 1000)
        .await
        .expect("list by category should succeed");
    assert!(empty.is_empty());

    let updated = repo
        .update_product(ProductPayload {
            id: product.id,
            title: "O Hobbit (capa dura)".to_string(),
            description: "Edição ilustrada".to_string(),
            price: 99.9,
            category_id: category.id,
        })
        .await
        .expect("update product should succeed");
    assert_eq!(updated.title, "O Hobbit (capa dura)");

    let conflict = repo
        .update_category(CategoryPayload {
            id: 999_999,
            title: "Fantasma".to_string(),
        })
        .await
        .expect_err("updating a missing row should fail");
    assert!(matches!(conflict, StoreError::Conflict));

    let fk_violation = repo
        .create_product(ProductPayload {
            id: 0,
            title: "Produto órfão".to_string(),
            description: "Categoria inexistente".to_string(),
            price: 10.0,
            category_id: 999_999,
        })
        .await
        .expect_err("creating a product without its category should fail");
    assert!(matches!(fk_violation, StoreError::ForeignKey));

    let restricted = repo
        .delete_category(category.id)
        .await
        .expect_err("deleting a referenced category should fail");
    assert!(matches!(restricted, StoreError::ForeignKey));

    repo.delete_product(product.id)
        .await
        .expect("delete product should succeed");
    repo.delete_category(category.id)
        .await
        .expect("delete category should succeed");

    let gone = repo
        .get_category(category.id)
        .await
        .expect("get should succeed");
    assert!(gone.is_none());
}
