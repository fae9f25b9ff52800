use anyhow::{Context, Result};
use shop_backend::{
    config::{AppConfig, DatabaseBackend},
    models::{CategoryPayload, ProductPayload},
    repository::{InMemoryShopRepository, PgShopRepository, ShopRepository},
};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to read configuration")?;

    let repo: Box<dyn ShopRepository> = match config.database_backend {
        DatabaseBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(&config.database_url)
                .await
                .context("failed to connect to PostgreSQL")?;
            Box::new(PgShopRepository::new(pool))
        }
        DatabaseBackend::Memory => Box::new(InMemoryShopRepository::new()),
    };

    repo.init().await.context("failed to initialize schema")?;

    let categories = [
        ("Livros", vec![
            ("O Senhor dos Anéis", "Edição de colecionador em capa dura", 149.9),
            ("Clean Architecture", "Princípios de projeto de software", 89.5),
        ]),
        ("Eletrônicos", vec![
            ("Teclado mecânico", "Switches marrons, layout ABNT2", 349.0),
            ("Mouse sem fio", "Sensor de 16000 DPI", 199.9),
        ]),
        ("Jogos", vec![
            ("Xadrez de madeira", "Tabuleiro dobrável 40cm", 120.0),
        ]),
    ];

    for (title, products) in categories {
        let category = repo
            .create_category(CategoryPayload {
                id: 0,
                title: title.to_string(),
            })
            .await
            .context("failed to insert seed category")?;

        for (product_title, description, price) in products {
            repo.create_product(ProductPayload {
                id: 0,
                title: product_title.to_string(),
                description: description.to_string(),
                price,
                category_id: category.id,
            })
            .await
            .context("failed to insert seed product")?;
        }
    }

    println!("Seed data inserted successfully");
    Ok(())
}
