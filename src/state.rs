use std::sync::Arc;

use crate::repository::ShopRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ShopRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ShopRepository>) -> Self {
        Self { repo }
    }
}
