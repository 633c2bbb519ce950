use std::sync::Arc;

use crate::{
    catalog::Catalog,
    services::{AccountStore, InMemoryAccountStore, Recommender},
};

/// Shared application state
///
/// Everything here is either immutable after startup or synchronizes internally,
/// so handlers only ever need `&AppState`.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub trending: Arc<Catalog>,
    pub recommender: Arc<Recommender>,
    pub accounts: Arc<dyn AccountStore>,
    pub trending_count: usize,
}

impl AppState {
    pub fn new(catalog: Catalog, trending: Catalog, accounts: Arc<dyn AccountStore>) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            recommender: Arc::new(Recommender::new(catalog.clone())),
            catalog,
            trending: Arc::new(trending),
            accounts,
            trending_count: 8,
        }
    }

    /// State backed by an in-memory account store
    pub fn in_memory(catalog: Catalog, trending: Catalog) -> Self {
        Self::new(catalog, trending, Arc::new(InMemoryAccountStore::new()))
    }

    pub fn with_trending_count(mut self, count: usize) -> Self {
        self.trending_count = count;
        self
    }
}
