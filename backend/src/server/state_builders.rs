//! Wire HTTP state over the configured storage backend.

use std::sync::Arc;

use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::outbound::memory::MemoryStore;
use recipe_backend::outbound::persistence::{
    DbPool, DieselAttributeRepository, DieselRecipeRepository, DieselUserRepository,
};
use tracing::warn;

/// Build handler state over PostgreSQL when a pool is available.
///
/// Without a pool every port is served from one [`MemoryStore`], which loses
/// all data on restart.
pub fn build_http_state(pool: Option<&DbPool>) -> HttpState {
    match pool {
        Some(pool) => HttpState::from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselRecipeRepository::new(pool.clone())),
            Arc::new(DieselAttributeRepository::new(pool.clone())),
        ),
        None => {
            warn!("serving from the in-memory store; data will not survive a restart");
            let store = Arc::new(MemoryStore::new());
            HttpState::from_repositories(store.clone(), store.clone(), store)
        }
    }
}
