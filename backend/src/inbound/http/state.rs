//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AttributeRepository, LoginService, RecipeAttributesCommand, RecipeAttributesQuery,
    RecipeRepository, RecipesCommand, RecipesQuery, UserAccountsCommand, UserProfileQuery,
    UserRepository,
};
use crate::domain::{AttributeService, RecipeService, UserAccountService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub recipes: Arc<dyn RecipesCommand>,
    pub recipes_query: Arc<dyn RecipesQuery>,
    pub attributes: Arc<dyn RecipeAttributesCommand>,
    pub attributes_query: Arc<dyn RecipeAttributesQuery>,
}

impl HttpState {
    /// Wire the domain services over the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_backend::inbound::http::state::HttpState;
    /// use recipe_backend::outbound::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let state = HttpState::from_repositories(store.clone(), store.clone(), store);
    /// let _login = state.login.clone();
    /// ```
    pub fn from_repositories<U, R, A>(users: Arc<U>, recipes: Arc<R>, attributes: Arc<A>) -> Self
    where
        U: UserRepository + 'static,
        R: RecipeRepository + 'static,
        A: AttributeRepository + 'static,
    {
        let accounts = Arc::new(UserAccountService::new(users));
        let recipes = Arc::new(RecipeService::new(recipes));
        let attributes = Arc::new(AttributeService::new(attributes));
        Self {
            login: accounts.clone(),
            accounts: accounts.clone(),
            profile: accounts,
            recipes: recipes.clone(),
            recipes_query: recipes,
            attributes: attributes.clone(),
            attributes_query: attributes,
        }
    }
}
