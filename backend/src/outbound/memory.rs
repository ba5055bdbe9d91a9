//! In-process repositories used when no database is configured.
//!
//! A single [`MemoryStore`] implements every repository port so that links
//! between recipes and attributes stay consistent under one lock. State is
//! lost on restart; this adapter backs local development and handler tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    AttributeRepository, AttributeRepositoryError, RecipeRepository, RecipeRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AttributeId, AttributeKind, AttributeName, Email, Recipe, RecipeAttribute, RecipeChanges,
    RecipeDraft, RecipeFields, RecipeFilter, RecipeId, UserAccount, UserId, sort_attributes,
};

#[derive(Debug, Clone)]
struct StoredRecipe {
    owner: UserId,
    fields: RecipeFields,
    tag_ids: Vec<AttributeId>,
    ingredient_ids: Vec<AttributeId>,
}

impl StoredRecipe {
    fn links_mut(&mut self, kind: AttributeKind) -> &mut Vec<AttributeId> {
        match kind {
            AttributeKind::Tag => &mut self.tag_ids,
            AttributeKind::Ingredient => &mut self.ingredient_ids,
        }
    }

    fn links(&self, kind: AttributeKind) -> &[AttributeId] {
        match kind {
            AttributeKind::Tag => &self.tag_ids,
            AttributeKind::Ingredient => &self.ingredient_ids,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredAttribute {
    owner: UserId,
    name: AttributeName,
}

#[derive(Debug, Default)]
struct AttributeTable {
    rows: BTreeMap<AttributeId, StoredAttribute>,
    last_id: i64,
}

impl AttributeTable {
    fn insert(&mut self, owner: &UserId, name: &AttributeName) -> AttributeId {
        self.last_id += 1;
        let id = AttributeId::new(self.last_id);
        self.rows.insert(
            id,
            StoredAttribute {
                owner: owner.clone(),
                name: name.clone(),
            },
        );
        id
    }

    fn owned(&self, owner: &UserId, id: AttributeId) -> Option<&StoredAttribute> {
        self.rows.get(&id).filter(|row| &row.owner == owner)
    }

    /// Lowest id carrying `name` in `owner`'s namespace, created if missing.
    fn resolve(&mut self, owner: &UserId, name: &AttributeName) -> AttributeId {
        let existing = self
            .rows
            .iter()
            .find(|(_, row)| &row.owner == owner && row.name == *name)
            .map(|(id, _)| *id);
        existing.unwrap_or_else(|| self.insert(owner, name))
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<UserId, UserAccount>,
    recipes: BTreeMap<RecipeId, StoredRecipe>,
    last_recipe_id: i64,
    tags: AttributeTable,
    ingredients: AttributeTable,
}

impl MemoryState {
    fn table(&self, kind: AttributeKind) -> &AttributeTable {
        match kind {
            AttributeKind::Tag => &self.tags,
            AttributeKind::Ingredient => &self.ingredients,
        }
    }

    fn table_mut(&mut self, kind: AttributeKind) -> &mut AttributeTable {
        match kind {
            AttributeKind::Tag => &mut self.tags,
            AttributeKind::Ingredient => &mut self.ingredients,
        }
    }

    fn resolve_all(
        &mut self,
        owner: &UserId,
        kind: AttributeKind,
        names: &[AttributeName],
    ) -> Vec<AttributeId> {
        let table = self.table_mut(kind);
        let mut ids: Vec<AttributeId> = Vec::with_capacity(names.len());
        for name in names {
            let id = table.resolve(owner, name);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    fn attribute(&self, kind: AttributeKind, id: AttributeId) -> Option<RecipeAttribute> {
        self.table(kind)
            .rows
            .get(&id)
            .map(|row| RecipeAttribute::new(id, row.owner.clone(), kind, row.name.clone()))
    }

    fn attributes(&self, kind: AttributeKind, ids: &[AttributeId]) -> Vec<RecipeAttribute> {
        let mut attributes: Vec<_> = ids
            .iter()
            .filter_map(|id| self.attribute(kind, *id))
            .collect();
        sort_attributes(&mut attributes);
        attributes
    }

    fn assemble(&self, id: RecipeId, stored: &StoredRecipe) -> Recipe {
        Recipe::new(
            id,
            stored.owner.clone(),
            stored.fields.clone(),
            self.attributes(AttributeKind::Tag, &stored.tag_ids),
            self.attributes(AttributeKind::Ingredient, &stored.ingredient_ids),
        )
    }

    fn owned_recipe(&self, owner: &UserId, id: RecipeId) -> Option<Recipe> {
        self.recipes
            .get(&id)
            .filter(|stored| &stored.owner == owner)
            .map(|stored| self.assemble(id, stored))
    }
}

/// Thread-safe in-memory store implementing all repository ports.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut state = self.lock();
        let email = account.user().email();
        if state.users.values().any(|row| row.user().email() == email) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        state
            .users
            .insert(account.user().id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.lock().users.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|row| row.user().email() == email)
            .cloned())
    }

    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock();
        match state.users.get_mut(account.user().id()) {
            Some(row) => {
                *row = account.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn list(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock();
        Ok(state
            .recipes
            .iter()
            .rev()
            .filter(|(_, stored)| &stored.owner == owner)
            .map(|(id, stored)| state.assemble(*id, stored))
            .filter(|recipe| filter.matches(recipe))
            .collect())
    }

    async fn find(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(self.lock().owned_recipe(owner, id))
    }

    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let mut state = self.lock();
        let tag_ids = state.resolve_all(owner, AttributeKind::Tag, &draft.tags);
        let ingredient_ids =
            state.resolve_all(owner, AttributeKind::Ingredient, &draft.ingredients);
        state.last_recipe_id += 1;
        let id = RecipeId::new(state.last_recipe_id);
        let stored = StoredRecipe {
            owner: owner.clone(),
            fields: draft.fields.clone(),
            tag_ids,
            ingredient_ids,
        };
        let recipe = state.assemble(id, &stored);
        state.recipes.insert(id, stored);
        Ok(recipe)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut state = self.lock();
        let Some(mut stored) = state
            .recipes
            .get(&id)
            .filter(|stored| &stored.owner == owner)
            .cloned()
        else {
            return Ok(None);
        };

        changes.apply_to(&mut stored.fields);
        for (kind, names) in [
            (AttributeKind::Tag, changes.tags.as_deref()),
            (AttributeKind::Ingredient, changes.ingredients.as_deref()),
        ] {
            if let Some(names) = names {
                *stored.links_mut(kind) = state.resolve_all(owner, kind, names);
            }
        }

        let recipe = state.assemble(id, &stored);
        state.recipes.insert(id, stored);
        Ok(Some(recipe))
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock();
        if state.owned_recipe(owner, id).is_none() {
            return Ok(false);
        }
        Ok(state.recipes.remove(&id).is_some())
    }
}

#[async_trait]
impl AttributeRepository for MemoryStore {
    async fn list(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        assigned_only: bool,
    ) -> Result<Vec<RecipeAttribute>, AttributeRepositoryError> {
        let state = self.lock();
        let is_assigned = |id: &AttributeId| {
            state
                .recipes
                .values()
                .any(|recipe| recipe.links(kind).contains(id))
        };
        let ids: Vec<AttributeId> = state
            .table(kind)
            .rows
            .iter()
            .filter(|(id, row)| &row.owner == owner && (!assigned_only || is_assigned(*id)))
            .map(|(id, _)| *id)
            .collect();
        Ok(state.attributes(kind, &ids))
    }

    async fn find(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<Option<RecipeAttribute>, AttributeRepositoryError> {
        let state = self.lock();
        Ok(state
            .table(kind)
            .owned(owner, id)
            .map(|row| RecipeAttribute::new(id, row.owner.clone(), kind, row.name.clone())))
    }

    async fn create(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        name: &AttributeName,
    ) -> Result<RecipeAttribute, AttributeRepositoryError> {
        let mut state = self.lock();
        let id = state.table_mut(kind).insert(owner, name);
        Ok(RecipeAttribute::new(id, owner.clone(), kind, name.clone()))
    }

    async fn rename(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
        name: &AttributeName,
    ) -> Result<Option<RecipeAttribute>, AttributeRepositoryError> {
        let mut state = self.lock();
        let Some(row) = state
            .table_mut(kind)
            .rows
            .get_mut(&id)
            .filter(|row| &row.owner == owner)
        else {
            return Ok(None);
        };
        row.name = name.clone();
        Ok(Some(RecipeAttribute::new(id, owner.clone(), kind, name.clone())))
    }

    async fn delete(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<bool, AttributeRepositoryError> {
        let mut state = self.lock();
        if state.table(kind).owned(owner, id).is_none() {
            return Ok(false);
        }
        state.table_mut(kind).rows.remove(&id);
        for recipe in state.recipes.values_mut() {
            recipe.links_mut(kind).retain(|linked| *linked != id);
        }
        Ok(true)
    }
}
