//! Tag and ingredient domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ownership::{deleted_or_not_found, owned_or_not_found};
use crate::domain::ports::{
    AttributeRepository, AttributeRepositoryError, RecipeAttributesCommand,
    RecipeAttributesQuery,
};
use crate::domain::{
    AttributeId, AttributeKind, AttributeName, Error, RecipeAttribute, UpdateMode, UserId,
};

/// Service implementing the attribute driving ports for both kinds.
#[derive(Clone)]
pub struct AttributeService<R> {
    repo: Arc<R>,
}

impl<R> AttributeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_attribute_error(error: AttributeRepositoryError) -> Error {
    match error {
        AttributeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("attribute repository unavailable: {message}"))
        }
        AttributeRepositoryError::Query { message } => {
            Error::internal(format!("attribute repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R: AttributeRepository> RecipeAttributesQuery for AttributeService<R> {
    async fn list(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        assigned_only: bool,
    ) -> Result<Vec<RecipeAttribute>, Error> {
        self.repo
            .list(owner, kind, assigned_only)
            .await
            .map_err(map_attribute_error)
    }

    async fn get(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<RecipeAttribute, Error> {
        let found = self
            .repo
            .find(owner, kind, id)
            .await
            .map_err(map_attribute_error)?;
        owned_or_not_found(found, kind.label(), id)
    }
}

#[async_trait]
impl<R: AttributeRepository> RecipeAttributesCommand for AttributeService<R> {
    async fn create(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        name: AttributeName,
    ) -> Result<RecipeAttribute, Error> {
        self.repo
            .create(owner, kind, &name)
            .await
            .map_err(map_attribute_error)
    }

    async fn update(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
        name: Option<AttributeName>,
        mode: UpdateMode,
    ) -> Result<RecipeAttribute, Error> {
        let Some(name) = name else {
            if mode == UpdateMode::Full {
                return Err(Error::invalid_request("name is required")
                    .with_details(json!({ "field": "name" })));
            }
            return self.get(owner, kind, id).await;
        };

        let renamed = self
            .repo
            .rename(owner, kind, id, &name)
            .await
            .map_err(map_attribute_error)?;
        owned_or_not_found(renamed, kind.label(), id)
    }

    async fn delete(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete(owner, kind, id)
            .await
            .map_err(map_attribute_error)?;
        deleted_or_not_found(deleted, kind.label(), id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockAttributeRepository;
    use rstest::rstest;

    fn make_service(repo: MockAttributeRepository) -> AttributeService<MockAttributeRepository> {
        AttributeService::new(Arc::new(repo))
    }

    fn stored(owner: &UserId, kind: AttributeKind, name: &str) -> RecipeAttribute {
        RecipeAttribute::new(
            AttributeId::new(5),
            owner.clone(),
            kind,
            AttributeName::new(name).expect("valid name"),
        )
    }

    #[rstest]
    #[case(AttributeKind::Tag)]
    #[case(AttributeKind::Ingredient)]
    #[tokio::test]
    async fn get_out_of_scope_is_not_found_with_kind_label(#[case] kind: AttributeKind) {
        let mut repo = MockAttributeRepository::new();
        repo.expect_find().times(1).return_once(|_, _, _| Ok(None));

        let service = make_service(repo);
        let err = service
            .get(&UserId::random(), kind, AttributeId::new(5))
            .await
            .expect_err("out of scope");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), format!("{} 5 not found", kind.label()));
    }

    #[tokio::test]
    async fn full_update_requires_name() {
        let mut repo = MockAttributeRepository::new();
        repo.expect_rename().never();

        let service = make_service(repo);
        let err = service
            .update(
                &UserId::random(),
                AttributeKind::Tag,
                AttributeId::new(1),
                None,
                UpdateMode::Full,
            )
            .await
            .expect_err("name required");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn partial_update_without_name_returns_current() {
        let owner = UserId::random();
        let current = stored(&owner, AttributeKind::Ingredient, "Salt");
        let expected = current.clone();
        let mut repo = MockAttributeRepository::new();
        repo.expect_rename().never();
        repo.expect_find()
            .times(1)
            .return_once(move |_, _, _| Ok(Some(current)));

        let service = make_service(repo);
        let attribute = service
            .update(
                &owner,
                AttributeKind::Ingredient,
                AttributeId::new(5),
                None,
                UpdateMode::Partial,
            )
            .await
            .expect("no-op update succeeds");
        assert_eq!(attribute, expected);
    }

    #[tokio::test]
    async fn rename_passes_through_repository() {
        let owner = UserId::random();
        let renamed = stored(&owner, AttributeKind::Tag, "Breakfast");
        let mut repo = MockAttributeRepository::new();
        repo.expect_rename()
            .times(1)
            .withf(|_, kind, id, name| {
                *kind == AttributeKind::Tag && id.get() == 5 && name.as_ref() == "Breakfast"
            })
            .return_once(move |_, _, _, _| Ok(Some(renamed)));

        let service = make_service(repo);
        let attribute = service
            .update(
                &owner,
                AttributeKind::Tag,
                AttributeId::new(5),
                Some(AttributeName::new("Breakfast").expect("valid name")),
                UpdateMode::Full,
            )
            .await
            .expect("rename succeeds");
        assert_eq!(attribute.to_string(), "Breakfast");
    }

    #[tokio::test]
    async fn delete_out_of_scope_is_not_found() {
        let mut repo = MockAttributeRepository::new();
        repo.expect_delete()
            .times(1)
            .return_once(|_, _, _| Ok(false));

        let service = make_service(repo);
        let err = service
            .delete(&UserId::random(), AttributeKind::Tag, AttributeId::new(1))
            .await
            .expect_err("out of scope");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn connection_failures_are_service_unavailable() {
        let mut repo = MockAttributeRepository::new();
        repo.expect_list()
            .times(1)
            .return_once(|_, _, _| Err(AttributeRepositoryError::connection("down")));

        let service = make_service(repo);
        let err = service
            .list(&UserId::random(), AttributeKind::Tag, false)
            .await
            .expect_err("failure surfaces");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
