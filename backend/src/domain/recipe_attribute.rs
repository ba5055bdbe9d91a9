//! Tags and ingredients: per-owner labels attached to recipes.
//!
//! Both kinds share one shape, so they are modelled as a single
//! [`RecipeAttribute`] discriminated by [`AttributeKind`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Maximum stored length of a tag or ingredient name.
pub const ATTRIBUTE_NAME_MAX: usize = 255;

/// Which attribute collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AttributeKind {
    #[serde(rename = "tags")]
    Tag,
    #[serde(rename = "ingredients")]
    Ingredient,
}

impl AttributeKind {
    /// Singular label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Ingredient => "ingredient",
        }
    }

    /// Plural path segment used by the HTTP surface.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Tag => "tags",
            Self::Ingredient => "ingredients",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Storage identifier of a tag or ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeId(i64);

impl AttributeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for attribute names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Non-empty attribute name, compared exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttributeName(String);

impl AttributeName {
    pub fn new(name: impl Into<String>) -> Result<Self, AttributeValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, AttributeValidationError> {
        if name.trim().is_empty() {
            return Err(AttributeValidationError::EmptyName);
        }
        if name.chars().count() > ATTRIBUTE_NAME_MAX {
            return Err(AttributeValidationError::NameTooLong {
                max: ATTRIBUTE_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for AttributeName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AttributeName> for String {
    fn from(value: AttributeName) -> Self {
        value.0
    }
}

impl TryFrom<String> for AttributeName {
    type Error = AttributeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A tag or ingredient owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeAttribute {
    id: AttributeId,
    owner: UserId,
    kind: AttributeKind,
    name: AttributeName,
}

impl RecipeAttribute {
    pub fn new(id: AttributeId, owner: UserId, kind: AttributeKind, name: AttributeName) -> Self {
        Self {
            id,
            owner,
            kind,
            name,
        }
    }

    pub fn id(&self) -> AttributeId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn name(&self) -> &AttributeName {
        &self.name
    }
}

impl fmt::Display for RecipeAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

/// Deduplicate requested names, keeping first-seen order.
pub fn unique_names(names: &[AttributeName]) -> Vec<AttributeName> {
    let mut seen = std::collections::HashSet::new();
    names
        .iter()
        .filter(|name| seen.insert(name.as_ref().to_owned()))
        .cloned()
        .collect()
}

/// Order attributes by name, then id.
pub fn sort_attributes(attributes: &mut [RecipeAttribute]) {
    attributes.sort_by(|a, b| {
        a.name
            .as_ref()
            .cmp(b.name.as_ref())
            .then_with(|| a.id.cmp(&b.id))
    });
}
