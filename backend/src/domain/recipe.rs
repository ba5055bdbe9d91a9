//! Recipe aggregate.
//!
//! A recipe belongs to exactly one user and carries two independent sets of
//! attributes: tags and ingredients. Ownership is assigned at creation from
//! the acting identity and never changes.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::recipe_attribute::{AttributeId, AttributeName, RecipeAttribute};
use super::user::UserId;

/// Maximum stored length of a recipe title.
pub const RECIPE_TITLE_MAX: usize = 255;
/// Maximum stored length of a recipe link.
pub const RECIPE_LINK_MAX: usize = 255;
/// Number of fractional digits stored for prices.
pub const PRICE_SCALE: i64 = 2;
const PRICE_DIGITS_AFTER_POINT: usize = 2;
/// Prices are stored as NUMERIC(5, 2), so this is the first rejected value.
const PRICE_LIMIT: i32 = 1000;

/// Validation errors for recipe fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("timeMinutes must be zero or greater")]
    NegativeTime,
    #[error("timeMinutes must be at most {max}")]
    TimeTooLarge { max: i32 },
    #[error("price must be a decimal number")]
    PriceNotNumeric,
    #[error("price must be zero or greater")]
    NegativePrice,
    #[error("price must have at most {scale} decimal places")]
    PriceTooPrecise { scale: i64 },
    #[error("price must be below {limit}")]
    PriceTooLarge { limit: i32 },
    #[error("link must be at most {max} characters")]
    LinkTooLong { max: usize },
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

/// Storage identifier of a recipe. Higher ids were created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty recipe title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, RecipeValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if title.chars().count() > RECIPE_TITLE_MAX {
            return Err(RecipeValidationError::TitleTooLong {
                max: RECIPE_TITLE_MAX,
            });
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for RecipeTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecipeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Preparation time estimate in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeMinutes(i32);

impl TimeMinutes {
    pub fn new(minutes: i64) -> Result<Self, RecipeValidationError> {
        if minutes < 0 {
            return Err(RecipeValidationError::NegativeTime);
        }
        i32::try_from(minutes)
            .map(Self)
            .map_err(|_| RecipeValidationError::TimeTooLarge { max: i32::MAX })
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Non-negative price with at most two decimal places.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Price;
///
/// let price: Price = "7.5".parse().expect("valid price");
/// assert_eq!(price.to_string(), "7.50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price(BigDecimal);

impl Price {
    /// Validate a decimal value.
    pub fn new(value: BigDecimal) -> Result<Self, RecipeValidationError> {
        if value < BigDecimal::from(0) {
            return Err(RecipeValidationError::NegativePrice);
        }
        let (_, scale) = value.normalized().as_bigint_and_exponent();
        if scale > PRICE_SCALE {
            return Err(RecipeValidationError::PriceTooPrecise { scale: PRICE_SCALE });
        }
        if value >= BigDecimal::from(PRICE_LIMIT) {
            return Err(RecipeValidationError::PriceTooLarge { limit: PRICE_LIMIT });
        }
        Ok(Self(value.with_scale(PRICE_SCALE)))
    }

    /// Decimal value at the stored scale.
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl FromStr for Price {
    type Err = RecipeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            BigDecimal::from_str(s.trim()).map_err(|_| RecipeValidationError::PriceNotNumeric)?;
        Self::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // BigDecimal drops the fractional digits of zero, so render from the
        // scaled integer instead.
        let (digits, _) = self.0.with_scale(PRICE_SCALE).as_bigint_and_exponent();
        let digits = format!(
            "{:0>width$}",
            digits.to_string(),
            width = PRICE_DIGITS_AFTER_POINT + 1
        );
        let (units, cents) = digits.split_at(digits.len() - PRICE_DIGITS_AFTER_POINT);
        write!(f, "{units}.{cents}")
    }
}

/// Optional external link to the recipe source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeLink(String);

impl RecipeLink {
    pub fn new(link: impl Into<String>) -> Result<Self, RecipeValidationError> {
        let link = link.into();
        if link.chars().count() > RECIPE_LINK_MAX {
            return Err(RecipeValidationError::LinkTooLong {
                max: RECIPE_LINK_MAX,
            });
        }
        Ok(Self(link))
    }
}

impl AsRef<str> for RecipeLink {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Scalar fields of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: RecipeTitle,
    pub time_minutes: TimeMinutes,
    pub price: Price,
    pub description: String,
    pub link: Option<RecipeLink>,
}

/// Input for creating a recipe. The owner comes from the acting identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub fields: RecipeFields,
    pub tags: Vec<AttributeName>,
    pub ingredients: Vec<AttributeName>,
}

/// How an update treats absent scalar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Title, time and price must be supplied.
    Full,
    /// Only supplied fields change.
    Partial,
}

/// Requested changes to an existing recipe.
///
/// `None` leaves a field untouched. For `link`, `Some(None)` clears it.
/// When `tags` or `ingredients` is `Some`, the association set is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub title: Option<RecipeTitle>,
    pub time_minutes: Option<TimeMinutes>,
    pub price: Option<Price>,
    pub description: Option<String>,
    pub link: Option<Option<RecipeLink>>,
    pub tags: Option<Vec<AttributeName>>,
    pub ingredients: Option<Vec<AttributeName>>,
}

impl RecipeChanges {
    /// Reject a full update that omits a required field.
    pub fn check_mode(&self, mode: UpdateMode) -> Result<(), RecipeValidationError> {
        if mode == UpdateMode::Partial {
            return Ok(());
        }
        if self.title.is_none() {
            return Err(RecipeValidationError::MissingField { field: "title" });
        }
        if self.time_minutes.is_none() {
            return Err(RecipeValidationError::MissingField {
                field: "timeMinutes",
            });
        }
        if self.price.is_none() {
            return Err(RecipeValidationError::MissingField { field: "price" });
        }
        Ok(())
    }

    /// Apply scalar changes onto stored fields.
    pub fn apply_to(&self, fields: &mut RecipeFields) {
        if let Some(title) = &self.title {
            fields.title = title.clone();
        }
        if let Some(time) = self.time_minutes {
            fields.time_minutes = time;
        }
        if let Some(price) = &self.price {
            fields.price = price.clone();
        }
        if let Some(description) = &self.description {
            fields.description = description.clone();
        }
        if let Some(link) = &self.link {
            fields.link = link.clone();
        }
    }
}

/// Restricts a recipe listing to those carrying any of the given attributes.
///
/// Each non-empty list is an independent constraint; both must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub tag_ids: Vec<AttributeId>,
    pub ingredient_ids: Vec<AttributeId>,
}

impl RecipeFilter {
    /// True when `recipe` satisfies every supplied constraint.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let any_of = |wanted: &[AttributeId], present: &[RecipeAttribute]| {
            wanted.is_empty() || present.iter().any(|a| wanted.contains(&a.id()))
        };
        any_of(&self.tag_ids, &recipe.tags) && any_of(&self.ingredient_ids, &recipe.ingredients)
    }
}

/// Persisted recipe with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    owner: UserId,
    fields: RecipeFields,
    tags: Vec<RecipeAttribute>,
    ingredients: Vec<RecipeAttribute>,
}

impl Recipe {
    pub fn new(
        id: RecipeId,
        owner: UserId,
        fields: RecipeFields,
        tags: Vec<RecipeAttribute>,
        ingredients: Vec<RecipeAttribute>,
    ) -> Self {
        Self {
            id,
            owner,
            fields,
            tags,
            ingredients,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn fields(&self) -> &RecipeFields {
        &self.fields
    }

    pub fn title(&self) -> &RecipeTitle {
        &self.fields.title
    }

    pub fn tags(&self) -> &[RecipeAttribute] {
        &self.tags
    }

    pub fn ingredients(&self) -> &[RecipeAttribute] {
        &self.ingredients
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fields.title, f)
    }
}
