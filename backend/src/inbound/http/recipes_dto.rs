//! Recipe and attribute wire payloads and their conversion to domain types.
//!
//! Prices are emitted as strings with two decimal places and accepted as
//! either strings or JSON numbers.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AttributeName, Error, Price, Recipe, RecipeAttribute, RecipeChanges, RecipeDraft,
    RecipeFields, RecipeLink, RecipeTitle, TimeMinutes,
};
use crate::inbound::http::validation::{attribute_error, missing_field_error, recipe_error};

/// Price as sent by clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    fn parse(&self) -> Result<Price, Error> {
        let parsed = match self {
            Self::Text(text) => text.parse::<Price>(),
            Self::Number(number) => number.to_string().parse::<Price>(),
        };
        parsed.map_err(recipe_error)
    }
}

/// Nested `{ "name": ... }` reference to a tag or ingredient.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AttributeNameRequest {
    #[schema(example = "Vegan")]
    pub name: Option<String>,
}

/// Create or update payload for a recipe.
///
/// Example JSON:
/// `{"title":"Chicken curry","timeMinutes":30,"price":"7.50","tags":[{"name":"Dinner"}]}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[schema(example = "Chicken curry")]
    pub title: Option<String>,
    #[schema(example = 30)]
    pub time_minutes: Option<i64>,
    #[schema(value_type = Option<String>, example = "7.50")]
    pub price: Option<PriceInput>,
    pub description: Option<String>,
    /// `null` clears the link; omitting it leaves the link unchanged.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, nullable)]
    pub link: Option<Option<String>>,
    pub tags: Option<Vec<AttributeNameRequest>>,
    pub ingredients: Option<Vec<AttributeNameRequest>>,
}

/// Distinguish an explicit `null` from an omitted field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn title(raw: String) -> Result<RecipeTitle, Error> {
    RecipeTitle::new(raw).map_err(recipe_error)
}

fn time(raw: i64) -> Result<TimeMinutes, Error> {
    TimeMinutes::new(raw).map_err(recipe_error)
}

/// Blank links are stored as absent.
fn link(raw: Option<String>) -> Result<Option<RecipeLink>, Error> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| RecipeLink::new(value).map_err(recipe_error))
        .transpose()
}

pub(crate) fn attribute_name(field: &str, raw: Option<String>) -> Result<AttributeName, Error> {
    let raw = raw.ok_or_else(|| missing_field_error(field))?;
    AttributeName::new(raw).map_err(|err| attribute_error(field, err))
}

fn attribute_names(
    collection: &str,
    items: Vec<AttributeNameRequest>,
) -> Result<Vec<AttributeName>, Error> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| attribute_name(&format!("{collection}[{index}].name"), item.name))
        .collect()
}

fn optional_names(
    collection: &str,
    items: Option<Vec<AttributeNameRequest>>,
) -> Result<Option<Vec<AttributeName>>, Error> {
    items
        .map(|items| attribute_names(collection, items))
        .transpose()
}

impl RecipeRequest {
    /// Validate a create payload. Title, time and price are required.
    pub(crate) fn into_draft(self) -> Result<RecipeDraft, Error> {
        let title = title(self.title.ok_or_else(|| missing_field_error("title"))?)?;
        let time_minutes = time(
            self.time_minutes
                .ok_or_else(|| missing_field_error("timeMinutes"))?,
        )?;
        let price = self
            .price
            .ok_or_else(|| missing_field_error("price"))?
            .parse()?;
        Ok(RecipeDraft {
            fields: RecipeFields {
                title,
                time_minutes,
                price,
                description: self.description.unwrap_or_default(),
                link: link(self.link.flatten())?,
            },
            tags: optional_names("tags", self.tags)?.unwrap_or_default(),
            ingredients: optional_names("ingredients", self.ingredients)?.unwrap_or_default(),
        })
    }

    /// Validate an update payload. Absent fields stay `None`.
    pub(crate) fn into_changes(self) -> Result<RecipeChanges, Error> {
        Ok(RecipeChanges {
            title: self.title.map(title).transpose()?,
            time_minutes: self.time_minutes.map(time).transpose()?,
            price: self.price.as_ref().map(PriceInput::parse).transpose()?,
            description: self.description,
            link: self.link.map(link).transpose()?,
            tags: optional_names("tags", self.tags)?,
            ingredients: optional_names("ingredients", self.ingredients)?,
        })
    }
}

/// Tag or ingredient as rendered inside recipes and attribute listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttributeResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Vegan")]
    pub name: String,
}

impl From<&RecipeAttribute> for AttributeResponse {
    fn from(attribute: &RecipeAttribute) -> Self {
        Self {
            id: attribute.id().get(),
            name: attribute.name().to_string(),
        }
    }
}

/// Recipe fidelity used by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummaryResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Chicken curry")]
    pub title: String,
    #[schema(example = 30)]
    pub time_minutes: i32,
    #[schema(example = "7.50")]
    pub price: String,
    pub link: Option<String>,
}

/// Recipe fidelity used by retrieve, create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub summary: RecipeSummaryResponse,
    pub description: String,
    pub tags: Vec<AttributeResponse>,
    pub ingredients: Vec<AttributeResponse>,
}

impl From<&Recipe> for RecipeSummaryResponse {
    fn from(recipe: &Recipe) -> Self {
        let fields = recipe.fields();
        Self {
            id: recipe.id().get(),
            title: fields.title.to_string(),
            time_minutes: fields.time_minutes.get(),
            price: fields.price.to_string(),
            link: fields.link.as_ref().map(|link| link.as_ref().to_owned()),
        }
    }
}

impl From<&Recipe> for RecipeDetailResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            summary: RecipeSummaryResponse::from(recipe),
            description: recipe.fields().description.clone(),
            tags: recipe.tags().iter().map(AttributeResponse::from).collect(),
            ingredients: recipe
                .ingredients()
                .iter()
                .map(AttributeResponse::from)
                .collect(),
        }
    }
}
