//! Drink model, stored-column codec and the two public projections.
//!
//! Both columns hold the JSON text of what the client sent, so a missing
//! title is stored as `null` rather than rejected.

use serde::{Deserialize, Serialize};

use crate::entities::drinks;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// One recipe entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// Recipe entry with the amount redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientShort {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: i32,
    pub title: Option<String>,
    pub recipe: Vec<Ingredient>,
}

/// Public projection: no ingredient amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: Option<String>,
    pub recipe: Vec<IngredientShort>,
}

/// Full projection for authorized callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkLong {
    pub id: i32,
    pub title: Option<String>,
    pub recipe: Vec<Ingredient>,
}

/// Values for a new drink. `None` is stored as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDrink {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

/// Partial update: outer `None` leaves the field alone, `Some(None)` stores `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkChanges {
    pub title: Option<Option<String>>,
    pub recipe: Option<Option<Vec<Ingredient>>>,
}

impl DrinkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| IngredientShort {
                    name: i.name.clone(),
                    color: i.color.clone(),
                })
                .collect(),
        }
    }

    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

/// JSON text for a column value.
pub fn encode_column<T: Serialize>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Encode".into()),
            format!("failed to encode drink column: {e}"),
        )
    })
}

/// Titles written outside this service may be bare text; those are kept as-is.
fn decode_title(raw: &str) -> Option<String> {
    match serde_json::from_str::<Option<String>>(raw) {
        Ok(title) => title,
        Err(_) => Some(raw.to_string()),
    }
}

fn decode_recipe(raw: &str, id: i32) -> Result<Vec<Ingredient>, DomainError> {
    serde_json::from_str::<Option<Vec<Ingredient>>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("invalid recipe stored for drink id={id}: {e}"),
            )
        })
}

impl TryFrom<drinks::Model> for Drink {
    type Error = DomainError;

    fn try_from(model: drinks::Model) -> Result<Self, Self::Error> {
        let recipe = decode_recipe(&model.recipe, model.id)?;
        Ok(Self {
            id: model.id,
            title: decode_title(&model.title),
            recipe,
        })
    }
}
