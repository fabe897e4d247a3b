//! Repository layer for drinks.

use sea_orm::ConnectionTrait;

use crate::adapters::drinks_sea::{self as adapter, DrinkCreate, DrinkUpdate};
use crate::domain::drink::{encode_column, Drink, DrinkChanges, NewDrink};
use crate::errors::domain::DomainError;

/// All drinks ordered by id.
pub async fn list_drinks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Drink>, DomainError> {
    adapter::find_all(conn)
        .await?
        .into_iter()
        .map(Drink::try_from)
        .collect()
}

pub async fn create_drink<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewDrink,
) -> Result<Drink, DomainError> {
    let dto = DrinkCreate {
        title: encode_column(&new.title)?,
        recipe: encode_column(&new.recipe)?,
    };
    let model = adapter::create(conn, dto).await?;
    Drink::try_from(model)
}

/// Applies `changes` to drink `id`. `Ok(None)` when no such drink exists.
pub async fn update_drink<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    changes: DrinkChanges,
) -> Result<Option<Drink>, DomainError> {
    let Some(existing) = adapter::find_by_id(conn, id).await? else {
        return Ok(None);
    };

    let dto = DrinkUpdate {
        title: changes.title.as_ref().map(encode_column).transpose()?,
        recipe: changes.recipe.as_ref().map(encode_column).transpose()?,
    };
    let model = if dto.is_empty() {
        existing
    } else {
        adapter::update(conn, existing, dto).await?
    };
    Drink::try_from(model).map(Some)
}

/// Removes drink `id`. `Ok(false)` when no such drink exists.
pub async fn delete_drink<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<bool, DomainError> {
    if adapter::find_by_id(conn, id).await?.is_none() {
        return Ok(false);
    }
    let removed = adapter::delete_by_id(conn, id).await?;
    Ok(removed > 0)
}
