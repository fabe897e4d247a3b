//! SeaORM adapter for the drinks table.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set,
};

use crate::entities::drinks;

pub mod dto;

pub use dto::{DrinkCreate, DrinkUpdate};

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<drinks::Model>, sea_orm::DbErr> {
    drinks::Entity::find()
        .order_by_asc(drinks::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<drinks::Model>, sea_orm::DbErr> {
    drinks::Entity::find_by_id(id).one(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DrinkCreate,
) -> Result<drinks::Model, sea_orm::DbErr> {
    let active = drinks::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        recipe: Set(dto.recipe),
    };
    active.insert(conn).await
}

/// Applies `dto` to `existing`. Skips the round trip when nothing changes.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: drinks::Model,
    dto: DrinkUpdate,
) -> Result<drinks::Model, sea_orm::DbErr> {
    let mut active: drinks::ActiveModel = existing.clone().into();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(recipe) = dto.recipe {
        active.recipe = Set(recipe);
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    active.update(conn).await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let result = drinks::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
