use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of `drinks`. `title` and `recipe` hold JSON-encoded text.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drinks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "title", unique)]
    pub title: String,
    #[sea_orm(column_name = "recipe", column_type = "Text")]
    pub recipe: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
