use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub description: String,
    /// Kept as submitted, no numeric coercion.
    pub price: String,
    pub category: String,
    pub duration: String,

    /// Upload reference of the cover image (`uploads/...`).
    pub image: String,

    /// Upload references of the videos, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub videos: serde_json::Value,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
