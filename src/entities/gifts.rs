use crate::models::Gift;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// JSON array of strings stored in a jsonb column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "gifts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub image_urls: Option<StringList>,
    pub purchase_link: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub purchase_links: Option<StringList>,
    pub is_shared: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub claimed_by: StringList,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Gift {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            image_url: m.image_url,
            image_urls: m.image_urls.map(|l| l.0).filter(|l| !l.is_empty()),
            purchase_link: m.purchase_link,
            purchase_links: m.purchase_links.map(|l| l.0).filter(|l| !l.is_empty()),
            is_shared: m.is_shared,
            claimed_by: m.claimed_by.0,
            created_at: m.created_at,
        }
    }
}
