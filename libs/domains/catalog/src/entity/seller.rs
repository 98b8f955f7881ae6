use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{SellerListItem, SellerRef};

/// Sea-ORM Entity for Sellers table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sellers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub store_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub preview_image: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub city: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub state: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SellerListItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            store_name: model.store_name,
            logo: model.logo,
            preview_image: model.preview_image,
            city: model.city,
            state: model.state,
        }
    }
}

impl From<Model> for SellerRef {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            store_name: Some(model.store_name),
            logo: model.logo,
        }
    }
}
