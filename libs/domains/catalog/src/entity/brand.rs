use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Brand, BrandRef};

/// Sea-ORM Entity for Brands table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub website: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Brand {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            logo: model.logo,
            description: model.description,
            website: model.website,
            created_at: model.created_at.into(),
        }
    }
}

impl From<Model> for BrandRef {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: Some(model.name),
            logo: model.logo,
        }
    }
}
