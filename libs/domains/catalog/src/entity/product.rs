use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{ProductRow, ProductTag, VariantRow};

/// Sea-ORM Entity for Products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub brand_id: Option<Uuid>,
    #[sea_orm(column_type = "Text", nullable)]
    pub model_name: Option<String>,
    pub images: Option<Vec<String>>,
    pub seller_id: Option<Uuid>,
    #[sea_orm(column_type = "Text", nullable)]
    pub color: Option<String>,
    pub sizes: Option<Json>, // JSONB size -> quantity
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub color_variants: Option<Vec<Uuid>>,
    pub tags: Option<Vec<String>>,
    pub active: bool,
    pub sales_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Joins are filled in by the repository after batch-loading sellers and brands
impl From<Model> for ProductRow {
    fn from(model: Model) -> Self {
        let sizes = model
            .sizes
            .and_then(|sizes| serde_json::from_value(sizes).ok());

        Self {
            id: model.id,
            name: model.name,
            brand_id: model.brand_id,
            model_name: model.model_name,
            images: model.images,
            seller_id: model.seller_id,
            color: model.color,
            sizes,
            price: model.price,
            color_variants: model.color_variants,
            tags: model.tags.map(ProductTag::parse_known),
            active: model.active,
            sales_count: model.sales_count,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            seller: None,
            brand: None,
        }
    }
}

impl From<Model> for VariantRow {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            color: model.color,
            images: model.images,
        }
    }
}
