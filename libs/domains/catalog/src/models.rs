use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::join::Embedded;

/// Merchandising tag attached to a product
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductTag {
    Trending,
    Recommended,
}

impl ProductTag {
    /// Parse stored tag strings, dropping values outside the known set.
    pub fn parse_known<I, S>(raw: I) -> Vec<ProductTag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .filter_map(|tag| tag.as_ref().parse().ok())
            .collect()
    }
}

fn known_tags<'de, D>(deserializer: D) -> Result<Option<Vec<ProductTag>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw.map(ProductTag::parse_known))
}

/// Seller columns embedded into a product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerRef {
    pub id: Uuid,
    pub store_name: Option<String>,
    pub logo: Option<String>,
}

/// Brand columns embedded into a product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRef {
    pub id: Uuid,
    pub name: Option<String>,
    pub logo: Option<String>,
}

/// A product as returned by the store, with its seller and brand joins.
///
/// The joins arrive either as an object or as a one-element array depending
/// on how the store resolved the relation; see [`Embedded`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Option<Uuid>,
    pub model_name: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    pub seller_id: Option<Uuid>,
    pub color: Option<String>,
    #[serde(default)]
    pub sizes: Option<BTreeMap<String, u32>>,
    pub price: f64,
    #[serde(default)]
    pub color_variants: Option<Vec<Uuid>>,
    #[serde(default, deserialize_with = "known_tags")]
    pub tags: Option<Vec<ProductTag>>,
    pub active: bool,
    #[serde(default)]
    pub sales_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub seller: Option<Embedded<SellerRef>>,
    #[serde(default)]
    pub brand: Option<Embedded<BrandRef>>,
}

/// The columns loaded when expanding a product's color variants
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariantRow {
    pub id: Uuid,
    pub color: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// List-view projection of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimplifiedProduct {
    pub id: Uuid,
    pub name: String,
    pub brand_name: String,
    pub brand_logo: String,
    pub seller_id: Option<Uuid>,
    pub seller_name: String,
    pub seller_logo: String,
    /// First product image, or empty
    pub image: String,
    pub price: f64,
    /// Present on the latest listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Present on top-selling listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_count: Option<i64>,
}

/// Another color of the same model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductVariant {
    pub id: Uuid,
    pub color: Option<String>,
    pub image: String,
}

/// Full product view with denormalized seller and brand data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Option<Uuid>,
    pub brand_name: String,
    pub brand_logo: String,
    pub model_name: Option<String>,
    pub images: Vec<String>,
    pub seller_id: Option<Uuid>,
    pub seller_name: String,
    pub seller_logo: String,
    pub color: Option<String>,
    pub sizes: BTreeMap<String, u32>,
    pub price: f64,
    /// Resolved variants; null when the product lists none
    pub color_variants: Option<Vec<ProductVariant>>,
    pub tags: Option<Vec<ProductTag>>,
    pub active: bool,
    pub sales_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Seller projection used by the featured sellers listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SellerListItem {
    pub id: Uuid,
    pub store_name: String,
    pub logo: Option<String>,
    pub preview_image: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row filter shared by product counts and listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub active: Option<bool>,
    /// Tag the product's (non-null) tag list must contain
    pub tag: Option<ProductTag>,
    pub seller_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
}

impl ProductFilter {
    /// Active products only
    pub fn active() -> Self {
        Self {
            active: Some(true),
            ..Self::default()
        }
    }

    pub fn tagged(tag: ProductTag) -> Self {
        Self {
            tag: Some(tag),
            ..Self::default()
        }
    }

    pub fn with_seller(mut self, seller_id: Uuid) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    pub fn with_brand(mut self, brand_id: Uuid) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn matches(&self, row: &ProductRow) -> bool {
        if self.active.is_some_and(|active| row.active != active) {
            return false;
        }
        if let Some(tag) = self.tag {
            match &row.tags {
                Some(tags) if tags.contains(&tag) => {}
                _ => return false,
            }
        }
        if self.seller_id.is_some() && row.seller_id != self.seller_id {
            return false;
        }
        if self.brand_id.is_some() && row.brand_id != self.brand_id {
            return false;
        }
        true
    }
}

/// Single-column orderings used by the listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrder {
    CreatedAtDesc,
    NameAsc,
    SalesCountDesc,
}

impl ProductOrder {
    pub fn column(&self) -> &'static str {
        match self {
            ProductOrder::CreatedAtDesc => "created_at",
            ProductOrder::NameAsc => "name",
            ProductOrder::SalesCountDesc => "sales_count",
        }
    }

    pub fn ascending(&self) -> bool {
        matches!(self, ProductOrder::NameAsc)
    }
}

/// Zero-based row window for a range query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub offset: u64,
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row_json() -> serde_json::Value {
        json!({
            "id": "6f0a1f7e-43a4-4be1-9d71-0c2b9a8c1e11",
            "name": "Air Runner",
            "brand_id": null,
            "model_name": "AR-1",
            "images": ["a.jpg"],
            "seller_id": null,
            "color": "red",
            "sizes": {"42": 3, "43": 0},
            "price": 129.5,
            "color_variants": null,
            "tags": ["TRENDING", "CLEARANCE"],
            "active": true,
            "sales_count": 17,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        })
    }

    #[test]
    fn test_product_row_drops_unknown_tags() {
        let row: ProductRow = serde_json::from_value(row_json()).unwrap();
        assert_eq!(row.tags, Some(vec![ProductTag::Trending]));
        assert_eq!(row.sizes.unwrap()["42"], 3);
        assert!(row.seller.is_none());
    }

    #[test]
    fn test_product_tag_wire_format() {
        assert_eq!(
            serde_json::to_string(&ProductTag::Recommended).unwrap(),
            "\"RECOMMENDED\""
        );
        assert_eq!(ProductTag::Trending.to_string(), "TRENDING");
        assert_eq!("TRENDING".parse::<ProductTag>().unwrap(), ProductTag::Trending);
    }

    #[test]
    fn test_filter_matches() {
        let mut row: ProductRow = serde_json::from_value(row_json()).unwrap();
        assert!(ProductFilter::active().matches(&row));
        assert!(ProductFilter::tagged(ProductTag::Trending).matches(&row));
        assert!(!ProductFilter::tagged(ProductTag::Recommended).matches(&row));

        row.tags = None;
        assert!(!ProductFilter::tagged(ProductTag::Trending).matches(&row));

        let seller = Uuid::new_v4();
        assert!(!ProductFilter::active().with_seller(seller).matches(&row));
        row.seller_id = Some(seller);
        assert!(ProductFilter::active().with_seller(seller).matches(&row));

        row.active = false;
        assert!(!ProductFilter::active().matches(&row));
    }

    #[test]
    fn test_order_columns() {
        assert_eq!(ProductOrder::SalesCountDesc.column(), "sales_count");
        assert!(!ProductOrder::SalesCountDesc.ascending());
        assert!(ProductOrder::NameAsc.ascending());
    }
}
