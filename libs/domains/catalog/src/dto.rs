//! Row to DTO conversion with fallbacks for missing joins.

use uuid::Uuid;

use crate::join::normalize;
use crate::models::{
    BrandRef, ProductDetail, ProductRow, ProductVariant, SellerRef, SimplifiedProduct, VariantRow,
};

pub const UNKNOWN_SELLER: &str = "Unknown Seller";
pub const UNKNOWN_BRAND: &str = "Unknown Brand";

/// Which optional field a listing exposes on its items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    CreatedAt,
    SalesCount,
}

/// First image of the list, or an empty string.
pub fn representative_image(images: Option<&[String]>) -> String {
    images
        .and_then(|images| images.first())
        .cloned()
        .unwrap_or_default()
}

struct SellerParts {
    id: Option<Uuid>,
    name: String,
    logo: String,
}

struct BrandParts {
    id: Option<Uuid>,
    name: String,
    logo: String,
}

fn seller_parts(seller: Option<SellerRef>, seller_id: Option<Uuid>) -> SellerParts {
    match seller {
        Some(seller) => SellerParts {
            id: Some(seller.id),
            name: seller
                .store_name
                .unwrap_or_else(|| UNKNOWN_SELLER.to_string()),
            logo: seller.logo.unwrap_or_default(),
        },
        None => SellerParts {
            id: seller_id,
            name: UNKNOWN_SELLER.to_string(),
            logo: String::new(),
        },
    }
}

fn brand_parts(brand: Option<BrandRef>, brand_id: Option<Uuid>) -> BrandParts {
    match brand {
        Some(brand) => BrandParts {
            id: Some(brand.id),
            name: brand.name.unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
            logo: brand.logo.unwrap_or_default(),
        },
        None => BrandParts {
            id: brand_id,
            name: UNKNOWN_BRAND.to_string(),
            logo: String::new(),
        },
    }
}

pub fn simplified(row: ProductRow, highlight: Highlight) -> SimplifiedProduct {
    let seller = seller_parts(normalize(row.seller), row.seller_id);
    let brand = brand_parts(normalize(row.brand), row.brand_id);

    SimplifiedProduct {
        id: row.id,
        name: row.name,
        brand_name: brand.name,
        brand_logo: brand.logo,
        seller_id: seller.id,
        seller_name: seller.name,
        seller_logo: seller.logo,
        image: representative_image(row.images.as_deref()),
        price: row.price,
        created_at: (highlight == Highlight::CreatedAt).then_some(row.created_at),
        sales_count: (highlight == Highlight::SalesCount).then_some(row.sales_count),
    }
}

pub fn detail(row: ProductRow, color_variants: Option<Vec<ProductVariant>>) -> ProductDetail {
    let seller = seller_parts(normalize(row.seller), row.seller_id);
    let brand = brand_parts(normalize(row.brand), row.brand_id);

    ProductDetail {
        id: row.id,
        name: row.name,
        brand_id: brand.id,
        brand_name: brand.name,
        brand_logo: brand.logo,
        model_name: row.model_name,
        images: row.images.unwrap_or_default(),
        seller_id: seller.id,
        seller_name: seller.name,
        seller_logo: seller.logo,
        color: row.color,
        sizes: row.sizes.unwrap_or_default(),
        price: row.price,
        color_variants,
        tags: row.tags,
        active: row.active,
        sales_count: row.sales_count,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub fn variant(row: VariantRow) -> ProductVariant {
    ProductVariant {
        id: row.id,
        image: representative_image(row.images.as_deref()),
        color: row.color,
    }
}
