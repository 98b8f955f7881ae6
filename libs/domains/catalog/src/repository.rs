use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::join::Embedded;
use crate::models::{
    Brand, BrandRef, PageRange, ProductFilter, ProductOrder, ProductRow, SellerListItem,
    SellerRef, VariantRow,
};

/// Read access to the catalog store.
///
/// "No rows" is `Ok(None)` or an empty vec. Store failures are
/// [`CatalogError::Upstream`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Count products matching `filter`
    async fn count_products(&self, filter: &ProductFilter) -> CatalogResult<u64>;

    /// One ordered window of products matching `filter`, with seller and brand joined
    async fn list_products(
        &self,
        filter: &ProductFilter,
        order: ProductOrder,
        range: PageRange,
    ) -> CatalogResult<Vec<ProductRow>>;

    /// Get a product by ID, with seller and brand joined
    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<ProductRow>>;

    /// Batch lookup of variant columns; unknown ids are omitted
    async fn get_variants(&self, ids: &[Uuid]) -> CatalogResult<Vec<VariantRow>>;

    /// Case-insensitive brand name lookup expecting at most one match
    async fn find_brand_by_name(&self, name: &str) -> CatalogResult<Option<Brand>>;

    async fn count_sellers(&self) -> CatalogResult<u64>;

    /// Sellers ordered by store name
    async fn list_sellers(&self, range: PageRange) -> CatalogResult<Vec<SellerListItem>>;
}

/// Collapse a name lookup that fetched up to two rows.
pub(crate) fn single_match(mut brands: Vec<Brand>, name: &str) -> CatalogResult<Option<Brand>> {
    match brands.len() {
        0 | 1 => Ok(brands.pop()),
        _ => Err(CatalogError::Validation(format!(
            "brand name '{}' matches more than one brand",
            name
        ))),
    }
}

/// In-memory implementation of CatalogRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogRepository {
    products: Arc<RwLock<HashMap<Uuid, ProductRow>>>,
    sellers: Arc<RwLock<HashMap<Uuid, SellerListItem>>>,
    brands: Arc<RwLock<HashMap<Uuid, Brand>>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_product(&self, product: ProductRow) {
        self.products.write().await.insert(product.id, product);
    }

    pub async fn insert_seller(&self, seller: SellerListItem) {
        self.sellers.write().await.insert(seller.id, seller);
    }

    pub async fn insert_brand(&self, brand: Brand) {
        self.brands.write().await.insert(brand.id, brand);
    }

    /// Embed the stored seller and brand, the way the store joins them
    async fn joined(&self, mut row: ProductRow) -> ProductRow {
        if let Some(seller_id) = row.seller_id {
            if let Some(seller) = self.sellers.read().await.get(&seller_id) {
                row.seller = Some(Embedded::One(SellerRef {
                    id: seller.id,
                    store_name: Some(seller.store_name.clone()),
                    logo: seller.logo.clone(),
                }));
            }
        }
        if let Some(brand_id) = row.brand_id {
            if let Some(brand) = self.brands.read().await.get(&brand_id) {
                row.brand = Some(Embedded::One(BrandRef {
                    id: brand.id,
                    name: Some(brand.name.clone()),
                    logo: brand.logo.clone(),
                }));
            }
        }
        row
    }
}

fn compare(order: ProductOrder, a: &ProductRow, b: &ProductRow) -> Ordering {
    let primary = match order {
        ProductOrder::CreatedAtDesc => b.created_at.cmp(&a.created_at),
        ProductOrder::NameAsc => a.name.cmp(&b.name),
        ProductOrder::SalesCountDesc => b.sales_count.cmp(&a.sales_count),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

fn window<T>(items: Vec<T>, range: PageRange) -> Vec<T> {
    items
        .into_iter()
        .skip(range.offset as usize)
        .take(range.limit as usize)
        .collect()
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn count_products(&self, filter: &ProductFilter) -> CatalogResult<u64> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        order: ProductOrder,
        range: PageRange,
    ) -> CatalogResult<Vec<ProductRow>> {
        let mut matching: Vec<ProductRow> = {
            let products = self.products.read().await;
            products
                .values()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect()
        };
        matching.sort_by(|a, b| compare(order, a, b));

        let mut result = Vec::new();
        for row in window(matching, range) {
            result.push(self.joined(row).await);
        }
        Ok(result)
    }

    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<ProductRow>> {
        let row = self.products.read().await.get(&id).cloned();
        match row {
            Some(row) => Ok(Some(self.joined(row).await)),
            None => Ok(None),
        }
    }

    async fn get_variants(&self, ids: &[Uuid]) -> CatalogResult<Vec<VariantRow>> {
        let products = self.products.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| products.get(id))
            .map(|p| VariantRow {
                id: p.id,
                color: p.color.clone(),
                images: p.images.clone(),
            })
            .collect())
    }

    async fn find_brand_by_name(&self, name: &str) -> CatalogResult<Option<Brand>> {
        let brands = self.brands.read().await;
        let matching: Vec<Brand> = brands
            .values()
            .filter(|b| b.name.eq_ignore_ascii_case(name))
            .take(2)
            .cloned()
            .collect();
        single_match(matching, name)
    }

    async fn count_sellers(&self) -> CatalogResult<u64> {
        Ok(self.sellers.read().await.len() as u64)
    }

    async fn list_sellers(&self, range: PageRange) -> CatalogResult<Vec<SellerListItem>> {
        let mut sellers: Vec<SellerListItem> =
            self.sellers.read().await.values().cloned().collect();
        sellers.sort_by(|a, b| a.store_name.cmp(&b.store_name).then_with(|| a.id.cmp(&b.id)));
        Ok(window(sellers, range))
    }
}
