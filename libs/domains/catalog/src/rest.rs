use async_trait::async_trait;
use database::rest::{RestClient, RestQuery};
use uuid::Uuid;

use crate::{
    error::CatalogResult,
    models::{
        Brand, PageRange, ProductFilter, ProductOrder, ProductRow, SellerListItem, VariantRow,
    },
    repository::{single_match, CatalogRepository},
};

const PRODUCTS: &str = "products";
const SELLERS: &str = "sellers";
const BRANDS: &str = "brands";

/// Product columns plus the seller and brand embeds
const PRODUCT_SELECT: &str = "*,seller:sellers(id,store_name,logo),brand:brands(id,name,logo)";
const VARIANT_SELECT: &str = "id,color,images";
const SELLER_SELECT: &str = "id,store_name,logo,preview_image,city,state";

/// Catalog store over the hosted database's PostgREST interface
#[derive(Clone)]
pub struct RestCatalogRepository {
    client: RestClient,
}

impl RestCatalogRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn variants_query(&self, ids: &[Uuid]) -> RestQuery<'_> {
        self.client
            .from(PRODUCTS)
            .select(VARIANT_SELECT)
            .in_list("id", ids)
    }

    /// Case-insensitive name match, capped at two rows so ambiguity is detectable
    fn brand_by_name_query(&self, name: &str) -> RestQuery<'_> {
        self.client
            .from(BRANDS)
            .select("*")
            .ilike("name", name)
            .range(0, 2)
    }
}

fn apply_filter<'a>(mut query: RestQuery<'a>, filter: &ProductFilter) -> RestQuery<'a> {
    if let Some(active) = filter.active {
        query = query.eq("active", active);
    }

    if let Some(tag) = filter.tag {
        query = query.contains("tags", [tag]).not_null("tags");
    }

    if let Some(seller_id) = filter.seller_id {
        query = query.eq("seller_id", seller_id);
    }

    if let Some(brand_id) = filter.brand_id {
        query = query.eq("brand_id", brand_id);
    }

    query
}

#[async_trait]
impl CatalogRepository for RestCatalogRepository {
    async fn count_products(&self, filter: &ProductFilter) -> CatalogResult<u64> {
        let query = self.client.from(PRODUCTS).select("id");
        Ok(apply_filter(query, filter).count().await?)
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        order: ProductOrder,
        range: PageRange,
    ) -> CatalogResult<Vec<ProductRow>> {
        let query = self.client.from(PRODUCTS).select(PRODUCT_SELECT);
        let rows = apply_filter(query, filter)
            .order(order.column(), order.ascending())
            .range(range.offset, range.limit)
            .fetch()
            .await?;
        Ok(rows)
    }

    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<ProductRow>> {
        let mut rows: Vec<ProductRow> = self
            .client
            .from(PRODUCTS)
            .select(PRODUCT_SELECT)
            .eq("id", id)
            .range(0, 1)
            .fetch()
            .await?;
        Ok(rows.pop())
    }

    async fn get_variants(&self, ids: &[Uuid]) -> CatalogResult<Vec<VariantRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.variants_query(ids).fetch().await?)
    }

    async fn find_brand_by_name(&self, name: &str) -> CatalogResult<Option<Brand>> {
        let brands = self.brand_by_name_query(name).fetch().await?;
        single_match(brands, name)
    }

    async fn count_sellers(&self) -> CatalogResult<u64> {
        Ok(self.client.from(SELLERS).select("id").count().await?)
    }

    async fn list_sellers(&self, range: PageRange) -> CatalogResult<Vec<SellerListItem>> {
        let sellers = self
            .client
            .from(SELLERS)
            .select(SELLER_SELECT)
            .order("store_name", true)
            .range(range.offset, range.limit)
            .fetch()
            .await?;
        Ok(sellers)
    }
}
