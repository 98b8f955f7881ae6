use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::brand::{self, BrandToken};
use crate::dto::{self, Highlight};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    ProductDetail, ProductFilter, ProductOrder, ProductTag, SellerListItem, SimplifiedProduct,
};
use crate::pagination::{paginate, Page, PageRequest};
use crate::repository::CatalogRepository;

/// Top-selling results, either overall or grouped by the caller's brand tokens
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TopSelling {
    All(Page<SimplifiedProduct>),
    ByBrand(BTreeMap<String, Page<SimplifiedProduct>>),
}

/// Service layer for catalog queries
#[derive(Clone)]
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get a product by ID with its color variants expanded
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductDetail> {
        let mut row = self
            .repository
            .get_product(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let color_variants = match row.color_variants.take() {
            None => None,
            Some(ids) if ids.is_empty() => Some(Vec::new()),
            Some(ids) => {
                let variants = self.repository.get_variants(&ids).await?;
                debug!(
                    product_id = %id,
                    requested = ids.len(),
                    found = variants.len(),
                    "Expanded color variants"
                );
                Some(variants.into_iter().map(dto::variant).collect())
            }
        };

        Ok(dto::detail(row, color_variants))
    }

    /// Count and fetch one page of products, then shape the rows
    async fn listing(
        &self,
        filter: ProductFilter,
        order: ProductOrder,
        request: PageRequest,
        highlight: Highlight,
    ) -> CatalogResult<Page<SimplifiedProduct>> {
        let (total, rows) = futures::try_join!(
            self.repository.count_products(&filter),
            self.repository
                .list_products(&filter, order, request.range())
        )?;

        debug!(
            ?filter,
            order = order.column(),
            page = request.page(),
            limit = request.limit(),
            total,
            "Listed products"
        );

        let items = rows
            .into_iter()
            .map(|row| dto::simplified(row, highlight))
            .collect();
        Ok(paginate(request, total, items))
    }

    /// Active products, newest first
    pub async fn latest_products(
        &self,
        request: PageRequest,
    ) -> CatalogResult<Page<SimplifiedProduct>> {
        self.listing(
            ProductFilter::active(),
            ProductOrder::CreatedAtDesc,
            request,
            Highlight::CreatedAt,
        )
        .await
    }

    /// Products carrying `tag`, by name
    pub async fn products_by_tag(
        &self,
        tag: ProductTag,
        request: PageRequest,
    ) -> CatalogResult<Page<SimplifiedProduct>> {
        self.listing(
            ProductFilter::tagged(tag),
            ProductOrder::NameAsc,
            request,
            Highlight::None,
        )
        .await
    }

    /// Active products by sales count
    pub async fn top_selling(
        &self,
        request: PageRequest,
    ) -> CatalogResult<Page<SimplifiedProduct>> {
        self.listing(
            ProductFilter::active(),
            ProductOrder::SalesCountDesc,
            request,
            Highlight::SalesCount,
        )
        .await
    }

    pub async fn seller_top_selling(
        &self,
        seller_id: Uuid,
        request: PageRequest,
    ) -> CatalogResult<Page<SimplifiedProduct>> {
        self.listing(
            ProductFilter::active().with_seller(seller_id),
            ProductOrder::SalesCountDesc,
            request,
            Highlight::SalesCount,
        )
        .await
    }

    /// Top-selling products of one brand. Fails with
    /// [`CatalogError::BrandNotFound`] when a name does not resolve.
    pub async fn brand_top_selling(
        &self,
        token: &BrandToken,
        request: PageRequest,
    ) -> CatalogResult<Page<SimplifiedProduct>> {
        let brand_id = brand::resolve(self.repository.as_ref(), token).await?;
        self.listing(
            ProductFilter::active().with_brand(brand_id),
            ProductOrder::SalesCountDesc,
            request,
            Highlight::SalesCount,
        )
        .await
    }

    /// Top-selling products, grouped per brand token when any are given.
    ///
    /// Every token is queried concurrently and keyed by its original text.
    /// Only name resolution is isolated per brand: an unresolvable or failed
    /// lookup yields an empty page under its key, while a failed count or
    /// listing for any brand fails the whole request.
    pub async fn top_selling_by_brands(
        &self,
        tokens: &[String],
        request: PageRequest,
    ) -> CatalogResult<TopSelling> {
        if tokens.is_empty() {
            return self.top_selling(request).await.map(TopSelling::All);
        }

        let units = tokens.iter().map(|token| async move {
            let page = self
                .brand_top_selling(&BrandToken::parse(token), request)
                .await;
            (token.clone(), page)
        });

        let mut grouped = BTreeMap::new();
        for (token, page) in join_all(units).await {
            let page = match page {
                Ok(page) => page,
                Err(CatalogError::BrandNotFound(name)) => {
                    warn!(brand = %name, "Brand not found, returning empty page");
                    Page::empty(request)
                }
                Err(e) => return Err(e),
            };
            grouped.insert(token, page);
        }

        Ok(TopSelling::ByBrand(grouped))
    }

    /// Sellers by store name
    pub async fn featured_sellers(
        &self,
        request: PageRequest,
    ) -> CatalogResult<Page<SellerListItem>> {
        let (total, sellers) = futures::try_join!(
            self.repository.count_sellers(),
            self.repository.list_sellers(request.range())
        )?;

        debug!(
            page = request.page(),
            limit = request.limit(),
            total,
            "Listed featured sellers"
        );

        Ok(paginate(request, total, sellers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Brand, ProductRow, VariantRow};
    use crate::repository::MockCatalogRepository;
    use chrono::Utc;

    fn row(name: &str) -> ProductRow {
        ProductRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            brand_id: None,
            model_name: None,
            images: Some(vec![format!("{name}.jpg")]),
            seller_id: None,
            color: None,
            sizes: None,
            price: 50.0,
            color_variants: None,
            tags: None,
            active: true,
            sales_count: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            seller: None,
            brand: None,
        }
    }

    fn brand_named(id: Uuid, name: &str) -> Brand {
        Brand {
            id,
            name: name.to_string(),
            logo: None,
            description: None,
            website: None,
            created_at: Utc::now(),
        }
    }

    fn request(page: u32, limit: u32) -> PageRequest {
        PageRequest::new(page, limit).unwrap()
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_get_product().returning(|_| Ok(None));
        repo.expect_get_variants().never();

        let service = CatalogService::new(repo);
        let id = Uuid::new_v4();
        let err = service.get_product(id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_get_product_expands_found_variants() {
        let v1 = Uuid::new_v4();
        let v2 = Uuid::new_v4();
        let mut product = row("runner");
        product.color_variants = Some(vec![v1, v2]);
        let id = product.id;

        let mut repo = MockCatalogRepository::new();
        repo.expect_get_product()
            .returning(move |_| Ok(Some(product.clone())));
        repo.expect_get_variants()
            .withf(move |ids| ids.to_vec() == vec![v1, v2])
            .times(1)
            .returning(move |_| {
                Ok(vec![VariantRow {
                    id: v1,
                    color: Some("red".to_string()),
                    images: Some(vec!["red.jpg".to_string()]),
                }])
            });

        let service = CatalogService::new(repo);
        let detail = service.get_product(id).await.unwrap();
        let variants = detail.color_variants.unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].id, v1);
        assert_eq!(variants[0].image, "red.jpg");
    }

    #[tokio::test]
    async fn test_get_product_without_variants_skips_lookup() {
        let mut none = row("plain");
        none.color_variants = None;
        let mut empty = row("bare");
        empty.color_variants = Some(vec![]);
        let (none_id, empty_id) = (none.id, empty.id);

        let mut repo = MockCatalogRepository::new();
        repo.expect_get_product().returning(move |id| {
            let found = if id == none.id { &none } else { &empty };
            Ok(Some(found.clone()))
        });
        repo.expect_get_variants().never();

        let service = CatalogService::new(repo);
        assert_eq!(service.get_product(none_id).await.unwrap().color_variants, None);
        assert_eq!(
            service.get_product(empty_id).await.unwrap().color_variants,
            Some(vec![])
        );
    }

    #[tokio::test]
    async fn test_latest_products_paginates() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_count_products()
            .withf(|filter| *filter == ProductFilter::active())
            .returning(|_| Ok(3));
        repo.expect_list_products()
            .withf(|_, order, range| {
                *order == ProductOrder::CreatedAtDesc && range.offset == 0 && range.limit == 2
            })
            .returning(|_, _, _| Ok(vec![row("a"), row("b")]));

        let service = CatalogService::new(repo);
        let page = service.latest_products(request(1, 2)).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert!(page.data[0].created_at.is_some());
        assert!(page.data[0].sales_count.is_none());
    }

    #[tokio::test]
    async fn test_count_failure_is_upstream() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_count_products()
            .returning(|_| Err(CatalogError::Upstream("count failed".into())));
        repo.expect_list_products().returning(|_, _, _| Ok(vec![]));

        let service = CatalogService::new(repo);
        let err = service.top_selling(request(1, 10)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_brand_id_token_skips_name_lookup() {
        let brand_id = Uuid::new_v4();
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_brand_by_name().never();
        repo.expect_count_products()
            .withf(move |filter| filter.brand_id == Some(brand_id))
            .returning(|_| Ok(1));
        repo.expect_list_products()
            .returning(|_, _, _| Ok(vec![row("a")]));

        let service = CatalogService::new(repo);
        let page = service
            .brand_top_selling(&BrandToken::ById(brand_id), request(1, 10))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].sales_count, Some(3));
    }

    #[tokio::test]
    async fn test_fan_out_isolates_missing_brand() {
        let a = Uuid::new_v4();
        let c = Uuid::new_v4();

        let mut repo = MockCatalogRepository::new();
        repo.expect_find_brand_by_name().returning(move |name| {
            Ok(match name {
                "A" => Some(brand_named(a, "A")),
                "C" => Some(brand_named(c, "C")),
                _ => None,
            })
        });
        repo.expect_count_products()
            .returning(move |filter| Ok(if filter.brand_id == Some(a) { 2 } else { 1 }));
        repo.expect_list_products()
            .returning(move |filter, _, _| {
                Ok(if filter.brand_id == Some(a) {
                    vec![row("a1"), row("a2")]
                } else {
                    vec![row("c1")]
                })
            });

        let service = CatalogService::new(repo);
        let tokens = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let result = service
            .top_selling_by_brands(&tokens, request(1, 10))
            .await
            .unwrap();

        let TopSelling::ByBrand(grouped) = result else {
            panic!("expected grouped result");
        };
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped["A"].total, 2);
        assert_eq!(grouped["C"].data[0].name, "c1");
        assert_eq!(grouped["B"], Page::empty(request(1, 10)));
    }

    #[tokio::test]
    async fn test_fan_out_propagates_upstream_failure() {
        let a = Uuid::new_v4();
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_brand_by_name()
            .returning(move |name| Ok(Some(brand_named(a, name))));
        repo.expect_count_products()
            .returning(|_| Err(CatalogError::Upstream("connection reset".into())));
        repo.expect_list_products().returning(|_, _, _| Ok(vec![]));

        let service = CatalogService::new(repo);
        let err = service
            .top_selling_by_brands(&["A".to_string()], request(1, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_no_brands_is_overall_top_selling() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_brand_by_name().never();
        repo.expect_count_products()
            .withf(|filter| filter.brand_id.is_none() && filter.active == Some(true))
            .returning(|_| Ok(1));
        repo.expect_list_products()
            .withf(|_, order, _| *order == ProductOrder::SalesCountDesc)
            .returning(|_, _, _| Ok(vec![row("best")]));

        let service = CatalogService::new(repo);
        let result = service
            .top_selling_by_brands(&[], request(1, 10))
            .await
            .unwrap();
        let overall = service.top_selling(request(1, 10)).await.unwrap();

        let TopSelling::All(page) = result else {
            panic!("expected overall result");
        };
        assert_eq!(page.total, overall.total);
        assert_eq!(page.data[0].name, overall.data[0].name);
    }

    #[tokio::test]
    async fn test_featured_sellers() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_count_sellers().returning(|| Ok(0));
        repo.expect_list_sellers().returning(|_| Ok(vec![]));

        let service = CatalogService::new(repo);
        let page = service.featured_sellers(request(2, 8)).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!((page.page, page.limit, page.total_pages), (2, 8, 0));
    }
}
