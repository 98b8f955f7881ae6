use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    UuidPath, ValidatedQuery,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::brand::split_brand_list;
use crate::error::CatalogResult;
use crate::models::{
    ProductDetail, ProductTag, ProductVariant, SellerListItem, SimplifiedProduct,
};
use crate::pagination::{Page, PageParams};
use crate::repository::CatalogRepository;
use crate::service::{CatalogService, TopSelling};

pub const TAG: &str = "catalog";

pub const TAGGED_DEFAULT_LIMIT: u32 = 8;
pub const LATEST_DEFAULT_LIMIT: u32 = 12;
pub const TOP_SELLING_DEFAULT_LIMIT: u32 = 10;
pub const FEATURED_SELLERS_DEFAULT_LIMIT: u32 = 8;

const SUCCESS: &str = "success";

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_product,
        trending_products,
        recommended_products,
        latest_products,
        top_selling_products,
        seller_top_selling,
        featured_sellers,
    ),
    components(
        schemas(
            ProductDetail,
            ProductVariant,
            ProductTag,
            SimplifiedProduct,
            SellerListItem,
            ApiResponse<ProductDetail>,
            PageResponse<SimplifiedProduct>,
            PageResponse<SellerListItem>,
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product and seller catalog")
    )
)]
pub struct ApiDoc;

/// `{"status": "success", "data": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: SUCCESS.to_string(),
            data,
        }
    }
}

/// A page of results with the pagination fields alongside `data`
#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse<T> {
    pub status: String,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            data: page.data,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// Query parameters for the top-selling listing
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopSellingParams {
    /// Page number, starting at 1
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub page: Option<u32>,
    /// Page size, 1 to 50
    #[validate(range(min = 1, max = 50))]
    #[param(minimum = 1, maximum = 50)]
    pub limit: Option<u32>,
    /// Brand ids or names; repeat the key or separate with commas
    #[serde(default)]
    pub brands: Vec<String>,
}

impl TopSellingParams {
    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Create the catalog router with all HTTP endpoints
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/product/{id}", get(get_product))
        .route("/products/trending", get(trending_products))
        .route("/products/recommended", get(recommended_products))
        .route("/products/latest", get(latest_products))
        .route("/products/top-selling", get(top_selling_products))
        .route("/products/{seller_id}/top-selling", get(seller_top_selling))
        .route("/sellers/featured", get(featured_sellers))
        .with_state(shared_service)
}

/// Get a product with seller, brand and color variants
#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductDetail>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ApiResponse<ProductDetail>>> {
    let product = service.get_product(id).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// Products tagged TRENDING, by name
#[utoipa::path(
    get,
    path = "/products/trending",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Trending products", body = PageResponse<SimplifiedProduct>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn trending_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> CatalogResult<Json<PageResponse<SimplifiedProduct>>> {
    let request = params.resolve(TAGGED_DEFAULT_LIMIT)?;
    let page = service
        .products_by_tag(ProductTag::Trending, request)
        .await?;
    Ok(Json(page.into()))
}

/// Products tagged RECOMMENDED, by name
#[utoipa::path(
    get,
    path = "/products/recommended",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Recommended products", body = PageResponse<SimplifiedProduct>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn recommended_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> CatalogResult<Json<PageResponse<SimplifiedProduct>>> {
    let request = params.resolve(TAGGED_DEFAULT_LIMIT)?;
    let page = service
        .products_by_tag(ProductTag::Recommended, request)
        .await?;
    Ok(Json(page.into()))
}

/// Active products, newest first
#[utoipa::path(
    get,
    path = "/products/latest",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Latest products", body = PageResponse<SimplifiedProduct>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn latest_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> CatalogResult<Json<PageResponse<SimplifiedProduct>>> {
    let request = params.resolve(LATEST_DEFAULT_LIMIT)?;
    let page = service.latest_products(request).await?;
    Ok(Json(page.into()))
}

/// Top-selling active products.
///
/// With `brands`, `data` is an object keyed by each brand token, each value
/// a page of that brand's top sellers. Unknown brands map to an empty page.
#[utoipa::path(
    get,
    path = "/products/top-selling",
    tag = TAG,
    params(TopSellingParams),
    responses(
        (status = 200, description = "Top-selling products, overall or grouped by brand", body = PageResponse<SimplifiedProduct>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn top_selling_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedQuery(params): ValidatedQuery<TopSellingParams>,
) -> CatalogResult<Response> {
    let request = params.page_params().resolve(TOP_SELLING_DEFAULT_LIMIT)?;
    let tokens = split_brand_list(&params.brands);

    let response = match service.top_selling_by_brands(&tokens, request).await? {
        TopSelling::All(page) => Json(PageResponse::from(page)).into_response(),
        TopSelling::ByBrand(grouped) => {
            Json(ApiResponse::<BTreeMap<String, Page<SimplifiedProduct>>>::success(grouped))
                .into_response()
        }
    };
    Ok(response)
}

/// Top-selling active products of one seller
#[utoipa::path(
    get,
    path = "/products/{seller_id}/top-selling",
    tag = TAG,
    params(
        ("seller_id" = Uuid, Path, description = "Seller ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "Seller's top-selling products", body = PageResponse<SimplifiedProduct>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seller_top_selling<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    UuidPath(seller_id): UuidPath,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> CatalogResult<Json<PageResponse<SimplifiedProduct>>> {
    let request = params.resolve(TOP_SELLING_DEFAULT_LIMIT)?;
    let page = service.seller_top_selling(seller_id, request).await?;
    Ok(Json(page.into()))
}

/// Sellers by store name
#[utoipa::path(
    get,
    path = "/sellers/featured",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Featured sellers", body = PageResponse<SellerListItem>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn featured_sellers<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> CatalogResult<Json<PageResponse<SellerListItem>>> {
    let request = params.resolve(FEATURED_SELLERS_DEFAULT_LIMIT)?;
    let page = service.featured_sellers(request).await?;
    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_response_envelope() {
        let request = crate::pagination::PageRequest::new(2, 5).unwrap();
        let page = crate::pagination::paginate(request, 7, vec!["x"]);
        let value = serde_json::to_value(PageResponse::from(page)).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "success",
                "data": ["x"],
                "total": 7,
                "page": 2,
                "limit": 5,
                "totalPages": 2
            })
        );
    }

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/product/{id}",
            "/products/trending",
            "/products/recommended",
            "/products/latest",
            "/products/top-selling",
            "/products/{seller_id}/top-selling",
            "/sellers/featured",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
