use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Read-only product and seller catalog"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
struct BaseDoc;

/// Service documentation: the base document plus every domain's paths
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_catalog::handlers::ApiDoc::openapi());
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_paths_are_merged() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Catalog API");
        assert!(doc.paths.paths.contains_key("/products/latest"));
        assert!(doc.paths.paths.contains_key("/sellers/featured"));
    }
}
