use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::repository::CatalogRepository;

/// Canonical UUID text: 8-4-4-4-12 hex, version 1-5, RFC 4122 variant.
///
/// Versions 6-8 (including v7) do not match and fall through to a name lookup.
static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .unwrap()
});

/// A caller-supplied brand reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandToken {
    ById(Uuid),
    ByName(String),
}

impl BrandToken {
    pub fn parse(token: &str) -> Self {
        if UUID_PATTERN.is_match(token) {
            if let Ok(id) = Uuid::parse_str(token) {
                return BrandToken::ById(id);
            }
        }
        BrandToken::ByName(token.to_string())
    }
}

/// Split `brands` query values on commas, trimming and dropping empties.
///
/// `["nike,adidas", " puma "]` becomes `["nike", "adidas", "puma"]`.
pub fn split_brand_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve a token to a brand id.
///
/// Ids are taken as-is. Names go through a case-insensitive lookup; no match
/// and a failed lookup both surface as [`CatalogError::BrandNotFound`].
pub async fn resolve<R>(repository: &R, token: &BrandToken) -> CatalogResult<Uuid>
where
    R: CatalogRepository + ?Sized,
{
    let name = match token {
        BrandToken::ById(id) => return Ok(*id),
        BrandToken::ByName(name) => name,
    };

    match repository.find_brand_by_name(name).await {
        Ok(Some(brand)) => Ok(brand.id),
        Ok(None) => Err(CatalogError::BrandNotFound(name.clone())),
        Err(e) => {
            warn!(brand = %name, error = %e, "Brand lookup failed");
            Err(CatalogError::BrandNotFound(name.clone()))
        }
    }
}
