use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgFunc;
use sea_orm::sea_query::{self, Expr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    entity::{brand, product, seller},
    error::CatalogResult,
    join::Embedded,
    models::{
        Brand, BrandRef, PageRange, ProductFilter, ProductOrder, ProductRow, SellerListItem,
        SellerRef, VariantRow,
    },
    repository::{single_match, CatalogRepository},
};

/// Catalog store over a direct PostgreSQL connection
#[derive(Clone)]
pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach sellers and brands, loaded with one query each
    async fn joined(&self, models: Vec<product::Model>) -> CatalogResult<Vec<ProductRow>> {
        let seller_ids: Vec<Uuid> = models.iter().filter_map(|m| m.seller_id).collect();
        let brand_ids: Vec<Uuid> = models.iter().filter_map(|m| m.brand_id).collect();

        let sellers: HashMap<Uuid, SellerRef> = if seller_ids.is_empty() {
            HashMap::new()
        } else {
            seller::Entity::find()
                .filter(seller::Column::Id.is_in(seller_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| (m.id, SellerRef::from(m)))
                .collect()
        };

        let brands: HashMap<Uuid, BrandRef> = if brand_ids.is_empty() {
            HashMap::new()
        } else {
            brand::Entity::find()
                .filter(brand::Column::Id.is_in(brand_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| (m.id, BrandRef::from(m)))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|model| {
                let mut row = ProductRow::from(model);
                row.seller = row
                    .seller_id
                    .and_then(|id| sellers.get(&id).cloned())
                    .map(Embedded::One);
                row.brand = row
                    .brand_id
                    .and_then(|id| brands.get(&id).cloned())
                    .map(Embedded::One);
                row
            })
            .collect())
    }
}

fn apply_filter(
    mut query: Select<product::Entity>,
    filter: &ProductFilter,
) -> Select<product::Entity> {
    if let Some(active) = filter.active {
        query = query.filter(product::Column::Active.eq(active));
    }

    if let Some(tag) = filter.tag {
        query = query
            .filter(product::Column::Tags.is_not_null())
            .filter(has_tag(tag.to_string()));
    }

    if let Some(seller_id) = filter.seller_id {
        query = query.filter(product::Column::SellerId.eq(seller_id));
    }

    if let Some(brand_id) = filter.brand_id {
        query = query.filter(product::Column::BrandId.eq(brand_id));
    }

    query
}

/// `$1 = ANY("products"."tags")`
fn has_tag(tag: String) -> Expr {
    sea_query::ExprTrait::eq(
        Expr::val(tag),
        PgFunc::any(Expr::col((product::Entity, product::Column::Tags))),
    )
}

fn variants_query(ids: &[Uuid]) -> Select<product::Entity> {
    product::Entity::find().filter(product::Column::Id.is_in(ids.to_vec()))
}

/// Case-insensitive name match, capped at two rows so ambiguity is detectable
fn brand_by_name_query(name: &str) -> Select<brand::Entity> {
    brand::Entity::find()
        .filter(brand::Column::Name.ilike(name))
        .limit(2)
}

fn order_column(order: ProductOrder) -> product::Column {
    match order {
        ProductOrder::CreatedAtDesc => product::Column::CreatedAt,
        ProductOrder::NameAsc => product::Column::Name,
        ProductOrder::SalesCountDesc => product::Column::SalesCount,
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn count_products(&self, filter: &ProductFilter) -> CatalogResult<u64> {
        let total = apply_filter(product::Entity::find(), filter)
            .count(&self.db)
            .await?;
        Ok(total)
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        order: ProductOrder,
        range: PageRange,
    ) -> CatalogResult<Vec<ProductRow>> {
        let direction = if order.ascending() {
            Order::Asc
        } else {
            Order::Desc
        };

        let models = apply_filter(product::Entity::find(), filter)
            .order_by(order_column(order), direction)
            .order_by_asc(product::Column::Id)
            .offset(range.offset)
            .limit(range.limit)
            .all(&self.db)
            .await?;

        self.joined(models).await
    }

    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<ProductRow>> {
        let Some(model) = product::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(self.joined(vec![model]).await?.pop())
    }

    async fn get_variants(&self, ids: &[Uuid]) -> CatalogResult<Vec<VariantRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = variants_query(ids).all(&self.db).await?;
        Ok(models.into_iter().map(VariantRow::from).collect())
    }

    async fn find_brand_by_name(&self, name: &str) -> CatalogResult<Option<Brand>> {
        let models = brand_by_name_query(name).all(&self.db).await?;
        single_match(models.into_iter().map(Brand::from).collect(), name)
    }

    async fn count_sellers(&self) -> CatalogResult<u64> {
        Ok(seller::Entity::find().count(&self.db).await?)
    }

    async fn list_sellers(&self, range: PageRange) -> CatalogResult<Vec<SellerListItem>> {
        let models = seller::Entity::find()
            .order_by_asc(seller::Column::StoreName)
            .order_by_asc(seller::Column::Id)
            .offset(range.offset)
            .limit(range.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(SellerListItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductTag;
    use sea_orm::{DbBackend, QueryTrait, Statement, Value};

    fn statement(filter: &ProductFilter) -> Statement {
        apply_filter(product::Entity::find(), filter).build(DbBackend::Postgres)
    }

    fn values(stmt: &Statement) -> Vec<Value> {
        stmt.values.clone().map(|v| v.0).unwrap_or_default()
    }

    #[test]
    fn test_tag_filter_binds_tag() {
        let stmt = statement(&ProductFilter::tagged(ProductTag::Trending));

        assert!(stmt.sql.contains(r#""tags" IS NOT NULL"#), "{}", stmt.sql);
        assert!(stmt.sql.contains(r#"$1 = ANY("products"."tags")"#), "{}", stmt.sql);
        assert!(!stmt.sql.contains('?'), "{}", stmt.sql);
        assert!(!stmt.sql.contains(r#""active" ="#), "{}", stmt.sql);
        assert_eq!(
            values(&stmt),
            vec![Value::String(Some("TRENDING".to_string()))]
        );
    }

    #[test]
    fn test_tag_filter_renders_inline() {
        let sql = statement(&ProductFilter::tagged(ProductTag::Recommended)).to_string();
        assert!(
            sql.contains(r#"'RECOMMENDED' = ANY("products"."tags")"#),
            "{sql}"
        );
    }

    #[test]
    fn test_seller_filter() {
        let seller_id = Uuid::new_v4();
        let sql = statement(&ProductFilter::active().with_seller(seller_id)).to_string();
        assert!(sql.contains(r#""active" = TRUE"#), "{sql}");
        assert!(sql.contains(&seller_id.to_string()), "{sql}");
    }

    #[test]
    fn test_brand_lookup_binds_name() {
        let stmt = brand_by_name_query("Nike").build(DbBackend::Postgres);

        assert!(stmt.sql.contains(r#""brands"."name" ILIKE $1"#), "{}", stmt.sql);
        assert!(stmt.sql.contains("LIMIT $2"), "{}", stmt.sql);
        assert!(!stmt.sql.contains('?'), "{}", stmt.sql);
        assert_eq!(
            values(&stmt),
            vec![
                Value::String(Some("Nike".to_string())),
                Value::BigUnsigned(Some(2)),
            ]
        );
    }

    #[test]
    fn test_variant_lookup_selects_requested_ids() {
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        let stmt = variants_query(&ids).build(DbBackend::Postgres);

        assert!(stmt.sql.contains(r#""products"."id" IN ($1, $2)"#), "{}", stmt.sql);
        assert_eq!(
            values(&stmt),
            vec![Value::Uuid(Some(ids[0])), Value::Uuid(Some(ids[1]))]
        );
    }
}
