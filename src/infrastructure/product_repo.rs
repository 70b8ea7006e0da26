use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductDraft};
use crate::schema::products;

use super::models::{ProductFields, ProductRow};

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
        }
    }
}

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn create(&self, draft: ProductDraft) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;

        let id = diesel::insert_into(products::table)
            .values(&ProductFields {
                name: draft.name,
                description: draft.description,
                price: draft.price,
            })
            .returning(products::id)
            .get_result(&mut conn)?;

        Ok(id)
    }

    fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::id.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn update(&self, product: Product) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(products::table.find(product.id))
            .set(&ProductFields {
                name: product.name,
                description: product.description,
                price: product.price,
            })
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(DomainError::NotFound(format!("Product {}", product.id)));
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("Product {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::DieselProductRepository;
    use crate::application::product_service::ProductService;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::ProductRepository;
    use crate::domain::product::ProductDraft;
    use crate::infrastructure::test_support::setup_db;

    fn make_draft(name: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: format!("{name} description"),
            price: BigDecimal::from_str(price).expect("valid decimal"),
        }
    }

    #[tokio::test]
    async fn create_and_find_by_id_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let id = repo
            .create(make_draft("Notebook", "24.90"))
            .expect("create failed");

        let product = repo
            .find_by_id(id)
            .expect("find failed")
            .expect("product should exist");

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Notebook");
        assert_eq!(product.description, "Notebook description");
        assert_eq!(product.price, BigDecimal::from_str("24.90").unwrap());
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let result = repo.find_by_id(999).expect("find should not error");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn find_all_returns_products_in_id_order() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let first = repo.create(make_draft("Pen", "1.50")).expect("create failed");
        let second = repo.create(make_draft("Ink", "7.00")).expect("create failed");

        let all = repo.find_all().expect("find_all failed");
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let id = repo.create(make_draft("Pen", "1.50")).expect("create failed");
        repo.update(make_draft("Fountain pen", "45.00").into_product(id))
            .expect("update failed");

        let product = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(product.name, "Fountain pen");
        assert_eq!(product.price, BigDecimal::from_str("45.00").unwrap());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let update = repo.update(make_draft("Ghost", "1.00").into_product(404));
        assert!(matches!(update, Err(DomainError::NotFound(_))));

        let delete = repo.delete(404);
        assert!(matches!(delete, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);

        let id = repo.create(make_draft("Pen", "1.50")).expect("create failed");
        repo.delete(id).expect("delete failed");

        assert!(repo.find_by_id(id).unwrap().is_none());
    }

    #[tokio::test]
    async fn values_outside_column_limits_are_rejected_before_insert() {
        let (_container, pool) = setup_db().await;
        let svc = ProductService::new(DieselProductRepository::new(pool));

        for draft in [
            make_draft("Sub-cent", "0.005"),
            make_draft("Yacht", "12345678901.00"),
            make_draft(&"x".repeat(300), "1.00"),
        ] {
            assert!(matches!(
                svc.create_product(draft),
                Err(DomainError::InvalidInput(_))
            ));
        }
        assert!(svc.list_products().expect("list failed").is_empty());
    }
}
