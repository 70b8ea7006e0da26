use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductDraft};

pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_product(&self, draft: ProductDraft) -> Result<i64, DomainError> {
        let draft = draft.validate()?;
        let id = self.repo.create(draft)?;
        log::info!("Created product {}", id);
        Ok(id)
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.find_all()
    }

    pub fn get_product(&self, id: i64) -> Result<Product, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Product {id}")))
    }

    pub fn update_product(&self, id: i64, draft: ProductDraft) -> Result<(), DomainError> {
        let draft = draft.validate()?;
        self.repo.update(draft.into_product(id))
    }

    pub fn delete_product(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::infrastructure::memory::InMemoryProductRepository;

    fn service() -> ProductService<InMemoryProductRepository> {
        ProductService::new(InMemoryProductRepository::default())
    }

    fn draft(name: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: String::new(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
        }
    }

    #[test]
    fn create_then_get() {
        let svc = service();
        let id = svc.create_product(draft("Coffee", "18.90")).unwrap();
        let product = svc.get_product(id).unwrap();
        assert_eq!(product.name, "Coffee");
        assert_eq!(product.price, BigDecimal::from_str("18.90").unwrap());
    }

    #[test]
    fn create_rejects_invalid_draft_before_touching_store() {
        let svc = service();
        assert!(matches!(
            svc.create_product(draft("", "1.00")),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(svc.list_products().unwrap().is_empty());
    }

    #[test]
    fn get_missing_product_is_not_found() {
        assert!(matches!(
            service().get_product(42),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn update_replaces_fields() {
        let svc = service();
        let id = svc.create_product(draft("Tea", "5.00")).unwrap();
        svc.update_product(id, draft("Green tea", "6.50")).unwrap();
        let product = svc.get_product(id).unwrap();
        assert_eq!(product.name, "Green tea");
        assert_eq!(product.price, BigDecimal::from_str("6.50").unwrap());
    }

    #[test]
    fn update_rejects_negative_price() {
        let svc = service();
        let id = svc.create_product(draft("Tea", "5.00")).unwrap();
        assert!(matches!(
            svc.update_product(id, draft("Tea", "-5.00")),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn update_and_delete_missing_product_are_not_found() {
        let svc = service();
        assert!(matches!(
            svc.update_product(9, draft("Tea", "1.00")),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(svc.delete_product(9), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn delete_removes_product() {
        let svc = service();
        let id = svc.create_product(draft("Tea", "5.00")).unwrap();
        svc.delete_product(id).unwrap();
        assert!(svc.list_products().unwrap().is_empty());
    }
}
