use crate::domain::cancel::CancelFlag;
use crate::domain::checkout::{CheckoutRequest, Order};
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::pricing::compute_total;

/// Prices a checkout against the current product catalogue.
pub struct CheckoutService<R> {
    products: R,
}

impl<R: ProductRepository> CheckoutService<R> {
    pub fn new(products: R) -> Self {
        Self { products }
    }

    /// Resolve every product id in request order, price the order and
    /// assemble the result.
    ///
    /// Aborts on the first id the store cannot resolve; no partial order is
    /// ever priced.
    ///
    /// `cancel` is only checked before and after each `find_by_id`; a lookup
    /// already in flight runs to completion. Its outcome is then discarded in
    /// favour of `Cancelled` and no further lookup starts.
    pub fn process_order(
        &self,
        request: CheckoutRequest,
        cancel: &CancelFlag,
    ) -> Result<Order, DomainError> {
        if request.product_ids.is_empty() {
            return Err(DomainError::EmptyOrder);
        }
        request.customer.validate()?;

        let mut prices = Vec::with_capacity(request.product_ids.len());
        for &id in &request.product_ids {
            if cancel.is_cancelled() {
                return Err(DomainError::Cancelled);
            }
            let found = self.products.find_by_id(id);
            if cancel.is_cancelled() {
                return Err(DomainError::Cancelled);
            }
            match found? {
                Some(product) => prices.push(product.price),
                None => return Err(DomainError::ProductNotFound(id)),
            }
        }

        let total = compute_total(&prices, request.payment_method)?;
        log::debug!(
            "Priced checkout of {} item(s) via {:?}: {}",
            prices.len(),
            request.payment_method,
            total
        );

        Ok(Order {
            id: None,
            total,
            payment_method: request.payment_method,
            customer: request.customer,
        })
    }
}
