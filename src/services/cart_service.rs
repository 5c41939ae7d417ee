use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    models::{
        cart::{Cart, CartStatistics, LineSummary},
        product::Product,
    },
    utils::validation::{parse_price, PriceError},
};

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Item '{title}' is not in the cart")]
    ItemNotFound { title: String },

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// Session-scoped cart operations.
///
/// Owns the cart store for one browsing session, validates input at the
/// boundary and logs every mutation. The view layer only ever goes through
/// here and reads state back via `cart()`.
pub struct CartService {
    cart: Cart,
}

impl Default for CartService {
    fn default() -> Self {
        Self::new()
    }
}

impl CartService {
    pub fn new() -> Self {
        Self { cart: Cart::new() }
    }

    /// Add one unit of an already-validated catalog product.
    pub fn add_product(&mut self, product: &Product) {
        info!(
            "Adding '{}' to cart at {:.2}",
            product.title, product.price
        );
        self.cart.add_product(product);
        debug!("Cart now holds {} items", self.cart.total_count());
    }

    /// Add one unit from raw parts. The price arrives as a raw decimal string
    /// and is rejected here when malformed.
    pub fn add_item(&mut self, title: &str, raw_price: &str) -> Result<(), CartServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CartServiceError::ValidationError {
                message: "Title must not be empty".to_string(),
            });
        }

        let price = parse_price(raw_price.trim())?;

        info!("Adding '{}' to cart at {:.2}", title, price);
        self.cart.add_item(title, price);
        debug!("Cart now holds {} items", self.cart.total_count());
        Ok(())
    }

    pub fn remove_item(&mut self, title: &str) -> Result<(), CartServiceError> {
        if self.cart.remove_item(title) {
            info!("Removed '{}' from cart", title);
            Ok(())
        } else {
            warn!("Tried to remove '{}' which is not in the cart", title);
            Err(CartServiceError::ItemNotFound {
                title: title.to_string(),
            })
        }
    }

    /// Returns the quantity after the increment.
    pub fn increment_quantity(&mut self, title: &str) -> Result<u32, CartServiceError> {
        if self.cart.increment_quantity(title) {
            let quantity = self.quantity_of(title);
            debug!("Incremented '{}' to quantity {}", title, quantity);
            Ok(quantity)
        } else {
            warn!("Tried to increment '{}' which is not in the cart", title);
            Err(CartServiceError::ItemNotFound {
                title: title.to_string(),
            })
        }
    }

    /// Returns the quantity after the decrement. A line already at quantity 1
    /// stays at 1; removal requires an explicit `remove_item`.
    pub fn decrement_quantity(&mut self, title: &str) -> Result<u32, CartServiceError> {
        if self.cart.decrement_quantity(title) {
            let quantity = self.quantity_of(title);
            debug!("Decremented '{}' to quantity {}", title, quantity);
            Ok(quantity)
        } else {
            warn!("Tried to decrement '{}' which is not in the cart", title);
            Err(CartServiceError::ItemNotFound {
                title: title.to_string(),
            })
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> impl Iterator<Item = LineSummary> + '_ {
        self.cart.lines()
    }

    pub fn statistics(&self) -> CartStatistics {
        self.cart.statistics()
    }

    fn quantity_of(&self, title: &str) -> u32 {
        self.cart.get(title).map(|item| item.quantity).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_adds_accumulate_quantity() {
        let mut service = CartService::new();

        for _ in 0..4 {
            service.add_item("Widget", "10.00").unwrap();
        }

        let item = service.cart().get("Widget").unwrap();
        assert_eq!(item.quantity, 4);
        assert_eq!(service.cart().len(), 1);
    }

    #[test]
    fn test_duplicate_add_keeps_first_price() {
        let mut service = CartService::new();

        service.add_item("Widget", "10.00").unwrap();
        service.add_item("Widget", "99.99").unwrap();

        let item = service.cart().get("Widget").unwrap();
        assert_eq!(item.unit_price, 10.0);
        assert_eq!(item.quantity, 2);
        assert_eq!(service.cart().total_price(), 20.0);
    }

    #[test]
    fn test_widget_scenario() {
        let mut service = CartService::new();

        service.add_item("Widget", "10.00").unwrap();
        service.add_item("Widget", "10.00").unwrap();

        assert_eq!(service.cart().get("Widget").unwrap().quantity, 2);
        assert_eq!(service.cart().total_price(), 20.0);
        assert_eq!(service.cart().total_count(), 2);
    }

    #[test]
    fn test_remove_excludes_item_from_totals() {
        let mut service = CartService::new();

        service.add_item("A", "5.00").unwrap();
        service.add_item("B", "3.50").unwrap();
        service.remove_item("A").unwrap();

        assert!(!service.cart().contains("A"));
        assert!(service.cart().contains("B"));
        assert_eq!(service.cart().total_price(), 3.5);
        assert_eq!(service.cart().total_count(), 1);
    }

    #[test]
    fn test_decrement_is_clamped_at_one() {
        let mut service = CartService::new();

        service.add_item("X", "1.00").unwrap();
        let quantity = service.decrement_quantity("X").unwrap();

        assert_eq!(quantity, 1);
        assert_eq!(service.cart().get("X").unwrap().quantity, 1);
    }

    #[test]
    fn test_increment_then_decrement() {
        let mut service = CartService::new();

        service.add_item("X", "2.00").unwrap();
        assert_eq!(service.increment_quantity("X").unwrap(), 2);
        assert_eq!(service.increment_quantity("X").unwrap(), 3);
        assert_eq!(service.decrement_quantity("X").unwrap(), 2);
        assert_eq!(service.cart().total_count(), 2);
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let mut service = CartService::new();

        for raw in ["abc", "-1", "1.234", "", "1,5"] {
            let result = service.add_item("Widget", raw);
            assert!(
                matches!(result, Err(CartServiceError::InvalidPrice(_))),
                "expected '{}' to be rejected",
                raw
            );
        }
        assert!(service.cart().is_empty());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let mut service = CartService::new();

        let result = service.add_item("   ", "10.00");
        assert!(matches!(
            result,
            Err(CartServiceError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_unknown_title_operations_fail() {
        let mut service = CartService::new();
        service.add_item("Widget", "10.00").unwrap();

        assert!(matches!(
            service.remove_item("Gadget"),
            Err(CartServiceError::ItemNotFound { .. })
        ));
        assert!(matches!(
            service.increment_quantity("Gadget"),
            Err(CartServiceError::ItemNotFound { .. })
        ));
        assert!(matches!(
            service.decrement_quantity("Gadget"),
            Err(CartServiceError::ItemNotFound { .. })
        ));

        // the cart itself is untouched
        assert_eq!(service.cart().total_count(), 1);
    }

    #[test]
    fn test_empty_cart_totals() {
        let service = CartService::new();

        assert_eq!(service.cart().total_count(), 0);
        assert_eq!(service.cart().total_price(), 0.0);
        assert_eq!(service.lines().count(), 0);
    }

    #[test]
    fn test_statistics_snapshot() {
        let mut service = CartService::new();

        service.add_item("A", "5.00").unwrap();
        service.add_item("A", "5.00").unwrap();
        service.add_item("B", "3.50").unwrap();

        let stats = service.statistics();
        assert_eq!(stats.distinct_items, 2);
        assert_eq!(stats.total_quantity, 3);
        assert_eq!(stats.grand_total, 13.5);
    }
}
