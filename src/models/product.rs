use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{parse_price, PriceError, PRICE_REGEX};

/// A product offered on the listing: the (title, price) pair the cart records
/// when an item is added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub title: String,
    pub price: f64,
}

// request dto
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CatalogEntry {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(regex(
        path = "PRICE_REGEX",
        message = "Price must be a non-negative decimal like 10 or 10.99"
    ))]
    pub price: String,
}

// custom error
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    InvalidPrice(#[from] PriceError),
}

impl Product {
    /// Build a product from a raw catalog entry. The price string is validated
    /// and parsed here; the rest of the program only sees well-formed prices.
    pub fn new(entry: CatalogEntry) -> Result<Self, ProductError> {
        entry.validate().map_err(ProductError::ValidationError)?;

        let price = parse_price(&entry.price)?;

        Ok(Self {
            title: entry.title.trim().to_string(),
            price,
        })
    }

    pub fn from_parts(title: &str, raw_price: &str) -> Result<Self, ProductError> {
        Self::new(CatalogEntry {
            title: title.to_string(),
            price: raw_price.to_string(),
        })
    }
}
