use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::product::{CatalogEntry, Product, ProductError};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid catalog entry '{title}': {source}")]
    InvalidEntry {
        title: String,
        #[source]
        source: ProductError,
    },

    #[error("Duplicate product title '{title}' in catalog")]
    DuplicateTitle { title: String },
}

// Built-in listing used when no catalog file is configured, price as raw text
const DEFAULT_CATALOG: &[(&str, &str)] = &[
    ("Wireless Headphones", "59.99"),
    ("Mechanical Keyboard", "89.50"),
    ("USB-C Charging Cable", "12.00"),
    ("Laptop Stand", "34.90"),
    ("Webcam HD 1080p", "49.99"),
    ("Portable SSD 1TB", "109.00"),
];

/// The product listing: the source of every (title, price) pair the cart can
/// reference. Entries carry their price as a raw string and are validated once
/// at load; past this point the program only sees well-formed products.
pub struct CatalogService {
    products: Vec<Product>,
}

impl CatalogService {
    /// Built-in product listing.
    pub fn with_defaults() -> Result<Self, CatalogError> {
        let entries = DEFAULT_CATALOG
            .iter()
            .map(|(title, price)| CatalogEntry {
                title: (*title).to_string(),
                price: (*price).to_string(),
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Load the listing from a JSON catalog file: an array of
    /// `{ "title": ..., "price": "<decimal>" }` entries.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        info!("Loading catalog from {}", path.display());

        let raw = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let entries: Vec<CatalogEntry> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;

        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut products: Vec<Product> = Vec::with_capacity(entries.len());

        for entry in entries {
            let title = entry.title.clone();
            let product = Product::new(entry).map_err(|e| CatalogError::InvalidEntry {
                title: title.clone(),
                source: e,
            })?;

            if products.iter().any(|p| p.title == product.title) {
                return Err(CatalogError::DuplicateTitle {
                    title: product.title,
                });
            }
            products.push(product);
        }

        debug!("Catalog loaded with {} products", products.len());
        Ok(Self { products })
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, title: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.title == title)
    }

    /// Case-insensitive substring search over product titles.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        self.products
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&term))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_loads() {
        let catalog = CatalogService::with_defaults().unwrap();

        assert!(!catalog.is_empty());
        assert!(catalog.products().iter().all(|p| p.price >= 0.0));
    }

    #[test]
    fn test_find_is_exact_match() {
        let catalog = CatalogService::with_defaults().unwrap();

        assert!(catalog.find("Laptop Stand").is_some());
        assert!(catalog.find("laptop stand").is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = CatalogService::with_defaults().unwrap();

        let results = catalog.search("LAPTOP");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Laptop Stand");

        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("does-not-exist").is_empty());
    }

    #[test]
    fn test_duplicate_title_is_rejected() {
        let entries = vec![
            CatalogEntry {
                title: "Widget".to_string(),
                price: "10.00".to_string(),
            },
            CatalogEntry {
                title: "Widget".to_string(),
                price: "12.00".to_string(),
            },
        ];

        let result = CatalogService::from_entries(entries);
        assert!(matches!(result, Err(CatalogError::DuplicateTitle { .. })));
    }
}
