use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::product::Product;
use crate::utils::validation::round_money;

/// One cart entry aggregating a product's price and quantity.
///
/// Invariant: quantity >= 1 always. A line that would reach 0 is never stored;
/// decrement is clamped at 1 and destruction only happens via `remove_item`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub title: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        round_money(self.unit_price * self.quantity as f64)
    }
}

/// Row projected out of the cart for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSummary {
    pub title: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
}

// Aggregate snapshot DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct CartStatistics {
    pub distinct_items: usize,
    pub total_quantity: u32,
    pub grand_total: f64,
}

/// In-memory cart store: an ordered collection of line items keyed by product
/// title, at most one line per distinct title.
///
/// Constructed per session and owned by exactly one caller; the view layer
/// reads it through a shared reference and never mutates it directly. Lookups
/// are linear scans over a short list.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    started_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Add one unit. A title already in the cart gets its quantity bumped; the
    /// unit price recorded on first add is kept.
    pub fn add_item(&mut self, title: &str, unit_price: f64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.title == title) {
            item.quantity += 1;
        } else {
            self.items.push(LineItem {
                title: title.to_string(),
                unit_price,
                quantity: 1,
                added_at: Utc::now(),
            });
        }
    }

    pub fn add_product(&mut self, product: &Product) {
        self.add_item(&product.title, product.price);
    }

    /// Remove the line matching `title`. Returns false when no such line
    /// exists (the call is a no-op then).
    pub fn remove_item(&mut self, title: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.title != title);
        self.items.len() != before
    }

    /// Returns false when the title is not in the cart.
    pub fn increment_quantity(&mut self, title: &str) -> bool {
        match self.items.iter_mut().find(|item| item.title == title) {
            Some(item) => {
                item.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Decrement, clamped at 1: a line at quantity 1 stays at quantity 1.
    /// Returns false when the title is not in the cart.
    pub fn decrement_quantity(&mut self, title: &str) -> bool {
        match self.items.iter_mut().find(|item| item.title == title) {
            Some(item) => {
                if item.quantity > 1 {
                    item.quantity -= 1;
                }
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.items.iter().any(|item| item.title == title)
    }

    pub fn get(&self, title: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.title == title)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities; 0 for an empty cart.
    pub fn total_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Grand total: sum of unit price x quantity over all lines, rounded to
    /// two decimal places.
    pub fn total_price(&self) -> f64 {
        let total: f64 = self
            .items
            .iter()
            .map(|item| item.unit_price * item.quantity as f64)
            .sum();
        round_money(total)
    }

    /// Lazy projection of the cart in insertion order, for the presentation
    /// layer to pair with `total_price()`. Restartable: each call walks the
    /// current state from the beginning.
    pub fn lines(&self) -> impl Iterator<Item = LineSummary> + '_ {
        self.items.iter().map(|item| LineSummary {
            title: item.title.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total(),
        })
    }

    pub fn statistics(&self) -> CartStatistics {
        CartStatistics {
            distinct_items: self.items.len(),
            total_quantity: self.total_count(),
            grand_total: self.total_price(),
        }
    }
}
