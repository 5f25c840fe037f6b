//! Product catalog service.

use smilodon_store::{EntityStore, Subscription};

use crate::product::{Product, ProductDraft, ProductId, ProductPatch};

/// Product catalog.
///
/// Owns the authoritative product store; presentation code consumes the
/// subscription and goes through the mutation methods here.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: EntityStore<Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with existing records (fixtures, tests).
    pub fn with_records(products: Vec<Product>) -> Self {
        Self {
            products: EntityStore::with_records(products),
        }
    }

    /// Live product sequence (replay-latest on subscribe).
    pub fn products(&self) -> Subscription<Vec<Product>> {
        self.products.subscribe()
    }

    pub fn products_snapshot(&self) -> Vec<Product> {
        self.products.snapshot()
    }

    /// One-shot lookup.
    pub fn product_by_id(&self, id: ProductId) -> Option<Product> {
        self.products.find_by_id(id)
    }

    pub fn add_product(&self, draft: ProductDraft) -> Product {
        self.products.insert(draft)
    }

    pub fn update_product(&self, id: ProductId, patch: ProductPatch) {
        self.products.update(id, patch);
    }

    pub fn remove_product(&self, id: ProductId) {
        self.products.remove(id);
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.products.snapshot() {
            if !categories.contains(&product.category) {
                categories.push(product.category);
            }
        }
        categories
    }

    /// Count of products currently below the low-stock threshold.
    pub fn low_stock_count(&self) -> usize {
        self.products
            .snapshot()
            .iter()
            .filter(|p| p.is_low_stock())
            .count()
    }
}
