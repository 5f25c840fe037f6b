use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smilodon_core::{Entity, EntityId};
use smilodon_store::{Patch, Record};

/// Stock level below which a product counts as low-stock on the dashboard.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product record. Price is in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub stock: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Fields supplied by the caller when adding a product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub stock: u32,
    pub active: bool,
}

impl Record for Product {
    type Draft = ProductDraft;

    fn fresh_id() -> ProductId {
        ProductId::new()
    }

    fn hydrate(id: ProductId, created_at: DateTime<Utc>, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            stock: draft.stock,
            active: draft.active,
            created_at,
        }
    }
}

/// Shallow merge into a product. Set fields replace, unset fields keep.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub active: Option<bool>,
}

impl Patch<Product> for ProductPatch {
    fn apply_to(self, record: &mut Product) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(stock) = self.stock {
            record.stock = stock;
        }
        if let Some(active) = self.active {
            record.active = active;
        }
    }
}
