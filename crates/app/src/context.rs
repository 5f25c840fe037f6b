//! The application context: explicitly constructed services, no globals.

use smilodon_clients::ClientLedger;
use smilodon_invoicing::{InvoiceBook, InvoiceStats};
use smilodon_products::ProductCatalog;
use smilodon_users::UserDirectory;

use crate::fixtures::demo_data;

/// Composition root owning one instance of every service.
///
/// Built once at startup (or per test) and passed down; stores live exactly
/// as long as the context does.
#[derive(Debug)]
pub struct AppContext {
    pub clients: ClientLedger,
    pub products: ProductCatalog,
    pub invoices: InvoiceBook,
    pub users: UserDirectory,
}

impl AppContext {
    /// Empty context.
    pub fn new() -> Self {
        Self {
            clients: ClientLedger::new(),
            products: ProductCatalog::new(),
            invoices: InvoiceBook::new(),
            users: UserDirectory::new(),
        }
    }

    /// Context seeded with the demo dataset.
    pub fn seeded() -> Self {
        let data = demo_data();
        Self {
            clients: ClientLedger::with_records(data.clients, data.transactions),
            products: ProductCatalog::with_records(data.products),
            invoices: InvoiceBook::with_records(data.invoices),
            users: UserDirectory::with_records(data.users),
        }
    }

    /// Cross-service dashboard summary, recomputed on every call.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            total_clients: self.clients.clients_snapshot().len(),
            total_products: self.products.products_snapshot().len(),
            low_stock_products: self.products.low_stock_count(),
            invoices: self.invoices.stats(),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Headline numbers for the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dashboard {
    pub total_clients: usize,
    pub total_products: usize,
    /// Products with stock below the low-stock threshold.
    pub low_stock_products: usize,
    pub invoices: InvoiceStats,
}
