//! Invoicing domain module: invoices, totals derivation, and statistics.

pub mod book;
pub mod invoice;
pub mod stats;

pub use book::{BookConfig, InvoiceBook};
pub use invoice::{
    Invoice, InvoiceDraft, InvoiceId, InvoiceItem, InvoicePatch, InvoiceStatus, NewInvoice,
    Totals, DUE_IN_DAYS, NUMBER_PREFIX, TAX_RATE_BPS,
};
pub use stats::{compute_stats, InvoiceStats};
