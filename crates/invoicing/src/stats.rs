//! Read-only aggregates derived from the invoice collection.

use serde::{Deserialize, Serialize};

use crate::invoice::{Invoice, InvoiceStatus};

/// Derived invoice statistics. Never persisted; recomputed on each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceStats {
    pub total_invoices: usize,
    /// Sum of totals of paid invoices only (minor units).
    pub total_revenue: u64,
    pub paid_invoices: usize,
    /// Invoices currently in `sent`.
    pub pending_invoices: usize,
    pub overdue_invoices: usize,
}

/// Pure single-pass fold over a snapshot.
///
/// The source collection is bounded by fixture-sized data; a production
/// reimplementation over large stores should memoize on a store version
/// instead of rescanning per observer tick.
pub fn compute_stats(invoices: &[Invoice]) -> InvoiceStats {
    let mut stats = InvoiceStats {
        total_invoices: invoices.len(),
        ..InvoiceStats::default()
    };

    for invoice in invoices {
        match invoice.status {
            InvoiceStatus::Paid => {
                stats.paid_invoices += 1;
                stats.total_revenue += invoice.total;
            }
            InvoiceStatus::Sent => stats.pending_invoices += 1,
            InvoiceStatus::Overdue => stats.overdue_invoices += 1,
            InvoiceStatus::Draft => {}
        }
    }

    stats
}
