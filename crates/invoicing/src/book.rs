//! Invoice book service: creation, numbering, lifecycle, stats.

use chrono::Utc;
use smilodon_core::{DomainError, DomainResult};
use smilodon_store::{EntityStore, Subscription};

use crate::invoice::{
    Invoice, InvoiceDraft, InvoiceId, InvoiceItem, InvoicePatch, ItemsPatch, NewInvoice,
    PaidPatch, Totals, NUMBER_PREFIX, TAX_RATE_BPS,
};
use crate::stats::{compute_stats, InvoiceStats};

/// Invoice numbering + tax configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    pub number_prefix: String,
    pub tax_rate_bps: u32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            number_prefix: NUMBER_PREFIX.to_string(),
            tax_rate_bps: TAX_RATE_BPS,
        }
    }
}

/// Invoice book.
///
/// Owns the authoritative invoice store; presentation code consumes the
/// subscription and goes through the mutation methods here.
#[derive(Debug)]
pub struct InvoiceBook {
    invoices: EntityStore<Invoice>,
    config: BookConfig,
}

impl InvoiceBook {
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    pub fn with_config(config: BookConfig) -> Self {
        Self {
            invoices: EntityStore::new(),
            config,
        }
    }

    /// Book seeded with existing records (fixtures, tests). Display numbers
    /// for later invoices continue from the seeded count.
    pub fn with_records(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices: EntityStore::with_records(invoices),
            config: BookConfig::default(),
        }
    }

    /// Live invoice sequence (replay-latest on subscribe).
    pub fn invoices(&self) -> Subscription<Vec<Invoice>> {
        self.invoices.subscribe()
    }

    pub fn invoices_snapshot(&self) -> Vec<Invoice> {
        self.invoices.snapshot()
    }

    /// One-shot lookup.
    pub fn invoice_by_id(&self, id: InvoiceId) -> Option<Invoice> {
        self.invoices.find_by_id(id)
    }

    /// Create an invoice: validate, recompute totals, assign the next
    /// display number, insert.
    ///
    /// The display number is `PREFIX-NNN` with NNN = current count + 1,
    /// zero-padded to three digits. Numbers are never reused; the counter
    /// restarts with the process (there is no persistence to outlive).
    pub fn create_invoice(&self, new: NewInvoice) -> DomainResult<Invoice> {
        if new.client_name.trim().is_empty() {
            return Err(DomainError::validation("invoice requires a client"));
        }
        if new.items.is_empty() {
            return Err(DomainError::validation(
                "invoice requires at least one item",
            ));
        }

        let mut items = new.items;
        let totals = Totals::recompute(&mut items, self.config.tax_rate_bps)?;
        let number = format!(
            "{}-{:03}",
            self.config.number_prefix,
            self.invoices.len() + 1
        );

        Ok(self.invoices.insert(InvoiceDraft {
            number,
            client_id: new.client_id,
            client_name: new.client_name,
            items,
            totals,
            status: new.status,
            issue_date: new.issue_date,
            due_date: new.due_date,
        }))
    }

    /// Externally driven lifecycle/detail changes (e.g. draft → sent).
    pub fn update_invoice(&self, id: InvoiceId, patch: InvoicePatch) {
        self.invoices.update(id, patch);
    }

    /// Replace an invoice's item list, recomputing totals in the same
    /// mutation so they can never drift from the items.
    pub fn set_items(&self, id: InvoiceId, mut items: Vec<InvoiceItem>) -> DomainResult<()> {
        if items.is_empty() {
            return Err(DomainError::validation(
                "invoice requires at least one item",
            ));
        }
        let totals = Totals::recompute(&mut items, self.config.tax_rate_bps)?;
        self.invoices.update(id, ItemsPatch { items, totals });
        Ok(())
    }

    /// Transition to paid, stamping the paid date with the current time.
    ///
    /// No prior-state validation; calling again reassigns the paid date.
    /// Absent ids degrade to the store's silent no-op.
    pub fn mark_as_paid(&self, id: InvoiceId) {
        self.invoices.update(id, PaidPatch(Utc::now()));
    }

    /// Statistics over the current snapshot; recomputed on every call.
    pub fn stats(&self) -> InvoiceStats {
        compute_stats(&self.invoices.snapshot())
    }
}

impl Default for InvoiceBook {
    fn default() -> Self {
        Self::new()
    }
}
