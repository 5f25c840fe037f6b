use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use smilodon_clients::ClientId;
use smilodon_core::{DomainError, DomainResult, Entity, EntityId, ValueObject};
use smilodon_products::ProductId;
use smilodon_store::{Patch, Record};

/// Tax rate in basis points (18%).
pub const TAX_RATE_BPS: u32 = 1_800;

/// Display-number prefix for new invoices.
pub const NUMBER_PREFIX: &str = "SMD";

/// Days until an invoice falls due when no due date is given.
pub const DUE_IN_DAYS: i64 = 30;

/// Invoice identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub EntityId);

impl InvoiceId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for InvoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Invoice status lifecycle: draft is initial, transitions are externally
/// driven, paid is reached only through `mark_as_paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

/// One invoice line: a product snapshot (id, name, unit price at invoicing
/// time) plus quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price in minor units, frozen at invoicing time.
    pub unit_price: u64,
    /// Always `quantity * unit_price`; recomputed by [`Totals::recompute`],
    /// never trusted from the caller.
    pub total: u64,
}

impl InvoiceItem {
    /// Build a line with its total derived from quantity × unit price.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: u64,
    ) -> DomainResult<Self> {
        let total = line_total(quantity, unit_price)?;
        Ok(Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            total,
        })
    }
}

impl ValueObject for InvoiceItem {}

pub(crate) fn line_total(quantity: u32, unit_price: u64) -> DomainResult<u64> {
    if quantity == 0 {
        return Err(DomainError::validation(
            "invoice item quantity must be positive",
        ));
    }
    u64::from(quantity)
        .checked_mul(unit_price)
        .ok_or_else(|| DomainError::invariant("invoice line total overflow"))
}

/// Derived money amounts of an invoice (minor units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
}

impl Totals {
    /// Recompute every line total, then derive subtotal, tax, and total.
    ///
    /// Tax is rounded half-up on the basis-point product:
    /// `(subtotal * rate_bps + 5_000) / 10_000`.
    pub fn recompute(items: &mut [InvoiceItem], tax_rate_bps: u32) -> DomainResult<Totals> {
        let mut subtotal: u64 = 0;
        for item in items.iter_mut() {
            item.total = line_total(item.quantity, item.unit_price)?;
            subtotal = subtotal
                .checked_add(item.total)
                .ok_or_else(|| DomainError::invariant("invoice subtotal overflow"))?;
        }

        let tax = subtotal
            .checked_mul(u64::from(tax_rate_bps))
            .and_then(|t| t.checked_add(5_000))
            .map(|t| t / 10_000)
            .ok_or_else(|| DomainError::invariant("invoice tax overflow"))?;

        let total = subtotal
            .checked_add(tax)
            .ok_or_else(|| DomainError::invariant("invoice total overflow"))?;

        Ok(Totals {
            subtotal,
            tax,
            total,
        })
    }
}

impl ValueObject for Totals {}

/// Invoice record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Sequential display number, e.g. `SMD-002`. Numbers are not reused.
    pub number: String,
    pub client_id: ClientId,
    /// Client name frozen at invoicing time.
    pub client_name: String,
    pub items: Vec<InvoiceItem>,
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
    pub status: InvoiceStatus,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// Set on transition to paid; reassigned on every `mark_as_paid` call.
    pub paid_date: Option<DateTime<Utc>>,
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> InvoiceId {
        self.id
    }
}

/// Book-resolved fields for a new invoice.
///
/// Produced by [`crate::InvoiceBook::create_invoice`] after validation,
/// numbering, and totals recomputation; not built by presentation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub number: String,
    pub client_id: ClientId,
    pub client_name: String,
    pub items: Vec<InvoiceItem>,
    pub totals: Totals,
    pub status: InvoiceStatus,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Record for Invoice {
    type Draft = InvoiceDraft;

    fn fresh_id() -> InvoiceId {
        InvoiceId::new()
    }

    fn hydrate(id: InvoiceId, created_at: DateTime<Utc>, draft: InvoiceDraft) -> Self {
        let issue_date = draft.issue_date.unwrap_or(created_at);
        let due_date = draft
            .due_date
            .unwrap_or(issue_date + Duration::days(DUE_IN_DAYS));
        Self {
            id,
            number: draft.number,
            client_id: draft.client_id,
            client_name: draft.client_name,
            items: draft.items,
            subtotal: draft.totals.subtotal,
            tax: draft.totals.tax,
            total: draft.totals.total,
            status: draft.status,
            issue_date,
            due_date,
            paid_date: None,
        }
    }
}

/// Caller-supplied fields for a new invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub client_id: ClientId,
    pub client_name: String,
    pub items: Vec<InvoiceItem>,
    pub status: InvoiceStatus,
    /// Defaults to the creation time.
    pub issue_date: Option<DateTime<Utc>>,
    /// Defaults to the issue date plus [`DUE_IN_DAYS`].
    pub due_date: Option<DateTime<Utc>>,
}

impl NewInvoice {
    pub fn new(client_id: ClientId, client_name: impl Into<String>, items: Vec<InvoiceItem>) -> Self {
        Self {
            client_id,
            client_name: client_name.into(),
            items,
            status: InvoiceStatus::Draft,
            issue_date: None,
            due_date: None,
        }
    }
}

/// Shallow merge into an invoice. Set fields replace, unset fields keep.
///
/// Items, totals, and paid date are deliberately absent: items go through
/// [`crate::InvoiceBook::set_items`] so totals can never drift, and the paid
/// date moves only with the paid transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvoicePatch {
    pub status: Option<InvoiceStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub client_name: Option<String>,
}

impl Patch<Invoice> for InvoicePatch {
    fn apply_to(self, record: &mut Invoice) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(due_date) = self.due_date {
            record.due_date = due_date;
        }
        if let Some(client_name) = self.client_name {
            record.client_name = client_name;
        }
    }
}

/// Replace the item list together with its recomputed totals.
pub(crate) struct ItemsPatch {
    pub(crate) items: Vec<InvoiceItem>,
    pub(crate) totals: Totals,
}

impl Patch<Invoice> for ItemsPatch {
    fn apply_to(self, record: &mut Invoice) {
        record.items = self.items;
        record.subtotal = self.totals.subtotal;
        record.tax = self.totals.tax;
        record.total = self.totals.total;
    }
}

/// Transition to paid, stamping the paid date. Applied unconditionally:
/// there is no prior-state check and the date is reassigned on every call.
pub(crate) struct PaidPatch(pub(crate) DateTime<Utc>);

impl Patch<Invoice> for PaidPatch {
    fn apply_to(self, record: &mut Invoice) {
        record.status = InvoiceStatus::Paid;
        record.paid_date = Some(self.0);
    }
}
