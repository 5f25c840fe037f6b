//! Demo binary: seed the context, settle the open invoice, log the numbers.

use anyhow::Result;
use tracing::info;

use smilodon_app::AppContext;
use smilodon_clients::{TransactionDraft, TransactionKind};
use smilodon_invoicing::InvoiceStatus;

fn main() -> Result<()> {
    smilodon_observability::init();

    let app = AppContext::seeded();
    let invoices = app.invoices.invoices();

    // Replay-latest: the first message is the seeded sequence.
    let seeded = invoices.recv()?;
    info!(invoices = seeded.len(), "invoice book seeded");

    let dashboard = app.dashboard();
    info!(
        clients = dashboard.total_clients,
        products = dashboard.total_products,
        low_stock = dashboard.low_stock_products,
        revenue = dashboard.invoices.total_revenue,
        "dashboard"
    );

    // Settle the open invoice: credit the client, mark the invoice paid.
    if let Some(open) = seeded
        .into_iter()
        .find(|i| i.status == InvoiceStatus::Sent)
    {
        app.clients.record_transaction(TransactionDraft {
            client_id: open.client_id,
            kind: TransactionKind::Credit,
            amount: open.total,
            description: format!("Pagamento fatura {}", open.number),
            invoice_id: Some(open.id.0),
        })?;
        app.invoices.mark_as_paid(open.id);

        let updated = invoices.recv()?;
        let paid = updated.iter().filter(|i| i.status == InvoiceStatus::Paid).count();
        info!(number = %open.number, paid, "invoice settled");
    }

    let stats = app.invoices.stats();
    info!(
        total = stats.total_invoices,
        revenue = stats.total_revenue,
        paid = stats.paid_invoices,
        pending = stats.pending_invoices,
        overdue = stats.overdue_invoices,
        "closing stats"
    );

    Ok(())
}
