use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smilodon_core::{Entity, EntityId};
use smilodon_store::{Patch, Record};

/// Default credit limit granted to newly added clients (minor units).
pub const DEFAULT_CREDIT_LIMIT: u64 = 50_000;

/// Client identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub EntityId);

impl ClientId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ClientId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Transaction identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub EntityId);

impl TransactionId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    /// Signed effect on the client balance: credit decreases it, debit
    /// increases it. Amounts are stored positive; the sign exists only here.
    pub fn balance_delta(self, amount: u64) -> i64 {
        match self {
            TransactionKind::Credit => -(amount as i64),
            TransactionKind::Debit => amount as i64,
        }
    }
}

/// How a client balance reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    /// Balance is zero.
    Neutral,
    /// Client owes the business.
    Debt,
    /// Business owes the client.
    Credit,
}

/// Client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub tax_number: Option<String>,
    /// Running sum of all transaction effects for this client. Only the
    /// ledger moves it; the public patch type has no balance field.
    pub balance: i64,
    pub credit_limit: u64,
    /// Associated invoice ids. Reference-only: invoicing does not maintain
    /// this list, fixtures and callers do.
    pub invoices: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn balance_status(&self) -> BalanceStatus {
        if self.balance == 0 {
            BalanceStatus::Neutral
        } else if self.balance > 0 {
            BalanceStatus::Debt
        } else {
            BalanceStatus::Credit
        }
    }
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> ClientId {
        self.id
    }
}

/// Fields supplied by the caller when adding a client.
///
/// Balance starts at zero and the invoice list empty; a missing credit
/// limit falls back to [`DEFAULT_CREDIT_LIMIT`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub tax_number: Option<String>,
    pub credit_limit: Option<u64>,
}

impl Record for Client {
    type Draft = ClientDraft;

    fn fresh_id() -> ClientId {
        ClientId::new()
    }

    fn hydrate(id: ClientId, created_at: DateTime<Utc>, draft: ClientDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            tax_number: draft.tax_number,
            balance: 0,
            credit_limit: draft.credit_limit.unwrap_or(DEFAULT_CREDIT_LIMIT),
            invoices: Vec::new(),
            created_at,
        }
    }
}

/// Shallow merge into a client. Set fields replace, unset fields keep.
///
/// Deliberately has no balance field: balance moves only through recorded
/// transactions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub credit_limit: Option<u64>,
    pub invoices: Option<Vec<EntityId>>,
}

impl Patch<Client> for ClientPatch {
    fn apply_to(self, record: &mut Client) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(email) = self.email {
            record.email = email;
        }
        if let Some(phone) = self.phone {
            record.phone = phone;
        }
        if let Some(address) = self.address {
            record.address = address;
        }
        if let Some(tax_number) = self.tax_number {
            record.tax_number = Some(tax_number);
        }
        if let Some(credit_limit) = self.credit_limit {
            record.credit_limit = credit_limit;
        }
        if let Some(invoices) = self.invoices {
            record.invoices = invoices;
        }
    }
}

/// Ledger-internal balance adjustment.
pub(crate) struct BalanceDelta(pub(crate) i64);

impl Patch<Client> for BalanceDelta {
    fn apply_to(self, record: &mut Client) {
        record.balance += self.0;
    }
}

/// One movement on a client's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTransaction {
    pub id: TransactionId,
    pub client_id: ClientId,
    pub kind: TransactionKind,
    /// Positive amount in minor units; never stored signed.
    pub amount: u64,
    pub description: String,
    /// Invoice this movement settles or bills, if any.
    pub invoice_id: Option<EntityId>,
    pub occurred_at: DateTime<Utc>,
}

impl Entity for ClientTransaction {
    type Id = TransactionId;

    fn id(&self) -> TransactionId {
        self.id
    }
}

/// Fields supplied by the caller when recording a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub client_id: ClientId,
    pub kind: TransactionKind,
    pub amount: u64,
    pub description: String,
    pub invoice_id: Option<EntityId>,
}

impl Record for ClientTransaction {
    type Draft = TransactionDraft;

    fn fresh_id() -> TransactionId {
        TransactionId::new()
    }

    fn hydrate(id: TransactionId, created_at: DateTime<Utc>, draft: TransactionDraft) -> Self {
        Self {
            id,
            client_id: draft.client_id,
            kind: draft.kind,
            amount: draft.amount,
            description: draft.description,
            invoice_id: draft.invoice_id,
            occurred_at: created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrated(draft: ClientDraft) -> Client {
        Client::hydrate(ClientId::new(), Utc::now(), draft)
    }

    #[test]
    fn credit_decreases_and_debit_increases() {
        assert_eq!(TransactionKind::Credit.balance_delta(100), -100);
        assert_eq!(TransactionKind::Debit.balance_delta(100), 100);
    }

    #[test]
    fn new_clients_start_neutral_with_default_credit_limit() {
        let client = hydrated(ClientDraft {
            name: "Ana Lopes".to_string(),
            ..ClientDraft::default()
        });

        assert_eq!(client.balance, 0);
        assert_eq!(client.credit_limit, DEFAULT_CREDIT_LIMIT);
        assert!(client.invoices.is_empty());
        assert_eq!(client.balance_status(), BalanceStatus::Neutral);
    }

    #[test]
    fn explicit_credit_limit_is_honored() {
        let client = hydrated(ClientDraft {
            name: "Ana Lopes".to_string(),
            credit_limit: Some(75_000),
            ..ClientDraft::default()
        });

        assert_eq!(client.credit_limit, 75_000);
    }

    #[test]
    fn balance_status_classifies_sign() {
        let mut client = hydrated(ClientDraft::default());

        client.balance = 25_000;
        assert_eq!(client.balance_status(), BalanceStatus::Debt);

        client.balance = -15_000;
        assert_eq!(client.balance_status(), BalanceStatus::Credit);
    }

    #[test]
    fn patch_merges_set_fields_only() {
        let mut client = hydrated(ClientDraft {
            name: "Ana Lopes".to_string(),
            email: "ana@example.com".to_string(),
            ..ClientDraft::default()
        });
        client.balance = -500;

        ClientPatch {
            email: Some("ana.lopes@example.com".to_string()),
            tax_number: Some("500123456".to_string()),
            ..ClientPatch::default()
        }
        .apply_to(&mut client);

        assert_eq!(client.name, "Ana Lopes");
        assert_eq!(client.email, "ana.lopes@example.com");
        assert_eq!(client.tax_number.as_deref(), Some("500123456"));
        // Balance is not reachable through the patch.
        assert_eq!(client.balance, -500);
    }
}
