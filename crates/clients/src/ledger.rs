//! Client ledger service: directory of clients plus transaction history.

use smilodon_core::{DomainError, DomainResult};
use smilodon_store::{EntityStore, Subscription};

use crate::client::{
    BalanceDelta, Client, ClientDraft, ClientId, ClientPatch, ClientTransaction,
    TransactionDraft, DEFAULT_CREDIT_LIMIT,
};

/// Credit policy applied to newly added clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditPolicy {
    pub default_credit_limit: u64,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self {
            default_credit_limit: DEFAULT_CREDIT_LIMIT,
        }
    }
}

/// Client ledger.
///
/// Owns the authoritative client and transaction stores; presentation code
/// consumes the subscriptions and goes through the mutation methods here,
/// never the stores directly.
#[derive(Debug)]
pub struct ClientLedger {
    clients: EntityStore<Client>,
    transactions: EntityStore<ClientTransaction>,
    policy: CreditPolicy,
}

impl ClientLedger {
    pub fn new() -> Self {
        Self::with_policy(CreditPolicy::default())
    }

    pub fn with_policy(policy: CreditPolicy) -> Self {
        Self {
            clients: EntityStore::new(),
            transactions: EntityStore::new(),
            policy,
        }
    }

    /// Ledger seeded with existing records (fixtures, tests).
    pub fn with_records(clients: Vec<Client>, transactions: Vec<ClientTransaction>) -> Self {
        Self {
            clients: EntityStore::with_records(clients),
            transactions: EntityStore::with_records(transactions),
            policy: CreditPolicy::default(),
        }
    }

    /// Live client sequence (replay-latest on subscribe).
    pub fn clients(&self) -> Subscription<Vec<Client>> {
        self.clients.subscribe()
    }

    pub fn clients_snapshot(&self) -> Vec<Client> {
        self.clients.snapshot()
    }

    /// One-shot lookup.
    pub fn client_by_id(&self, id: ClientId) -> Option<Client> {
        self.clients.find_by_id(id)
    }

    /// Add a client. Balance starts at zero; a missing credit limit falls
    /// back to the ledger's policy.
    pub fn add_client(&self, mut draft: ClientDraft) -> Client {
        if draft.credit_limit.is_none() {
            draft.credit_limit = Some(self.policy.default_credit_limit);
        }
        self.clients.insert(draft)
    }

    pub fn update_client(&self, id: ClientId, patch: ClientPatch) {
        self.clients.update(id, patch);
    }

    pub fn remove_client(&self, id: ClientId) {
        self.clients.remove(id);
    }

    /// Record a ledger movement and apply its signed effect to the client
    /// balance.
    ///
    /// An unknown `client_id` degrades to the store's silent no-op on the
    /// balance side; the transaction is still appended (see DESIGN.md).
    pub fn record_transaction(&self, draft: TransactionDraft) -> DomainResult<ClientTransaction> {
        if draft.amount == 0 {
            return Err(DomainError::validation(
                "transaction amount must be positive",
            ));
        }

        let delta = draft.kind.balance_delta(draft.amount);
        self.clients.update(draft.client_id, BalanceDelta(delta));

        Ok(self.transactions.insert(draft))
    }

    /// Live transaction sequence (replay-latest on subscribe).
    pub fn transactions(&self) -> Subscription<Vec<ClientTransaction>> {
        self.transactions.subscribe()
    }

    pub fn transactions_snapshot(&self) -> Vec<ClientTransaction> {
        self.transactions.snapshot()
    }

    /// One-shot filtered view of a single client's movements.
    pub fn transactions_for(&self, client_id: ClientId) -> Vec<ClientTransaction> {
        self.transactions
            .snapshot()
            .into_iter()
            .filter(|t| t.client_id == client_id)
            .collect()
    }
}

impl Default for ClientLedger {
    fn default() -> Self {
        Self::new()
    }
}
