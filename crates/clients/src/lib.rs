//! Clients domain module: client directory + transaction ledger.
//!
//! Balances follow the signed convention: positive means the client owes
//! the business, negative means the business owes the client.

pub mod client;
pub mod ledger;

pub use client::{
    BalanceStatus, Client, ClientDraft, ClientId, ClientPatch, ClientTransaction,
    TransactionDraft, TransactionId, TransactionKind, DEFAULT_CREDIT_LIMIT,
};
pub use ledger::{ClientLedger, CreditPolicy};
