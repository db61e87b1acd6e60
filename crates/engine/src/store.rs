//! The ledger store seam.
//!
//! The store owns the transaction collection and mints transaction ids. The
//! balance is always derived from the stored transactions.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    Balance, EngineError, NewTransaction, ResultEngine, Transaction,
    security::generate_secure_id,
};

const TRANSACTION_ID_PREFIX: &str = "tx";

#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn transactions(&self) -> ResultEngine<Vec<Transaction>>;

    async fn balance(&self) -> ResultEngine<Balance> {
        Balance::from_transactions(&self.transactions().await?)
    }

    /// Persists a validated transaction and returns it with its new id.
    async fn add_transaction(&self, input: NewTransaction) -> ResultEngine<Transaction>;

    async fn remove_transaction(&self, id: &str) -> ResultEngine<()>;
}

/// Store keeping transactions in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    transactions: Mutex<Vec<Transaction>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn transactions(&self) -> ResultEngine<Vec<Transaction>> {
        Ok(self.transactions.lock().await.clone())
    }

    async fn add_transaction(&self, input: NewTransaction) -> ResultEngine<Transaction> {
        let tx = Transaction::from_new(generate_secure_id(TRANSACTION_ID_PREFIX), input);
        self.transactions.lock().await.push(tx.clone());
        tracing::debug!(transaction_id = tx.id(), "transaction stored");
        Ok(tx)
    }

    async fn remove_transaction(&self, id: &str) -> ResultEngine<()> {
        let mut guard = self.transactions.lock().await;
        let idx = guard
            .iter()
            .position(|tx| tx.id() == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        guard.remove(idx);
        tracing::debug!(transaction_id = id, "transaction removed");
        Ok(())
    }
}
