// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded ledger database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `transactions`: id → serialized StoredTransaction
//! - `wallets`: address → serialized Wallet
//! - `wallet_tx_index`: composite key (address|!timestamp|id) → direction

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::records::{StoredTransaction, Wallet};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: id → serialized StoredTransaction (JSON bytes).
const TRANSACTIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("transactions");

/// Wallets: address → serialized Wallet (JSON bytes).
const WALLETS: TableDefinition<&str, &[u8]> = TableDefinition::new("wallets");

/// Index: composite key → direction ("sent"|"received").
/// Key format: `address|!timestamp_be|id` for descending-time range scans.
const WALLET_TX_INDEX: TableDefinition<&[u8], &str> = TableDefinition::new("wallet_tx_index");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LedgerDbError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LedgerDbResult<T> = Result<T, LedgerDbError>;

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Build a composite key for the wallet_tx_index table.
///
/// Format: `lowercase_address | inverted_timestamp_be_bytes | id`
///
/// The inverted timestamp ensures newest-first ordering when scanning forward.
fn make_index_key(wallet_address: &str, timestamp: i64, id: &str) -> Vec<u8> {
    let addr = wallet_address.to_lowercase();
    let mut key = Vec::with_capacity(addr.len() + 1 + 8 + 1 + id.len());
    key.extend_from_slice(addr.as_bytes());
    key.push(b'|');
    key.extend_from_slice(&(!timestamp as u64).to_be_bytes());
    key.push(b'|');
    key.extend_from_slice(id.as_bytes());
    key
}

/// Prefix covering every index entry of a wallet address.
fn make_prefix(wallet_address: &str) -> Vec<u8> {
    let mut prefix = wallet_address.to_lowercase().into_bytes();
    prefix.push(b'|');
    prefix
}

/// Upper bound for a range scan (prefix with 0xFF bytes appended).
fn make_prefix_end(wallet_address: &str) -> Vec<u8> {
    let mut end = make_prefix(wallet_address);
    end.extend_from_slice(&[0xFF; 20]);
    end
}

/// Extract the id portion from a composite index key.
///
/// The timestamp bytes may contain `|`, so the id is located from the fixed
/// offset after the address prefix.
fn extract_id_from_key(prefix_len: usize, key: &[u8]) -> Option<String> {
    let start = prefix_len + 8 + 1;
    key.get(start..)
        .and_then(|id| String::from_utf8(id.to_vec()).ok())
}

// =============================================================================
// LedgerDatabase
// =============================================================================

/// Embedded ACID ledger database.
pub struct LedgerDatabase {
    db: Database,
}

impl LedgerDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> LedgerDbResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Database::create(path)?)
    }

    /// Create a database that lives only in memory.
    pub fn in_memory() -> LedgerDbResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> LedgerDbResult<Self> {
        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TRANSACTIONS)?;
            let _ = write_txn.open_table(WALLETS)?;
            let _ = write_txn.open_table(WALLET_TX_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Persist an accepted transaction.
    ///
    /// Inserts the record, indexes it for both parties and registers any
    /// wallet seen for the first time, all in one write transaction.
    pub fn record_transaction(&self, tx: &StoredTransaction) -> LedgerDbResult<()> {
        let json = serde_json::to_vec(tx)?;
        let timestamp = tx.created_at.timestamp();

        let mut directions = vec![(tx.sender.as_str(), "sent")];
        if tx.recipient != tx.sender {
            directions.push((tx.recipient.as_str(), "received"));
        }

        let write_txn = self.db.begin_write()?;
        {
            let mut tx_table = write_txn.open_table(TRANSACTIONS)?;
            tx_table.insert(tx.id.as_str(), json.as_slice())?;

            let mut idx_table = write_txn.open_table(WALLET_TX_INDEX)?;
            let mut wallets = write_txn.open_table(WALLETS)?;
            for (address, direction) in &directions {
                let key = make_index_key(address, timestamp, &tx.id);
                idx_table.insert(key.as_slice(), *direction)?;

                let address = address.to_lowercase();
                let known = wallets.get(address.as_str())?.is_some();
                if !known {
                    let wallet = serde_json::to_vec(&Wallet::new(address.clone()))?;
                    wallets.insert(address.as_str(), wallet.as_slice())?;
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Look up a single transaction by id.
    pub fn get_transaction(&self, id: &str) -> LedgerDbResult<Option<StoredTransaction>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TRANSACTIONS)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Paginated listing of transactions for a wallet address, newest first.
    ///
    /// Returns `(transactions_with_direction, next_cursor)`.
    pub fn list_by_wallet(
        &self,
        wallet_address: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> LedgerDbResult<(Vec<(StoredTransaction, String)>, Option<String>)> {
        let read_txn = self.db.begin_read()?;
        let idx_table = read_txn.open_table(WALLET_TX_INDEX)?;
        let tx_table = read_txn.open_table(TRANSACTIONS)?;

        let prefix = make_prefix(wallet_address);
        let prefix_end = make_prefix_end(wallet_address);

        // A cursor outside this wallet's key range restarts from the top
        let start = cursor
            .and_then(decode_cursor)
            .filter(|key| key.starts_with(&prefix));
        let skip_first = start.is_some();
        let start = start.unwrap_or_else(|| prefix.clone());

        let mut results = Vec::with_capacity(limit.min(256));
        let mut last_key: Option<Vec<u8>> = None;
        let mut more = false;

        for (position, entry) in idx_table.range(start.as_slice()..prefix_end.as_slice())?.enumerate() {
            let entry = entry?;
            let key_bytes = entry.0.value().to_vec();

            if skip_first && position == 0 {
                continue;
            }
            if results.len() >= limit {
                more = true;
                break;
            }

            let direction = entry.1.value().to_string();
            if let Some(id) = extract_id_from_key(prefix.len(), &key_bytes) {
                if let Some(value) = tx_table.get(id.as_str())? {
                    let tx: StoredTransaction = serde_json::from_slice(value.value())?;
                    results.push((tx, direction));
                    last_key = Some(key_bytes);
                }
            }
        }

        let next_cursor = if more {
            last_key.map(|k| encode_cursor(&k))
        } else {
            None
        };

        Ok((results, next_cursor))
    }

    // =========================================================================
    // Wallets
    // =========================================================================

    /// Look up a wallet by address.
    pub fn get_wallet(&self, address: &str) -> LedgerDbResult<Option<Wallet>> {
        let address = address.to_lowercase();
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WALLETS)?;
        match table.get(address.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Confirm the database can serve reads.
    pub fn ping(&self) -> LedgerDbResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(TRANSACTIONS)?;
        Ok(())
    }
}

// =============================================================================
// Cursor Encoding
// =============================================================================

fn encode_cursor(key: &[u8]) -> String {
    hex::encode(key)
}

fn decode_cursor(cursor: &str) -> Option<Vec<u8>> {
    hex::decode(cursor).ok()
}

// =============================================================================
// Tests
// =============================================================================
