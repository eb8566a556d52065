// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Ledger Storage
//!
//! Persists accepted transactions and the wallets they touch in an embedded
//! redb database under `DATA_DIR`.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   ledger.redb     # transactions, wallets, wallet → transaction index
//! ```
//!
//! Only transactions that passed verification reach this module. Wallet
//! balances are stored but never adjusted here.

pub mod ledger_db;
pub mod records;

pub use ledger_db::{LedgerDatabase, LedgerDbError, LedgerDbResult};
pub use records::{StoredTransaction, TxStatus, Wallet};
