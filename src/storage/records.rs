// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persisted ledger records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::transaction::Transaction;

/// Outcome recorded with a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TxStatus {
    /// Passed verification
    Success,
    /// Failed after acceptance
    Fail,
}

/// Stored transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredTransaction {
    /// Record identifier (UUID v4)
    pub id: String,
    /// Sender wallet address
    pub sender: String,
    /// Recipient wallet address
    pub recipient: String,
    /// Transfer amount
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "23.43")]
    pub amount: Decimal,
    /// Fee charged for the transfer
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "0")]
    pub fee: Decimal,
    /// Block that includes this transaction, once assembled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub status: TxStatus,
    /// Canonical payload hash supplied by the client
    pub hash: String,
    /// Hex DER signature supplied by the client
    pub signature: String,
    /// Signer public key (PEM)
    pub public_key: String,
    /// When the transaction was accepted
    pub created_at: DateTime<Utc>,
}

impl StoredTransaction {
    /// Create the record for a verified transaction.
    pub fn accepted(transaction: Transaction, fee: Decimal) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: transaction.sender,
            recipient: transaction.recipient,
            amount: transaction.amount,
            fee,
            block_id: None,
            status: TxStatus::Success,
            hash: transaction.hash,
            signature: transaction.signature,
            public_key: transaction.public_key,
            created_at: Utc::now(),
        }
    }
}

/// A wallet known to the ledger.
///
/// Balances are stored but not adjusted by transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Wallet {
    /// Wallet address (UUID)
    pub address: String,
    /// Current balance
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "0")]
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// A new wallet with zero balance.
    pub fn new(address: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            address: address.into(),
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }
}
