// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. All types derive `ToSchema`
//! for the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::StoredTransaction;

/// A signed transfer submitted by a client.
///
/// `hash` and `signature` are computed by the client over the canonical
/// payload of `{amount, public_key, recipient, sender}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CreateTransactionRequest {
    /// Sender wallet address in UUID format.
    #[schema(example = "93af6bfa-80e5-4d41-ab5f-d284b733c760")]
    pub sender: String,
    /// Recipient wallet address in UUID format.
    #[schema(example = "2f165c1e-981a-4f39-bcc7-92f36d894851")]
    pub recipient: String,
    /// Amount as a decimal string with at most 6 fractional digits. JSON
    /// numbers are not accepted.
    #[schema(example = "23.43")]
    pub amount: String,
    /// Lowercase hex SHA-256 of the canonical payload.
    pub hash: String,
    /// Hex-encoded DER ECDSA signature of the canonical payload.
    pub signature: String,
    /// PEM-encoded elliptic-curve public key (SubjectPublicKeyInfo) on
    /// secp256k1, P-256 or P-384.
    pub public_key: String,
}

/// Body returned when a transaction is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionCreatedResponse {
    /// HTTP status code (201).
    #[schema(example = 201)]
    pub status: u16,
    /// Additional information about the response.
    pub message: String,
    /// Identifier of the stored transaction.
    pub id: String,
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP status code.
    #[schema(example = 400)]
    pub status: u16,
    /// Human-readable explanation.
    #[schema(example = "Invalid hash. The transaction hash does not match the expected hash.")]
    pub message: String,
    /// Machine-readable error type.
    #[serde(rename = "type")]
    #[schema(example = "invalid_hash")]
    pub kind: String,
}

/// One entry of a wallet's transaction history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WalletTransactionEntry {
    /// `sent` or `received`, relative to the queried wallet.
    pub direction: String,
    pub transaction: StoredTransaction,
}

/// Page of a wallet's transaction history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WalletTransactionsResponse {
    pub transactions: Vec<WalletTransactionEntry>,
    /// Cursor for the next page, absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
