// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction rejection reasons.

use thiserror::Error;

/// Why a transaction was rejected.
///
/// Every variant is an expected business outcome; callers map them to a
/// user-facing rejection with [`VerificationError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The public key is not a parseable PEM SubjectPublicKeyInfo.
    #[error("Invalid public key.")]
    InvalidKey,

    /// The public key parses but is not a supported elliptic-curve key.
    #[error("Invalid key type: {algorithm}. EllipticCurvePublicKey expected")]
    InvalidKeyType { algorithm: String },

    /// The recomputed payload hash differs from the supplied one.
    #[error("Invalid hash. The transaction hash does not match the expected hash.")]
    InvalidHash,

    /// The signature does not verify against the key and payload.
    #[error("Invalid signature. The transaction is not valid.")]
    InvalidSignature,
}

impl VerificationError {
    /// Stable machine-readable code for this rejection.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::InvalidKey => "invalid_key",
            VerificationError::InvalidKeyType { .. } => "invalid_key_type",
            VerificationError::InvalidHash => "invalid_hash",
            VerificationError::InvalidSignature => "invalid_signature",
        }
    }
}
