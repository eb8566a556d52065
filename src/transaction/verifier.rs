// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The transaction verifier.
//!
//! Checks run from cheapest to most expensive and each one gates the next:
//! key type, hash binding, then the asymmetric signature check. The hash
//! check never substitutes for the signature check.

use super::backend::{EcdsaBackend, KeyError, SignatureBackend};
use super::canonical::{canonical_payload, payload_hash};
use super::error::VerificationError;
use super::Transaction;

/// Decides ACCEPT or REJECT for a transaction using a [`SignatureBackend`].
#[derive(Debug, Clone, Default)]
pub struct TransactionVerifier<B = EcdsaBackend> {
    backend: B,
}

impl<B: SignatureBackend> TransactionVerifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Verify a transaction. Success means all four checks passed.
    pub fn verify(&self, transaction: &Transaction) -> Result<(), VerificationError> {
        let public_key = self
            .backend
            .decode_public_key(&transaction.public_key)
            .map_err(|e| match e {
                KeyError::Malformed(_) | KeyError::UnsupportedCurve(_) => {
                    VerificationError::InvalidKey
                }
                KeyError::UnsupportedAlgorithm(algorithm) => {
                    VerificationError::InvalidKeyType { algorithm }
                }
            })?;

        // A string map always serializes; a failure still must not accept.
        let payload =
            canonical_payload(transaction).map_err(|_| VerificationError::InvalidHash)?;

        if !payload_hash(&payload).eq_ignore_ascii_case(&transaction.hash) {
            return Err(VerificationError::InvalidHash);
        }

        let signature =
            hex::decode(&transaction.signature).map_err(|_| VerificationError::InvalidSignature)?;

        if self.backend.verify(&public_key, &payload, &signature) {
            Ok(())
        } else {
            Err(VerificationError::InvalidSignature)
        }
    }
}

/// Verify a transaction with the default ECDSA backend.
pub fn verify_transaction(transaction: &Transaction) -> Result<(), VerificationError> {
    TransactionVerifier::new(EcdsaBackend).verify(transaction)
}
