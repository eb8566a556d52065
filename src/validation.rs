// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request shape validation.
//!
//! Turns a [`CreateTransactionRequest`] into a [`Transaction`]. This is the
//! only place amount bounds and field formats are enforced; the verifier
//! assumes they hold.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::Settings;
use crate::models::CreateTransactionRequest;
use crate::transaction::Transaction;

/// Length of a SHA-256 digest in hex.
const HASH_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a lowercase UUID")]
    InvalidAddress { field: &'static str },

    #[error("amount must be a plain decimal number: {0}")]
    MalformedAmount(String),

    #[error("amount must have at most {max} decimal places")]
    TooManyDecimalPlaces { max: u32 },

    #[error("amount must have at most {max} digits before the decimal point")]
    TooManyDigits { max: u32 },

    #[error("amount must be between {min} and {max}")]
    AmountOutOfRange { min: Decimal, max: Decimal },

    #[error("hash must be 64 lowercase hexadecimal characters")]
    InvalidHashFormat,

    #[error("signature must be {min}-{max} hexadecimal characters")]
    InvalidSignatureFormat { min: usize, max: usize },

    #[error("public_key must be a non-empty PEM string of at most {max} characters")]
    InvalidPublicKeyFormat { max: usize },
}

/// Field rules applied at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRules {
    pub precision: u32,
    pub scale: u32,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub signature_min_hex_len: usize,
    pub signature_max_hex_len: usize,
    pub public_key_max_len: usize,
}

impl From<&Settings> for TransactionRules {
    fn from(settings: &Settings) -> Self {
        Self {
            precision: settings.number_precision,
            scale: settings.number_scale,
            min_amount: settings.min_transaction_size,
            max_amount: settings.max_transaction_size,
            signature_min_hex_len: settings.signature_min_hex_len,
            signature_max_hex_len: settings.signature_max_hex_len,
            public_key_max_len: settings.public_key_max_len,
        }
    }
}

impl Default for TransactionRules {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl TransactionRules {
    /// Check every field and build the verifier's input.
    pub fn validate(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<Transaction, ValidationError> {
        validate_address(&request.sender, "sender")?;
        validate_address(&request.recipient, "recipient")?;
        let amount = self.parse_amount(&request.amount)?;
        validate_hash(&request.hash)?;
        self.validate_signature(&request.signature)?;
        self.validate_public_key(&request.public_key)?;

        Ok(Transaction {
            sender: request.sender,
            recipient: request.recipient,
            amount,
            hash: request.hash,
            signature: request.signature,
            public_key: request.public_key,
        })
    }

    /// Parse an amount, keeping its written scale.
    pub fn parse_amount(&self, raw: &str) -> Result<Decimal, ValidationError> {
        let well_formed = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit() || b == b'.')
            && raw.bytes().filter(|&b| b == b'.').count() <= 1
            && !raw.starts_with('.')
            && !raw.ends_with('.');
        if !well_formed {
            return Err(ValidationError::MalformedAmount(raw.to_string()));
        }

        let amount: Decimal = raw
            .parse()
            .map_err(|e: rust_decimal::Error| ValidationError::MalformedAmount(e.to_string()))?;

        if amount.scale() > self.scale {
            return Err(ValidationError::TooManyDecimalPlaces { max: self.scale });
        }

        let integer_digits =
            amount.trunc().abs().mantissa().to_string().trim_start_matches('0').len() as u32;
        let max_integer_digits = self.precision.saturating_sub(self.scale);
        if integer_digits > max_integer_digits {
            return Err(ValidationError::TooManyDigits {
                max: max_integer_digits,
            });
        }

        if amount < self.min_amount || amount > self.max_amount {
            return Err(ValidationError::AmountOutOfRange {
                min: self.min_amount,
                max: self.max_amount,
            });
        }

        Ok(amount)
    }

    fn validate_signature(&self, signature: &str) -> Result<(), ValidationError> {
        let len = signature.len();
        if len < self.signature_min_hex_len
            || len > self.signature_max_hex_len
            || len % 2 != 0
            || !signature.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(ValidationError::InvalidSignatureFormat {
                min: self.signature_min_hex_len,
                max: self.signature_max_hex_len,
            });
        }
        Ok(())
    }

    fn validate_public_key(&self, public_key: &str) -> Result<(), ValidationError> {
        if public_key.trim().is_empty() || public_key.len() > self.public_key_max_len {
            return Err(ValidationError::InvalidPublicKeyFormat {
                max: self.public_key_max_len,
            });
        }
        Ok(())
    }
}

/// Lowercase hyphenated UUID with version 0-5 and RFC 4122 / NCS variant.
pub fn validate_address(value: &str, field: &'static str) -> Result<(), ValidationError> {
    let bytes = value.as_bytes();
    let err = || ValidationError::InvalidAddress { field };

    if bytes.len() != 36 {
        return Err(err());
    }
    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
        };
        if !ok {
            return Err(err());
        }
    }
    if !(b'0'..=b'5').contains(&bytes[14]) || !matches!(bytes[19], b'0' | b'8' | b'9' | b'a' | b'b') {
        return Err(err());
    }
    Ok(())
}

fn validate_hash(hash: &str) -> Result<(), ValidationError> {
    if hash.len() != HASH_HEX_LEN || !hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(ValidationError::InvalidHashFormat);
    }
    Ok(())
}
