// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pluggable cryptography for transaction verification.
//!
//! [`TransactionVerifier`](super::TransactionVerifier) only orders the checks
//! and binds the hash; key decoding and ECDSA verification come from a
//! [`SignatureBackend`]. The production backend is [`EcdsaBackend`].
//!
//! ## Supported Curves
//!
//! | Curve | OID | Crate |
//! |-------|-----|-------|
//! | secp256k1 | `1.3.132.0.10` | `k256` |
//! | P-256 (prime256v1) | `1.2.840.10045.3.1.7` | `p256` |
//! | P-384 (secp384r1) | `1.3.132.0.34` | `p384` |
//!
//! Signatures on every curve are ECDSA over a SHA-256 digest of the message.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::pkcs8::der::Decode;
use k256::pkcs8::spki::SubjectPublicKeyInfoRef;
use k256::pkcs8::{DecodePublicKey, ObjectIdentifier};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// `id-ecPublicKey` (RFC 5480).
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// Named curve `secp256k1` (SEC 2).
const SECP256K1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");

/// Named curve `prime256v1` / NIST P-256 (RFC 5480).
const P256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// Named curve `secp384r1` / NIST P-384 (RFC 5480).
const P384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// Label of a PEM-encoded SubjectPublicKeyInfo.
const PUBLIC_KEY_PEM_TAG: &str = "PUBLIC KEY";

/// Public key decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The input is not a well-formed public key.
    #[error("malformed public key: {0}")]
    Malformed(String),

    /// The key is well-formed but not an elliptic-curve key.
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// An elliptic-curve key on a named curve the backend cannot verify.
    #[error("unsupported elliptic curve: {0}")]
    UnsupportedCurve(String),
}

/// Public key decoding and signature verification primitives.
pub trait SignatureBackend: Send + Sync {
    /// Decoded public key handle.
    type PublicKey;

    /// Decode a PEM-encoded public key.
    fn decode_public_key(&self, pem: &str) -> Result<Self::PublicKey, KeyError>;

    /// Check a DER-encoded ECDSA/SHA-256 signature over `message`.
    ///
    /// Malformed signature bytes are reported as `false`.
    fn verify(&self, key: &Self::PublicKey, message: &[u8], signature: &[u8]) -> bool;
}

/// ECDSA verifying key on one of the supported curves.
#[derive(Debug, Clone)]
pub enum EcPublicKey {
    Secp256k1(k256::ecdsa::VerifyingKey),
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

impl EcPublicKey {
    /// Conventional curve name.
    pub fn curve_name(&self) -> &'static str {
        match self {
            EcPublicKey::Secp256k1(_) => "secp256k1",
            EcPublicKey::P256(_) => "P-256",
            EcPublicKey::P384(_) => "P-384",
        }
    }
}

/// ECDSA with SHA-256 over secp256k1, P-256 and P-384.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaBackend;

impl SignatureBackend for EcdsaBackend {
    type PublicKey = EcPublicKey;

    fn decode_public_key(&self, pem_str: &str) -> Result<EcPublicKey, KeyError> {
        let pem = pem::parse(pem_str).map_err(|e| KeyError::Malformed(format!("Invalid PEM: {e}")))?;
        if pem.tag() != PUBLIC_KEY_PEM_TAG {
            return Err(KeyError::Malformed(format!(
                "expected PEM label {PUBLIC_KEY_PEM_TAG:?}, got {:?}",
                pem.tag()
            )));
        }
        let der = pem.contents();

        let spki = SubjectPublicKeyInfoRef::from_der(der)
            .map_err(|e| KeyError::Malformed(format!("Invalid SubjectPublicKeyInfo: {e}")))?;

        if spki.algorithm.oid != EC_PUBLIC_KEY_OID {
            return Err(KeyError::UnsupportedAlgorithm(algorithm_name(&spki.algorithm.oid)));
        }

        let curve = spki
            .algorithm
            .parameters_oid()
            .map_err(|e| KeyError::Malformed(format!("Missing named curve: {e}")))?;

        let decoded = if curve == SECP256K1_OID {
            k256::PublicKey::from_public_key_der(der).map(|k| EcPublicKey::Secp256k1(k.into()))
        } else if curve == P256_OID {
            p256::PublicKey::from_public_key_der(der).map(|k| EcPublicKey::P256(k.into()))
        } else if curve == P384_OID {
            p384::PublicKey::from_public_key_der(der).map(|k| EcPublicKey::P384(k.into()))
        } else {
            return Err(KeyError::UnsupportedCurve(curve_name(&curve)));
        };

        decoded.map_err(|e| KeyError::Malformed(format!("Invalid curve point: {e}")))
    }

    fn verify(&self, key: &EcPublicKey, message: &[u8], signature: &[u8]) -> bool {
        let digest = Sha256::digest(message);
        match key {
            EcPublicKey::Secp256k1(key) => k256::ecdsa::Signature::from_der(signature)
                // OpenSSL signers emit high-S values; k256 only accepts low-S.
                .map(|sig| sig.normalize_s().unwrap_or(sig))
                .is_ok_and(|sig| key.verify_prehash(&digest, &sig).is_ok()),
            EcPublicKey::P256(key) => p256::ecdsa::Signature::from_der(signature)
                .is_ok_and(|sig| key.verify_prehash(&digest, &sig).is_ok()),
            EcPublicKey::P384(key) => p384::ecdsa::Signature::from_der(signature)
                .is_ok_and(|sig| key.verify_prehash(&digest, &sig).is_ok()),
        }
    }
}

/// Human-readable name for common SubjectPublicKeyInfo algorithms.
fn algorithm_name(oid: &ObjectIdentifier) -> String {
    match oid.to_string().as_str() {
        "1.2.840.113549.1.1.1" => "RSA".to_string(),
        "1.2.840.113549.1.1.10" => "RSASSA-PSS".to_string(),
        "1.2.840.10040.4.1" => "DSA".to_string(),
        "1.3.101.110" => "X25519".to_string(),
        "1.3.101.111" => "X448".to_string(),
        "1.3.101.112" => "Ed25519".to_string(),
        "1.3.101.113" => "Ed448".to_string(),
        other => other.to_string(),
    }
}

/// Human-readable name for named curves without a verifier.
fn curve_name(oid: &ObjectIdentifier) -> String {
    match oid.to_string().as_str() {
        "1.3.132.0.35" => "P-521".to_string(),
        "1.3.36.3.3.2.8.1.1.7" => "brainpoolP256r1".to_string(),
        other => other.to_string(),
    }
}
