// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Canonical payload serialization.
//!
//! The payload is the exact input to both hashing and signing, so its byte
//! layout is a cross-system contract. It matches Python's
//! `json.dumps(obj, sort_keys=True)`:
//!
//! ```text
//! {"amount": "1.000000", "public_key": "-----BEGIN PUBLIC KEY-----\n...", "recipient": "...", "sender": "..."}
//! ```
//!
//! - keys in lexicographic order
//! - `", "` between members, `": "` between key and value
//! - every character outside printable ASCII escaped as `\uXXXX`

use std::collections::BTreeMap;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use sha2::{Digest, Sha256};

use super::Transaction;

/// JSON formatter reproducing Python's default `json.dumps` output.
struct SortedKeysFormatter;

impl Formatter for SortedKeysFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    /// Quotes, backslashes and control characters never reach this method;
    /// serde_json escapes them the same way Python does.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize a string map with the canonical formatter.
fn to_canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::with_capacity(256);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SortedKeysFormatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Build the canonical payload bytes for a transaction.
///
/// Only `sender`, `recipient`, `amount` and `public_key` are bound; `hash`
/// and `signature` are derived from this payload and never part of it.
pub fn canonical_payload(transaction: &Transaction) -> Result<Vec<u8>, serde_json::Error> {
    let amount = transaction.amount.to_string();
    let fields: BTreeMap<&str, &str> = BTreeMap::from([
        ("sender", transaction.sender.as_str()),
        ("recipient", transaction.recipient.as_str()),
        ("amount", amount.as_str()),
        ("public_key", transaction.public_key.as_str()),
    ]);
    to_canonical_json(&fields)
}

/// Lowercase hex SHA-256 of a payload.
pub fn payload_hash(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}
