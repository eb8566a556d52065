// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Ledger - Signed Transfer Ledger API
//!
//! Accepts ECDSA-signed transfer transactions over HTTP. Each submission is
//! checked against its canonical payload before it is persisted.
//!
//! ## Modules
//!
//! - `transaction` - Canonical payload, hash binding and signature verification
//! - `validation` - Shape checks on incoming requests
//! - `api` - HTTP API handlers (Axum)
//! - `storage` - Embedded ledger database (redb)
//! - `config` - Environment-driven settings

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod storage;
pub mod transaction;
pub mod validation;
