// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::config::Settings;
use crate::storage::{LedgerDatabase, LedgerDbResult};
use crate::transaction::TransactionVerifier;
use crate::validation::TransactionRules;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub rules: Arc<TransactionRules>,
    pub verifier: Arc<TransactionVerifier>,
    pub ledger: Arc<LedgerDatabase>,
}

impl AppState {
    pub fn new(settings: Settings, ledger: LedgerDatabase) -> Self {
        Self {
            rules: Arc::new(TransactionRules::from(&settings)),
            settings: Arc::new(settings),
            verifier: Arc::new(TransactionVerifier::default()),
            ledger: Arc::new(ledger),
        }
    }

    /// State over an in-memory ledger with default settings.
    pub fn in_memory() -> LedgerDbResult<Self> {
        Ok(Self::new(Settings::default(), LedgerDatabase::in_memory()?))
    }
}
