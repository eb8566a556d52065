// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet lookup endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{ErrorResponse, WalletTransactionEntry, WalletTransactionsResponse},
    state::AppState,
    storage::Wallet,
};

const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 200;

/// Query parameters for wallet history.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WalletTransactionsQuery {
    /// Cursor returned by the previous page
    pub cursor: Option<String>,
    /// Maximum number of results (default: 50, max: 200)
    #[param(default = 50)]
    pub limit: Option<usize>,
}

/// Fetch a wallet by address.
#[utoipa::path(
    get,
    path = "/api/wallets/{address}",
    tag = "Wallets",
    params(("address" = String, Path, description = "Wallet address")),
    responses(
        (status = 200, description = "Wallet", body = Wallet),
        (status = 404, description = "Unknown wallet", body = ErrorResponse)
    )
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Wallet>, ApiError> {
    state
        .ledger
        .get_wallet(&address)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Wallet not found"))
}

/// List a wallet's transactions, newest first.
#[utoipa::path(
    get,
    path = "/api/wallets/{address}/transactions",
    tag = "Wallets",
    params(
        ("address" = String, Path, description = "Wallet address"),
        WalletTransactionsQuery
    ),
    responses(
        (status = 200, description = "Page of transactions", body = WalletTransactionsResponse),
        (status = 400, description = "Invalid page size", body = ErrorResponse)
    )
)]
pub async fn list_wallet_transactions(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<WalletTransactionsQuery>,
) -> Result<Json<WalletTransactionsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if limit == 0 {
        return Err(ApiError::bad_request("limit must be at least 1"));
    }

    let (entries, next_cursor) = state.ledger.list_by_wallet(
        &address,
        query.cursor.as_deref(),
        limit.min(MAX_PAGE_SIZE),
    )?;

    Ok(Json(WalletTransactionsResponse {
        transactions: entries
            .into_iter()
            .map(|(transaction, direction)| WalletTransactionEntry {
                direction,
                transaction,
            })
            .collect(),
        next_cursor,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoredTransaction;
    use crate::transaction::TransactionSigner;
    use axum::http::StatusCode;
    use rust_decimal::Decimal;

    const ALICE: &str = "1d8b39b0-9b67-44ca-888b-d064b75e216a";
    const BOB: &str = "2f165c1e-981a-4f39-bcc7-92f36d894851";

    fn seed(state: &AppState, count: usize) {
        let signer = TransactionSigner::random();
        for _ in 0..count {
            let tx = signer.sign(ALICE, BOB, "1.0".parse().unwrap()).unwrap();
            state
                .ledger
                .record_transaction(&StoredTransaction::accepted(tx, Decimal::ZERO))
                .unwrap();
        }
    }

    #[tokio::test]
    async fn get_wallet_returns_registered_wallet() {
        let state = AppState::in_memory().unwrap();
        seed(&state, 1);

        let Json(wallet) = get_wallet(State(state), Path(BOB.to_string())).await.unwrap();
        assert_eq!(wallet.address, BOB);
        assert_eq!(wallet.balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn get_wallet_unknown_is_not_found() {
        let state = AppState::in_memory().unwrap();
        let err = get_wallet(State(state), Path(ALICE.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_pages_through_history() {
        let state = AppState::in_memory().unwrap();
        seed(&state, 3);

        let Json(first) = list_wallet_transactions(
            State(state.clone()),
            Path(ALICE.to_string()),
            Query(WalletTransactionsQuery {
                cursor: None,
                limit: Some(2),
            }),
        )
        .await
        .unwrap();
        assert_eq!(first.transactions.len(), 2);
        assert!(first.transactions.iter().all(|e| e.direction == "sent"));

        let Json(second) = list_wallet_transactions(
            State(state),
            Path(ALICE.to_string()),
            Query(WalletTransactionsQuery {
                cursor: first.next_cursor,
                limit: Some(2),
            }),
        )
        .await
        .unwrap();
        assert_eq!(second.transactions.len(), 1);
        assert!(second.next_cursor.is_none());
    }

    #[tokio::test]
    async fn zero_limit_is_bad_request() {
        let state = AppState::in_memory().unwrap();
        let err = list_wallet_transactions(
            State(state),
            Path(ALICE.to_string()),
            Query(WalletTransactionsQuery {
                cursor: None,
                limit: Some(0),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
