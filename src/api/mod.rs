// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateTransactionRequest, ErrorResponse, TransactionCreatedResponse,
        WalletTransactionEntry, WalletTransactionsResponse,
    },
    state::AppState,
    storage::{StoredTransaction, TxStatus, Wallet},
};

pub mod health;
pub mod transactions;
pub mod wallets;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/transactions", post(transactions::create_transaction))
        .route("/transactions/{id}", get(transactions::get_transaction))
        .route("/wallets/{address}", get(wallets::get_wallet))
        .route(
            "/wallets/{address}/transactions",
            get(wallets::list_wallet_transactions),
        );

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Relational Ledger", description = "API for submitting signed transfer transactions"),
    paths(
        health::health,
        transactions::create_transaction,
        transactions::get_transaction,
        wallets::get_wallet,
        wallets::list_wallet_transactions
    ),
    components(
        schemas(
            CreateTransactionRequest,
            TransactionCreatedResponse,
            ErrorResponse,
            StoredTransaction,
            TxStatus,
            Wallet,
            WalletTransactionEntry,
            WalletTransactionsResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Transactions", description = "Signed transaction submission"),
        (name = "Wallets", description = "Wallet lookup and history"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
