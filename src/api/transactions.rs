// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction endpoints.
//!
//! Submissions go through shape validation, then integrity verification,
//! and only accepted transactions are persisted.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::{CreateTransactionRequest, ErrorResponse, TransactionCreatedResponse},
    state::AppState,
    storage::StoredTransaction,
};

/// Message returned for an accepted transaction.
pub const TRANSACTION_ACCEPTED_MESSAGE: &str =
    "Transaction successfully added to the list to be saved in next block";

/// Submit a signed transaction.
///
/// The transaction is rejected unless its public key is an elliptic-curve
/// key (secp256k1, P-256 or P-384), its hash matches the canonical payload
/// and its signature verifies.
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction verified and stored", body = TransactionCreatedResponse),
        (status = 400, description = "Transaction failed verification", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionCreatedResponse>), ApiError> {
    let Json(request) = payload
        .map_err(|rejection| ApiError::new(rejection.status(), "validation", rejection.body_text()))?;

    let transaction = state.rules.validate(request).map_err(|e| {
        tracing::debug!(error = %e, "transaction request failed validation");
        ApiError::from(e)
    })?;

    if let Err(err) = state.verifier.verify(&transaction) {
        tracing::warn!(
            reason = err.kind(),
            sender = %transaction.sender,
            recipient = %transaction.recipient,
            "Transaction rejected"
        );
        return Err(err.into());
    }

    let record = StoredTransaction::accepted(transaction, state.settings.transaction_fee);
    state.ledger.record_transaction(&record)?;

    tracing::info!(
        id = %record.id,
        sender = %record.sender,
        recipient = %record.recipient,
        amount = %record.amount,
        "Transaction accepted"
    );

    Ok((
        StatusCode::CREATED,
        Json(TransactionCreatedResponse {
            status: StatusCode::CREATED.as_u16(),
            message: TRANSACTION_ACCEPTED_MESSAGE.to_string(),
            id: record.id,
        }),
    ))
}

/// Fetch a stored transaction by id.
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Stored transaction", body = StoredTransaction),
        (status = 404, description = "Unknown transaction", body = ErrorResponse)
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredTransaction>, ApiError> {
    state
        .ledger
        .get_transaction(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Transaction not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateTransactionRequest;
    use crate::transaction::fixtures::{
        P521_PUBLIC_KEY_PEM, RSA_PUBLIC_KEY_PEM, VECTOR_SIGNATURE_HIGH_S,
    };
    use crate::transaction::{Curve, Transaction, TransactionSigner};

    const SENDER: &str = "1d8b39b0-9b67-44ca-888b-d064b75e216a";
    const RECIPIENT: &str = "2f165c1e-981a-4f39-bcc7-92f36d894851";

    fn request_from(tx: Transaction) -> CreateTransactionRequest {
        CreateTransactionRequest {
            sender: tx.sender,
            recipient: tx.recipient,
            amount: tx.amount.to_string(),
            hash: tx.hash,
            signature: tx.signature,
            public_key: tx.public_key,
        }
    }

    fn signed_request(amount: &str) -> CreateTransactionRequest {
        let tx = TransactionSigner::random()
            .sign(SENDER, RECIPIENT, amount.parse().unwrap())
            .unwrap();
        request_from(tx)
    }

    async fn submit(
        state: &AppState,
        request: CreateTransactionRequest,
    ) -> Result<(StatusCode, Json<TransactionCreatedResponse>), ApiError> {
        create_transaction(State(state.clone()), Ok(Json(request))).await
    }

    #[tokio::test]
    async fn accepted_transaction_is_stored() {
        let state = AppState::in_memory().unwrap();
        let request = signed_request("23.43");

        let (status, Json(body)) = submit(&state, request.clone()).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.status, 201);
        assert_eq!(body.message, TRANSACTION_ACCEPTED_MESSAGE);

        let Json(stored) = get_transaction(State(state.clone()), Path(body.id.clone()))
            .await
            .unwrap();
        assert_eq!(stored.sender, SENDER);
        assert_eq!(stored.amount.to_string(), "23.43");
        assert_eq!(stored.hash, request.hash);
        assert!(stored.block_id.is_none());
        assert_eq!(serde_json::to_value(&stored).unwrap()["status"], "Success");

        assert!(state.ledger.get_wallet(SENDER).unwrap().is_some());
        assert!(state.ledger.get_wallet(RECIPIENT).unwrap().is_some());
    }

    #[tokio::test]
    async fn nist_curve_transactions_are_accepted() {
        let state = AppState::in_memory().unwrap();
        for curve in [Curve::P256, Curve::P384] {
            let tx = TransactionSigner::random_on(curve)
                .sign(SENDER, RECIPIENT, "2.5".parse().unwrap())
                .unwrap();
            let (status, Json(body)) = submit(&state, request_from(tx)).await.unwrap();
            assert_eq!(status, StatusCode::CREATED, "{curve:?}");
            assert!(state.ledger.get_transaction(&body.id).unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn unsupported_curve_is_rejected_as_invalid_key() {
        let state = AppState::in_memory().unwrap();
        let mut request = signed_request("1.0");
        request.public_key = P521_PUBLIC_KEY_PEM.to_string();

        let err = submit(&state, request).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "invalid_key");
    }

    #[tokio::test]
    async fn wrong_hash_is_rejected_and_not_stored() {
        let state = AppState::in_memory().unwrap();
        let mut request = signed_request("1.000000");
        request.hash = "0".repeat(64);

        let err = submit(&state, request).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "invalid_hash");
        assert!(state.ledger.get_wallet(SENDER).unwrap().is_none());
    }

    #[tokio::test]
    async fn tampered_amount_is_rejected() {
        let state = AppState::in_memory().unwrap();
        let mut request = signed_request("1.000000");
        request.amount = "2.000000".into();

        let err = submit(&state, request).await.unwrap_err();
        assert_eq!(err.kind, "invalid_hash");
    }

    #[tokio::test]
    async fn rsa_key_is_rejected_as_key_type() {
        let state = AppState::in_memory().unwrap();
        let mut request = signed_request("1.0");
        request.public_key = RSA_PUBLIC_KEY_PEM.to_string();

        let err = submit(&state, request).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "invalid_key_type");
    }

    #[tokio::test]
    async fn garbage_key_is_rejected_as_invalid_key() {
        let state = AppState::in_memory().unwrap();
        let mut request = signed_request("1.0");
        request.public_key = "0".repeat(174);

        let err = submit(&state, request).await.unwrap_err();
        assert_eq!(err.kind, "invalid_key");
    }

    #[tokio::test]
    async fn foreign_signature_is_rejected() {
        let state = AppState::in_memory().unwrap();
        let mut request = signed_request("1.0");
        request.signature = VECTOR_SIGNATURE_HIGH_S.to_string();

        let err = submit(&state, request).await.unwrap_err();
        assert_eq!(err.kind, "invalid_signature");
    }

    #[tokio::test]
    async fn malformed_fields_are_unprocessable() {
        let state = AppState::in_memory().unwrap();
        let mut request = signed_request("1.0");
        request.recipient = "38kf6bfa-80e5-4d41-ab5f-d284b733c760".into();

        let err = submit(&state, request).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind, "validation");
        assert!(err.message.contains("recipient"));
    }

    #[tokio::test]
    async fn amount_above_maximum_is_unprocessable() {
        let state = AppState::in_memory().unwrap();
        let request = signed_request("5000");

        let err = submit(&state, request).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn resubmitting_gives_the_same_verdict() {
        let state = AppState::in_memory().unwrap();
        let request = signed_request("1.5");

        let (_, Json(first)) = submit(&state, request.clone()).await.unwrap();
        let (_, Json(second)) = submit(&state, request).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn unknown_transaction_is_not_found() {
        let state = AppState::in_memory().unwrap();
        let err = get_transaction(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
