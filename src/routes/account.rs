//! Account routes.

use account_board_model::{Ack, Record, request::account::UpdateAccountRequest};

use axum::extract::{Path, State};

use chrono::Utc;

use tracing::instrument;

use crate::{
    app::{AppError, AppGarde, AppJson, AppState, error::AppErrorKind},
    store::{find_by_username, upsert_by_username},
};

/// Lists every record in the store.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> AppJson<Vec<Record>> {
    AppJson(state.store.load_all().await)
}

/// Shows the record for a single username.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<AppJson<Record>, AppError> {
    let records = state.store.load_all().await;

    find_by_username(&records, &username)
        .cloned()
        .map(AppJson)
        .ok_or_else(|| AppErrorKind::AccountNotFound.into())
}

/// Creates or replaces the account for a username.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    AppGarde(AppJson(request)): AppGarde<AppJson<UpdateAccountRequest>>,
) -> Result<AppJson<Ack<()>>, AppError> {
    let account = Record::from(request.into_account(Utc::now()));

    let saved = state
        .store
        .modify(|records| upsert_by_username(records, account))
        .await;

    if saved {
        Ok(AppJson(Ack::ok("Account updated successfully")))
    } else {
        Err(AppError::from(AppErrorKind::StoreWrite).with_message("Failed to update account"))
    }
}
