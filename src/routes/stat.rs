//! Stat submission routes.

use account_board_model::{Ack, Record, Stat, request::stat::SubmitStatRequest};

use axum::extract::State;

use chrono::Utc;

use tracing::instrument;

use crate::{
    app::{AppError, AppGarde, AppJson, AppState, error::AppErrorKind},
    store::append_always,
};

/// Submits a stat line.
///
/// Submissions are never merged; posting twice for the same user stores two
/// records.
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    AppGarde(AppJson(request)): AppGarde<AppJson<SubmitStatRequest>>,
) -> Result<AppJson<Ack<Stat>>, AppError> {
    let stat = request.into_stat(Utc::now());
    let record = Record::from(stat.clone());

    let saved = state
        .store
        .modify(|records| append_always(records, record))
        .await;

    if saved {
        Ok(AppJson(
            Ack::ok("Stats submitted successfully").with_data(stat),
        ))
    } else {
        Err(AppError::from(AppErrorKind::StoreWrite).with_message("Failed to save stats"))
    }
}
