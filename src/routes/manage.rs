use axum::{
    extract::State,
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::IntoResponse,
};

use crate::{
    codec,
    error::{ExchangeError, ExchangeResult},
    router::AppState,
    sheet::{code_slips, render_codes_sheet},
    snapshot::SnapshotDocument,
    store::StoredExchange,
};

async fn stored(state: &AppState) -> ExchangeResult<StoredExchange> {
    state.store.load().await?.ok_or(ExchangeError::NotSetUp)
}

/// The `data.json` to publish next to the reveal page.
pub async fn export_snapshot(State(state): State<AppState>) -> ExchangeResult<impl IntoResponse> {
    let body = SnapshotDocument::new(stored(&state).await?.encoded).to_json_pretty()?;
    Ok((
        [
            (CONTENT_TYPE, "application/json"),
            (CONTENT_DISPOSITION, "attachment; filename=\"data.json\""),
        ],
        body,
    ))
}

pub async fn codes_sheet(State(state): State<AppState>) -> ExchangeResult<impl IntoResponse> {
    let table = codec::decode(&stored(&state).await?.encoded)?;
    let slips = code_slips(&table, &mut rand::thread_rng());
    let body = render_codes_sheet(&state.templates, &slips)?;
    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                CONTENT_DISPOSITION,
                "attachment; filename=\"secret-santa-codes.txt\"",
            ),
        ],
        body,
    ))
}

pub async fn reset(State(state): State<AppState>) -> ExchangeResult<StatusCode> {
    state.store.reset().await?;
    Ok(StatusCode::NO_CONTENT)
}
