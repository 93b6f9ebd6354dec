use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ExchangeError, ExchangeResult},
    exchange,
    router::AppState,
    source::load_table,
};

#[derive(Deserialize)]
pub struct RevealRequest {
    pub name: String,
    pub code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealResponse {
    pub partner: String,
    pub target_duo: Vec<String>,
}

pub async fn reveal(
    State(state): State<AppState>,
    Json(request): Json<RevealRequest>,
) -> ExchangeResult<Json<RevealResponse>> {
    if request.name.trim().is_empty() {
        return Err(ExchangeError::EmptyName);
    }
    if request.code.trim().is_empty() {
        return Err(ExchangeError::EmptyCode);
    }

    let Some((table, _)) = load_table(&state.sources).await? else {
        return Err(ExchangeError::NotSetUp);
    };
    let entry = exchange::reveal(&request.name, &request.code, &table)?;

    Ok(Json(RevealResponse {
        partner: entry.partner.clone(),
        target_duo: entry.target_duo.clone(),
    }))
}
