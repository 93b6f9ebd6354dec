use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{ExchangeError, ExchangeResult},
    exchange::{Roster, generate, pairing::validate_count},
    router::AppState,
    sheet::{CodeSlip, code_slips},
    snapshot::SnapshotDocument,
    source::{Origin, load_table, locate},
};

#[derive(Deserialize)]
pub struct SetupRequest {
    pub participants: Vec<String>,
    /// Setup is irreversible, so the caller has to say so explicitly.
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Serialize)]
pub struct SetupResponse {
    pub codes: Vec<CodeSlip>,
    pub snapshot: SnapshotDocument,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub setup_complete: bool,
    pub source: Option<Origin>,
    pub finalized_at: Option<String>,
}

/// Decodes the snapshot it finds, so an unreadable one is reported as a
/// codec error instead of a completed setup.
pub async fn status(State(state): State<AppState>) -> ExchangeResult<Json<StatusResponse>> {
    let source = load_table(&state.sources).await?.map(|(_, origin)| origin);
    let finalized_at = state
        .store
        .load()
        .await?
        .map(|stored| stored.finalized_at.format("%Y-%m-%d %H:%M:%S").to_string());

    Ok(Json(StatusResponse {
        setup_complete: source.is_some(),
        source,
        finalized_at,
    }))
}

pub async fn setup(
    State(state): State<AppState>,
    Json(request): Json<SetupRequest>,
) -> ExchangeResult<Json<SetupResponse>> {
    let roster = Roster::from_names(&request.participants)?;
    validate_count(roster.len())?;
    if !request.confirm {
        return Err(ExchangeError::NotConfirmed);
    }

    if let Some(located) = locate(&state.sources).await {
        info!("Setup blocked: exchange already exists in {}", located.origin);
        return Err(ExchangeError::AlreadySetUp);
    }

    let (table, codes) = {
        let mut rng = rand::thread_rng();
        let table = generate(roster.names(), &mut rng)?;
        let codes = code_slips(&table, &mut rng);
        (table, codes)
    };

    let snapshot = SnapshotDocument::publish(&table)?;
    state.store.finalize(&snapshot.data).await?;
    info!("Exchange set up for {} participants", roster.len());

    Ok(Json(SetupResponse { codes, snapshot }))
}
