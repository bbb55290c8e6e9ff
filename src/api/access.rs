//! Access logging endpoints.

use super::{
    AppState,
    extract::{JsonBody, QueryParams},
};
use crate::{
    core::access::{self, AccessForm, AccessLookup, EventView},
    entities::access_event,
    errors::Result,
};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

/// `?plate=` for the lookup endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct LookupQuery {
    /// Plate as typed so far
    #[serde(default)]
    pub plate: String,
}

/// Answer to a recorded movement.
#[derive(Debug, Serialize)]
pub struct Recorded {
    /// The stored event
    pub event: access_event::Model,
    /// Refreshed recent activity
    pub recent: Vec<EventView>,
}

/// `GET /api/access/lookup` - resolve a plate while it is typed.
pub async fn lookup(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LookupQuery>,
) -> Result<Json<AccessLookup>> {
    Ok(Json(access::lookup_plate(&state.database, &query.plate).await?))
}

/// `GET /api/access/recent` - latest events.
pub async fn recent(State(state): State<AppState>) -> Result<Json<Vec<EventView>>> {
    let limit = state.config.access.recent_limit;
    Ok(Json(access::recent_events(&state.database, limit).await?))
}

/// `POST /api/access` - log an entry or exit.
///
/// The plate is resolved again here so the stored references match the
/// submitted plate.
pub async fn record(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<AccessForm>,
) -> Result<Json<Recorded>> {
    let lookup = access::lookup_plate(&state.database, &form.plate).await?;
    let event = access::record_access(&state.database, form, &lookup).await?;
    let recent = access::recent_events(&state.database, state.config.access.recent_limit).await?;
    Ok(Json(Recorded { event, recent }))
}
