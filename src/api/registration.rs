//! Registration endpoints for people, vehicles and links.
//!
//! Every mutation answers with the freshly re-fetched list it affected.

use super::{
    AppState,
    extract::{JsonBody, PathParam, QueryParams},
};
use crate::{
    core::{
        link::{self, LinkForm, LinkView},
        person::{self, PersonForm},
        vehicle::{self, VehicleForm},
    },
    entities::{person::Model as PersonModel, vehicle::Model as VehicleModel},
    errors::Result,
};
use axum::{Json, extract::State};
use serde::Deserialize;

/// Optional `?search=` term for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring to match
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchQuery {
    fn term(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

/// `GET /api/people` - active people, optionally filtered.
pub async fn list_people(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<Vec<PersonModel>>> {
    let people = person::list_active_people(&state.database).await?;
    let filtered = person::filter_people(&people, query.term())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(filtered))
}

/// `POST /api/people` - register a person.
pub async fn create_person(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<PersonForm>,
) -> Result<Json<Vec<PersonModel>>> {
    person::save_person(&state.database, None, form).await?;
    Ok(Json(person::list_active_people(&state.database).await?))
}

/// `PUT /api/people/{id}` - edit a person.
pub async fn update_person(
    State(state): State<AppState>,
    PathParam(person_id): PathParam<i64>,
    JsonBody(form): JsonBody<PersonForm>,
) -> Result<Json<Vec<PersonModel>>> {
    person::save_person(&state.database, Some(person_id), form).await?;
    Ok(Json(person::list_active_people(&state.database).await?))
}

/// `DELETE /api/people/{id}` - deactivate a person.
pub async fn delete_person(
    State(state): State<AppState>,
    PathParam(person_id): PathParam<i64>,
) -> Result<Json<Vec<PersonModel>>> {
    person::deactivate_person(&state.database, person_id).await?;
    Ok(Json(person::list_active_people(&state.database).await?))
}

/// `GET /api/vehicles` - active vehicles, optionally filtered.
pub async fn list_vehicles(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<Vec<VehicleModel>>> {
    let vehicles = vehicle::list_active_vehicles(&state.database).await?;
    let filtered = vehicle::filter_vehicles(&vehicles, query.term())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(filtered))
}

/// `POST /api/vehicles` - register a vehicle.
pub async fn create_vehicle(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<VehicleForm>,
) -> Result<Json<Vec<VehicleModel>>> {
    vehicle::save_vehicle(&state.database, None, form).await?;
    Ok(Json(vehicle::list_active_vehicles(&state.database).await?))
}

/// `PUT /api/vehicles/{id}` - edit a vehicle.
pub async fn update_vehicle(
    State(state): State<AppState>,
    PathParam(vehicle_id): PathParam<i64>,
    JsonBody(form): JsonBody<VehicleForm>,
) -> Result<Json<Vec<VehicleModel>>> {
    vehicle::save_vehicle(&state.database, Some(vehicle_id), form).await?;
    Ok(Json(vehicle::list_active_vehicles(&state.database).await?))
}

/// `DELETE /api/vehicles/{id}` - deactivate a vehicle.
pub async fn delete_vehicle(
    State(state): State<AppState>,
    PathParam(vehicle_id): PathParam<i64>,
) -> Result<Json<Vec<VehicleModel>>> {
    vehicle::deactivate_vehicle(&state.database, vehicle_id).await?;
    Ok(Json(vehicle::list_active_vehicles(&state.database).await?))
}

/// `GET /api/links` - every link with both ends expanded.
pub async fn list_links(State(state): State<AppState>) -> Result<Json<Vec<LinkView>>> {
    Ok(Json(link::list_links(&state.database).await?))
}

/// `POST /api/links` - link a person to a vehicle.
///
/// The current list is loaded first and used for the duplicate check.
pub async fn create_link(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<LinkForm>,
) -> Result<Json<Vec<LinkView>>> {
    let loaded = link::list_links(&state.database).await?;
    link::create_link(&state.database, &loaded, form).await?;
    Ok(Json(link::list_links(&state.database).await?))
}

/// `DELETE /api/links/{id}` - remove a link.
pub async fn delete_link(
    State(state): State<AppState>,
    PathParam(link_id): PathParam<i64>,
) -> Result<Json<Vec<LinkView>>> {
    link::delete_link(&state.database, link_id).await?;
    Ok(Json(link::list_links(&state.database).await?))
}
