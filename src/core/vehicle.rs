//! Vehicle business logic - registration, editing and soft deletion of vehicles.
//!
//! Plates are normalized before every write so lookups by plate can use an
//! exact match.

use crate::{
    core::plate,
    entities::{Vehicle, vehicle},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Form data for creating or editing a vehicle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleForm {
    /// Plate as typed; normalized on save
    pub plate: String,
    /// Manufacturer
    #[serde(default)]
    pub make: String,
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Body color
    #[serde(default)]
    pub color: String,
    /// Model year
    #[serde(default)]
    pub year: Option<i32>,
}

/// Retrieves all active vehicles, ordered by plate.
pub async fn list_active_vehicles(db: &DatabaseConnection) -> Result<Vec<vehicle::Model>> {
    Vehicle::find()
        .filter(vehicle::Column::Active.eq(true))
        .order_by_asc(vehicle::Column::Plate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a vehicle by id, active or not.
pub async fn get_vehicle_by_id(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<Option<vehicle::Model>> {
    Vehicle::find_by_id(vehicle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a vehicle whose stored plate equals `plate` exactly.
///
/// `plate` must already be normalized. When an inactive and an active
/// vehicle share the plate, the active one is returned.
pub async fn get_vehicle_by_plate(
    db: &DatabaseConnection,
    plate: &str,
) -> Result<Option<vehicle::Model>> {
    Vehicle::find()
        .filter(vehicle::Column::Plate.eq(plate))
        .order_by_desc(vehicle::Column::Active)
        .order_by_asc(vehicle::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a vehicle, or updates `editing` when it is set.
///
/// # Errors
/// Returns an error if:
/// - The plate is empty or longer than seven characters after normalization
/// - `editing` names a vehicle that does not exist
/// - The store rejects the write
pub async fn save_vehicle(
    db: &DatabaseConnection,
    editing: Option<i64>,
    form: VehicleForm,
) -> Result<vehicle::Model> {
    let plate = plate::validated_plate(&form.plate)?;
    let now = chrono::Local::now().naive_local();
    let make = form.make.trim().to_string();
    let model = form.model.trim().to_string();
    let color = form.color.trim().to_string();

    let Some(vehicle_id) = editing else {
        let vehicle = vehicle::ActiveModel {
            plate: Set(plate),
            make: Set(make),
            model: Set(model),
            color: Set(color),
            year: Set(form.year),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = vehicle.insert(db).await?;
        tracing::info!(vehicle_id = created.id, plate = %created.plate, "Vehicle registered");
        return Ok(created);
    };

    let mut vehicle: vehicle::ActiveModel = get_vehicle_by_id(db, vehicle_id)
        .await?
        .ok_or(Error::VehicleNotFound { id: vehicle_id })?
        .into();

    vehicle.plate = Set(plate);
    vehicle.make = Set(make);
    vehicle.model = Set(model);
    vehicle.color = Set(color);
    vehicle.year = Set(form.year);
    vehicle.updated_at = Set(now);

    let updated = vehicle.update(db).await?;
    tracing::info!(vehicle_id, "Vehicle updated");
    Ok(updated)
}

/// Soft deletes a vehicle by clearing the active flag.
pub async fn deactivate_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i64,
) -> Result<vehicle::Model> {
    let mut vehicle: vehicle::ActiveModel = get_vehicle_by_id(db, vehicle_id)
        .await?
        .ok_or(Error::VehicleNotFound { id: vehicle_id })?
        .into();

    vehicle.active = Set(false);
    vehicle.updated_at = Set(chrono::Local::now().naive_local());

    let updated = vehicle.update(db).await?;
    tracing::info!(vehicle_id, "Vehicle deactivated");
    Ok(updated)
}

/// Case-insensitive substring search over plate, make and model.
#[must_use]
pub fn filter_vehicles<'a>(vehicles: &'a [vehicle::Model], term: &str) -> Vec<&'a vehicle::Model> {
    let needle = term.to_lowercase();
    vehicles
        .iter()
        .filter(|v| {
            [&v.plate, &v.make, &v.model]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
