//! Shared test utilities for Gatehouse.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        access::{self, NewAccessEvent},
        link::{self, LinkForm},
        person::{self, PersonForm},
        vehicle::{self, VehicleForm},
    },
    entities::{self, MovementKind},
    errors::Result,
};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Local timestamp for the given calendar day and wall-clock time.
///
/// Panics on an impossible date, which is a bug in the test itself.
#[allow(clippy::unwrap_used)]
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

/// Person form with only the required fields filled.
pub fn person_form(name: &str, national_id: &str) -> PersonForm {
    PersonForm {
        name: name.to_string(),
        national_id: national_id.to_string(),
        ..Default::default()
    }
}

/// Vehicle form for `plate` with placeholder make, model and color.
pub fn vehicle_form(plate: &str) -> VehicleForm {
    VehicleForm {
        plate: plate.to_string(),
        make: "Test Make".to_string(),
        model: "Test Model".to_string(),
        color: "White".to_string(),
        year: None,
    }
}

/// Registers an active person.
pub async fn create_test_person(
    db: &DatabaseConnection,
    name: &str,
    national_id: &str,
) -> Result<entities::person::Model> {
    person::save_person(db, None, person_form(name, national_id)).await
}

/// Registers an active vehicle with placeholder details.
pub async fn create_test_vehicle(
    db: &DatabaseConnection,
    plate: &str,
) -> Result<entities::vehicle::Model> {
    vehicle::save_vehicle(db, None, vehicle_form(plate)).await
}

/// Registers an active vehicle with a specific make and model.
pub async fn create_custom_vehicle(
    db: &DatabaseConnection,
    plate: &str,
    make: &str,
    model: &str,
) -> Result<entities::vehicle::Model> {
    let form = VehicleForm {
        make: make.to_string(),
        model: model.to_string(),
        ..vehicle_form(plate)
    };
    vehicle::save_vehicle(db, None, form).await
}

/// Links a person to a vehicle, bypassing the duplicate check.
pub async fn create_test_link(
    db: &DatabaseConnection,
    person_id: i64,
    vehicle_id: i64,
) -> Result<entities::person_vehicle::Model> {
    let form = LinkForm {
        person_id: Some(person_id),
        vehicle_id: Some(vehicle_id),
    };
    link::create_link(db, &[], form).await
}

/// Inserts an unresolved access event at a fixed time.
pub async fn create_test_event(
    db: &DatabaseConnection,
    plate: &str,
    movement: MovementKind,
    recorded_at: NaiveDateTime,
) -> Result<entities::access_event::Model> {
    access::insert_event(
        db,
        NewAccessEvent {
            plate: plate.to_string(),
            movement,
            recorded_at,
            note: None,
            person_id: None,
            vehicle_id: None,
        },
    )
    .await
}
