//! Access logging business logic - plate lookup, event recording and recent activity.
//!
//! A lookup resolves a typed plate to a registered vehicle and the first
//! person linked to it. Recording an event copies whatever the lookup
//! resolved; unknown plates are logged with no person or vehicle.

use crate::{
    core::{non_blank, plate, related::first_related, vehicle::get_vehicle_by_plate},
    entities::{
        AccessEvent, MovementKind, Person, PersonVehicle, Vehicle, access_event, person,
        person_vehicle, vehicle,
    },
    errors::Result,
};
use sea_orm::{LoaderTrait, QueryOrder, QuerySelect, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Result of looking up a plate as it is typed.
///
/// `plate` echoes the normalized input the lookup ran for, so a client that
/// fires lookups while typing can drop responses for an older input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessLookup {
    /// Normalized plate the lookup was run for
    pub plate: String,
    /// Registered vehicle with that plate
    pub vehicle: Option<vehicle::Model>,
    /// First person linked to the vehicle
    pub person: Option<person::Model>,
}

impl AccessLookup {
    fn cleared(plate: String) -> Self {
        Self {
            plate,
            vehicle: None,
            person: None,
        }
    }
}

/// Form data for logging a movement at the gate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessForm {
    /// Plate as typed
    pub plate: String,
    /// Entry or exit, entry when omitted
    #[serde(default)]
    pub movement: MovementKind,
    /// Optional operator note
    #[serde(default)]
    pub note: Option<String>,
}

/// Values for a new access event row.
#[derive(Debug, Clone)]
pub struct NewAccessEvent {
    /// Normalized plate
    pub plate: String,
    /// Entry or exit
    pub movement: MovementKind,
    /// Time of the movement
    pub recorded_at: DateTime,
    /// Trimmed note, `None` when blank
    pub note: Option<String>,
    /// Resolved person
    pub person_id: Option<i64>,
    /// Resolved vehicle
    pub vehicle_id: Option<i64>,
}

/// Person fields shown next to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventPerson {
    /// Full name
    pub name: String,
    /// National identity document number
    pub national_id: String,
}

/// Vehicle fields shown next to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventVehicle {
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Body color
    pub color: String,
}

/// An access event with its person and vehicle denormalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    /// The stored event
    #[serde(flatten)]
    pub event: access_event::Model,
    /// Person referenced by the event, if any
    pub person: Option<EventPerson>,
    /// Vehicle referenced by the event, if any
    pub vehicle: Option<EventVehicle>,
}

/// Looks up the vehicle and linked person for a plate being typed.
///
/// Inputs shorter than three characters after normalization return an empty
/// lookup without querying the store.
pub async fn lookup_plate(db: &DatabaseConnection, raw: &str) -> Result<AccessLookup> {
    let plate = plate::normalize_plate(raw);
    if plate.len() < plate::MIN_LOOKUP_LEN {
        return Ok(AccessLookup::cleared(plate));
    }

    let Some(vehicle) = get_vehicle_by_plate(db, &plate).await? else {
        tracing::debug!(%plate, "No vehicle registered for plate");
        return Ok(AccessLookup::cleared(plate));
    };

    let rows = PersonVehicle::find()
        .filter(person_vehicle::Column::VehicleId.eq(vehicle.id))
        .order_by_asc(person_vehicle::Column::Id)
        .find_also_related(Person)
        .all(db)
        .await?;
    let person = first_related(rows.into_iter().map(|(_, person)| person));

    tracing::debug!(%plate, vehicle_id = vehicle.id, person_id = ?person.as_ref().map(|p| p.id), "Plate resolved");
    Ok(AccessLookup {
        plate,
        vehicle: Some(vehicle),
        person,
    })
}

/// Records a movement for the plate in `form`, timestamped now.
///
/// Person and vehicle come from `lookup`. A lookup made for a different plate
/// than the one being submitted is ignored and the event is stored unresolved.
///
/// # Errors
/// Returns an error if the plate is empty or too long after normalization, or
/// the store rejects the insert.
pub async fn record_access(
    db: &DatabaseConnection,
    form: AccessForm,
    lookup: &AccessLookup,
) -> Result<access_event::Model> {
    let plate = plate::validated_plate(&form.plate)?;

    let (person_id, vehicle_id) = if lookup.plate == plate {
        (
            lookup.person.as_ref().map(|p| p.id),
            lookup.vehicle.as_ref().map(|v| v.id),
        )
    } else {
        tracing::warn!(%plate, lookup = %lookup.plate, "Ignoring lookup for a different plate");
        (None, None)
    };

    insert_event(
        db,
        NewAccessEvent {
            plate,
            movement: form.movement,
            recorded_at: chrono::Local::now().naive_local(),
            note: non_blank(form.note),
            person_id,
            vehicle_id,
        },
    )
    .await
}

/// Inserts an access event row as given.
pub async fn insert_event(
    db: &DatabaseConnection,
    new_event: NewAccessEvent,
) -> Result<access_event::Model> {
    let event = access_event::ActiveModel {
        plate: Set(new_event.plate),
        movement: Set(new_event.movement),
        recorded_at: Set(new_event.recorded_at),
        note: Set(new_event.note),
        person_id: Set(new_event.person_id),
        vehicle_id: Set(new_event.vehicle_id),
        ..Default::default()
    };
    let created = event.insert(db).await?;
    tracing::info!(
        event_id = created.id,
        plate = %created.plate,
        movement = created.movement.label(),
        "Access recorded"
    );
    Ok(created)
}

/// Retrieves the `limit` most recent events, newest first.
pub async fn recent_events(db: &DatabaseConnection, limit: u64) -> Result<Vec<EventView>> {
    let events = AccessEvent::find()
        .order_by_desc(access_event::Column::RecordedAt)
        .order_by_desc(access_event::Column::Id)
        .limit(limit)
        .all(db)
        .await?;
    expand_events(db, events).await
}

/// Attaches person and vehicle details to each event.
pub async fn expand_events(
    db: &DatabaseConnection,
    events: Vec<access_event::Model>,
) -> Result<Vec<EventView>> {
    let people = events.load_one(Person, db).await?;
    let vehicles = events.load_one(Vehicle, db).await?;

    Ok(events
        .into_iter()
        .zip(people)
        .zip(vehicles)
        .map(|((event, person), vehicle)| EventView {
            event,
            person: person.map(|p| EventPerson {
                name: p.name,
                national_id: p.national_id,
            }),
            vehicle: vehicle.map(|v| EventVehicle {
                make: v.make,
                model: v.model,
                color: v.color,
            }),
        })
        .collect())
}
