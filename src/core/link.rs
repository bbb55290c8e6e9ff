//! Person-vehicle link business logic.
//!
//! Links are hard-deleted. The store has no uniqueness constraint on the
//! `(person, vehicle)` pair, so [`create_link`] checks the list the caller
//! already holds and refuses a duplicate without writing anything.

use crate::{
    entities::{Person, PersonVehicle, Vehicle, person, person_vehicle, vehicle},
    errors::{Error, Result},
};
use sea_orm::{LoaderTrait, QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Form data for linking a person to a vehicle. Both sides must be chosen.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LinkForm {
    /// Selected person
    pub person_id: Option<i64>,
    /// Selected vehicle
    pub vehicle_id: Option<i64>,
}

/// The person fields shown next to a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    /// Person id
    pub id: i64,
    /// Full name
    pub name: String,
    /// National identity document number
    pub national_id: String,
}

impl From<person::Model> for PersonSummary {
    fn from(person: person::Model) -> Self {
        Self {
            id: person.id,
            name: person.name,
            national_id: person.national_id,
        }
    }
}

/// The vehicle fields shown next to a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleSummary {
    /// Vehicle id
    pub id: i64,
    /// Normalized plate
    pub plate: String,
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
}

impl From<vehicle::Model> for VehicleSummary {
    fn from(vehicle: vehicle::Model) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            make: vehicle.make,
            model: vehicle.model,
        }
    }
}

/// A link with both ends expanded. Either end is `None` if the row is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    /// Link id
    pub id: i64,
    /// Linked person id
    pub person_id: i64,
    /// Linked vehicle id
    pub vehicle_id: i64,
    /// When the link was created
    pub created_at: DateTime,
    /// Expanded person
    pub person: Option<PersonSummary>,
    /// Expanded vehicle
    pub vehicle: Option<VehicleSummary>,
}

/// Retrieves every link with its person and vehicle, oldest first.
pub async fn list_links(db: &DatabaseConnection) -> Result<Vec<LinkView>> {
    let links = PersonVehicle::find()
        .order_by_asc(person_vehicle::Column::Id)
        .all(db)
        .await?;
    let people = links.load_one(Person, db).await?;
    let vehicles = links.load_one(Vehicle, db).await?;

    Ok(links
        .into_iter()
        .zip(people)
        .zip(vehicles)
        .map(|((link, person), vehicle)| LinkView {
            id: link.id,
            person_id: link.person_id,
            vehicle_id: link.vehicle_id,
            created_at: link.created_at,
            person: person.map(Into::into),
            vehicle: vehicle.map(Into::into),
        })
        .collect())
}

/// Returns true when `loaded` already holds the `(person, vehicle)` pair.
#[must_use]
pub fn is_linked(loaded: &[LinkView], person_id: i64, vehicle_id: i64) -> bool {
    loaded
        .iter()
        .any(|link| link.person_id == person_id && link.vehicle_id == vehicle_id)
}

/// Links a person to a vehicle.
///
/// `loaded` is the link list the caller currently displays; a pair already in
/// it is rejected before any store call.
///
/// # Errors
/// Returns an error if:
/// - Either side of the form is missing
/// - The pair is already present in `loaded`
/// - The store rejects the insert
pub async fn create_link(
    db: &DatabaseConnection,
    loaded: &[LinkView],
    form: LinkForm,
) -> Result<person_vehicle::Model> {
    let (Some(person_id), Some(vehicle_id)) = (form.person_id, form.vehicle_id) else {
        return Err(Error::validation("Select a person and a vehicle"));
    };

    if is_linked(loaded, person_id, vehicle_id) {
        tracing::warn!(person_id, vehicle_id, "Rejected duplicate link");
        return Err(Error::DuplicateLink {
            person_id,
            vehicle_id,
        });
    }

    let link = person_vehicle::ActiveModel {
        person_id: Set(person_id),
        vehicle_id: Set(vehicle_id),
        created_at: Set(chrono::Local::now().naive_local()),
        ..Default::default()
    };
    let created = link.insert(db).await?;
    tracing::info!(link_id = created.id, person_id, vehicle_id, "Link created");
    Ok(created)
}

/// Hard deletes a link. Access events are not affected.
pub async fn delete_link(db: &DatabaseConnection, link_id: i64) -> Result<()> {
    let result = PersonVehicle::delete_by_id(link_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::LinkNotFound { id: link_id });
    }
    tracing::info!(link_id, "Link deleted");
    Ok(())
}
