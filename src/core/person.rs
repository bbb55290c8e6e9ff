//! Person business logic - registration, editing and soft deletion of people.
//!
//! People are listed by name and never hard-deleted. Searching is done over
//! an already loaded list and never touches the store.

use crate::{
    core::non_blank,
    entities::{Person, person},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Form data for creating or editing a person.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonForm {
    /// Full name
    pub name: String,
    /// National identity document number
    pub national_id: String,
    /// Date of birth
    #[serde(default)]
    pub birth_date: Option<Date>,
    /// Driver's license number
    #[serde(default)]
    pub license_number: Option<String>,
}

impl PersonForm {
    fn validate(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("Name cannot be empty"));
        }
        let national_id = self.national_id.trim().to_string();
        if national_id.is_empty() {
            return Err(Error::validation("National ID cannot be empty"));
        }
        Ok(Self {
            name,
            national_id,
            birth_date: self.birth_date,
            license_number: non_blank(self.license_number),
        })
    }
}

/// Retrieves all active people, ordered alphabetically by name.
pub async fn list_active_people(db: &DatabaseConnection) -> Result<Vec<person::Model>> {
    Person::find()
        .filter(person::Column::Active.eq(true))
        .order_by_asc(person::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts active people, used by the report header.
pub async fn count_active_people(db: &DatabaseConnection) -> Result<u64> {
    Person::find()
        .filter(person::Column::Active.eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Finds a person by id, active or not.
pub async fn get_person_by_id(
    db: &DatabaseConnection,
    person_id: i64,
) -> Result<Option<person::Model>> {
    Person::find_by_id(person_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a person, or updates `editing` when it is set.
///
/// # Errors
/// Returns an error if:
/// - The name or national id is blank
/// - `editing` names a person that does not exist
/// - The store rejects the write
pub async fn save_person(
    db: &DatabaseConnection,
    editing: Option<i64>,
    form: PersonForm,
) -> Result<person::Model> {
    let form = form.validate()?;
    let now = chrono::Local::now().naive_local();

    let Some(person_id) = editing else {
        let person = person::ActiveModel {
            name: Set(form.name),
            national_id: Set(form.national_id),
            birth_date: Set(form.birth_date),
            license_number: Set(form.license_number),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = person.insert(db).await?;
        tracing::info!(person_id = created.id, "Person registered");
        return Ok(created);
    };

    let mut person: person::ActiveModel = get_person_by_id(db, person_id)
        .await?
        .ok_or(Error::PersonNotFound { id: person_id })?
        .into();

    person.name = Set(form.name);
    person.national_id = Set(form.national_id);
    person.birth_date = Set(form.birth_date);
    person.license_number = Set(form.license_number);
    person.updated_at = Set(now);

    let updated = person.update(db).await?;
    tracing::info!(person_id, "Person updated");
    Ok(updated)
}

/// Soft deletes a person by clearing the active flag.
pub async fn deactivate_person(db: &DatabaseConnection, person_id: i64) -> Result<person::Model> {
    let mut person: person::ActiveModel = get_person_by_id(db, person_id)
        .await?
        .ok_or(Error::PersonNotFound { id: person_id })?
        .into();

    person.active = Set(false);
    person.updated_at = Set(chrono::Local::now().naive_local());

    let updated = person.update(db).await?;
    tracing::info!(person_id, "Person deactivated");
    Ok(updated)
}

/// Case-insensitive substring search over name and national id.
///
/// An empty term keeps every person.
#[must_use]
pub fn filter_people<'a>(people: &'a [person::Model], term: &str) -> Vec<&'a person::Model> {
    let needle = term.to_lowercase();
    people
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.national_id.to_lowercase().contains(&needle)
        })
        .collect()
}
