//! Person entity - Someone allowed to drive through the gate.
//!
//! People are never hard-deleted; `active = false` hides them from listings
//! while keeping historical access events pointing at a real row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Person database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    /// Unique identifier for the person
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// National identity document number
    pub national_id: String,
    /// Date of birth, if known
    pub birth_date: Option<Date>,
    /// Driver's license number, if known
    pub license_number: Option<String>,
    /// Soft delete flag - inactive people are hidden but data is preserved
    pub active: bool,
    /// When the person was registered
    pub created_at: DateTime,
    /// When the person was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Person and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One person has many vehicle links
    #[sea_orm(has_many = "super::person_vehicle::Entity")]
    PersonVehicles,
    /// One person appears in many access events
    #[sea_orm(has_many = "super::access_event::Entity")]
    AccessEvents,
}

impl Related<super::person_vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonVehicles.def()
    }
}

impl Related<super::access_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
