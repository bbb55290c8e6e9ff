//! Vehicle entity - A registered vehicle identified by its plate.
//!
//! Plates are stored in canonical form (uppercase alphanumeric, at most seven
//! characters). Like people, vehicles are soft-deleted through `active`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vehicle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    /// Unique identifier for the vehicle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Normalized license plate (e.g. `"ABC1234"`)
    pub plate: String,
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Body color
    pub color: String,
    /// Model year, if known
    pub year: Option<i32>,
    /// Soft delete flag - inactive vehicles are hidden but data is preserved
    pub active: bool,
    /// When the vehicle was registered
    pub created_at: DateTime,
    /// When the vehicle was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Vehicle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One vehicle has many person links
    #[sea_orm(has_many = "super::person_vehicle::Entity")]
    PersonVehicles,
    /// One vehicle appears in many access events
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
