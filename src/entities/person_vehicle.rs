//! Person-vehicle link entity - many-to-many association between people and vehicles.
//!
//! The store does not enforce uniqueness of `(person_id, vehicle_id)`; the
//! registration layer checks the loaded link list before inserting.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Person-vehicle link database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person_vehicles")]
pub struct Model {
    /// Unique identifier for the link
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Linked person
    pub person_id: i64,
    /// Linked vehicle
    pub vehicle_id: i64,
    /// When the link was created
    pub created_at: DateTime,
}

/// Defines relationships between a link and its two ends
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each link belongs to one person
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id"
    )]
    Person,
    /// Each link belongs to one vehicle
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
