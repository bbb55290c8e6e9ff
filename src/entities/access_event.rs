//! Access event entity - Append-only log of gate entries and exits.
//!
//! The plate is free text and need not match a registered vehicle. The
//! `person_id` and `vehicle_id` references are resolved when the event is
//! recorded and stay `None` for unknown plates.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a gate movement, stored as `"entrada"` / `"saida"`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum MovementKind {
    /// Vehicle entering the premises
    #[default]
    #[sea_orm(string_value = "entrada")]
    #[serde(rename = "entrada")]
    Entry,
    /// Vehicle leaving the premises
    #[sea_orm(string_value = "saida")]
    #[serde(rename = "saida")]
    Exit,
}

impl MovementKind {
    /// The other movement kind; the form flips between exactly these two.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Entry => Self::Exit,
            Self::Exit => Self::Entry,
        }
    }

    /// Uppercase label used in exports (`ENTRADA` / `SAÍDA`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entry => "ENTRADA",
            Self::Exit => "SAÍDA",
        }
    }
}

/// Access event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "access_events")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Normalized plate as typed at the gate
    pub plate: String,
    /// Entry or exit
    pub movement: MovementKind,
    /// Local wall-clock time of the movement
    pub recorded_at: DateTime,
    /// Free-form operator note
    pub note: Option<String>,
    /// Person resolved from the plate at recording time
    pub person_id: Option<i64>,
    /// Vehicle resolved from the plate at recording time
    pub vehicle_id: Option<i64>,
}

/// Defines relationships between an event and the registry
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An event may reference one person
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id"
    )]
    Person,
    /// An event may reference one vehicle
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_defaults_to_entry() {
        assert_eq!(MovementKind::default(), MovementKind::Entry);
    }

    #[test]
    fn test_movement_toggles_between_two_kinds() {
        assert_eq!(MovementKind::Entry.toggled(), MovementKind::Exit);
        assert_eq!(MovementKind::Exit.toggled(), MovementKind::Entry);
        assert_eq!(MovementKind::Entry.toggled().toggled(), MovementKind::Entry);
    }

    #[test]
    fn test_movement_serializes_as_stored_value() {
        assert_eq!(serde_json::to_string(&MovementKind::Entry).ok().as_deref(), Some("\"entrada\""));
        assert_eq!(serde_json::to_string(&MovementKind::Exit).ok().as_deref(), Some("\"saida\""));
    }
}
