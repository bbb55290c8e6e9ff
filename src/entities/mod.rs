//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod access_event;
pub mod person;
pub mod person_vehicle;
pub mod vehicle;

// Re-export specific types to avoid conflicts
pub use access_event::{
    Column as AccessEventColumn, Entity as AccessEvent, Model as AccessEventModel, MovementKind,
};
pub use person::{Column as PersonColumn, Entity as Person, Model as PersonModel};
pub use person_vehicle::{
    Column as PersonVehicleColumn, Entity as PersonVehicle, Model as PersonVehicleModel,
};
pub use vehicle::{Column as VehicleColumn, Entity as Vehicle, Model as VehicleModel};
