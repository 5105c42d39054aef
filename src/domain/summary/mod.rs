//! Summary-feed aggregate: wire entities, value objects and series services.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
