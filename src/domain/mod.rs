// Domain layer: course model, persisted record shape and the storage port.

pub mod model;
pub mod ports;
pub mod record;
