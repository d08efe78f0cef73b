// Domain layer: the earthquake record and the ports the core talks through.

pub mod model;
pub mod ports;
