// Domain layer: records exchanged with the commerce backend and the ports it is reached through.

pub mod model;
pub mod ports;
