// Domain layer: the parsed declaration model and the ports the generator depends on.

pub mod model;
pub mod ports;
