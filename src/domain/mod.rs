// Domain layer: record shapes handed to the discovery layer and the ports drivers implement.

pub mod model;
pub mod ports;
