// Domain layer: core models and ports (interfaces). No transport or CLI details here.

pub mod model;
pub mod ports;
pub mod search;
