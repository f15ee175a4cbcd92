// Domain layer: record models, sentinels and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod sentinel;
