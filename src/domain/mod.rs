// Domain layer: lookup models and ports. Only serde/chrono beyond std.

pub mod model;
pub mod ports;
