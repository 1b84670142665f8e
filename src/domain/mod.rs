// Domain layer: models and ports. Concrete I/O lives in adapters/config.

pub mod model;
pub mod ports;
