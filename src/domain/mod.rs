// Domain layer: models and ports. Concrete runners and sinks live in `adapters`.

pub mod model;
pub mod ports;
