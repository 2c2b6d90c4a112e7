//! Port definitions (implemented by the infrastructure layer)

pub mod quote_source;
