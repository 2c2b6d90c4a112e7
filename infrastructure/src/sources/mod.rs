//! Quote source adapters

#[cfg(feature = "bedrock")]
pub mod bedrock;
pub mod builtin;
