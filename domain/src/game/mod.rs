//! Turn-based game session

pub mod session;
