//! Low-level utilities shared across the engine

pub mod logging;
pub mod time;
