//! Adapter implementations for node registry ports.

pub mod memory;
pub mod postgres;
