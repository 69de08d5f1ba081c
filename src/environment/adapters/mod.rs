//! Adapter implementations for the world document store port.

pub mod memory;
pub mod postgres;
