//! Step definitions for android world reconciliation scenarios.

mod given;
mod then;
mod when;
