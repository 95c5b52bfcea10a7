//! calprint_core - pure event resolution, calendar grids and page layout.
//!
//! This crate is the functional core: no I/O, no logging, no async. The
//! rendering shell lives in `calprint_render`.

pub mod calendar;
pub mod serde;
