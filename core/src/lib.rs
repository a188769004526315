//! Core

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod burley;
pub mod fileutil;
pub mod paramset;
pub mod pbrt;
pub mod spectrum;
pub mod subsurface_profile;
