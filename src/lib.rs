//! cadence library crate.

pub mod app;
pub mod config;
pub mod domain;
#[cfg(feature = "harness")]
pub mod fixtures;
pub mod github;
#[cfg(feature = "harness")]
pub mod harness;
pub mod search;
pub mod stats;
pub mod ui;
