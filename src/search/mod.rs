//! Fuzzy filtering for the stats screen.

pub mod fuzzy;
