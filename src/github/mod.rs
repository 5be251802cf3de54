//! GitHub integration modules.

pub mod client;
pub mod commits;
pub mod errors;
pub mod tags;
