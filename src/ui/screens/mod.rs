//! Route-level screen renderers.

pub mod release;
pub mod stats;
