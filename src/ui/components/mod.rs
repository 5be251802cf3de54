//! Reusable UI components.

pub mod footer;
pub mod header;
pub mod release_time;
pub mod search_box;
pub mod shared;
