//! Release series aggregation and cycle duration math.

pub mod aggregate;
pub mod duration;
