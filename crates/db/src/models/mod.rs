//! Row types for the catalog tables.

pub mod category;
pub mod movie;
