//! Command implementations

pub mod apps;
pub mod ps;
pub mod version;
