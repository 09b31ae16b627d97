//! Use-case services. Each one orchestrates ports and returns data for the
//! command layer to render.

pub mod apps;
pub mod ps;
pub mod resolve;
