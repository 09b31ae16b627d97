//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod git;
pub mod process;

pub use app::{AppInfo, AppSummary, CreatedApp};
pub use config::HkConfig;
pub use display::{DisplayMap, DisplayValue, Displayable};
pub use error::{ApiError, CommandError, ConfigError};
pub use process::{Process, ProcessTarget, ScaleChange};
