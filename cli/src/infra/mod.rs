//! Infrastructure layer: port implementations that talk to the outside world.

pub mod api;
pub mod browser;
pub mod command_runner;
pub mod config;
pub mod git;

pub use api::HttpPlatformClient;
pub use browser::SystemBrowser;
pub use command_runner::TokioCommandRunner;
pub use config::YamlConfigStore;
pub use git::GitCli;
