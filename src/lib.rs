#[macro_use]
extern crate eyre;

#[macro_use]
extern crate tracing;

use eyre::Result;

pub use self::{config::Config, context::Context};

pub mod client;
pub mod config;
pub mod context;
pub mod extract;
pub mod logging;
pub mod model;
pub mod table;
pub mod util;

/// Gathers the statistics of all players listed in the configured table.
pub async fn run(config: &Config) -> Result<usize> {
    Context::new(config)?.run(config).await
}
