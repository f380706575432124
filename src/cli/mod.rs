pub mod browse;
pub mod commands;

pub use browse::{run_browse, BrowseStats};
pub use commands::{Cli, Commands};
