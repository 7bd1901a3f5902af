pub mod analyze;
pub mod check;
pub mod commands;
pub mod fetch;
pub mod remediate;
pub mod risks;
pub mod setup;
pub mod store;

pub use commands::{Cli, Commands};
