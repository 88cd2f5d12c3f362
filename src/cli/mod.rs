//! Command-line interface module.

mod args;
pub mod encode;
pub mod serve;

pub use args::{Cli, Commands};
