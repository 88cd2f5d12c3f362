//! Utility modules.

pub mod exec;
pub mod mime;
