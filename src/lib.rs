pub mod aggregator;
pub mod api;
pub mod client;
pub mod config;
pub mod details;
pub mod error;
pub mod graph;
pub mod investigation;
pub mod layout;
pub mod models;

#[cfg(test)]
mod test_helpers;

pub use error::{Error, Result};
