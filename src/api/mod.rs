//! Strategy backend client and wire types.

mod client;
mod config;
mod types;

pub use client::{HttpStrategyClient, StrategyApi};
pub use config::ClientConfig;
pub use types::{ApiResponse, StrategyDetail};
