pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::apic::ApicClient;
pub use config::{Cli, Settings};
pub use core::engine::SearchEngine;
pub use utils::error::{FabricError, Result};
