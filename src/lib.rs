pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::editable::BufferTarget;
pub use crate::adapters::snapshot::PageSnapshot;
pub use crate::config::store::JsonFileStore;
pub use crate::core::engine::EnterKeyEngine;
pub use crate::core::keywords::KeywordSet;
pub use crate::utils::error::{RemapError, Result};
