//! Catalog loading and management for the Stay Cost & Points Engine.
//!
//! This module loads resort reference data (season calendars, holiday
//! overrides, room type rates) and the default settings snapshot from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use stay_engine::config::CatalogLoader;
//!
//! let catalog = CatalogLoader::load("./config/catalog").unwrap();
//! println!("Loaded {} resorts", catalog.resorts().len());
//! ```

mod loader;
mod types;

pub use loader::CatalogLoader;
pub use types::{CatalogDefaults, ResortFile};
