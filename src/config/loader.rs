//! Catalog loading functionality.
//!
//! This module provides the [`CatalogLoader`] type for loading resort
//! reference data and default settings from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Resort, Settings};

use super::types::{CatalogDefaults, ResortFile};

/// Loads and provides access to the resort catalog.
///
/// The `CatalogLoader` reads YAML files from a catalog directory, builds
/// validated [`Resort`] values from them, and serves them to the engine.
/// The engine itself never touches the filesystem.
///
/// # Directory Structure
///
/// The catalog directory should have the following structure:
/// ```text
/// config/catalog/
/// ├── defaults.yaml        # Default settings snapshot
/// └── resorts/
///     ├── harbor_pines.yaml
///     └── sandpiper_cove.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use stay_engine::config::CatalogLoader;
///
/// let catalog = CatalogLoader::load("./config/catalog").unwrap();
///
/// let resort = catalog.get_resort("harbor_pines").unwrap();
/// println!("Resort: {}", resort.name());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    defaults: Settings,
    resorts: Vec<Resort>,
}

impl CatalogLoader {
    /// Loads the catalog from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the catalog directory (e.g., "./config/catalog")
    ///
    /// # Returns
    ///
    /// Returns a `CatalogLoader` instance on success, or an error if:
    /// - `defaults.yaml` or the `resorts` directory is missing
    /// - Any file contains invalid YAML
    /// - Any resort's calendar fails validation (inverted date ranges,
    ///   overlapping season periods)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let defaults_path = path.join("defaults.yaml");
        let defaults = Self::load_yaml::<CatalogDefaults>(&defaults_path)?;
        defaults
            .settings
            .validate()
            .map_err(|e| EngineError::CatalogParseError {
                path: defaults_path.display().to_string(),
                message: e.to_string(),
            })?;

        let resorts_dir = path.join("resorts");
        let resorts = Self::load_resorts(&resorts_dir)?;

        Ok(Self {
            defaults: defaults.settings,
            resorts,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::CatalogNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::CatalogParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all resort files from the resorts directory.
    ///
    /// Files are read in filename order so the catalog listing is stable
    /// across loads.
    fn load_resorts(resorts_dir: &Path) -> EngineResult<Vec<Resort>> {
        let resorts_dir_str = resorts_dir.display().to_string();

        if !resorts_dir.exists() {
            return Err(EngineError::CatalogNotFound {
                path: resorts_dir_str,
            });
        }

        let entries = fs::read_dir(resorts_dir).map_err(|_| EngineError::CatalogNotFound {
            path: resorts_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::CatalogNotFound {
                path: resorts_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut resorts = Vec::with_capacity(paths.len());
        for path in paths {
            let file = Self::load_yaml::<ResortFile>(&path)?;
            let resort = Resort::new(
                file.id,
                file.name,
                file.seasons,
                file.holidays,
                file.room_types,
            )?;
            resorts.push(resort);
        }

        if resorts.is_empty() {
            return Err(EngineError::CatalogNotFound {
                path: format!("{} (no resort files found)", resorts_dir_str),
            });
        }

        Ok(resorts)
    }

    /// Returns the default settings snapshot from `defaults.yaml`.
    pub fn default_settings(&self) -> &Settings {
        &self.defaults
    }

    /// Returns all resorts in catalog (filename) order.
    pub fn resorts(&self) -> &[Resort] {
        &self.resorts
    }

    /// Gets a resort by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stay_engine::config::CatalogLoader;
    ///
    /// let catalog = CatalogLoader::load("./config/catalog")?;
    /// let resort = catalog.get_resort("harbor_pines")?;
    /// println!("{} has {} room types", resort.name(), resort.room_types().len());
    /// # Ok::<(), stay_engine::error::EngineError>(())
    /// ```
    pub fn get_resort(&self, id: &str) -> EngineResult<&Resort> {
        self.resorts
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| EngineError::ResortNotFound { id: id.to_string() })
    }
}
