//! Catalog file structures.
//!
//! This module contains the strongly-typed structures deserialized from
//! the YAML catalog files: the default settings file and the per-resort
//! calendar files.

use serde::Deserialize;

use crate::models::{Holiday, RoomType, Season, Settings};

/// The `defaults.yaml` file structure.
///
/// Provides the session-initial [`Settings`] used when a request carries
/// no settings of its own.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDefaults {
    /// The default settings snapshot.
    pub settings: Settings,
}

/// A per-resort calendar file under `resorts/`.
///
/// Carries the complete reference data for one resort: season tiers,
/// holiday overrides, and room types with their point rates. The loader
/// turns this into a validated [`crate::models::Resort`].
#[derive(Debug, Clone, Deserialize)]
pub struct ResortFile {
    /// The stable resort id (e.g. "harbor_pines").
    pub id: String,
    /// The resort display name.
    pub name: String,
    /// Season tiers in display order.
    pub seasons: Vec<Season>,
    /// Holiday overrides in resolution order.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Room types in display order.
    pub room_types: Vec<RoomType>,
}
