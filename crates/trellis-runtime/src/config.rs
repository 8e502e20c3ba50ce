//! # Runtime Configuration
//!
//! Unified configuration for the engine and its annotation contract.
//!
//! All values have sane defaults with override capability, either
//! programmatically or through `TRELLIS_*` environment variables.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Markup annotation configuration.
    pub markup: MarkupConfig,
    /// Event bus configuration.
    pub bus: BusConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `TRELLIS_ANNOTATION_PREFIX` | `data` | Markup attribute prefix |
    /// | `TRELLIS_BUS_CAPACITY` | `1000` | Per-subscriber event buffer |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(prefix) = std::env::var("TRELLIS_ANNOTATION_PREFIX") {
            if !prefix.is_empty() {
                config.markup.annotation_prefix = prefix;
            }
        }
        if let Ok(capacity) = std::env::var("TRELLIS_BUS_CAPACITY") {
            if let Ok(capacity) = capacity.parse() {
                config.bus.channel_capacity = capacity;
            }
        }

        config
    }
}

/// Markup annotation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// Prefix for all engine-recognized attributes.
    pub annotation_prefix: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            annotation_prefix: "data".to_string(),
        }
    }
}

/// Event bus configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    /// Maximum events buffered per subscriber.
    pub channel_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// The attribute names the engine reads and writes, derived from the
/// configured prefix.
///
/// With the default `data` prefix:
///
/// | Attribute | Written by | Meaning |
/// |-----------|------------|---------|
/// | `data-module` | author | declared module type name |
/// | `data-decorators` | author | decorator list (comma/space separated) |
/// | `data-namespace` | author | dotted namespace path |
/// | `data-module-id` | engine | assigned registry id (stringified) |
#[derive(Debug, Clone)]
pub struct AnnotationKeys {
    /// Module type declaration.
    pub module: String,
    /// Decorator list declaration.
    pub decorators: String,
    /// Namespace path declaration.
    pub namespace: String,
    /// Engine-assigned identifier annotation.
    pub id: String,
}

impl AnnotationKeys {
    /// Derive the attribute names from a prefix.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            module: format!("{prefix}-module"),
            decorators: format!("{prefix}-decorators"),
            namespace: format!("{prefix}-namespace"),
            id: format!("{prefix}-module-id"),
        }
    }
}

impl Default for AnnotationKeys {
    fn default() -> Self {
        Self::from_prefix(&MarkupConfig::default().annotation_prefix)
    }
}
