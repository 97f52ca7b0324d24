//! Kit configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by whatever keys the user file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [delivery]
//! host_marker = "res.cloudinary.com"  # Substring identifying the CDN host
//! upload_segment = "/upload/"         # Directives are inserted after this
//!
//! [transform]
//! width = 400          # Target pixel width
//! quality = "auto"     # "auto", a number, or a named value like "auto:good"
//! format = "webp"      # Target encoding
//! ```
//!
//! Config files are sparse and unknown keys are rejected to catch typos early.

use crate::delivery::{CLOUDINARY_HOST, CdnConvention, TransformOptions, UPLOAD_SEGMENT, UrlBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KitConfig {
    /// Which CDN URLs are rewritten and where.
    pub delivery: DeliveryConfig,
    /// Default variant options.
    pub transform: TransformOptions,
}

/// CDN URL convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeliveryConfig {
    pub host_marker: String,
    pub upload_segment: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            host_marker: CLOUDINARY_HOST.to_string(),
            upload_segment: UPLOAD_SEGMENT.to_string(),
        }
    }
}

impl KitConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transform.width == 0 {
            return Err(ConfigError::Validation(
                "transform.width must be greater than 0".into(),
            ));
        }
        if self.delivery.host_marker.is_empty() {
            return Err(ConfigError::Validation(
                "delivery.host_marker must not be empty".into(),
            ));
        }
        let seg = &self.delivery.upload_segment;
        if seg.len() < 2 || !seg.starts_with('/') || !seg.ends_with('/') {
            return Err(ConfigError::Validation(
                "delivery.upload_segment must start and end with '/'".into(),
            ));
        }
        Ok(())
    }

    pub fn url_builder(&self) -> UrlBuilder {
        UrlBuilder::new(
            CdnConvention {
                host_marker: self.delivery.host_marker.clone(),
                upload_segment: self.delivery.upload_segment.clone(),
            },
            self.transform.clone(),
        )
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(KitConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<KitConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: KitConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<KitConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# storefront-kit configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# CDN convention
# ---------------------------------------------------------------------------
[delivery]
# Only URLs containing this substring are rewritten; others pass through.
host_marker = "res.cloudinary.com"

# Transformation directives are inserted right after the first occurrence
# of this path segment. Must start and end with '/'.
upload_segment = "/upload/"

# ---------------------------------------------------------------------------
# Default variant
# ---------------------------------------------------------------------------
[transform]
# Target pixel width.
width = 400

# "auto", a number such as 80, or a named CDN value such as "auto:good".
quality = "auto"

# Target encoding: webp, jpg, png, avif, auto, or any token the CDN accepts.
format = "webp"
"##
}
