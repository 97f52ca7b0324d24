//! Parameter types for delivery URL transformations.
//!
//! These structs describe *what* variant to request from the CDN, not how the
//! URL is assembled. They are the interface between callers (config, CLI,
//! markup) and the [`url`](super::url) module which does the string work.
//!
//! ## Types
//!
//! - [`Quality`] — Compression hint: `auto`, or any directive value such as `80` or
//!   `auto:good`, kept verbatim.
//! - [`ImageFormat`] — Target encoding token (`webp`, `jpg`, ...).
//! - [`TransformOptions`] — Full specification for one variant: width, quality, format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default target width in pixels.
pub const DEFAULT_WIDTH: u32 = 400;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("directive value must not be empty")]
    Empty,
    #[error("directive value {0:?} contains a reserved character (',' or '/')")]
    Reserved(String),
}

/// A directive value is spliced into a comma-separated path segment, so it
/// cannot carry the separators themselves.
fn check_directive(value: &str) -> Result<(), ParamError> {
    if value.is_empty() {
        return Err(ParamError::Empty);
    }
    if value.contains([',', '/']) {
        return Err(ParamError::Reserved(value.to_string()));
    }
    Ok(())
}

/// Compression hint rendered into the `q_` directive.
///
/// Values other than `auto` are kept exactly as written; the CDN decides
/// what `q_0`, `q_150` or `q_080` mean.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawQuality", into = "String")]
pub enum Quality {
    /// Let the CDN pick (`q_auto`).
    #[default]
    Auto,
    /// Any other directive value, e.g. `80` or `auto:good`.
    Value(String),
}

impl Quality {
    pub fn level(value: u32) -> Self {
        Self::Value(value.to_string())
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Auto => f.write_str("auto"),
            Quality::Value(s) => f.write_str(s),
        }
    }
}

impl FromStr for Quality {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_directive(s)?;
        if s == "auto" {
            return Ok(Quality::Auto);
        }
        Ok(Quality::Value(s.to_string()))
    }
}

impl From<Quality> for String {
    fn from(q: Quality) -> Self {
        q.to_string()
    }
}

/// TOML users write either `quality = 80` or `quality = "auto"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuality {
    Number(u32),
    Text(String),
}

impl TryFrom<RawQuality> for Quality {
    type Error = ParamError;

    fn try_from(raw: RawQuality) -> Result<Self, Self::Error> {
        match raw {
            RawQuality::Number(n) => Ok(Quality::level(n)),
            RawQuality::Text(s) => s.parse(),
        }
    }
}

/// Target encoding rendered into the `f_` directive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ImageFormat {
    #[default]
    Webp,
    Jpg,
    Png,
    Avif,
    /// Let the CDN negotiate from the `Accept` header (`f_auto`).
    Auto,
    Other(String),
}

impl ImageFormat {
    pub fn as_str(&self) -> &str {
        match self {
            ImageFormat::Webp => "webp",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Avif => "avif",
            ImageFormat::Auto => "auto",
            ImageFormat::Other(s) => s,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_directive(s)?;
        Ok(match s {
            "webp" => ImageFormat::Webp,
            "jpg" => ImageFormat::Jpg,
            "png" => ImageFormat::Png,
            "avif" => ImageFormat::Avif,
            "auto" => ImageFormat::Auto,
            other => ImageFormat::Other(other.to_string()),
        })
    }
}

impl TryFrom<String> for ImageFormat {
    type Error = ParamError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ImageFormat> for String {
    fn from(f: ImageFormat) -> Self {
        f.as_str().to_string()
    }
}

/// Options for a single delivery variant.
///
/// Every field is optional when deserialized; omitted fields take the
/// defaults (`400`, `auto`, `webp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformOptions {
    /// Target pixel width.
    pub width: u32,
    pub quality: Quality,
    pub format: ImageFormat,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            quality: Quality::Auto,
            format: ImageFormat::Webp,
        }
    }
}

impl TransformOptions {
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// The comma-separated directive list, without the trailing slash.
    pub fn directive(&self) -> String {
        format!("w_{},q_{},f_{}", self.width, self.quality, self.format)
    }
}
