//! Serializable run configuration.
//!
//! A [`PipelineConfig`] captures everything a run needs besides the variant
//! table. It can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "source": "icon.svg",
//!   "overlay": "beta-ribbon.svg",
//!   "outputRoot": "Assets.xcassets",
//!   "assetName": "AppIcon",
//!   "alpha": "strip",
//!   "author": "xcode"
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use appiconset_renderer::{AlphaPolicy, PipelineConfig};
//!
//! let config = PipelineConfig::new("icon.svg", "Assets.xcassets")
//!     .with_asset_name("AppIcon-Beta")
//!     .with_alpha(AlphaPolicy::Preserve);
//!
//! let json = config.to_json().unwrap();
//! let restored = PipelineConfig::from_json(&json).unwrap();
//! assert_eq!(restored, config);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::manifest::MANIFEST_FILENAME;

/// Default icon set name.
pub const DEFAULT_ASSET_NAME: &str = "AppIcon";

/// Default manifest `author`.
pub const DEFAULT_AUTHOR: &str = "xcode";

/// Extension of the icon set directory inside the catalog.
pub const ICON_SET_EXTENSION: &str = "appiconset";

// ============================================================================
// AlphaPolicy
// ============================================================================

/// What to do with the alpha channel of every rendered image in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AlphaPolicy {
    /// Force every pixel opaque, keeping its color.
    #[default]
    Strip,
    /// Keep alpha exactly as rendered.
    Preserve,
}

// ============================================================================
// PipelineConfig
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct PipelineConfig {
    /// Primary vector source.
    pub source: PathBuf,

    /// Optional overlay drawn on top of the source. A missing or unreadable
    /// overlay is skipped with a warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<PathBuf>,

    /// Asset catalog root directory.
    pub output_root: PathBuf,

    #[serde(default = "default_asset_name")]
    pub asset_name: String,

    #[serde(default)]
    pub alpha: AlphaPolicy,

    #[serde(default = "default_author")]
    pub author: String,
}

impl PipelineConfig {
    pub fn new(source: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            overlay: None,
            output_root: output_root.into(),
            asset_name: default_asset_name(),
            alpha: AlphaPolicy::default(),
            author: default_author(),
        }
    }

    pub fn with_overlay(mut self, overlay: impl Into<PathBuf>) -> Self {
        self.overlay = Some(overlay.into());
        self
    }

    pub fn with_asset_name(mut self, name: impl Into<String>) -> Self {
        self.asset_name = name.into();
        self
    }

    pub fn with_alpha(mut self, alpha: AlphaPolicy) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Checks that `asset_name` names one directory directly under
    /// `output_root`. The icon set directory is deleted and recreated on
    /// every run, so it must never resolve anywhere else.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.asset_name;
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(ConfigError::InvalidAssetName { name: name.clone() });
        }
        Ok(())
    }

    /// `<output_root>/<asset_name>.appiconset`
    pub fn icon_set_dir(&self) -> PathBuf {
        self.output_root
            .join(format!("{}.{}", self.asset_name, ICON_SET_EXTENSION))
    }

    /// Path of the catalog root manifest.
    pub fn catalog_manifest_path(&self) -> PathBuf {
        self.output_root.join(MANIFEST_FILENAME)
    }

    /// Path of the icon set manifest.
    pub fn icon_set_manifest_path(&self) -> PathBuf {
        self.icon_set_dir().join(MANIFEST_FILENAME)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a JSON config file. Relative paths inside it are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&json)?;
        config.validate()?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.source);
        resolve(&mut self.output_root);
        if let Some(overlay) = self.overlay.as_mut() {
            resolve(overlay);
        }
    }
}

fn default_asset_name() -> String {
    DEFAULT_ASSET_NAME.to_string()
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

// ============================================================================
// Tests
// ============================================================================
