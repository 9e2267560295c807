//! Error types for table validation, decoding, rendering and the run as a whole.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A problem with an icon specification table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("icon table has no variants")]
    Empty,

    #[error("variant '{name}' has no scales")]
    NoScales { name: String },

    #[error("variant '{name}' has invalid logical size {value}")]
    InvalidSize { name: String, value: f64 },

    #[error("variant '{name}' has invalid scale {value}")]
    InvalidScale { name: String, value: f64 },

    #[error("{filename} would be rendered at zero pixels")]
    DegeneratePixelSize { filename: String },

    #[error("{filename} would be rendered at {pixels}px, above the {max}px limit")]
    PixelSizeTooLarge {
        filename: String,
        pixels: u32,
        max: u32,
    },

    #[error("variant '{name}' sets a watch-only field on platform '{platform}'")]
    WatchOnlyField { name: String, platform: &'static str },

    #[error("filename {filename} is produced by more than one variant")]
    DuplicateFilename { filename: String },

    #[error("could not read icon table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse icon table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A run configuration file that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("asset name '{name}' must be a single directory name")]
    InvalidAssetName { name: String },
}

/// Failure to turn bytes on disk into a renderable vector document.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse vector document: {0}")]
    Svg(#[from] resvg::usvg::Error),
}

/// Failure to rasterize a vector document into a pixel buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("could not allocate a {width}x{height} drawing surface")]
    SurfaceAllocation { width: u32, height: u32 },
}

/// Why a single (variant, scale) unit produced no file.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

/// A unit that was skipped during a run, with the reason.
#[derive(Debug)]
pub struct UnitFailure {
    pub filename: String,
    pub error: UnitError,
}

/// A failure that stops the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("loading icon source failed: {0}")]
    SourceDecode(#[source] DecodeError),

    #[error("preparing output directory {} failed: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serializing manifest failed: {0}")]
    ManifestSerialize(#[from] serde_json::Error),

    #[error("writing manifest {} failed: {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
