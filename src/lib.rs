//! appiconset-renderer: render a vector icon into a complete app icon set.
//!
//! This crate turns one vector source (plus an optional overlay) into every
//! image an asset catalog needs for phone, tablet, watch and desktop, along
//! with the `Contents.json` manifests that index them.
//!
//! # Example
//!
//! ```no_run
//! use appiconset_renderer::{AlphaPolicy, FsSink, IconPipeline, IconTable, PipelineConfig};
//!
//! let table = IconTable::standard();
//! let config = PipelineConfig::new("icon.svg", "Assets.xcassets")
//!     .with_overlay("beta-ribbon.svg")
//!     .with_alpha(AlphaPolicy::Strip);
//!
//! let report = IconPipeline::new(&table, &config).run(&mut FsSink)?;
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.filename, failure.error);
//! }
//! # Ok::<(), appiconset_renderer::PipelineError>(())
//! ```
//!
//! # Naming
//!
//! Filenames and manifest fields come from pure functions over the table, so
//! they can be inspected without rendering anything:
//!
//! ```
//! use appiconset_renderer::{IconTable, naming};
//!
//! let table = IconTable::standard();
//! let (variant, scale) = table.units().next().unwrap();
//! assert_eq!(naming::filename(variant, scale), "phone-Notification-20@2x.png");
//! assert_eq!(variant.pixel_size(scale), 40);
//! ```

mod config;
mod error;
mod icon;
mod layer;
mod manifest;
pub mod naming;
mod pipeline;
mod sink;
mod table;
mod variant;

pub use config::{AlphaPolicy, DEFAULT_ASSET_NAME, DEFAULT_AUTHOR, PipelineConfig};
pub use error::{
    ConfigError, DecodeError, PipelineError, RenderError, TableError, UnitError, UnitFailure,
};
pub use icon::{IconImage, SizePx};
pub use layer::{
    AlphaFlatten, Layer, LayerEffect, LayerPipeline, OverlayConfig, RenderContext, VectorSource,
    composite_over, flatten, flatten_in_place, rasterize, render_exact,
};
pub use manifest::{
    AssetGroupContents, CatalogContents, CatalogInfo, FORMAT_VERSION, MANIFEST_FILENAME,
    ManifestBuilder, ManifestEntry,
};
pub use naming::numeric_string;
pub use pipeline::{IconPipeline, PipelineState, RunReport, Sources};
pub use sink::{FsSink, OutputSink};
pub use table::IconTable;
pub use variant::{MAX_PIXEL_SIZE, Platform, Role, Subtype, Variant, pixel_size};
