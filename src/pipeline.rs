//! The run orchestrator.
//!
//! An [`IconPipeline`] walks the variant table in order and, for every
//! (variant, scale) unit, renders, optionally strips alpha, encodes and
//! writes one PNG, recording a manifest entry for it. Both manifest
//! documents are written once every unit has been processed.
//!
//! ```text
//! Init ──► Loaded ──► Rendering ──► Finalizing ──► Done
//!   │         │           │              │
//!   └─────────┴───────────┴──────────────┴──► Failed
//! ```
//!
//! A unit that fails to render, encode or write is logged and recorded in
//! the [`RunReport`]; the run carries on. Failing to load the primary
//! source, prepare the output directory, or write a manifest ends the run.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, UnitError, UnitFailure};
use crate::icon::SizePx;
use crate::layer::{LayerPipeline, VectorSource};
use crate::manifest::ManifestBuilder;
use crate::naming;
use crate::sink::OutputSink;
use crate::table::IconTable;

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Loaded,
    Rendering,
    Finalizing,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

// ============================================================================
// Sources
// ============================================================================

/// The decoded inputs of a run.
#[derive(Debug, Clone)]
pub struct Sources {
    pub base: VectorSource,
    pub overlay: Option<VectorSource>,
}

impl Sources {
    pub fn new(base: VectorSource, overlay: Option<VectorSource>) -> Self {
        Self { base, overlay }
    }

    /// Decodes the source and overlay named in `config`.
    ///
    /// The primary source must decode. An overlay that cannot be read or
    /// parsed is dropped with a warning.
    pub fn load(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let base = VectorSource::load(&config.source).map_err(PipelineError::SourceDecode)?;

        let overlay = config
            .overlay
            .as_deref()
            .and_then(|path| match VectorSource::load(path) {
                Ok(source) => Some(source),
                Err(error) => {
                    warn!(path = %path.display(), %error, "ignoring overlay");
                    None
                }
            });

        Ok(Self { base, overlay })
    }
}

// ============================================================================
// RunReport
// ============================================================================

/// Outcome of a run that reached [`PipelineState::Done`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Every image written, in table order.
    pub written: Vec<PathBuf>,

    /// Units that produced no file.
    pub failures: Vec<UnitFailure>,

    /// Whether an overlay was composited onto the images.
    pub overlay_applied: bool,

    /// Path of the icon set manifest.
    pub manifest_path: PathBuf,
}

impl RunReport {
    /// True when every unit in the table was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.written.len() + self.failures.len()
    }
}

// ============================================================================
// IconPipeline
// ============================================================================

/// Drives one run of the table against a config.
///
/// The pipeline holds no state beyond its own run, so several pipelines
/// (for several icon sets) can run one after another in the same process.
///
/// ```no_run
/// use appiconset_renderer::{FsSink, IconPipeline, IconTable, PipelineConfig};
///
/// let table = IconTable::standard();
/// let config = PipelineConfig::new("icon.svg", "Assets.xcassets");
///
/// let report = IconPipeline::new(&table, &config).run(&mut FsSink)?;
/// println!("wrote {} icons", report.written.len());
/// # Ok::<(), appiconset_renderer::PipelineError>(())
/// ```
pub struct IconPipeline<'a> {
    table: &'a IconTable,
    config: &'a PipelineConfig,
    state: PipelineState,
}

impl<'a> IconPipeline<'a> {
    pub fn new(table: &'a IconTable, config: &'a PipelineConfig) -> Self {
        Self {
            table,
            config,
            state: PipelineState::Init,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Loads the sources named in the config, then renders everything.
    #[tracing::instrument(skip_all, fields(asset = %self.config.asset_name))]
    pub fn run<S: OutputSink>(&mut self, sink: &mut S) -> Result<RunReport, PipelineError> {
        let sources = match Sources::load(self.config) {
            Ok(sources) => sources,
            Err(error) => return Err(self.fail(error)),
        };
        info!(source = %self.config.source.display(), "loaded icon source");
        self.run_loaded(&sources, sink)
    }

    /// Renders everything from already decoded sources.
    pub fn run_loaded<S: OutputSink>(
        &mut self,
        sources: &Sources,
        sink: &mut S,
    ) -> Result<RunReport, PipelineError> {
        self.transition(PipelineState::Loaded);
        match self.render_and_finalize(sources, sink) {
            Ok(report) => {
                self.transition(PipelineState::Done);
                Ok(report)
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    fn render_and_finalize<S: OutputSink>(
        &mut self,
        sources: &Sources,
        sink: &mut S,
    ) -> Result<RunReport, PipelineError> {
        self.config.validate()?;
        let root = &self.config.output_root;
        let dir = self.config.icon_set_dir();

        sink.create_dir_all(root)
            .map_err(|source| PipelineError::OutputDir {
                path: root.clone(),
                source,
            })?;
        sink.recreate_dir(&dir)
            .map_err(|source| PipelineError::OutputDir {
                path: dir.clone(),
                source,
            })?;

        self.transition(PipelineState::Rendering);
        let mut manifest = ManifestBuilder::new(&self.config.author);
        let mut report = RunReport {
            overlay_applied: sources.overlay.is_some(),
            manifest_path: self.config.icon_set_manifest_path(),
            ..RunReport::default()
        };
        let layers = LayerPipeline::new(sources.overlay.clone(), self.config.alpha);

        for (variant, scale) in self.table.units() {
            let entry = naming::manifest_entry(variant, scale);
            let path = dir.join(&entry.filename);
            let size = SizePx::square(variant.pixel_size(scale));

            match render_unit(&layers, &sources.base, size, scale, &path, sink) {
                Ok(()) => {
                    debug!(file = %entry.filename, pixels = size.width, "wrote icon");
                    report.written.push(path);
                    manifest.push(entry);
                }
                Err(error) => {
                    warn!(file = %entry.filename, %error, "skipping icon");
                    report.failures.push(UnitFailure {
                        filename: entry.filename,
                        error,
                    });
                }
            }
        }

        self.transition(PipelineState::Finalizing);
        let (group, catalog) = manifest.finish();
        write_manifest(sink, &report.manifest_path, &group.to_json_pretty()?)?;
        write_manifest(
            sink,
            &self.config.catalog_manifest_path(),
            &catalog.to_json_pretty()?,
        )?;

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            dir = %dir.display(),
            "icon set complete"
        );
        Ok(report)
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = ?self.state, to = ?next, "pipeline state");
        self.state = next;
    }

    fn fail(&mut self, error: PipelineError) -> PipelineError {
        self.transition(PipelineState::Failed);
        error
    }
}

fn render_unit<S: OutputSink>(
    layers: &LayerPipeline,
    base: &VectorSource,
    size: SizePx,
    scale: f64,
    path: &Path,
    sink: &mut S,
) -> Result<(), UnitError> {
    let image = layers.render(base, size, scale)?;
    let bytes = image.encode_png()?;
    sink.write_file(path, &bytes)?;
    Ok(())
}

fn write_manifest<S: OutputSink>(
    sink: &mut S,
    path: &Path,
    json: &str,
) -> Result<(), PipelineError> {
    sink.write_file(path, json.as_bytes())
        .map_err(|source| PipelineError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        })
}

// ============================================================================
// Tests
// ============================================================================
