//! Layer infrastructure for icon rasterization.
//!
//! Every unit starts as the base vector source rendered at the unit's exact
//! pixel size. The [`LayerPipeline`] then applies its layers in a fixed
//! order, each one transforming the image in the [`RenderContext`]:
//!
//! ```text
//! Base render
//!     │
//!     ▼
//! ┌─────────┐
//! │ Overlay │ ◄── optional vector overlay, composited on top
//! └────┬────┘
//!      │
//!      ▼
//! ┌─────────┐
//! │  Alpha  │ ◄── forces every pixel opaque when stripping is on
//! └─────────┘
//! ```

pub mod alpha;
pub mod overlay;
pub mod svg;

pub use alpha::{AlphaFlatten, flatten, flatten_in_place};
pub use overlay::OverlayConfig;
pub use svg::{VectorSource, composite_over, render_exact};

use image::RgbaImage;

use crate::config::AlphaPolicy;
use crate::error::RenderError;
use crate::icon::{IconImage, SizePx};

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the layer pipeline.
pub struct RenderContext {
    /// The current image being processed through the pipeline.
    pub image: IconImage,
}

impl RenderContext {
    pub fn new(image: IconImage) -> Self {
        Self { image }
    }
}

// ============================================================================
// Layer Traits
// ============================================================================

/// Trait for layer configurations that know how to apply themselves.
pub trait LayerEffect {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Transform the image in the render context.
    ///
    /// Layers must keep the image dimensions unchanged.
    fn transform(&self, ctx: &mut RenderContext) -> Result<(), RenderError>;
}

// ============================================================================
// Generic Layer
// ============================================================================

/// A layer slot holding an optional configuration and an enabled flag.
///
/// A layer only runs when it has a configuration *and* is enabled, so it can
/// be toggled without losing its configuration.
#[derive(Debug, Clone)]
pub struct Layer<C> {
    config: Option<C>,
    enabled: bool,
}

impl<C> Default for Layer<C> {
    fn default() -> Self {
        Self {
            config: None,
            enabled: true,
        }
    }
}

impl<C> Layer<C> {
    pub fn with_config(config: C) -> Self {
        Self {
            config: Some(config),
            enabled: true,
        }
    }

    /// Returns true if this layer is active (has config AND is enabled).
    pub fn is_active(&self) -> bool {
        self.enabled && self.config.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_config(&mut self, config: Option<C>) {
        self.config = config;
    }
}

impl<C: LayerEffect> Layer<C> {
    /// Apply this layer to the render context.
    ///
    /// If the layer is not active, the context passes through unchanged.
    pub fn apply(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        match &self.config {
            Some(config) if self.enabled => {
                tracing::trace!(layer = config.name(), "applying layer");
                config.transform(ctx)
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The ordered set of layers applied after the base render.
///
/// The pipeline owns no drawing surface; every [`render`](Self::render) call
/// allocates its own, so one unit can never touch another's buffer.
#[derive(Debug, Clone, Default)]
pub struct LayerPipeline {
    pub overlay: Layer<OverlayConfig>,
    pub alpha: Layer<AlphaFlatten>,
}

impl LayerPipeline {
    /// Builds a pipeline with an optional overlay and a run-wide alpha policy.
    pub fn new(overlay: Option<VectorSource>, alpha: AlphaPolicy) -> Self {
        let mut pipeline = Self {
            overlay: Layer::default(),
            alpha: Layer::with_config(AlphaFlatten),
        };
        pipeline.overlay.set_config(overlay.map(OverlayConfig::new));
        pipeline.alpha.set_enabled(alpha == AlphaPolicy::Strip);
        pipeline
    }

    /// Renders `base` at `size` and runs every active layer over it.
    pub fn render(
        &self,
        base: &VectorSource,
        size: SizePx,
        scale: f64,
    ) -> Result<IconImage, RenderError> {
        let data = render_exact(base, size)?;
        let mut ctx = RenderContext::new(IconImage::new(data, scale));

        self.overlay.apply(&mut ctx)?;
        self.alpha.apply(&mut ctx)?;

        Ok(ctx.image)
    }
}

/// Renders `source` with an optional `overlay` on top into an exactly
/// `width x height` RGBA buffer. Alpha is preserved.
pub fn rasterize(
    source: &VectorSource,
    overlay: Option<&VectorSource>,
    width: u32,
    height: u32,
) -> Result<RgbaImage, RenderError> {
    let pipeline = LayerPipeline::new(overlay.cloned(), AlphaPolicy::Preserve);
    let image = pipeline.render(source, SizePx::new(width, height), 1.0)?;
    Ok(image.data)
}
