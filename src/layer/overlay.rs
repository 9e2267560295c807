//! Overlay layer configuration and application.

use super::svg::{VectorSource, composite_over, render_exact};
use super::{LayerEffect, RenderContext};
use crate::error::RenderError;

// ============================================================================
// OverlayConfig
// ============================================================================

/// Configuration for a vector overlay.
///
/// The overlay is rendered at the same target rectangle as the base icon and
/// composited on top of it.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub source: VectorSource,
}

impl OverlayConfig {
    pub fn new(source: VectorSource) -> Self {
        Self { source }
    }
}

impl LayerEffect for OverlayConfig {
    fn name(&self) -> &'static str {
        "overlay"
    }

    fn transform(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let overlay = render_exact(&self.source, ctx.image.dimensions())?;
        composite_over(&mut ctx.image.data, &overlay);
        Ok(())
    }
}
