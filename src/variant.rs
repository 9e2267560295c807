//! The icon variant model.
//!
//! A [`Variant`] is one required output family (platform, role, logical size)
//! before scale expansion. Each of its scales produces one concrete image.

use serde::{Deserialize, Serialize};

// ============================================================================
// Platform
// ============================================================================

/// Target device family of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Platform {
    Phone,
    Tablet,
    Watch,
    Desktop,
    PhoneMarketing,
    WatchMarketing,
}

impl Platform {
    /// Identifier used as the first filename component.
    ///
    /// Kept apart from [`idiom`](Self::idiom): filenames say `desktop` where
    /// the manifest says `mac`.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Tablet => "tablet",
            Self::Watch => "watch",
            Self::Desktop => "desktop",
            Self::PhoneMarketing => "phone-marketing",
            Self::WatchMarketing => "watch-marketing",
        }
    }

    /// Token written to the manifest `idiom` field.
    pub fn idiom(self) -> &'static str {
        match self {
            Self::Phone => "iphone",
            Self::Tablet => "ipad",
            Self::Watch => "watch",
            Self::Desktop => "mac",
            Self::PhoneMarketing => "ios-marketing",
            Self::WatchMarketing => "watch-marketing",
        }
    }
}

// ============================================================================
// Role / Subtype
// ============================================================================

/// Watch icon role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Role {
    NotificationCenter,
    CompanionSettings,
    AppLauncher,
    QuickLook,
}

impl Role {
    pub fn token(self) -> &'static str {
        match self {
            Self::NotificationCenter => "notificationCenter",
            Self::CompanionSettings => "companionSettings",
            Self::AppLauncher => "appLauncher",
            Self::QuickLook => "quickLook",
        }
    }
}

/// Watch case size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Subtype {
    #[serde(rename = "38mm")]
    Mm38,
    #[serde(rename = "40mm")]
    Mm40,
    #[serde(rename = "42mm")]
    Mm42,
    #[serde(rename = "44mm")]
    Mm44,
}

impl Subtype {
    pub fn token(self) -> &'static str {
        match self {
            Self::Mm38 => "38mm",
            Self::Mm40 => "40mm",
            Self::Mm42 => "42mm",
            Self::Mm44 => "44mm",
        }
    }
}

// ============================================================================
// Variant
// ============================================================================

/// One required icon output family.
///
/// Variants are plain immutable records. Build them with [`Variant::new`]
/// and the `with_*` methods, or deserialize them from a table document:
///
/// ```json
/// { "platform": "watch", "name": "App", "role": "app-launcher",
///   "subtype": "40mm", "logicalSize": 44, "scales": [2] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Variant {
    pub platform: Platform,

    /// Label used in filenames, e.g. `"Settings"` or `"App-Legacy"`.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Subtype>,

    /// Nominal size in points. May be fractional (83.5).
    pub logical_size: f64,

    /// Pixel density multipliers, in output order.
    pub scales: Vec<f64>,
}

impl Variant {
    pub fn new(
        platform: Platform,
        name: impl Into<String>,
        logical_size: f64,
        scales: &[f64],
    ) -> Self {
        Self {
            platform,
            name: name.into(),
            role: None,
            subtype: None,
            logical_size,
            scales: scales.to_vec(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_subtype(mut self, subtype: Subtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    /// Edge length in pixels of the image rendered at `scale`.
    pub fn pixel_size(&self, scale: f64) -> u32 {
        pixel_size(self.logical_size, scale)
    }
}

/// Largest edge length, in pixels, a table may ask for.
pub const MAX_PIXEL_SIZE: u32 = 16_384;

/// Computes `round(logical_size * scale)`.
///
/// Rounding is half-away-from-zero (`f64::round`), so 27.25 @2x gives 55
/// and 0.25 @2x gives 1. Non-finite or non-positive products give 0, which
/// table validation rejects.
pub fn pixel_size(logical_size: f64, scale: f64) -> u32 {
    let px = (logical_size * scale).round();
    if px.is_finite() && px > 0.0 {
        px.min(u32::MAX as f64) as u32
    } else {
        0
    }
}
