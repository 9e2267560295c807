//! Filenames and manifest fields derived from a variant and one of its scales.
//!
//! Everything here is pure: the same variant and scale always produce the
//! same strings, so filenames and manifest entries can never disagree.

use crate::manifest::ManifestEntry;
use crate::variant::Variant;

/// Separator between filename components.
pub const SEPARATOR: &str = "-";

/// Extension of every rendered image.
pub const EXTENSION: &str = "png";

/// Formats a size or scale value.
///
/// Whole numbers print without a decimal point; anything else prints with
/// exactly one decimal digit.
///
/// ```
/// use appiconset_renderer::numeric_string;
///
/// assert_eq!(numeric_string(29.0), "29");
/// assert_eq!(numeric_string(83.5), "83.5");
/// ```
pub fn numeric_string(value: f64) -> String {
    if value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Basename of the image rendered for `variant` at `scale`.
///
/// Components are platform identifier, name, role, subtype and logical size,
/// joined by [`SEPARATOR`]. Scales other than 1 add an `@Nx` suffix.
pub fn filename(variant: &Variant, scale: f64) -> String {
    let size = numeric_string(variant.logical_size);
    let mut parts: Vec<&str> = vec![variant.platform.identifier(), variant.name.as_str()];
    if let Some(role) = variant.role {
        parts.push(role.token());
    }
    if let Some(subtype) = variant.subtype {
        parts.push(subtype.token());
    }
    parts.push(size.as_str());

    let mut name = parts.join(SEPARATOR);
    if scale != 1.0 {
        name.push('@');
        name.push_str(&numeric_string(scale));
        name.push('x');
    }
    name.push('.');
    name.push_str(EXTENSION);
    name
}

/// `"LxL"` for the variant's logical size.
pub fn size_token(variant: &Variant) -> String {
    let size = numeric_string(variant.logical_size);
    format!("{size}x{size}")
}

/// `"Nx"` for a scale.
pub fn scale_token(scale: f64) -> String {
    format!("{}x", numeric_string(scale))
}

/// Manifest entry for `variant` at `scale`.
pub fn manifest_entry(variant: &Variant, scale: f64) -> ManifestEntry {
    ManifestEntry {
        size: size_token(variant),
        idiom: variant.platform.idiom().to_string(),
        filename: filename(variant, scale),
        scale: scale_token(scale),
        role: variant.role.map(|r| r.token().to_string()),
        subtype: variant.subtype.map(|s| s.token().to_string()),
    }
}
