//! The icon specification table.
//!
//! [`IconTable::standard`] lists every image an app icon set needs across
//! phone, tablet, watch and desktop. Table order is manifest order. Adding a
//! platform requirement means adding a record here, not touching rendering.

use std::collections::HashSet;
use std::path::Path;

use crate::error::TableError;
use crate::naming;
use crate::variant::{MAX_PIXEL_SIZE, Platform, Role, Subtype, Variant};

/// An ordered, validated list of variants.
#[derive(Debug, Clone, PartialEq)]
pub struct IconTable {
    variants: Vec<Variant>,
}

impl IconTable {
    /// Validates `variants` and builds a table from them.
    pub fn new(variants: Vec<Variant>) -> Result<Self, TableError> {
        validate(&variants)?;
        Ok(Self { variants })
    }

    /// The built-in table.
    pub fn standard() -> Self {
        let variants = standard_variants();
        debug_assert!(
            validate(&variants).is_ok(),
            "built-in icon table is invalid: {:?}",
            validate(&variants)
        );
        Self { variants }
    }

    /// Parses a JSON array of variants.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let variants: Vec<Variant> = serde_json::from_str(json)?;
        Self::new(variants)
    }

    /// Builds a table without validation, for exercising render failures.
    #[cfg(test)]
    pub(crate) fn unchecked(variants: Vec<Variant>) -> Self {
        Self { variants }
    }

    /// Reads and parses a JSON table file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.variants)
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Every (variant, scale) pair in output order.
    pub fn units(&self) -> impl Iterator<Item = (&Variant, f64)> {
        self.variants
            .iter()
            .flat_map(|v| v.scales.iter().map(move |&s| (v, s)))
    }

    /// Number of images a run over this table produces.
    pub fn unit_count(&self) -> usize {
        self.variants.iter().map(|v| v.scales.len()).sum()
    }
}

impl Default for IconTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Checks sizes, scales, watch-only fields and filename uniqueness.
fn validate(variants: &[Variant]) -> Result<(), TableError> {
    if variants.is_empty() {
        return Err(TableError::Empty);
    }

    let mut seen = HashSet::new();
    for variant in variants {
        if !(variant.logical_size.is_finite() && variant.logical_size > 0.0) {
            return Err(TableError::InvalidSize {
                name: variant.name.clone(),
                value: variant.logical_size,
            });
        }
        if variant.scales.is_empty() {
            return Err(TableError::NoScales {
                name: variant.name.clone(),
            });
        }
        if variant.platform != Platform::Watch
            && (variant.role.is_some() || variant.subtype.is_some())
        {
            return Err(TableError::WatchOnlyField {
                name: variant.name.clone(),
                platform: variant.platform.identifier(),
            });
        }

        for &scale in &variant.scales {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(TableError::InvalidScale {
                    name: variant.name.clone(),
                    value: scale,
                });
            }
            let filename = naming::filename(variant, scale);
            let pixels = variant.pixel_size(scale);
            if pixels == 0 {
                return Err(TableError::DegeneratePixelSize { filename });
            }
            if pixels > MAX_PIXEL_SIZE {
                return Err(TableError::PixelSizeTooLarge {
                    filename,
                    pixels,
                    max: MAX_PIXEL_SIZE,
                });
            }
            if !seen.insert(filename.clone()) {
                return Err(TableError::DuplicateFilename { filename });
            }
        }
    }
    Ok(())
}

fn standard_variants() -> Vec<Variant> {
    use Platform::*;

    let watch = |name: &str, role: Role, size: f64, scales: &[f64]| {
        Variant::new(Watch, name, size, scales).with_role(role)
    };

    vec![
        // Phone
        Variant::new(Phone, "Notification", 20.0, &[2.0, 3.0]),
        Variant::new(Phone, "Settings", 29.0, &[2.0, 3.0]),
        Variant::new(Phone, "Spotlight", 40.0, &[2.0, 3.0]),
        Variant::new(Phone, "App", 60.0, &[2.0, 3.0]),
        // Tablet
        Variant::new(Tablet, "Notification", 20.0, &[1.0, 2.0]),
        Variant::new(Tablet, "Settings", 29.0, &[1.0, 2.0]),
        Variant::new(Tablet, "Spotlight", 40.0, &[1.0, 2.0]),
        Variant::new(Tablet, "Spotlight-Legacy", 50.0, &[1.0, 2.0]),
        Variant::new(Tablet, "App-Legacy", 72.0, &[1.0, 2.0]),
        Variant::new(Tablet, "App", 76.0, &[1.0, 2.0]),
        Variant::new(Tablet, "App-Pro", 83.5, &[2.0]),
        // Store
        Variant::new(PhoneMarketing, "Store", 1024.0, &[1.0]),
        // Watch
        watch("Notification", Role::NotificationCenter, 24.0, &[2.0]).with_subtype(Subtype::Mm38),
        watch("Notification", Role::NotificationCenter, 27.5, &[2.0]).with_subtype(Subtype::Mm42),
        watch("Settings", Role::CompanionSettings, 29.0, &[2.0, 3.0]),
        watch("App", Role::AppLauncher, 40.0, &[2.0]).with_subtype(Subtype::Mm38),
        watch("App", Role::AppLauncher, 44.0, &[2.0]).with_subtype(Subtype::Mm40),
        watch("App", Role::AppLauncher, 50.0, &[2.0]).with_subtype(Subtype::Mm44),
        watch("QuickLook", Role::QuickLook, 86.0, &[2.0]).with_subtype(Subtype::Mm38),
        watch("QuickLook", Role::QuickLook, 98.0, &[2.0]).with_subtype(Subtype::Mm42),
        watch("QuickLook", Role::QuickLook, 108.0, &[2.0]).with_subtype(Subtype::Mm44),
        Variant::new(WatchMarketing, "Store", 1024.0, &[1.0]),
        // Desktop
        Variant::new(Desktop, "16pt", 16.0, &[1.0, 2.0]),
        Variant::new(Desktop, "32pt", 32.0, &[1.0, 2.0]),
        Variant::new(Desktop, "128pt", 128.0, &[1.0, 2.0]),
        Variant::new(Desktop, "256pt", 256.0, &[1.0, 2.0]),
        Variant::new(Desktop, "512pt", 512.0, &[1.0, 2.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_valid() {
        let table = IconTable::standard();
        assert!(validate(table.variants()).is_ok());
        assert_eq!(IconTable::default(), table);
    }

    #[test]
    fn standard_filenames_are_unique() {
        let table = IconTable::standard();
        let names: HashSet<_> = table
            .units()
            .map(|(v, s)| naming::filename(v, s))
            .collect();
        assert_eq!(names.len(), table.unit_count());
    }

    #[test]
    fn standard_pixel_sizes_are_positive() {
        for (variant, scale) in IconTable::standard().units() {
            assert!(variant.pixel_size(scale) > 0, "{}", variant.name);
        }
    }

    #[test]
    fn unit_count_sums_scale_sets() {
        let table = IconTable::standard();
        assert_eq!(table.unit_count(), table.units().count());
        assert_eq!(table.unit_count(), 43);
    }

    #[test]
    fn units_follow_table_order() {
        let table = IconTable::standard();
        let first: Vec<_> = table
            .units()
            .take(3)
            .map(|(v, s)| naming::filename(v, s))
            .collect();
        assert_eq!(
            first,
            [
                "phone-Notification-20@2x.png",
                "phone-Notification-20@3x.png",
                "phone-Settings-29@2x.png",
            ]
        );

        let (last, scale) = table.units().last().unwrap();
        assert_eq!(naming::filename(last, scale), "desktop-512pt-512@2x.png");
    }

    #[test]
    fn desktop_sizes_form_the_expected_progression() {
        let sizes: Vec<f64> = IconTable::standard()
            .variants()
            .iter()
            .filter(|v| v.platform == Platform::Desktop)
            .map(|v| v.logical_size)
            .collect();
        assert_eq!(sizes, [16.0, 32.0, 128.0, 256.0, 512.0]);
    }

    #[test]
    fn rejects_duplicate_filenames() {
        let err = IconTable::new(vec![
            Variant::new(Platform::Phone, "App", 60.0, &[2.0, 3.0]),
            Variant::new(Platform::Phone, "App", 60.0, &[2.0, 3.0]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::DuplicateFilename { ref filename } if filename == "phone-App-60@2x.png"
        ));
    }

    #[test]
    fn rejects_role_outside_watch() {
        let err = IconTable::new(vec![
            Variant::new(Platform::Phone, "App", 60.0, &[2.0]).with_role(Role::AppLauncher),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::WatchOnlyField { .. }));
    }

    #[test]
    fn rejects_bad_numbers() {
        let no_scales = IconTable::new(vec![Variant::new(Platform::Phone, "A", 20.0, &[])]);
        assert!(matches!(no_scales, Err(TableError::NoScales { .. })));

        let zero_size = IconTable::new(vec![Variant::new(Platform::Phone, "A", 0.0, &[1.0])]);
        assert!(matches!(zero_size, Err(TableError::InvalidSize { .. })));

        let negative_scale =
            IconTable::new(vec![Variant::new(Platform::Phone, "A", 20.0, &[-1.0])]);
        assert!(matches!(negative_scale, Err(TableError::InvalidScale { .. })));

        let tiny = IconTable::new(vec![Variant::new(Platform::Phone, "A", 0.2, &[1.0])]);
        assert!(matches!(tiny, Err(TableError::DegeneratePixelSize { .. })));

        let huge = IconTable::new(vec![Variant::new(Platform::Desktop, "Huge", 100_000.0, &[2.0])]);
        assert!(matches!(
            huge,
            Err(TableError::PixelSizeTooLarge {
                pixels: 200_000,
                max: MAX_PIXEL_SIZE,
                ..
            })
        ));

        let at_limit = IconTable::new(vec![Variant::new(Platform::Desktop, "Max", 8192.0, &[2.0])]);
        assert!(at_limit.is_ok());

        assert!(matches!(IconTable::new(vec![]), Err(TableError::Empty)));
    }

    #[test]
    fn table_from_json() {
        let json = r#"[
            { "platform": "desktop", "name": "16pt", "logicalSize": 16, "scales": [1, 2] },
            { "platform": "watch-marketing", "name": "Store", "logicalSize": 1024, "scales": [1] }
        ]"#;
        let table = IconTable::from_json(json).unwrap();
        assert_eq!(table.variants().len(), 2);
        assert_eq!(table.unit_count(), 3);
        assert_eq!(table.variants()[1].platform, Platform::WatchMarketing);
    }

    #[test]
    fn table_json_roundtrip() {
        let table = IconTable::standard();
        let json = table.to_json_pretty().unwrap();
        assert_eq!(IconTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            IconTable::from_json("{ not json"),
            Err(TableError::Parse(_))
        ));
    }
}
