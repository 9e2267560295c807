//! Asset catalog manifest documents.
//!
//! Each run produces two `Contents.json` documents: one inside the icon set
//! directory listing every image, and one at the catalog root that carries
//! only the info block.
//!
//! ```json
//! {
//!   "images": [
//!     { "size": "20x20", "idiom": "iphone", "filename": "phone-Notification-20@2x.png", "scale": "2x" }
//!   ],
//!   "info": { "version": 1, "author": "xcode" }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Manifest format version written to every info block.
pub const FORMAT_VERSION: u32 = 1;

/// Basename of both manifest documents.
pub const MANIFEST_FILENAME: &str = "Contents.json";

// ============================================================================
// Document Types
// ============================================================================

/// One rendered image as listed in the icon set manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// `"LxL"` in logical points.
    pub size: String,

    /// Platform token, e.g. `"iphone"` or `"ios-marketing"`.
    pub idiom: String,

    pub filename: String,

    /// `"Nx"`.
    pub scale: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub version: u32,
    pub author: String,
}

impl CatalogInfo {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            version: FORMAT_VERSION,
            author: author.into(),
        }
    }
}

/// The per-icon-set manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGroupContents {
    pub images: Vec<ManifestEntry>,
    pub info: CatalogInfo,
}

/// The catalog root manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogContents {
    pub info: CatalogInfo,
}

impl AssetGroupContents {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl CatalogContents {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// ManifestBuilder
// ============================================================================

/// Collects manifest entries in rendering order.
///
/// A builder belongs to exactly one run; the pipeline creates a fresh one
/// per invocation so nothing carries over between runs.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    entries: Vec<ManifestEntry>,
    info: CatalogInfo,
}

impl ManifestBuilder {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            info: CatalogInfo::new(author),
        }
    }

    /// Appends an entry after all previously pushed ones.
    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the builder and returns the icon set and catalog documents.
    pub fn finish(self) -> (AssetGroupContents, CatalogContents) {
        let catalog = CatalogContents {
            info: self.info.clone(),
        };
        let group = AssetGroupContents {
            images: self.entries,
            info: self.info,
        };
        (group, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(filename: &str, scale: &str) -> ManifestEntry {
        ManifestEntry {
            size: "16x16".into(),
            idiom: "mac".into(),
            filename: filename.into(),
            scale: scale.into(),
            role: None,
            subtype: None,
        }
    }

    #[test]
    fn builder_preserves_insertion_order() {
        let mut builder = ManifestBuilder::new("xcode");
        builder.push(entry("b.png", "2x"));
        builder.push(entry("a.png", "1x"));
        assert_eq!(builder.len(), 2);

        let (group, _) = builder.finish();
        let names: Vec<_> = group.images.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, ["b.png", "a.png"]);
    }

    #[test]
    fn group_document_shape() {
        let mut builder = ManifestBuilder::new("xcode");
        builder.push(ManifestEntry {
            role: Some("quickLook".into()),
            subtype: Some("38mm".into()),
            ..entry("watch.png", "2x")
        });
        builder.push(entry("mac.png", "1x"));
        let (group, _) = builder.finish();

        let value: serde_json::Value =
            serde_json::from_str(&group.to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["info"]["version"], 1);
        assert_eq!(value["info"]["author"], "xcode");
        assert_eq!(value["images"][0]["role"], "quickLook");
        assert_eq!(value["images"][0]["subtype"], "38mm");
        assert_eq!(value["images"][0]["size"], "16x16");
        assert_eq!(value["images"][0]["idiom"], "mac");
        assert_eq!(value["images"][0]["scale"], "2x");

        let plain = value["images"][1].as_object().unwrap();
        assert!(!plain.contains_key("role"));
        assert!(!plain.contains_key("subtype"));
        assert_eq!(plain.len(), 4);
    }

    #[test]
    fn catalog_document_has_only_info() {
        let (_, catalog) = ManifestBuilder::new("appiconset").finish();
        let value: serde_json::Value =
            serde_json::from_str(&catalog.to_json_pretty().unwrap()).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(value["info"]["author"], "appiconset");
        assert_eq!(value["info"]["version"], 1);
    }

    #[test]
    fn group_document_parses_back() {
        let mut builder = ManifestBuilder::new("xcode");
        builder.push(entry("a.png", "1x"));
        let (group, _) = builder.finish();

        let json = group.to_json_pretty().unwrap();
        assert_eq!(AssetGroupContents::from_json(&json).unwrap(), group);
    }
}
