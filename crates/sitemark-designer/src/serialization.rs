//! Layout records.
//!
//! A [`LayoutRecord`] is the persisted form of a scene: every entity
//! collection, the image scale as pixels per meter and an opaque
//! background reference. Records are JSON; the engine never owns the
//! storage transaction, it only produces and consumes records. The
//! [`LayoutStore`] trait is the seam the surrounding application plugs its
//! storage into; [`JsonFileStore`] keeps one file per layout.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sitemark_core::constants::{LAYOUT_FORMAT_VERSION, MIN_LINE_POINTS, MIN_ROOF_POINTS};
use sitemark_core::{EntityId, LayoutError};

use crate::model::{EquipmentItem, PlacedMaterial, PvArrayItem, RoofMask, SupplyLine};

/// Opaque reference to the background image (a URI, storage key or path).
/// The engine hands it back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackgroundRef(pub String);

impl BackgroundRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl LayoutMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created: now,
            modified: now,
            description: String::new(),
        }
    }
}

/// Persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub version: String,
    pub metadata: LayoutMetadata,
    #[serde(default)]
    pub roof_masks: Vec<RoofMask>,
    #[serde(default)]
    pub pv_arrays: Vec<PvArrayItem>,
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,
    #[serde(default)]
    pub lines: Vec<SupplyLine>,
    #[serde(default)]
    pub placed_walkways: Vec<PlacedMaterial>,
    #[serde(default)]
    pub placed_cable_trays: Vec<PlacedMaterial>,
    /// Image scale; absent or 0 means the layout was never calibrated.
    #[serde(default, rename = "scale_pixels_per_meter")]
    pub scale_pixels_per_meter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundRef>,
}

impl LayoutRecord {
    /// Empty record with fresh metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LAYOUT_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata::new(name),
            roof_masks: Vec::new(),
            pv_arrays: Vec::new(),
            equipment: Vec::new(),
            lines: Vec::new(),
            placed_walkways: Vec::new(),
            placed_cable_trays: Vec::new(),
            scale_pixels_per_meter: None,
            background: None,
        }
    }

    /// Checks the format version, id uniqueness and minimum point counts.
    pub fn validate(&self) -> sitemark_core::Result<()> {
        let major = |v: &str| v.split('.').next().unwrap_or("").to_string();
        if major(&self.version) != major(LAYOUT_FORMAT_VERSION) {
            return Err(LayoutError::UnsupportedVersion {
                found: self.version.clone(),
                expected: LAYOUT_FORMAT_VERSION.to_string(),
            }
            .into());
        }

        unique_ids("roofMasks", self.roof_masks.iter().map(|m| &m.id))?;
        unique_ids("pvArrays", self.pv_arrays.iter().map(|a| &a.id))?;
        unique_ids("equipment", self.equipment.iter().map(|e| &e.id))?;
        unique_ids("lines", self.lines.iter().map(|l| &l.id))?;
        unique_ids("placedWalkways", self.placed_walkways.iter().map(|w| &w.id))?;
        unique_ids("placedCableTrays", self.placed_cable_trays.iter().map(|t| &t.id))?;

        for mask in &self.roof_masks {
            if mask.points.len() < MIN_ROOF_POINTS {
                return Err(LayoutError::TooFewPoints {
                    collection: "roofMasks".to_string(),
                    id: mask.id.to_string(),
                    found: mask.points.len(),
                    required: MIN_ROOF_POINTS,
                }
                .into());
            }
        }
        for line in &self.lines {
            if line.points.len() < MIN_LINE_POINTS {
                return Err(LayoutError::TooFewPoints {
                    collection: "lines".to_string(),
                    id: line.id.to_string(),
                    found: line.points.len(),
                    required: MIN_LINE_POINTS,
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> sitemark_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> sitemark_core::Result<Self> {
        let record: LayoutRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    /// Save record to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize layout")?;
        std::fs::write(path.as_ref(), json).context("Failed to write layout file")?;
        Ok(())
    }

    /// Load record from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read layout file")?;
        let record = Self::from_json(&content)
            .with_context(|| format!("Invalid layout file {}", path.as_ref().display()))?;
        Ok(record)
    }
}

fn unique_ids<'a>(
    collection: &str,
    ids: impl Iterator<Item = &'a EntityId>,
) -> sitemark_core::Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LayoutError::DuplicateId {
                collection: collection.to_string(),
                id: id.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Storage backend for layout records, keyed by layout name.
pub trait LayoutStore {
    fn load(&self, name: &str) -> Result<LayoutRecord>;

    fn save(&self, name: &str, record: &LayoutRecord) -> Result<()>;

    fn list(&self) -> Result<Vec<String>>;
}

/// Stores each layout as `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }
}

impl LayoutStore for JsonFileStore {
    fn load(&self, name: &str) -> Result<LayoutRecord> {
        LayoutRecord::load_from_file(self.path_for(name))
    }

    fn save(&self, name: &str, record: &LayoutRecord) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create {}", self.root.display()))?;
        let mut record = record.clone();
        record.metadata.modified = Utc::now();
        record.save_to_file(self.path_for(name))?;
        tracing::debug!("Saved layout '{}' to {}", name, self.root.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list {}", self.root.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
