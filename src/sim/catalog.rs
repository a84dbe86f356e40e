//! Building catalog
//!
//! The fixed set of obstacle variants a session may spawn. Dimensions belong
//! to the variant; nothing about a building's size is randomized.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a variant inside its [`Catalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantId(pub usize);

/// One kind of building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleVariant {
    /// Stable name, unique within a catalog
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// Visual reference handed to the renderer
    pub asset: String,
}

impl ObstacleVariant {
    pub fn new(name: impl Into<String>, width: f32, height: f32, asset: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            asset: asset.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    Empty,
    InvalidDimensions { name: String, width: f32, height: f32 },
    DuplicateName { name: String },
    Parse { message: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "catalog has no variants"),
            Self::InvalidDimensions {
                name,
                width,
                height,
            } => write!(f, "variant {name} has invalid size {width}x{height}"),
            Self::DuplicateName { name } => write!(f, "variant name {name} appears twice"),
            Self::Parse { message } => write!(f, "catalog parse error: {message}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable, validated list of variants. The first entry is the opener.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    variants: Vec<ObstacleVariant>,
}

/// (asset, width, height) of the stock buildings
const REFERENCE_BUILDINGS: [(&str, f32, f32); 11] = [
    ("building1.png", 85.0, 68.0),
    ("building2.png", 94.0, 94.0),
    ("building3.png", 105.0, 77.0),
    ("building4.png", 34.0, 126.0),
    ("building5.png", 112.0, 94.0),
    ("building6.png", 94.0, 85.0),
    ("building7.png", 100.0, 101.0),
    ("building8.png", 201.0, 102.0),
    ("building9.png", 133.0, 111.0),
    ("building10.png", 128.0, 128.0),
    ("building11.png", 95.0, 95.0),
];

impl Catalog {
    pub fn new(variants: Vec<ObstacleVariant>) -> Result<Self, CatalogError> {
        if variants.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for v in &variants {
            // Also rejects NaN
            if !(v.width > 0.0 && v.height > 0.0) {
                return Err(CatalogError::InvalidDimensions {
                    name: v.name.clone(),
                    width: v.width,
                    height: v.height,
                });
            }
            if !seen.insert(v.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    name: v.name.clone(),
                });
            }
        }

        Ok(Self { variants })
    }

    /// The eleven stock buildings
    pub fn reference() -> Self {
        let variants = REFERENCE_BUILDINGS
            .iter()
            .enumerate()
            .map(|(i, (asset, w, h))| {
                ObstacleVariant::new(format!("building{}", i + 1), *w, *h, *asset)
            })
            .collect();
        Self { variants }
    }

    /// Load a catalog from a JSON array of variants
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let variants: Vec<ObstacleVariant> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse {
                message: e.to_string(),
            })?;
        Self::new(variants)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn get(&self, id: VariantId) -> Option<&ObstacleVariant> {
        self.variants.get(id.0)
    }

    /// Variant forced as the first spawn of every session
    pub fn opener(&self) -> VariantId {
        VariantId(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariantId, &ObstacleVariant)> {
        self.variants
            .iter()
            .enumerate()
            .map(|(i, v)| (VariantId(i), v))
    }
}
