//! Edge features: the payload describing what, if anything, gates an edge.
//!
//! The set of features is closed. Policies match on [`EdgeFeature`]
//! explicitly, with a catch-all arm for features they don't handle.

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::edge::Weight;
use crate::inventory::ItemId;

/// Errors raised while constructing features or items.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    /// An item identifier was empty.
    #[error("item identifier must not be empty")]
    EmptyItem,

    /// A door was created without a key.
    #[error("door requires a non-empty key item")]
    EmptyKey,

    /// A terrain feature was created without a terrain type.
    #[error("terrain type must not be empty")]
    EmptyTerrainKind,

    /// A terrain feature was created without a mitigating item.
    #[error("terrain '{kind}' requires a non-empty mitigating item")]
    EmptyMitigator {
        /// The terrain type being constructed.
        kind: String,
    },

    /// A terrain type was requested that the catalog doesn't know.
    #[error("unknown terrain type: {0}")]
    UnknownTerrain(String),
}

/// Discriminant of an [`EdgeFeature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// A locked door.
    Door,
    /// Hazardous terrain.
    Terrain,
    /// No constraint.
    Plain,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Door => f.write_str("door"),
            FeatureKind::Terrain => f.write_str("terrain"),
            FeatureKind::Plain => f.write_str("plain"),
        }
    }
}

/// What gates an edge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EdgeFeature {
    /// Passable only with the door's key.
    Door(Door),
    /// Always passable, but costly without the mitigating item.
    Terrain(Terrain),
    /// No constraint and no penalty.
    #[default]
    Plain,
}

impl EdgeFeature {
    /// Returns the feature's kind.
    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        match self {
            EdgeFeature::Door(_) => FeatureKind::Door,
            EdgeFeature::Terrain(_) => FeatureKind::Terrain,
            EdgeFeature::Plain => FeatureKind::Plain,
        }
    }

    /// Shorthand for a door feature requiring `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::EmptyKey`] if `key` is blank.
    pub fn door(key: &str) -> Result<Self, FeatureError> {
        Door::new(key).map(EdgeFeature::Door)
    }

    /// Shorthand for a terrain feature.
    ///
    /// # Errors
    ///
    /// See [`Terrain::new`].
    pub fn terrain(kind: &str, penalty: Weight, mitigator: &str) -> Result<Self, FeatureError> {
        Terrain::new(kind, penalty, mitigator).map(EdgeFeature::Terrain)
    }
}

impl From<Door> for EdgeFeature {
    fn from(door: Door) -> Self {
        EdgeFeature::Door(door)
    }
}

impl From<Terrain> for EdgeFeature {
    fn from(terrain: Terrain) -> Self {
        EdgeFeature::Terrain(terrain)
    }
}

/// A locked door that requires exactly one key item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Door {
    key: ItemId,
}

impl Door {
    /// Creates a door requiring `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::EmptyKey`] if `key` is blank.
    pub fn new(key: &str) -> Result<Self, FeatureError> {
        let key = ItemId::new(key).map_err(|_| FeatureError::EmptyKey)?;
        Ok(Self { key })
    }

    /// Creates a door from an already validated item.
    #[must_use]
    pub fn with_key(key: ItemId) -> Self {
        Self { key }
    }

    /// The item required to open this door.
    #[must_use]
    pub fn key(&self) -> &ItemId {
        &self.key
    }
}

/// Hazardous terrain that adds a penalty unless the agent holds the
/// mitigating item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Terrain {
    kind: Arc<str>,
    penalty: Weight,
    mitigator: ItemId,
}

impl Terrain {
    /// Creates a terrain feature.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::EmptyTerrainKind`] or
    /// [`FeatureError::EmptyMitigator`] when either name is blank.
    pub fn new(kind: &str, penalty: Weight, mitigator: &str) -> Result<Self, FeatureError> {
        if kind.trim().is_empty() {
            return Err(FeatureError::EmptyTerrainKind);
        }
        let mitigator = ItemId::new(mitigator).map_err(|_| FeatureError::EmptyMitigator {
            kind: kind.to_owned(),
        })?;
        Ok(Self {
            kind: kind.into(),
            penalty,
            mitigator,
        })
    }

    /// The terrain type tag, e.g. `"Swamp"`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Extra cost added when the mitigating item is missing.
    #[must_use]
    pub fn penalty(&self) -> Weight {
        self.penalty
    }

    /// The item that nullifies the penalty.
    #[must_use]
    pub fn mitigator(&self) -> &ItemId {
        &self.mitigator
    }
}

/// Penalty and mitigating item for a named terrain type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainPreset {
    /// Extra cost when unmitigated.
    pub penalty: Weight,
    /// The item that nullifies the penalty.
    pub mitigator: ItemId,
}

/// Named terrain presets, so maps can say `"Swamp"` instead of spelling out
/// the penalty and mitigating item every time.
///
/// The terrain type [`TerrainCatalog::NORMAL`] always resolves to
/// [`EdgeFeature::Plain`].
///
/// Deserialized catalogs go through [`register`](Self::register), so a
/// blank terrain type is rejected while loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<String, TerrainPreset>",
    into = "HashMap<String, TerrainPreset>"
)]
pub struct TerrainCatalog {
    presets: HashMap<String, TerrainPreset>,
}

impl TerrainCatalog {
    /// Terrain type meaning "nothing special".
    pub const NORMAL: &'static str = "Normal";

    /// Creates a catalog with no presets.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            presets: HashMap::new(),
        }
    }

    /// Registers (or replaces) a preset.
    ///
    /// # Errors
    ///
    /// Returns an error if `kind` or `mitigator` is blank.
    pub fn register(
        &mut self,
        kind: &str,
        penalty: Weight,
        mitigator: &str,
    ) -> Result<&mut Self, FeatureError> {
        let terrain = Terrain::new(kind, penalty, mitigator)?;
        self.presets.insert(
            kind.to_owned(),
            TerrainPreset {
                penalty: terrain.penalty,
                mitigator: terrain.mitigator,
            },
        );
        Ok(self)
    }

    /// Looks up a preset by terrain type.
    #[must_use]
    pub fn preset(&self, kind: &str) -> Option<&TerrainPreset> {
        self.presets.get(kind)
    }

    /// Resolves a terrain type into an edge feature.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::UnknownTerrain`] for unregistered types.
    pub fn feature(&self, kind: &str) -> Result<EdgeFeature, FeatureError> {
        if kind == Self::NORMAL {
            return Ok(EdgeFeature::Plain);
        }
        let preset = self
            .presets
            .get(kind)
            .ok_or_else(|| FeatureError::UnknownTerrain(kind.to_owned()))?;
        Ok(EdgeFeature::Terrain(Terrain {
            kind: kind.into(),
            penalty: preset.penalty,
            mitigator: preset.mitigator.clone(),
        }))
    }
}

impl TryFrom<HashMap<String, TerrainPreset>> for TerrainCatalog {
    type Error = FeatureError;

    fn try_from(presets: HashMap<String, TerrainPreset>) -> Result<Self, Self::Error> {
        let mut catalog = Self::empty();
        for (kind, preset) in presets {
            catalog.register(&kind, preset.penalty, preset.mitigator.as_str())?;
        }
        Ok(catalog)
    }
}

impl From<TerrainCatalog> for HashMap<String, TerrainPreset> {
    fn from(catalog: TerrainCatalog) -> Self {
        catalog.presets
    }
}

impl Default for TerrainCatalog {
    fn default() -> Self {
        let mut presets = HashMap::new();
        presets.insert(
            "Swamp".to_owned(),
            TerrainPreset {
                penalty: 2,
                mitigator: ItemId(Arc::from("SwampBoots")),
            },
        );
        Self { presets }
    }
}
