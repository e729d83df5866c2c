//! Edge types for dungeon graphs.
//!
//! Edges are directed passages between rooms. Each has a base weight and an
//! immutable [`EdgeFeature`] describing what gates it.

use core::fmt;

use crate::feature::{EdgeFeature, FeatureKind};
use crate::vertex::{GraphTag, VertexId};

/// Cost of crossing an edge.
pub type Weight = u64;

/// Handle to an edge in a [`DungeonGraph`](crate::graph::DungeonGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    pub(crate) graph: GraphTag,
    pub(crate) index: usize,
}

impl EdgeId {
    /// Returns the dense index of this edge within its graph.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the tag of the graph that issued this handle.
    #[must_use]
    pub fn graph(&self) -> GraphTag {
        self.graph
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge_{}", self.index)
    }
}

/// A directed passage: `source -> target`.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Unique identifier for this edge.
    pub(crate) id: EdgeId,
    /// Source vertex.
    pub(crate) source: VertexId,
    /// Destination vertex.
    pub(crate) target: VertexId,
    /// Cost before any policy adjustments.
    pub(crate) weight: Weight,
    /// What gates this edge.
    pub(crate) feature: EdgeFeature,
}

impl Edge {
    /// Returns the edge's ID.
    #[must_use]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns the source vertex.
    #[must_use]
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the target vertex.
    #[must_use]
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Returns the base weight.
    #[must_use]
    pub fn base_weight(&self) -> Weight {
        self.weight
    }

    /// Returns the feature payload.
    #[must_use]
    pub fn feature(&self) -> &EdgeFeature {
        &self.feature
    }

    /// Returns the feature's kind.
    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        self.feature.kind()
    }
}
