//! Vertex types for dungeon graphs.
//!
//! Vertices are rooms. Each carries a caller-chosen identifier and the
//! items it grants to an agent on first visit.

use core::fmt;

use crate::inventory::ItemId;

/// Tag identifying which graph instance a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphTag(pub(crate) usize);

impl fmt::Display for GraphTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph_{}", self.0)
    }
}

/// Handle to a vertex in a [`DungeonGraph`](crate::graph::DungeonGraph).
///
/// Handles remember the graph that issued them, so passing a handle to a
/// different graph is reported as an error instead of silently aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId {
    pub(crate) graph: GraphTag,
    pub(crate) index: usize,
}

impl VertexId {
    /// Returns the dense index of this vertex within its graph.
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

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vertex_{}", self.index)
    }
}

/// A room in the dungeon.
#[derive(Debug, Clone)]
pub struct Vertex<V> {
    /// Handle of this vertex.
    pub(crate) id: VertexId,
    /// Caller-chosen identifier, unique within the graph.
    pub(crate) key: V,
    /// Items granted to an agent on first visit, in declaration order.
    pub(crate) items: Vec<ItemId>,
}

impl<V> Vertex<V> {
    /// Returns the vertex handle.
    #[must_use]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Returns the caller-chosen identifier.
    #[must_use]
    pub fn key(&self) -> &V {
        &self.key
    }

    /// Returns the granted items.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }
}
