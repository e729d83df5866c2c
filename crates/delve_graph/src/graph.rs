//! Graph structure and builder API.
//!
//! The [`DungeonGraph`] owns every vertex and edge of a dungeon. Handles
//! returned by the builder methods are tagged with the issuing graph, and
//! every method taking a handle checks that tag.

use core::borrow::Borrow;
use core::fmt::Debug;
use core::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

use hashbrown::HashMap;

use crate::edge::{Edge, EdgeId, Weight};
use crate::feature::{EdgeFeature, FeatureError};
use crate::inventory::{Inventory, ItemId};
use crate::vertex::{GraphTag, Vertex, VertexId};

/// Process-wide counter for graph instance tags.
static NEXT_GRAPH_TAG: AtomicUsize = AtomicUsize::new(0);

fn allocate_tag() -> GraphTag {
    GraphTag(NEXT_GRAPH_TAG.fetch_add(1, Ordering::Relaxed))
}

/// Errors raised by graph construction and lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex handle was issued by a different graph.
    #[error("{vertex} belongs to {owner}, not to {graph}")]
    ForeignVertex {
        /// The offending handle.
        vertex: VertexId,
        /// The graph that issued the handle.
        owner: GraphTag,
        /// The graph it was passed to.
        graph: GraphTag,
    },

    /// An edge handle was issued by a different graph.
    #[error("{edge} belongs to {owner}, not to {graph}")]
    ForeignEdge {
        /// The offending handle.
        edge: EdgeId,
        /// The graph that issued the handle.
        owner: GraphTag,
        /// The graph it was passed to.
        graph: GraphTag,
    },

    /// A vertex identifier was added twice.
    #[error("duplicate vertex identifier: {0}")]
    DuplicateVertex(String),

    /// A feature or item failed validation.
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// A dungeon: rooms connected by directed, possibly gated passages.
///
/// `V` is the caller's vertex identifier type (room names, coordinates...).
/// Edges are directed as constructed; use
/// [`add_bidirectional_edge`](Self::add_bidirectional_edge) for two-way
/// passages.
///
/// # Example
///
/// ```
/// use delve_graph::feature::EdgeFeature;
/// use delve_graph::graph::DungeonGraph;
/// use delve_graph::inventory::ItemId;
///
/// let mut graph = DungeonGraph::new();
/// let hall = graph.add_vertex("hall").unwrap();
/// let vault = graph
///     .add_vertex_with_items("vault", [ItemId::new("FireKey").unwrap()])
///     .unwrap();
/// graph.add_edge(hall, vault, 3, EdgeFeature::Plain).unwrap();
///
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug)]
pub struct DungeonGraph<V> {
    /// Instance tag stamped on every issued handle.
    tag: GraphTag,
    /// All vertices, indexed by `VertexId::index`.
    vertices: Vec<Vertex<V>>,
    /// All edges, indexed by `EdgeId::index`.
    edges: Vec<Edge>,
    /// Outgoing edge indices per vertex.
    outgoing: Vec<Vec<usize>>,
    /// Identifier lookup.
    by_key: HashMap<V, VertexId>,
}

impl<V> Default for DungeonGraph<V>
where
    V: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DungeonGraph<V>
where
    V: Eq + Hash + Clone + Debug,
{
    /// Creates a new empty graph with a fresh instance tag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: allocate_tag(),
            vertices: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Returns this graph's instance tag.
    #[must_use]
    pub fn tag(&self) -> GraphTag {
        self.tag
    }

    /// Returns all vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex<V>] {
        &self.vertices
    }

    /// Returns all edges.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder API
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a vertex that grants no items.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `key` is already present.
    pub fn add_vertex(&mut self, key: V) -> Result<VertexId, GraphError> {
        self.add_vertex_with_items(key, Vec::new())
    }

    /// Adds a vertex granting `items` to an agent on first visit.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `key` is already present.
    pub fn add_vertex_with_items<I>(&mut self, key: V, items: I) -> Result<VertexId, GraphError>
    where
        I: IntoIterator<Item = ItemId>,
    {
        if self.by_key.contains_key(&key) {
            return Err(GraphError::DuplicateVertex(format!("{key:?}")));
        }

        let id = VertexId {
            graph: self.tag,
            index: self.vertices.len(),
        };
        let items: Vec<ItemId> = items.into_iter().collect();
        tracing::trace!(vertex = %id, key = ?key, items = items.len(), "vertex added");

        self.by_key.insert(key.clone(), id);
        self.vertices.push(Vertex { id, key, items });
        self.outgoing.push(Vec::new());
        Ok(id)
    }

    /// Adds a directed edge `source -> target`.
    ///
    /// The feature is stored as given and never mutated afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignVertex`] if either endpoint was issued
    /// by another graph.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        weight: Weight,
        feature: impl Into<EdgeFeature>,
    ) -> Result<EdgeId, GraphError> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;

        let id = EdgeId {
            graph: self.tag,
            index: self.edges.len(),
        };
        let feature = feature.into();
        tracing::trace!(edge = %id, %source, %target, weight, kind = %feature.kind(), "edge added");

        self.edges.push(Edge {
            id,
            source,
            target,
            weight,
            feature,
        });
        self.outgoing[source.index].push(id.index);
        Ok(id)
    }

    /// Adds a pair of edges `a -> b` and `b -> a` sharing weight and feature.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignVertex`] if either endpoint was issued
    /// by another graph.
    pub fn add_bidirectional_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        weight: Weight,
        feature: impl Into<EdgeFeature>,
    ) -> Result<(EdgeId, EdgeId), GraphError> {
        let feature = feature.into();
        let forward = self.add_edge(a, b, weight, feature.clone())?;
        let backward = self.add_edge(b, a, weight, feature)?;
        Ok((forward, backward))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks that `vertex` was issued by this graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignVertex`] otherwise.
    pub fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if vertex.graph != self.tag || vertex.index >= self.vertices.len() {
            return Err(GraphError::ForeignVertex {
                vertex,
                owner: vertex.graph,
                graph: self.tag,
            });
        }
        Ok(())
    }

    /// Returns `true` if `vertex` was issued by this graph.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.check_vertex(vertex).is_ok()
    }

    /// Returns `true` if `edge` was issued by this graph.
    #[must_use]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        edge.graph == self.tag && edge.index < self.edges.len()
    }

    /// Gets a vertex by handle.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignVertex`] for handles from another graph.
    pub fn vertex(&self, vertex: VertexId) -> Result<&Vertex<V>, GraphError> {
        self.check_vertex(vertex)?;
        Ok(&self.vertices[vertex.index])
    }

    /// Gets an edge by handle.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignEdge`] for handles from another graph.
    pub fn edge(&self, edge: EdgeId) -> Result<&Edge, GraphError> {
        if !self.contains_edge(edge) {
            return Err(GraphError::ForeignEdge {
                edge,
                owner: edge.graph,
                graph: self.tag,
            });
        }
        Ok(&self.edges[edge.index])
    }

    /// Looks up a vertex handle by its identifier, or any borrowed form of
    /// it (`&str` for `String` keys).
    #[must_use]
    pub fn vertex_by_key<Q>(&self, key: &Q) -> Option<VertexId>
    where
        V: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.by_key.get(key).copied()
    }

    /// Enumerates the edges leaving `vertex`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ForeignVertex`] for handles from another graph.
    pub fn out_edges(&self, vertex: VertexId) -> Result<impl Iterator<Item = &Edge>, GraphError> {
        self.check_vertex(vertex)?;
        Ok(self.outgoing[vertex.index]
            .iter()
            .map(|&index| &self.edges[index]))
    }

    /// Every item any vertex can grant: the finite universe the solver's
    /// inventory can grow into.
    #[must_use]
    pub fn grantable_items(&self) -> Inventory {
        self.vertices
            .iter()
            .flat_map(|vertex| vertex.items.iter().cloned())
            .collect()
    }
}
