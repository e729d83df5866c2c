//! Shared test utilities for `delve_graph` integration tests.
//!
//! This module provides common dungeon fixtures used across multiple test
//! files. Import via `mod test_utils;` in test files.

#![allow(
    dead_code,
    missing_docs,
    reason = "shared test utilities, not all items used in every test binary"
)]

use delve_graph::edge::{Edge, EdgeId, Weight};
use delve_graph::feature::EdgeFeature;
use delve_graph::graph::DungeonGraph;
use delve_graph::inventory::{Inventory, ItemId};
use delve_graph::vertex::VertexId;

// ═══════════════════════════════════════════════════════════════════════════════
// ITEMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Builds a validated item.
pub fn item(name: &str) -> ItemId {
    ItemId::new(name).expect("valid item name")
}

/// Builds an inventory holding `names`.
pub fn holding(names: &[&str]) -> Inventory {
    names.iter().map(|name| item(name)).collect()
}

pub fn door(key: &str) -> EdgeFeature {
    EdgeFeature::door(key).expect("valid door")
}

/// The swamp from the default terrain catalog.
pub fn swamp() -> EdgeFeature {
    EdgeFeature::terrain("Swamp", 2, "SwampBoots").expect("valid terrain")
}

// ═══════════════════════════════════════════════════════════════════════════════
// GRAPH FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

/// A two-vertex graph `A -> B` with a single edge.
pub struct SingleEdge {
    pub graph: DungeonGraph<&'static str>,
    pub edge: EdgeId,
}

impl SingleEdge {
    pub fn new(weight: Weight, feature: EdgeFeature) -> Self {
        let mut graph = DungeonGraph::new();
        let a = graph.add_vertex("A").expect("vertex A");
        let b = graph.add_vertex("B").expect("vertex B");
        let edge = graph.add_edge(a, b, weight, feature).expect("edge A->B");
        Self { graph, edge }
    }

    pub fn edge(&self) -> &Edge {
        self.graph.edge(self.edge).expect("edge exists")
    }
}

/// Room declaration for [`chain`]: name and granted items.
pub type Room = (&'static str, &'static [&'static str]);

/// Builds `rooms[0] -> rooms[1] -> ...` where `links[i]` joins room `i` to
/// room `i + 1`. Returns the graph and the room handles in order.
pub fn chain(
    rooms: &[Room],
    links: &[(Weight, EdgeFeature)],
) -> (DungeonGraph<&'static str>, Vec<VertexId>) {
    assert_eq!(links.len() + 1, rooms.len(), "one link between each room");

    let mut graph = DungeonGraph::new();
    let ids: Vec<VertexId> = rooms
        .iter()
        .map(|(name, items)| {
            graph
                .add_vertex_with_items(*name, items.iter().map(|i| item(i)))
                .expect("unique room")
        })
        .collect();

    for (pair, (weight, feature)) in ids.windows(2).zip(links) {
        graph
            .add_edge(pair[0], pair[1], *weight, feature.clone())
            .expect("edge");
    }

    (graph, ids)
}
