//! Dungeon graphs and quest solvability for Delve.
//!
//! `delve_graph` models a dungeon as a weighted directed graph whose edges
//! may be gated (locked doors, hazardous terrain) and whose vertices hand out
//! items. The hard question it answers is whether an agent can reach a goal
//! when the set of usable edges grows with every item picked up.
//!
//! # Core Concepts
//!
//! - [`DungeonGraph`] - Rooms and passages with a builder API
//! - [`EdgeFeature`] - What gates a passage: `Door`, `Terrain` or `Plain`
//! - [`Inventory`] - The items an agent holds; only ever grows
//! - [`TraversalPolicy`] - Per-edge passability and cost rules
//! - [`CombinedPolicy`] - Several policies evaluated as one
//! - [`QuestSolver`] - Fixpoint reachability under a growing inventory
//! - [`DungeonBlueprint`] - Serializable dungeon descriptions
//!
//! # Example
//!
//! ```
//! use delve_graph::prelude::*;
//!
//! let mut graph = DungeonGraph::new();
//! let a = graph.add_vertex("A").unwrap();
//! let b = graph
//!     .add_vertex_with_items("B", [ItemId::new("FireKey").unwrap()])
//!     .unwrap();
//! let c = graph.add_vertex("C").unwrap();
//! let d = graph.add_vertex("D").unwrap();
//!
//! graph.add_edge(a, b, 2, EdgeFeature::Plain).unwrap();
//! graph.add_edge(b, c, 3, EdgeFeature::door("FireKey").unwrap()).unwrap();
//! graph.add_edge(c, d, 2, EdgeFeature::Plain).unwrap();
//!
//! assert!(is_quest_solvable(&graph, a, d, Inventory::new()).unwrap());
//! ```

/// Serializable dungeon and quest descriptions.
pub mod blueprint;

/// Edge types for connecting rooms.
pub mod edge;

/// Edge feature payloads and terrain presets.
pub mod feature;

/// Graph structure and builder API.
pub mod graph;

/// Items and the agent's inventory.
pub mod inventory;

/// Traversal policies.
pub mod policy;

/// Quest solvability.
pub mod solver;

/// Vertex types for rooms.
pub mod vertex;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::blueprint::{
        BlueprintError, DungeonBlueprint, EdgeBlueprint, FeatureBlueprint, QuestBlueprint,
        VertexBlueprint,
    };
    pub use crate::edge::{Edge, EdgeId, Weight};
    pub use crate::feature::{
        Door, EdgeFeature, FeatureError, FeatureKind, Terrain, TerrainCatalog, TerrainPreset,
    };
    pub use crate::graph::{DungeonGraph, GraphError};
    pub use crate::inventory::{Inventory, ItemId};
    pub use crate::policy::{
        BoxedPolicy, CombinedPolicy, DoorPolicy, TerrainPenaltyPolicy, TraversalPolicy,
    };
    pub use crate::solver::{
        QuestOutcome, QuestSolver, SolveError, SolverConfig, is_quest_solvable,
    };
    pub use crate::vertex::{GraphTag, Vertex, VertexId};
}

// Re-export key types at crate root for convenience
pub use blueprint::{DungeonBlueprint, QuestBlueprint};
pub use feature::EdgeFeature;
pub use graph::{DungeonGraph, GraphError};
pub use inventory::{Inventory, ItemId};
pub use policy::{CombinedPolicy, TraversalPolicy};
pub use solver::{QuestSolver, SolveError, is_quest_solvable};
pub use vertex::VertexId;
