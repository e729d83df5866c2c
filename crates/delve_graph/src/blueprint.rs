//! Serializable dungeon descriptions.
//!
//! A [`DungeonBlueprint`] is the configuration form of a [`DungeonGraph`]:
//! plain data that can be loaded from JSON and built into a graph. A
//! [`QuestBlueprint`] adds the start, goal, starting inventory and solver
//! settings needed to answer a solvability question.

use serde::{Deserialize, Serialize};

use crate::edge::Weight;
use crate::feature::{Door, EdgeFeature, FeatureError, Terrain, TerrainCatalog};
use crate::graph::{DungeonGraph, GraphError};
use crate::inventory::{Inventory, ItemId};
use crate::policy::CombinedPolicy;
use crate::solver::{QuestOutcome, QuestSolver, SolveError, SolverConfig};
use crate::vertex::VertexId;

/// Errors raised while loading or building a blueprint.
#[derive(Debug, thiserror::Error)]
pub enum BlueprintError {
    /// The JSON could not be parsed.
    #[error("invalid blueprint: {0}")]
    Parse(#[from] serde_json::Error),

    /// An edge or quest referenced a vertex that isn't declared.
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// A terrain entry gave only one of `penalty` and `mitigator`.
    #[error("terrain '{0}' must give both penalty and mitigator, or neither")]
    PartialTerrain(String),

    /// A feature failed validation.
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// Graph construction failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Solving failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// A vertex declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexBlueprint {
    /// Unique room name.
    pub id: String,
    /// Items granted on first visit.
    #[serde(default)]
    pub items: Vec<ItemId>,
}

/// An edge feature declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureBlueprint {
    /// Unconstrained passage.
    #[default]
    Plain,
    /// Locked door.
    Door {
        /// Required key.
        key: String,
    },
    /// Hazardous terrain; penalty and mitigator default to the catalog preset.
    Terrain {
        /// Terrain type tag.
        terrain: String,
        /// Explicit penalty.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        penalty: Option<Weight>,
        /// Explicit mitigating item.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mitigator: Option<String>,
    },
}

impl FeatureBlueprint {
    /// Resolves this declaration into an [`EdgeFeature`].
    ///
    /// # Errors
    ///
    /// Returns an error for blank names, unknown terrain, or a terrain entry
    /// with only one of `penalty`/`mitigator`.
    pub fn resolve(&self, catalog: &TerrainCatalog) -> Result<EdgeFeature, BlueprintError> {
        let feature = match self {
            FeatureBlueprint::Plain => EdgeFeature::Plain,
            FeatureBlueprint::Door { key } => Door::new(key)?.into(),
            FeatureBlueprint::Terrain {
                terrain,
                penalty: Some(penalty),
                mitigator: Some(mitigator),
            } => Terrain::new(terrain, *penalty, mitigator)?.into(),
            FeatureBlueprint::Terrain {
                terrain,
                penalty: None,
                mitigator: None,
            } => catalog.feature(terrain)?,
            FeatureBlueprint::Terrain { terrain, .. } => {
                return Err(BlueprintError::PartialTerrain(terrain.clone()));
            }
        };
        Ok(feature)
    }
}

/// An edge declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeBlueprint {
    /// Source room.
    pub from: String,
    /// Target room.
    pub to: String,
    /// Base weight.
    #[serde(default)]
    pub weight: Weight,
    /// What gates the edge.
    #[serde(default)]
    pub feature: FeatureBlueprint,
    /// Also add the reverse edge.
    #[serde(default)]
    pub bidirectional: bool,
}

/// A whole dungeon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonBlueprint {
    /// Rooms, in declaration order.
    #[serde(default)]
    pub vertices: Vec<VertexBlueprint>,
    /// Passages, in declaration order.
    #[serde(default)]
    pub edges: Vec<EdgeBlueprint>,
    /// Terrain presets used instead of the default catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<TerrainCatalog>,
}

impl DungeonBlueprint {
    /// Parses a blueprint from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Parse`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, BlueprintError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the graph, resolving terrain through the blueprint's own
    /// catalog if present, otherwise the default one.
    ///
    /// # Errors
    ///
    /// See [`build_with`](Self::build_with).
    pub fn build(&self) -> Result<DungeonGraph<String>, BlueprintError> {
        match &self.terrain {
            Some(catalog) => self.build_with(catalog),
            None => self.build_with(&TerrainCatalog::default()),
        }
    }

    /// Builds the graph using `catalog` for terrain presets.
    ///
    /// # Errors
    ///
    /// - [`BlueprintError::UnknownVertex`] for edges naming undeclared rooms
    /// - [`BlueprintError::Graph`] for duplicate room names
    /// - [`BlueprintError::Feature`] for invalid features
    pub fn build_with(
        &self,
        catalog: &TerrainCatalog,
    ) -> Result<DungeonGraph<String>, BlueprintError> {
        let mut graph = DungeonGraph::new();
        for vertex in &self.vertices {
            graph.add_vertex_with_items(vertex.id.clone(), vertex.items.iter().cloned())?;
        }

        for edge in &self.edges {
            let source = lookup(&graph, &edge.from)?;
            let target = lookup(&graph, &edge.to)?;
            let feature = edge.feature.resolve(catalog)?;
            if edge.bidirectional {
                graph.add_bidirectional_edge(source, target, edge.weight, feature)?;
            } else {
                graph.add_edge(source, target, edge.weight, feature)?;
            }
        }

        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "dungeon built from blueprint"
        );
        Ok(graph)
    }
}

fn lookup(graph: &DungeonGraph<String>, name: &str) -> Result<VertexId, BlueprintError> {
    graph
        .vertex_by_key(name)
        .ok_or_else(|| BlueprintError::UnknownVertex(name.to_owned()))
}

/// A complete solvability question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestBlueprint {
    /// The dungeon.
    pub dungeon: DungeonBlueprint,
    /// Starting room.
    pub start: String,
    /// Goal room.
    pub goal: String,
    /// Items held before entering.
    #[serde(default)]
    pub inventory: Inventory,
    /// Solver settings.
    #[serde(default)]
    pub solver: SolverConfig,
}

impl QuestBlueprint {
    /// Parses a quest from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Parse`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, BlueprintError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the dungeon and runs the solver with the standard policies.
    ///
    /// # Errors
    ///
    /// Returns any build error, [`BlueprintError::UnknownVertex`] for an
    /// undeclared start or goal, or a solver error.
    pub fn run(&self) -> Result<QuestOutcome, BlueprintError> {
        self.run_with(CombinedPolicy::standard())
    }

    /// Like [`run`](Self::run) with a caller-supplied policy.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with(&self, policy: CombinedPolicy) -> Result<QuestOutcome, BlueprintError> {
        let graph = self.dungeon.build()?;
        let start = lookup(&graph, &self.start)?;
        let goal = lookup(&graph, &self.goal)?;
        let solver = QuestSolver::new(policy).with_config(self.solver.clone());
        Ok(solver.solve(&graph, start, goal, self.inventory.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_blueprint_resolution() {
        let catalog = TerrainCatalog::default();
        assert_eq!(
            FeatureBlueprint::Plain.resolve(&catalog).unwrap(),
            EdgeFeature::Plain
        );
        assert_eq!(
            FeatureBlueprint::Door { key: "k".into() }
                .resolve(&catalog)
                .unwrap(),
            EdgeFeature::door("k").unwrap()
        );
        assert_eq!(
            FeatureBlueprint::Terrain {
                terrain: "Swamp".into(),
                penalty: None,
                mitigator: None,
            }
            .resolve(&catalog)
            .unwrap(),
            EdgeFeature::terrain("Swamp", 2, "SwampBoots").unwrap()
        );
        assert!(matches!(
            FeatureBlueprint::Terrain {
                terrain: "Lava".into(),
                penalty: Some(3),
                mitigator: None,
            }
            .resolve(&catalog),
            Err(BlueprintError::PartialTerrain(_))
        ));
        assert!(matches!(
            FeatureBlueprint::Door { key: String::new() }.resolve(&catalog),
            Err(BlueprintError::Feature(FeatureError::EmptyKey))
        ));
    }

    #[test]
    fn edge_defaults_to_plain_and_directed() {
        let edge: EdgeBlueprint = serde_json::from_str(r#"{"from": "A", "to": "B"}"#).unwrap();
        assert_eq!(edge.feature, FeatureBlueprint::Plain);
        assert_eq!(edge.weight, 0);
        assert!(!edge.bidirectional);
    }

    #[test]
    fn unknown_vertex_in_edge() {
        let blueprint = DungeonBlueprint::from_json(
            r#"{"vertices": [{"id": "A"}], "edges": [{"from": "A", "to": "Z"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            blueprint.build(),
            Err(BlueprintError::UnknownVertex(name)) if name == "Z"
        ));
    }
}
