//! Quest solvability.
//!
//! The [`QuestSolver`] decides whether an agent can get from a start room to
//! a goal room when doors only open for keys found along the way. It runs a
//! fixpoint: search with the current inventory, pick up everything in the
//! newly reached rooms, and search again from *every* reached room until a
//! pass collects nothing new.
//!
//! Each pass either grows the inventory or ends the loop, so the number of
//! passes is bounded by the number of distinct grantable items plus one.
//!
//! # Example
//!
//! ```
//! use delve_graph::feature::EdgeFeature;
//! use delve_graph::graph::DungeonGraph;
//! use delve_graph::inventory::{Inventory, ItemId};
//! use delve_graph::solver::QuestSolver;
//!
//! let mut graph = DungeonGraph::new();
//! let a = graph.add_vertex("A").unwrap();
//! let b = graph
//!     .add_vertex_with_items("B", [ItemId::new("FireKey").unwrap()])
//!     .unwrap();
//! let c = graph.add_vertex("C").unwrap();
//! graph.add_edge(a, b, 2, EdgeFeature::Plain).unwrap();
//! graph.add_edge(b, c, 3, EdgeFeature::door("FireKey").unwrap()).unwrap();
//!
//! let solver = QuestSolver::standard();
//! assert!(solver.is_quest_solvable(&graph, a, c, Inventory::new()).unwrap());
//! ```

use core::cmp::Reverse;
use core::fmt::Debug;
use core::hash::Hash;
use std::collections::{BinaryHeap, VecDeque};

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::edge::Weight;
use crate::graph::{DungeonGraph, GraphError};
use crate::inventory::Inventory;
use crate::policy::{CombinedPolicy, TraversalPolicy};
use crate::vertex::VertexId;

/// Errors that can occur while solving a quest.
///
/// An unreachable goal is not an error; it is a `false` result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// A start or goal handle does not belong to the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The configured pass cap was hit before the fixpoint was reached.
    #[error("fixpoint not reached within {max} passes")]
    PassLimitExceeded {
        /// The configured maximum.
        max: usize,
    },
}

/// Solver tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of search passes. `None` relies on the natural bound.
    pub max_passes: Option<usize>,
}

impl SolverConfig {
    /// Caps the number of search passes.
    #[must_use]
    pub fn with_max_passes(mut self, max: usize) -> Self {
        self.max_passes = Some(max);
        self
    }
}

/// Result of a full solvability run.
#[derive(Debug, Clone)]
pub struct QuestOutcome {
    /// Whether the goal was reached.
    pub solvable: bool,
    /// Every vertex reachable at the fixpoint.
    pub reachable: HashSet<VertexId>,
    /// The inventory at the fixpoint.
    pub inventory: Inventory,
    /// Number of search passes run.
    pub passes: usize,
}

/// Fixpoint reachability under a growing inventory.
#[derive(Debug)]
pub struct QuestSolver {
    policy: CombinedPolicy,
    config: SolverConfig,
}

impl Default for QuestSolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl QuestSolver {
    /// Creates a solver using `policy` to decide traversability.
    #[must_use]
    pub fn new(policy: CombinedPolicy) -> Self {
        Self {
            policy,
            config: SolverConfig::default(),
        }
    }

    /// Creates a solver with the door and terrain policies.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(CombinedPolicy::standard())
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the policy in use.
    #[must_use]
    pub fn policy(&self) -> &CombinedPolicy {
        &self.policy
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns `true` if `goal` is reachable from `start`.
    ///
    /// The inventory is consumed as the solver's private working copy; clone
    /// it first if the caller needs it afterwards.
    ///
    /// # Errors
    ///
    /// See [`solve`](Self::solve).
    pub fn is_quest_solvable<V>(
        &self,
        graph: &DungeonGraph<V>,
        start: VertexId,
        goal: VertexId,
        inventory: Inventory,
    ) -> Result<bool, SolveError>
    where
        V: Eq + Hash + Clone + Debug,
    {
        Ok(self.solve(graph, start, goal, inventory)?.solvable)
    }

    /// Runs the fixpoint and reports everything it found.
    ///
    /// Items at `start` are picked up before the first pass. `start == goal`
    /// is solvable without traversing anything.
    ///
    /// # Errors
    ///
    /// - [`SolveError::Graph`] if `start` or `goal` belong to another graph
    /// - [`SolveError::PassLimitExceeded`] if the configured cap is hit
    ///   before the goal is reached. A goal reached within the cap is
    ///   reported as solvable, with the partial reachable set and inventory.
    pub fn solve<V>(
        &self,
        graph: &DungeonGraph<V>,
        start: VertexId,
        goal: VertexId,
        mut inventory: Inventory,
    ) -> Result<QuestOutcome, SolveError>
    where
        V: Eq + Hash + Clone + Debug,
    {
        graph.check_vertex(start)?;
        graph.check_vertex(goal)?;

        let span = tracing::debug_span!("quest_solve", %start, %goal);
        let _guard = span.enter();

        let mut reachable = HashSet::new();
        reachable.insert(start);
        inventory.extend(graph.vertex(start)?.items().iter().cloned());

        if start == goal {
            tracing::debug!("start is the goal");
            return Ok(QuestOutcome {
                solvable: true,
                reachable,
                inventory,
                passes: 0,
            });
        }

        let mut passes = 0;
        loop {
            if let Some(max) = self.config.max_passes
                && passes >= max
            {
                // The reachable set only grows, so a reached goal stays reached.
                if reachable.contains(&goal) {
                    tracing::debug!(max, "pass limit reached after the goal");
                    return Ok(QuestOutcome {
                        solvable: true,
                        reachable,
                        inventory,
                        passes,
                    });
                }
                tracing::warn!(max, "pass limit reached before fixpoint");
                return Err(SolveError::PassLimitExceeded { max });
            }
            passes += 1;

            let discovered = self.search_pass(graph, &mut reachable, &inventory)?;

            let mut gained = 0usize;
            for vertex in &discovered {
                for item in graph.vertex(*vertex)?.items() {
                    if inventory.add(item.clone()) {
                        gained += 1;
                    }
                }
            }

            tracing::debug!(
                pass = passes,
                discovered = discovered.len(),
                reachable = reachable.len(),
                gained,
                "search pass complete"
            );

            // With an unchanged inventory the closure computed above is final.
            if gained == 0 {
                break;
            }
        }

        let solvable = reachable.contains(&goal);
        tracing::debug!(solvable, passes, items = inventory.len(), "fixpoint reached");
        Ok(QuestOutcome {
            solvable,
            reachable,
            inventory,
            passes,
        })
    }

    /// Breadth-first closure of `reachable` under a fixed inventory.
    ///
    /// Re-examines edges from every reached vertex, not only the newest
    /// ones, since a fresh item can unlock a door next to an old room.
    /// Returns the vertices added in this pass.
    fn search_pass<V>(
        &self,
        graph: &DungeonGraph<V>,
        reachable: &mut HashSet<VertexId>,
        inventory: &Inventory,
    ) -> Result<Vec<VertexId>, SolveError>
    where
        V: Eq + Hash + Clone + Debug,
    {
        let mut queue: VecDeque<VertexId> = reachable.iter().copied().collect();
        let mut discovered = Vec::new();

        while let Some(vertex) = queue.pop_front() {
            for edge in graph.out_edges(vertex)? {
                let target = edge.target();
                if reachable.contains(&target) || !self.policy.traversable(edge, inventory) {
                    continue;
                }
                tracing::trace!(edge = %edge.id(), %target, "vertex reached");
                reachable.insert(target);
                discovered.push(target);
                queue.push_back(target);
            }
        }

        Ok(discovered)
    }

    /// Cheapest cost from `start` to `goal` with a fixed inventory.
    ///
    /// Uses the weight half of the policy with Dijkstra relaxation. No items
    /// are picked up along the way. Returns `None` if the goal is
    /// unreachable.
    ///
    /// Passing the final inventory of a [`QuestOutcome`] treats every
    /// collected item as held from the start. The result is then a lower
    /// bound: it can undercut every route an agent could actually walk, and
    /// it may use doors whose keys lie off that route.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Graph`] if `start` or `goal` belong to another
    /// graph.
    pub fn cheapest_cost<V>(
        &self,
        graph: &DungeonGraph<V>,
        start: VertexId,
        goal: VertexId,
        inventory: &Inventory,
    ) -> Result<Option<Weight>, SolveError>
    where
        V: Eq + Hash + Clone + Debug,
    {
        graph.check_vertex(start)?;
        graph.check_vertex(goal)?;

        let mut best: Vec<Option<Weight>> = vec![None; graph.vertex_count()];
        let mut heap = BinaryHeap::new();
        best[start.index()] = Some(0);
        heap.push(Reverse((0, start)));

        while let Some(Reverse((cost, vertex))) = heap.pop() {
            if vertex == goal {
                return Ok(Some(cost));
            }
            if best[vertex.index()].is_some_and(|known| cost > known) {
                continue;
            }
            for edge in graph.out_edges(vertex)? {
                if !self.policy.traversable(edge, inventory) {
                    continue;
                }
                let next = cost.saturating_add(self.policy.weight(edge, inventory));
                let target = edge.target();
                if best[target.index()].is_none_or(|known| next < known) {
                    best[target.index()] = Some(next);
                    heap.push(Reverse((next, target)));
                }
            }
        }

        Ok(None)
    }
}

/// Checks solvability with the standard door and terrain policies.
///
/// # Errors
///
/// Returns [`SolveError::Graph`] if `start` or `goal` belong to another graph.
pub fn is_quest_solvable<V>(
    graph: &DungeonGraph<V>,
    start: VertexId,
    goal: VertexId,
    inventory: Inventory,
) -> Result<bool, SolveError>
where
    V: Eq + Hash + Clone + Debug,
{
    QuestSolver::standard().is_quest_solvable(graph, start, goal, inventory)
}
