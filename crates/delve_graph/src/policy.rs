//! Traversal policies: per-edge passability and cost.
//!
//! A policy is a stateless rule evaluated against an edge and the agent's
//! current inventory. Each policy cares about exactly one [`FeatureKind`]
//! and behaves as a no-op on every other edge: traversable, base weight.
//!
//! # Architecture
//!
//! - [`TraversalPolicy`] - Object-safe trait, implementable outside this crate
//! - [`BoxedPolicy`] - Type alias for boxed policies
//! - [`DoorPolicy`], [`TerrainPenaltyPolicy`] - The built-in rules
//! - [`CombinedPolicy`] - An ordered collection evaluated as one policy
//!
//! # Example
//!
//! ```
//! use delve_graph::feature::EdgeFeature;
//! use delve_graph::graph::DungeonGraph;
//! use delve_graph::inventory::{Inventory, ItemId};
//! use delve_graph::policy::{CombinedPolicy, TraversalPolicy};
//!
//! let mut graph = DungeonGraph::new();
//! let a = graph.add_vertex("A").unwrap();
//! let b = graph.add_vertex("B").unwrap();
//! let id = graph.add_edge(a, b, 5, EdgeFeature::door("key1").unwrap()).unwrap();
//! let edge = graph.edge(id).unwrap();
//!
//! let policy = CombinedPolicy::standard();
//! let mut inventory = Inventory::new();
//! assert!(!policy.traversable(edge, &inventory));
//!
//! inventory.add(ItemId::new("key1").unwrap());
//! assert!(policy.traversable(edge, &inventory));
//! assert_eq!(policy.weight(edge, &inventory), 5);
//! ```

use core::fmt;

use crate::edge::{Edge, Weight};
use crate::feature::{EdgeFeature, FeatureKind};
use crate::inventory::Inventory;

/// A rule deciding whether an edge may be crossed and at what cost.
///
/// Implementations must be pure functions of `(edge, inventory)` and
/// monotone in the inventory: holding more items never revokes
/// traversability and never raises the weight.
pub trait TraversalPolicy: Send + Sync + fmt::Debug {
    /// Human-readable name for logs.
    fn name(&self) -> &'static str;

    /// The feature kind this policy acts on, or `None` if it inspects every
    /// edge. [`CombinedPolicy`] never consults it for edges of other kinds.
    fn applies_to(&self) -> Option<FeatureKind> {
        None
    }

    /// Returns `true` if the edge may be crossed with `inventory`.
    fn traversable(&self, edge: &Edge, inventory: &Inventory) -> bool;

    /// Returns the effective cost of crossing the edge with `inventory`.
    fn weight(&self, edge: &Edge, inventory: &Inventory) -> Weight;

    /// Returns this policy's adjustment relative to the base weight.
    fn weight_delta(&self, edge: &Edge, inventory: &Inventory) -> i128 {
        i128::from(self.weight(edge, inventory)) - i128::from(edge.base_weight())
    }
}

/// Type alias for boxed policies stored in a [`CombinedPolicy`].
pub type BoxedPolicy = Box<dyn TraversalPolicy>;

/// Doors: traversable iff the key is held. Never changes weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoorPolicy;

impl TraversalPolicy for DoorPolicy {
    fn name(&self) -> &'static str {
        "door"
    }

    fn applies_to(&self) -> Option<FeatureKind> {
        Some(FeatureKind::Door)
    }

    fn traversable(&self, edge: &Edge, inventory: &Inventory) -> bool {
        match edge.feature() {
            EdgeFeature::Door(door) => inventory.contains(door.key().as_str()),
            _ => true,
        }
    }

    fn weight(&self, edge: &Edge, _inventory: &Inventory) -> Weight {
        edge.base_weight()
    }
}

/// Terrain: always traversable, penalised unless the mitigating item is held.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerrainPenaltyPolicy;

impl TraversalPolicy for TerrainPenaltyPolicy {
    fn name(&self) -> &'static str {
        "terrain_penalty"
    }

    fn applies_to(&self) -> Option<FeatureKind> {
        Some(FeatureKind::Terrain)
    }

    fn traversable(&self, _edge: &Edge, _inventory: &Inventory) -> bool {
        true
    }

    fn weight(&self, edge: &Edge, inventory: &Inventory) -> Weight {
        match edge.feature() {
            EdgeFeature::Terrain(terrain) if !inventory.contains(terrain.mitigator().as_str()) => {
                edge.base_weight().saturating_add(terrain.penalty())
            }
            _ => edge.base_weight(),
        }
    }
}

/// An ordered collection of policies evaluated as one.
///
/// Only sub-policies relevant to an edge are consulted: a policy whose
/// [`applies_to`](TraversalPolicy::applies_to) names another feature kind is
/// skipped, and one returning `None` sees every edge.
///
/// - `traversable` is the logical AND of every sub-policy (short-circuits).
/// - `weight` is the base weight plus the sum of every sub-policy's delta,
///   so the base weight is counted exactly once no matter how many policies
///   are consulted. A negative total clamps to zero and overflow saturates.
///
/// Order does not affect results.
#[derive(Debug, Default)]
pub struct CombinedPolicy {
    policies: Vec<BoxedPolicy>,
}

impl CombinedPolicy {
    /// Creates a combined policy from an ordered collection.
    #[must_use]
    pub fn new(policies: Vec<BoxedPolicy>) -> Self {
        Self { policies }
    }

    /// The built-in rules: [`DoorPolicy`] then [`TerrainPenaltyPolicy`].
    #[must_use]
    pub fn standard() -> Self {
        Self::default().with(DoorPolicy).with(TerrainPenaltyPolicy)
    }

    /// Appends a policy and returns self for chaining.
    #[must_use]
    pub fn with<P: TraversalPolicy + 'static>(mut self, policy: P) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    /// Appends a policy.
    pub fn push(&mut self, policy: BoxedPolicy) {
        self.policies.push(policy);
    }

    /// Returns the sub-policies in evaluation order.
    #[must_use]
    pub fn policies(&self) -> &[BoxedPolicy] {
        &self.policies
    }

    /// Returns the number of sub-policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns `true` if there are no sub-policies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Sub-policies relevant to `edge`: those acting on its feature kind,
    /// plus those that inspect every edge.
    fn relevant<'a>(&'a self, edge: &Edge) -> impl Iterator<Item = &'a BoxedPolicy> {
        let kind = edge.kind();
        self.policies
            .iter()
            .filter(move |policy| policy.applies_to().is_none_or(|applies| applies == kind))
    }
}

impl TraversalPolicy for CombinedPolicy {
    fn name(&self) -> &'static str {
        "combined"
    }

    fn traversable(&self, edge: &Edge, inventory: &Inventory) -> bool {
        self.relevant(edge).all(|policy| {
            let allowed = policy.traversable(edge, inventory);
            if !allowed {
                tracing::trace!(edge = %edge.id(), policy = policy.name(), "edge blocked");
            }
            allowed
        })
    }

    fn weight(&self, edge: &Edge, inventory: &Inventory) -> Weight {
        let delta: i128 = self
            .relevant(edge)
            .map(|policy| policy.weight_delta(edge, inventory))
            .sum();
        let total = i128::from(edge.base_weight()) + delta;
        Weight::try_from(total.max(0)).unwrap_or(Weight::MAX)
    }
}

impl FromIterator<BoxedPolicy> for CombinedPolicy {
    fn from_iter<I: IntoIterator<Item = BoxedPolicy>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
