//! Property tests for policies and the solver.
//!
//! Random features, inventories and small dungeons drawn from a fixed item
//! pool, checking:
//!
//! - Door, terrain and plain edges behave per their feature for any inventory
//! - Monotonicity: more items never revoke traversability or raise weight
//! - Solver monotonicity: more starting items never shrink the reachable set
//! - The pass count never exceeds the number of grantable items plus one

mod test_utils;

use delve_graph::edge::{EdgeId, Weight};
use delve_graph::feature::EdgeFeature;
use delve_graph::graph::DungeonGraph;
use delve_graph::inventory::Inventory;
use delve_graph::policy::{CombinedPolicy, TraversalPolicy};
use delve_graph::solver::QuestSolver;
use proptest::prelude::*;
use test_utils::{SingleEdge, item};

const POOL: &[&str] = &["k0", "k1", "k2", "k3", "boots0", "boots1"];

fn arb_item() -> impl Strategy<Value = &'static str> {
    prop::sample::select(POOL)
}

/// An inventory drawn as a subset of [`POOL`].
fn arb_inventory() -> impl Strategy<Value = Inventory> {
    prop::collection::vec(any::<bool>(), POOL.len()).prop_map(|mask| {
        POOL.iter()
            .zip(mask)
            .filter(|(_, held)| *held)
            .map(|(name, _)| item(name))
            .collect()
    })
}

/// A pair of inventories where the second contains the first.
fn arb_nested_inventories() -> impl Strategy<Value = (Inventory, Inventory)> {
    (arb_inventory(), arb_inventory()).prop_map(|(small, extra)| {
        let mut big = small.clone();
        big.extend(extra.iter().cloned());
        (small, big)
    })
}

fn arb_feature() -> impl Strategy<Value = EdgeFeature> {
    prop_oneof![
        arb_item().prop_map(|key| EdgeFeature::door(key).unwrap()),
        ("[A-Z][a-z]{2,6}", 0..20u64, arb_item()).prop_map(|(kind, penalty, mitigator)| {
            EdgeFeature::terrain(&kind, penalty, mitigator).unwrap()
        }),
        Just(EdgeFeature::Plain),
    ]
}

/// Rooms with granted items and edges `(from, to, weight, feature)`.
#[derive(Debug, Clone)]
struct DungeonPlan {
    rooms: Vec<Vec<&'static str>>,
    edges: Vec<(usize, usize, Weight, EdgeFeature)>,
}

impl DungeonPlan {
    fn build(&self) -> DungeonGraph<usize> {
        let mut graph = DungeonGraph::new();
        for (index, items) in self.rooms.iter().enumerate() {
            graph
                .add_vertex_with_items(index, items.iter().map(|name| item(name)))
                .unwrap();
        }
        for (from, to, weight, feature) in &self.edges {
            let from = graph.vertex_by_key(from).unwrap();
            let to = graph.vertex_by_key(to).unwrap();
            graph.add_edge(from, to, *weight, feature.clone()).unwrap();
        }
        graph
    }
}

fn arb_dungeon() -> impl Strategy<Value = DungeonPlan> {
    (2..=7usize).prop_flat_map(|rooms| {
        (
            prop::collection::vec(prop::collection::vec(arb_item(), 0..=2), rooms),
            prop::collection::vec((0..rooms, 0..rooms, 0..10u64, arb_feature()), 0..16),
        )
            .prop_map(|(rooms, edges)| DungeonPlan { rooms, edges })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A door is traversable exactly when its key is held, at base weight.
    #[test]
    fn prop_door_gates_on_key(key in arb_item(), weight in 0..100u64, inventory in arb_inventory()) {
        let fixture = SingleEdge::new(weight, EdgeFeature::door(key).unwrap());
        let policy = CombinedPolicy::standard();
        prop_assert_eq!(policy.traversable(fixture.edge(), &inventory), inventory.contains(key));
        prop_assert_eq!(policy.weight(fixture.edge(), &inventory), weight);
    }

    /// Terrain is always traversable; the penalty applies iff unmitigated.
    #[test]
    fn prop_terrain_penalty(
        weight in 0..100u64,
        penalty in 0..50u64,
        mitigator in arb_item(),
        inventory in arb_inventory(),
    ) {
        let fixture = SingleEdge::new(
            weight,
            EdgeFeature::terrain("Swamp", penalty, mitigator).unwrap(),
        );
        let policy = CombinedPolicy::standard();
        let expected = if inventory.contains(mitigator) { weight } else { weight + penalty };
        prop_assert!(policy.traversable(fixture.edge(), &inventory));
        prop_assert_eq!(policy.weight(fixture.edge(), &inventory), expected);
    }

    /// Plain edges are always traversable at base weight.
    #[test]
    fn prop_plain_is_unconstrained(weight in 0..100u64, inventory in arb_inventory()) {
        let fixture = SingleEdge::new(weight, EdgeFeature::Plain);
        let policy = CombinedPolicy::standard();
        prop_assert!(policy.traversable(fixture.edge(), &inventory));
        prop_assert_eq!(policy.weight(fixture.edge(), &inventory), weight);
    }

    /// Adding items never revokes traversability and never raises weight.
    #[test]
    fn prop_policy_monotone(
        feature in arb_feature(),
        weight in 0..100u64,
        (small, big) in arb_nested_inventories(),
    ) {
        let fixture = SingleEdge::new(weight, feature);
        let policy = CombinedPolicy::standard();
        if policy.traversable(fixture.edge(), &small) {
            prop_assert!(policy.traversable(fixture.edge(), &big));
        }
        prop_assert!(policy.weight(fixture.edge(), &big) <= policy.weight(fixture.edge(), &small));
    }

    /// More starting items never shrink what the solver can reach.
    #[test]
    fn prop_solver_monotone(plan in arb_dungeon(), (small, big) in arb_nested_inventories()) {
        let graph = plan.build();
        let start = graph.vertex_by_key(&0usize).unwrap();
        let goal = graph.vertex_by_key(&(plan.rooms.len() - 1)).unwrap();
        let solver = QuestSolver::standard();

        let with_small = solver.solve(&graph, start, goal, small).unwrap();
        let with_big = solver.solve(&graph, start, goal, big).unwrap();

        prop_assert!(with_small.reachable.is_subset(&with_big.reachable));
        if with_small.solvable {
            prop_assert!(with_big.solvable);
        }
    }

    /// The fixpoint needs at most one pass per grantable item plus one.
    #[test]
    fn prop_pass_count_bounded(plan in arb_dungeon(), inventory in arb_inventory()) {
        let graph = plan.build();
        let start = graph.vertex_by_key(&0usize).unwrap();
        let goal = graph.vertex_by_key(&(plan.rooms.len() - 1)).unwrap();

        let outcome = QuestSolver::standard().solve(&graph, start, goal, inventory).unwrap();
        prop_assert!(outcome.passes <= graph.grantable_items().len() + 1);
    }

    /// Every reachable vertex other than the start has a traversable edge
    /// into it under the final inventory, from another reachable vertex.
    #[test]
    fn prop_reachable_set_is_justified(plan in arb_dungeon()) {
        let graph = plan.build();
        let start = graph.vertex_by_key(&0usize).unwrap();
        let goal = graph.vertex_by_key(&(plan.rooms.len() - 1)).unwrap();
        let policy = CombinedPolicy::standard();

        let outcome = QuestSolver::standard().solve(&graph, start, goal, Inventory::new()).unwrap();
        for vertex in outcome.reachable.iter().filter(|v| **v != start) {
            let justified = graph.edges().iter().any(|edge| {
                edge.target() == *vertex
                    && outcome.reachable.contains(&edge.source())
                    && policy.traversable(edge, &outcome.inventory)
            });
            prop_assert!(justified, "{} reached without a usable edge", vertex);
        }
    }

    /// Nothing outside the reachable set has a usable edge from inside it:
    /// the reachable set is closed at the fixpoint.
    #[test]
    fn prop_reachable_set_is_closed(plan in arb_dungeon(), inventory in arb_inventory()) {
        let graph = plan.build();
        let start = graph.vertex_by_key(&0usize).unwrap();
        let goal = graph.vertex_by_key(&(plan.rooms.len() - 1)).unwrap();
        let policy = CombinedPolicy::standard();

        let outcome = QuestSolver::standard().solve(&graph, start, goal, inventory).unwrap();
        let escapes: Vec<EdgeId> = graph
            .edges()
            .iter()
            .filter(|edge| {
                outcome.reachable.contains(&edge.source())
                    && !outcome.reachable.contains(&edge.target())
                    && policy.traversable(edge, &outcome.inventory)
            })
            .map(|edge| edge.id())
            .collect();
        prop_assert!(escapes.is_empty(), "usable edges leave the fixpoint: {:?}", escapes);
    }
}
