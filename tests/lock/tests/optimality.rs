//! Optimality lock tests: A* path cost equals an uninformed Dijkstra
//! baseline whenever the heuristic is consistent.

use lock_tests::baseline::{dijkstra, pick_free, random_grid, Lcg};
use waypoint_harness::worlds::grid::{Connectivity, GridWorld};
use waypoint_harness::worlds::weighted::WeightedGraph;
use waypoint_search::heuristic::{HeuristicKindV1, ZeroHeuristic};
use waypoint_search::policy::{SearchPolicyV1, TieBreakV1};
use waypoint_search::search::{search, TerminationReasonV1};

const EPS: f64 = 1e-9;

fn check_grid(seed: u64, connectivity: Connectivity, heuristics: &[HeuristicKindV1]) {
    let grid = random_grid(seed, 12, 16, 28);
    let world = GridWorld::new(&grid, connectivity);
    let mut rng = Lcg::new(seed ^ 0x9e37_79b9);
    let (Some(start), Some(goal)) = (pick_free(&mut rng, &grid), pick_free(&mut rng, &grid)) else {
        return;
    };
    let baseline = dijkstra(&world, &start);

    for &kind in heuristics {
        let result = search(start, goal, &world, &kind, &SearchPolicyV1::default()).unwrap();
        match baseline.get(&goal) {
            Some(&expected) => {
                assert_eq!(
                    result.termination,
                    TerminationReasonV1::GoalReached,
                    "seed {seed} {kind:?}"
                );
                let cost = result.path.as_ref().unwrap().cost;
                assert!(
                    (cost - expected).abs() < EPS,
                    "seed {seed} {kind:?}: {cost} != {expected}"
                );
            }
            None => {
                assert_eq!(
                    result.termination,
                    TerminationReasonV1::FrontierExhausted,
                    "seed {seed} {kind:?}"
                );
                assert!(result.path.is_none());
                let reached: Vec<_> = result.table.states().copied().collect();
                let expected: Vec<_> = baseline.keys().copied().collect();
                assert_eq!(reached, expected, "seed {seed}: table is the reachable component");
            }
        }
    }
}

#[test]
fn four_connected_random_grids_match_dijkstra() {
    for seed in 0..40 {
        check_grid(
            seed,
            Connectivity::Four,
            &[
                HeuristicKindV1::Manhattan,
                HeuristicKindV1::Euclidean,
                HeuristicKindV1::Chebyshev,
                HeuristicKindV1::Zero,
            ],
        );
    }
}

#[test]
fn eight_connected_random_grids_match_dijkstra() {
    for seed in 100..130 {
        check_grid(
            seed,
            Connectivity::Eight,
            &[
                HeuristicKindV1::Octile,
                HeuristicKindV1::Euclidean,
                HeuristicKindV1::Chebyshev,
                HeuristicKindV1::Zero,
            ],
        );
    }
}

#[test]
fn every_tie_break_rule_is_optimal() {
    let grid = random_grid(7, 14, 14, 20);
    let world = GridWorld::four_connected(&grid);
    let mut rng = Lcg::new(77);
    let start = pick_free(&mut rng, &grid).unwrap();
    let baseline = dijkstra(&world, &start);
    let goal = *baseline.keys().last().unwrap();

    for rule in [
        TieBreakV1::Fifo,
        TieBreakV1::Lifo,
        TieBreakV1::DeepestFirst,
        TieBreakV1::StateOrder,
    ] {
        let policy = SearchPolicyV1 {
            tie_break: rule,
            ..SearchPolicyV1::default()
        };
        let result = search(start, goal, &world, &HeuristicKindV1::Manhattan, &policy).unwrap();
        let cost = result.path.unwrap().cost;
        assert!((cost - baseline[&goal]).abs() < EPS, "{rule:?}");
    }
}

fn random_graph(seed: u64, nodes: u64, edges: u64) -> WeightedGraph {
    let mut rng = Lcg::new(seed);
    let mut graph = WeightedGraph::new();
    for n in 0..nodes {
        graph.add_node(format!("n{n:02}"));
    }
    for _ in 0..edges {
        let from = format!("n{:02}", rng.below(nodes));
        let to = format!("n{:02}", rng.below(nodes));
        #[allow(clippy::cast_precision_loss)]
        let weight = (rng.below(20) + 1) as f64 / 2.0;
        graph.add_edge(&from, &to, weight).unwrap();
    }
    graph
}

#[test]
fn weighted_graphs_match_dijkstra() {
    for seed in 0..25 {
        let graph = random_graph(seed, 18, 45);
        let start = "n00".to_string();
        let baseline = dijkstra(&graph, &start);
        for goal in graph.nodes().map(str::to_owned) {
            let result = search(
                start.clone(),
                goal.clone(),
                &graph,
                &ZeroHeuristic,
                &SearchPolicyV1::default(),
            )
            .unwrap();
            match baseline.get(&goal) {
                Some(&expected) => {
                    let cost = result.path.unwrap().cost;
                    assert!((cost - expected).abs() < EPS, "seed {seed} goal {goal}");
                }
                None => assert!(result.is_no_path(), "seed {seed} goal {goal}"),
            }
        }
    }
}

#[test]
fn zero_weight_edges_are_handled() {
    let graph = WeightedGraph::from_json_str(
        r#"[
            {"from": "a", "to": "b", "weight": 0},
            {"from": "b", "to": "c", "weight": 0},
            {"from": "a", "to": "c", "weight": 1}
        ]"#,
    )
    .unwrap();
    let result = search(
        "a".to_string(),
        "c".to_string(),
        &graph,
        &ZeroHeuristic,
        &SearchPolicyV1::default(),
    )
    .unwrap();
    let path = result.path.unwrap();
    assert_eq!(path.cost, 0.0);
    assert_eq!(path.states, vec!["a", "b", "c"]);
}
