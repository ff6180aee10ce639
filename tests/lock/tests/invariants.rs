//! Engine invariants observed through hooks and the returned table:
//! monotone discovery costs, predecessor consistency, reachable-component
//! coverage, aborts and contract violations.

use std::collections::BTreeMap;

use lock_tests::baseline::{dijkstra, pick_free, random_grid, Lcg};
use waypoint_harness::worlds::grid::{Cell, Grid, GridWorld};
use waypoint_harness::worlds::labyrinth::{reference_labyrinth, LABYRINTH_GOAL, LABYRINTH_START};
use waypoint_harness::worlds::weighted::WeightedGraph;
use waypoint_search::contract::{ExactGoal, SearchDomain};
use waypoint_search::error::{SearchError, StateRole};
use waypoint_search::heuristic::{Manhattan, Weighted, ZeroHeuristic};
use waypoint_search::hooks::{CancelToken, SearchHooks, SearchObserver};
use waypoint_search::policy::SearchPolicyV1;
use waypoint_search::search::{search, search_with, TerminationReasonV1};

#[derive(Default)]
struct CostLog {
    writes: BTreeMap<Cell, Vec<f64>>,
    expanded: Vec<(Cell, f64)>,
    stale: usize,
}

impl SearchObserver<Cell> for CostLog {
    fn on_expand(&mut self, state: &Cell, g_cost: f64) {
        self.expanded.push((*state, g_cost));
    }

    fn on_discover(&mut self, state: &Cell, cost: f64, _predecessor: &Cell) {
        self.writes.entry(*state).or_default().push(cost);
    }

    fn on_stale(&mut self, _state: &Cell, _g_cost: f64) {
        self.stale += 1;
    }
}

#[test]
fn recorded_costs_only_decrease() {
    // An inflated heuristic forces re-discoveries.
    for seed in 0..10 {
        let grid = random_grid(seed, 14, 18, 22);
        let world = GridWorld::four_connected(&grid);
        let mut rng = Lcg::new(seed + 1000);
        let (Some(start), Some(goal)) = (pick_free(&mut rng, &grid), pick_free(&mut rng, &grid))
        else {
            continue;
        };

        let mut log = CostLog::default();
        let result = search_with(
            start,
            goal,
            &world,
            &Weighted::new(Manhattan, 3.0),
            &ExactGoal(goal),
            &SearchPolicyV1::default(),
            SearchHooks::none().with_observer(&mut log),
        )
        .unwrap();

        for (cell, writes) in &log.writes {
            assert!(
                writes.windows(2).all(|w| w[1] < w[0]),
                "seed {seed}: {cell} costs {writes:?}"
            );
            assert_eq!(result.table.cost_of(cell), writes.last().copied());
        }
        assert_eq!(log.stale as u64, result.stats.stale_skipped);
    }
}

#[test]
fn predecessor_costs_are_consistent() {
    let grid = random_grid(21, 16, 16, 20);
    let world = GridWorld::four_connected(&grid);
    let mut rng = Lcg::new(3);
    let start = pick_free(&mut rng, &grid).unwrap();
    let goal = pick_free(&mut rng, &grid).unwrap();
    let result = search(start, goal, &world, &Manhattan, &SearchPolicyV1::default()).unwrap();

    let start_record = result.table.get(&start).unwrap();
    assert_eq!((start_record.cost, start_record.predecessor), (0.0, None));
    assert_eq!(result.table.depth_of(&start), Some(0));

    for (cell, record) in &result.table {
        let Some(pred) = record.predecessor else {
            assert_eq!(*cell, start);
            continue;
        };
        let pred_record = result.table.get(&pred).unwrap();
        assert_eq!(record.cost, pred_record.cost + 1.0, "{cell} via {pred}");
        assert_eq!(
            result.table.depth_of(cell),
            result.table.depth_of(&pred).map(|d| d + 1)
        );
    }
}

#[test]
fn expansions_are_monotone_in_f_under_consistent_heuristic() {
    let grid = reference_labyrinth().unwrap();
    let world = GridWorld::four_connected(&grid);
    let mut log = CostLog::default();
    search_with(
        LABYRINTH_START,
        LABYRINTH_GOAL,
        &world,
        &Manhattan,
        &ExactGoal(LABYRINTH_GOAL),
        &SearchPolicyV1::default(),
        SearchHooks::none().with_observer(&mut log),
    )
    .unwrap();

    let f = |(cell, g): &(Cell, f64)| {
        g + (cell.row.abs_diff(LABYRINTH_GOAL.row) + cell.col.abs_diff(LABYRINTH_GOAL.col)) as f64
    };
    let fs: Vec<f64> = log.expanded.iter().map(f).collect();
    assert!(fs.windows(2).all(|w| w[0] <= w[1]), "{fs:?}");
}

#[test]
fn enclosed_goal_yields_reachable_component() {
    let grid = Grid::from_ascii(
        "
        ........
        ....###.
        ....#.#.
        ....###.
        ",
    )
    .unwrap();
    let world = GridWorld::four_connected(&grid);
    let start = Cell::new(0, 0);
    let goal = Cell::new(2, 5);

    let result = search(start, goal, &world, &Manhattan, &SearchPolicyV1::default()).unwrap();
    assert_eq!(result.termination, TerminationReasonV1::FrontierExhausted);
    assert!(result.is_no_path());
    assert!(result.path.is_none());
    assert!(!result.table.contains(&goal));

    let reachable = dijkstra(&world, &start);
    assert_eq!(result.table.len(), reachable.len());
    assert_eq!(reachable.len(), grid.free_cells().count() - 1);
    for (cell, cost) in &reachable {
        assert_eq!(result.table.cost_of(cell), Some(*cost));
    }
}

#[test]
fn start_equals_goal_is_trivial() {
    let grid = reference_labyrinth().unwrap();
    let world = GridWorld::four_connected(&grid);
    let result = search(
        LABYRINTH_START,
        LABYRINTH_START,
        &world,
        &Manhattan,
        &SearchPolicyV1::default(),
    )
    .unwrap();
    let path = result.path.unwrap();
    assert_eq!(path.states, vec![LABYRINTH_START]);
    assert_eq!(path.cost, 0.0);
    assert_eq!(result.stats.expansions, 0);
    assert_eq!(result.table.len(), 1);
}

#[test]
fn invalid_endpoints_are_rejected_up_front() {
    let grid = reference_labyrinth().unwrap();
    let world = GridWorld::four_connected(&grid);
    let policy = SearchPolicyV1::default();

    let on_wall = search(Cell::new(6, 6), LABYRINTH_GOAL, &world, &Manhattan, &policy);
    assert!(matches!(
        on_wall,
        Err(SearchError::InvalidState {
            role: StateRole::Start,
            ..
        })
    ));

    let outside = search(LABYRINTH_START, Cell::new(10, 0), &world, &Manhattan, &policy);
    assert!(matches!(
        outside,
        Err(SearchError::InvalidState {
            role: StateRole::Goal,
            ..
        })
    ));

    let graph = WeightedGraph::from_json_str(r#"[{"from": "a", "to": "b", "weight": 1}]"#).unwrap();
    let unknown = search(
        "a".to_string(),
        "z".to_string(),
        &graph,
        &ZeroHeuristic,
        &policy,
    );
    assert!(matches!(
        unknown,
        Err(SearchError::InvalidState {
            role: StateRole::Goal,
            ..
        })
    ));
}

struct CancelAfter {
    token: CancelToken,
    remaining: usize,
}

impl SearchObserver<Cell> for CancelAfter {
    fn on_expand(&mut self, _state: &Cell, _g_cost: f64) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.token.cancel();
        }
    }
}

#[test]
fn cancellation_mid_search_aborts_without_path() {
    let grid = reference_labyrinth().unwrap();
    let world = GridWorld::four_connected(&grid);
    let token = CancelToken::new();
    let mut canceller = CancelAfter {
        token: token.clone(),
        remaining: 5,
    };

    let result = search_with(
        LABYRINTH_START,
        LABYRINTH_GOAL,
        &world,
        &Manhattan,
        &ExactGoal(LABYRINTH_GOAL),
        &SearchPolicyV1::default(),
        SearchHooks::none()
            .with_cancel(&token)
            .with_observer(&mut canceller),
    )
    .unwrap();

    assert_eq!(result.termination, TerminationReasonV1::Cancelled);
    assert!(result.is_aborted());
    assert!(result.path.is_none());
    assert_eq!(result.stats.expansions, 5);
    assert!(result.table.len() > 1, "partial table is kept");
}

#[test]
fn cancellation_from_another_thread() {
    let grid = reference_labyrinth().unwrap();
    let token = CancelToken::new();
    let remote = token.clone();
    std::thread::spawn(move || remote.cancel()).join().unwrap();

    let world = GridWorld::four_connected(&grid);
    let result = search_with(
        LABYRINTH_START,
        LABYRINTH_GOAL,
        &world,
        &Manhattan,
        &ExactGoal(LABYRINTH_GOAL),
        &SearchPolicyV1::default(),
        SearchHooks::none().with_cancel(&token),
    )
    .unwrap();
    assert_eq!(result.termination, TerminationReasonV1::Cancelled);
    assert_eq!(result.stats.expansions, 0);
}

#[test]
fn expansion_budget_aborts_without_path() {
    let grid = reference_labyrinth().unwrap();
    let world = GridWorld::four_connected(&grid);
    let policy = SearchPolicyV1 {
        max_expansions: Some(10),
        ..SearchPolicyV1::default()
    };
    let result = search(LABYRINTH_START, LABYRINTH_GOAL, &world, &Manhattan, &policy).unwrap();
    assert_eq!(
        result.termination,
        TerminationReasonV1::ExpansionBudgetExceeded
    );
    assert_eq!(result.stats.expansions, 10);
    assert!(result.path.is_none());
}

/// Grid world whose moves into one column cost `-1`.
struct BrokenCosts<'g> {
    inner: GridWorld<'g>,
    bad_col: i64,
}

impl SearchDomain for BrokenCosts<'_> {
    type State = Cell;

    fn neighbors(&self, state: &Cell) -> Vec<(Cell, f64)> {
        self.inner
            .neighbors(state)
            .into_iter()
            .map(|(c, cost)| if c.col == self.bad_col { (c, -1.0) } else { (c, cost) })
            .collect()
    }
}

#[test]
fn negative_step_cost_is_a_contract_violation() {
    let grid = Grid::new(3, 6).unwrap();
    let world = BrokenCosts {
        inner: GridWorld::four_connected(&grid),
        bad_col: 3,
    };
    let result = search(
        Cell::new(1, 0),
        Cell::new(1, 5),
        &world,
        &Manhattan,
        &SearchPolicyV1::default(),
    )
    .unwrap();
    assert_eq!(
        result.termination,
        TerminationReasonV1::AdapterContractViolation { cost: -1.0 }
    );
    assert!(result.termination.is_contract_violation());
    assert!(result.path.is_none());
}

#[test]
fn negative_heuristic_is_a_contract_violation() {
    let grid = Grid::new(3, 3).unwrap();
    let world = GridWorld::four_connected(&grid);
    let heuristic = |s: &Cell, _g: &Cell| if s.row == 1 { -2.0 } else { 0.0 };
    let result = search(
        Cell::new(0, 0),
        Cell::new(2, 2),
        &world,
        &heuristic,
        &SearchPolicyV1::default(),
    )
    .unwrap();
    assert_eq!(
        result.termination,
        TerminationReasonV1::HeuristicContractViolation { value: -2.0 }
    );
    assert!(result.path.is_none());
}

#[test]
fn custom_goal_test_stops_at_first_matching_cell() {
    let grid = reference_labyrinth().unwrap();
    let world = GridWorld::four_connected(&grid);
    let on_row_eight = |c: &Cell| c.row == 8;
    let result = search_with(
        LABYRINTH_START,
        LABYRINTH_GOAL,
        &world,
        &Manhattan,
        &on_row_eight,
        &SearchPolicyV1::default(),
        SearchHooks::none(),
    )
    .unwrap();
    let path = result.path.unwrap();
    assert_eq!(path.goal().map(|c| c.row), Some(8));
    assert!(path.cost <= 14.0);
}
