//! Binary that runs the reference labyrinth scenario (or a scenario file
//! given as the first argument) and prints deterministic output lines for
//! cross-process verification.
//!
//! Usage: `search_fixture [scenario.json]`
//!
//! Output: `key=value` lines on stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`).

use waypoint_harness::runner::{run_scenario, ScenarioOutcome};
use waypoint_harness::scenario::ScenarioV1;
use waypoint_harness::worlds::weighted::WeightedGraph;
use waypoint_search::heuristic::{HeuristicKindV1, ZeroHeuristic};
use waypoint_search::policy::SearchPolicyV1;
use waypoint_search::report::SearchReportV1;
use waypoint_search::search::search;

const ROAD_NETWORK: &str = r#"[
    {"from": "depot", "to": "mill", "weight": 4, "undirected": true},
    {"from": "depot", "to": "ford", "weight": 1, "undirected": true},
    {"from": "ford", "to": "mill", "weight": 2, "undirected": true},
    {"from": "mill", "to": "harbor", "weight": 5, "undirected": true},
    {"from": "ford", "to": "harbor", "weight": 9, "undirected": true}
]"#;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => ScenarioV1::load(&path).expect("scenario file loads"),
        None => ScenarioV1::reference(vec![
            HeuristicKindV1::Manhattan,
            HeuristicKindV1::Euclidean,
            HeuristicKindV1::Zero,
        ]),
    };

    let outcomes: Vec<ScenarioOutcome> = run_scenario(&scenario).expect("scenario runs");
    println!("scenario={}", scenario.display_name());
    println!("runs={}", outcomes.len());
    for outcome in &outcomes {
        for line in outcome.summary_lines() {
            println!("{line}");
        }
    }

    let graph = WeightedGraph::from_json_str(ROAD_NETWORK).expect("road network parses");
    let policy = SearchPolicyV1::default();
    let result = search(
        "depot".to_string(),
        "harbor".to_string(),
        &graph,
        &ZeroHeuristic,
        &policy,
    )
    .expect("road endpoints are valid");
    let report = SearchReportV1::from_result(&result, &policy, String::clone);
    println!(
        "road.path={}",
        result
            .path
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.states.join(">"))
    );
    println!("road.report_digest={}", report.digest().expect("report digest"));
}
