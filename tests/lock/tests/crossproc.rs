//! Cross-process determinism: spawns the `search_fixture` binary under
//! several environment variants and asserts all produce identical output.

use std::path::Path;
use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("search_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, args: &[&str], env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir).args(args);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[], &[]);

    for expected in [
        "scenario=reference_labyrinth",
        "runs=3",
        "manhattan.termination=goal_reached",
        "manhattan.path_len=14",
        "euclidean.cost=14.000000",
        "zero.report_digest=sha256:",
        "road.path=depot>ford>mill>harbor",
        "road.report_digest=sha256:",
    ] {
        assert!(baseline.contains(expected), "baseline missing {expected}:\n{baseline}");
    }

    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    let variant_cwd = run_variant(alt_cwd, &[], &[]);
    assert_eq!(
        baseline, variant_cwd,
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    let variant_locale = run_variant(&root, &[], &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    // Verbose logging goes to stderr and must not disturb stdout.
    let variant_logging = run_variant(&root, &[], &[("RUST_LOG", "trace")]);
    assert_eq!(baseline, variant_logging, "output differs when RUST_LOG=trace");

    let variant_noise = run_variant(
        &root,
        &[],
        &[
            ("WAYPOINT_SPURIOUS_1", "noise"),
            ("WAYPOINT_SPURIOUS_2", "more_noise"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");
}

#[test]
fn crossproc_scenario_file_matches_inproc() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corridor.json");
    std::fs::write(
        &path,
        r#"{
            "name": "corridor",
            "grid": {"rows": ["......", ".####.", "......"]},
            "start": [1, 0],
            "goal": [1, 5],
            "heuristics": ["manhattan"]
        }"#,
    )
    .unwrap();
    let path_arg = path.to_string_lossy().to_string();

    let out = run_variant(&workspace_root(), &[&path_arg], &[]);
    assert!(out.contains("scenario=corridor"), "{out}");
    assert!(out.contains("manhattan.cost=7.000000"), "{out}");

    let scenario = waypoint_harness::scenario::ScenarioV1::load(&path).unwrap();
    let inproc = waypoint_harness::runner::run_scenario(&scenario).unwrap();
    for line in inproc[0].summary_lines() {
        assert!(out.contains(&line), "missing {line} in\n{out}");
    }
}
