use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use strand_core::{ObjectKind, Vector};
use strand_state::{save_state, StateBuilder};
use tempfile::tempdir;

fn write_snapshot(path: &Path) {
    let mut builder = StateBuilder::new(7);
    builder.time(1.5);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    let linker = builder.class(ObjectKind::Couple, "linker").unwrap();
    let first = builder
        .straight_fiber(actin, Vector::zeros(), Vector::x(), 2.0, 2)
        .unwrap();
    let second = builder
        .straight_fiber(actin, Vector::y(), Vector::x(), 4.0, 2)
        .unwrap();
    builder.bridge(linker, (first, 1.0), (second, 1.0)).unwrap();
    save_state(&builder.build().unwrap(), path).unwrap();
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_strand"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

#[test]
fn report_writes_requested_queries_to_file() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("frame.yaml");
    let out = dir.path().join("reports").join("out.txt");
    write_snapshot(&state);

    let output = run_cli(&[
        "report",
        "--state",
        state.to_str().unwrap(),
        "--query",
        "time",
        "--query",
        "fiber:clusters",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        "% time\n1.500000\n\n% cluster-index, number-of-fibers : name-of-fibers\n1  2 : 1 2\n\n"
    );
}

#[test]
fn report_options_reach_the_renderer() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("frame.json");
    write_snapshot(&state);

    let output = run_cli(&[
        "report",
        "--state",
        state.to_str().unwrap(),
        "--query",
        "fiber:length_distribution",
        "--set",
        "interval=2",
        "--set",
        "max=4",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let row: Vec<&str> = stdout.lines().nth(1).unwrap().split_whitespace().collect();
    assert_eq!(row, vec!["actin", "0", "1", "1"]);
}

#[test]
fn unknown_queries_fail_with_a_message() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("frame.yaml");
    write_snapshot(&state);

    let output = run_cli(&[
        "report",
        "--state",
        state.to_str().unwrap(),
        "--query",
        "fiber:bogus",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bogus"), "{stderr}");
}

#[test]
fn batch_follows_configuration() {
    let dir = tempdir().unwrap();
    write_snapshot(&dir.path().join("frame.yaml"));
    let config = dir.path().join("batch.yaml");
    fs::write(
        &config,
        "state: frame.yaml\noutput: batch.txt\nqueries:\n  - query: fiber:lengths\n  - query: couple\n",
    )
    .unwrap();

    let output = run_cli(&["batch", "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let text = fs::read_to_string(dir.path().join("batch.txt")).unwrap();
    assert_eq!(text.matches("\n\n").count(), 2);
    assert!(text.contains("linker"));
}

#[test]
fn queries_lists_the_table() {
    let output = run_cli(&["queries"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("fiber\n"));
    assert!(stdout.contains("  fiber:length_distribution  [interval, max]\n"));
    assert!(stdout.contains("  couple:<couple class name>\n"));
    assert!(stdout.contains("custom\n"));
}
