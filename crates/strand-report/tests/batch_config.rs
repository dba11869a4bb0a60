use std::fs;

use proptest::prelude::*;
use strand_core::{OptionValue, ReportError};
use strand_report::{run_batch, BatchConfig, Category, Query};
use strand_state::save_state;
use tempfile::tempdir;

mod fixtures;

use fixtures::sample_state;

#[test]
fn batch_runs_queries_in_order() {
    let dir = tempdir().unwrap();
    save_state(&sample_state(), &dir.path().join("frame.yaml")).unwrap();
    let config_path = dir.path().join("batch.yaml");
    fs::write(
        &config_path,
        "state: frame.yaml\n\
         queries:\n\
         \x20 - query: time\n\
         \x20 - query: fiber:length_distribution\n\
         \x20   options:\n\
         \x20     interval: 2\n\
         \x20     max: 4\n\
         \x20 - query: fiber:clusters\n\
         \x20   options:\n\
         \x20     details: false\n",
    )
    .unwrap();

    let config = BatchConfig::from_path(&config_path).unwrap();
    assert_eq!(config.state, dir.path().join("frame.yaml"));
    assert_eq!(config.output, None);
    assert_eq!(
        config.queries[2].options.get("details"),
        Some(&OptionValue::Flag(false))
    );

    let mut out = Vec::new();
    let written = run_batch(&config, &mut out).unwrap();
    assert_eq!(written, 3);
    let text = String::from_utf8(out).unwrap();
    let blocks: Vec<&str> = text.split("\n\n").filter(|block| !block.is_empty()).collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with("% time\n3.250000"));
    assert!(blocks[1].contains("actin"));
    assert!(blocks[2].ends_with("4  1 :"));
}

#[test]
fn batch_stops_at_first_failing_query() {
    let dir = tempdir().unwrap();
    save_state(&sample_state(), &dir.path().join("frame.json")).unwrap();
    let config_path = dir.path().join("batch.yaml");
    fs::write(
        &config_path,
        "state: frame.json\nqueries:\n  - query: time\n  - query: filament\n  - query: custom\n",
    )
    .unwrap();
    let config = BatchConfig::from_path(&config_path).unwrap();
    let mut out = Vec::new();
    let err = run_batch(&config, &mut out).unwrap_err();
    assert!(matches!(err, ReportError::UnknownCategory(_)));
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "% time\n3.250000\n\n");
}

#[test]
fn batch_config_errors() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    match BatchConfig::from_path(&missing) {
        Err(ReportError::Io(info)) => assert_eq!(info.code, "config_read"),
        other => panic!("unexpected {other:?}"),
    }

    let broken = dir.path().join("broken.yaml");
    fs::write(&broken, "queries: [1, 2").unwrap();
    match BatchConfig::from_path(&broken) {
        Err(ReportError::Serde(info)) => assert_eq!(info.code, "config_parse"),
        other => panic!("unexpected {other:?}"),
    }

    let config_path = dir.path().join("batch.yaml");
    fs::write(&config_path, "state: nowhere.yaml\nqueries:\n  - query: time\n").unwrap();
    let config = BatchConfig::from_path(&config_path).unwrap();
    let mut out = Vec::new();
    assert!(matches!(
        run_batch(&config, &mut out),
        Err(ReportError::Io(_))
    ));
    assert!(out.is_empty());
}

proptest! {
    #[test]
    fn query_split_keeps_everything_after_first_colon(
        index in 0usize..Category::ALL.len(),
        tail in "[a-z_:]{0,12}",
    ) {
        let category = Category::ALL[index];
        let raw = format!("{category}:{tail}");
        let query = Query::parse(&raw).unwrap();
        prop_assert_eq!(query.category, category);
        prop_assert_eq!(&query.subcategory, &tail);
        prop_assert_eq!(category.index(), index);
    }

    #[test]
    fn unknown_tokens_never_resolve(token in "[A-Z][a-z]{0,8}") {
        prop_assert!(Query::parse(&token).is_err());
    }
}
