//! Integration tests for the data-source fallback chain

use std::fs;
use std::io::Write;
use tempfile::TempDir;

use tg_coding_dashboard::demo::{DemoSource, DEMO_RECORD_COUNT};
use tg_coding_dashboard::source::{DataSource, ResultsDirSource, SourceChain};

const HEADER: &str = "Message_ID,Date,Categories,Subcategories,Intensity_Score,Relevant,Views,Forwards,Has_Photo,Has_Document,Linguistic_Markers,Text_Preview";

fn results_dir(rows: &[&str], with_summary: bool) -> TempDir {
    let dir = TempDir::new().expect("temp dir");

    let csv_path = dir.path().join(ResultsDirSource::CSV_FILE);
    let mut csv = fs::File::create(csv_path).expect("create csv");
    writeln!(csv, "{HEADER}").expect("header");
    for row in rows {
        writeln!(csv, "{row}").expect("row");
    }

    if with_summary {
        let json_path = dir.path().join(ResultsDirSource::JSON_FILE);
        fs::write(
            json_path,
            r#"{"analysis_summary": {"total_messages_analyzed": 3, "relevant_messages_found": 1, "relevance_rate": 33.3}}"#,
        )
        .expect("write summary");
    }

    dir
}

#[test]
fn test_chain_prefers_first_present_source() {
    let combined = results_dir(
        &["msg_c,2024-01-05 10:30:00,SRHR & Moral Panic,,1,True,100,0,False,False,,combined"],
        true,
    );
    let single = results_dir(
        &["msg_s,2024-01-05 10:30:00,SRHR & Moral Panic,,1,True,100,0,False,False,,single"],
        true,
    );

    let chain = SourceChain::standard(combined.path(), single.path());
    let resolved = chain.resolve().expect("resolve");
    assert_eq!(resolved.source, "combined");
    assert_eq!(resolved.dataset.records[0].id, "msg_c");
}

#[test]
fn test_chain_falls_back_to_single_then_demo() {
    let missing = TempDir::new().expect("temp dir");
    let single = results_dir(
        &["msg_s,2024-01-05 10:30:00,SRHR & Moral Panic,,1,True,100,0,False,False,,single"],
        true,
    );

    let chain = SourceChain::standard(missing.path(), single.path());
    let resolved = chain.resolve().expect("resolve");
    assert_eq!(resolved.source, "single");

    let empty_a = TempDir::new().expect("temp dir");
    let empty_b = TempDir::new().expect("temp dir");
    let chain = SourceChain::standard(empty_a.path(), empty_b.path());
    let resolved = chain.resolve().expect("resolve");
    assert_eq!(resolved.source, "demo");
    assert_eq!(resolved.dataset.records.len(), DEMO_RECORD_COUNT);
}

#[test]
fn test_source_without_summary_still_serves_records() {
    let dir = results_dir(
        &["msg_1,2024-01-05 10:30:00,SRHR & Moral Panic,,1,True,100,0,False,False,,ok"],
        false,
    );

    let source = ResultsDirSource::new("combined", dir.path());
    let dataset = source.fetch().expect("fetch").expect("present");
    assert_eq!(dataset.records.len(), 1);
    assert!(dataset.summary.is_none());
}

#[test]
fn test_source_reports_skipped_rows() {
    let dir = results_dir(
        &[
            "msg_1,2024-01-05 10:30:00,SRHR & Moral Panic,,1,True,100,0,False,False,,ok",
            "msg_2,garbage-date,SRHR & Moral Panic,,1,True,100,0,False,False,,bad",
        ],
        false,
    );

    let source = ResultsDirSource::new("single", dir.path());
    let dataset = source.fetch().expect("fetch").expect("present");
    assert_eq!(dataset.records.len(), 1);
    assert_eq!(dataset.skipped, 1);
}

#[test]
fn test_demo_source_always_serves() {
    let source = DemoSource::with_seed(123);
    let dataset = source.fetch().expect("fetch").expect("present");
    assert_eq!(dataset.records.len(), DEMO_RECORD_COUNT);
    assert!(dataset.summary.is_some());
    assert_eq!(dataset.skipped, 0);
}

#[test]
fn test_demo_summary_matches_sample_constants() {
    let source = DemoSource::default();
    let dataset = source.fetch().expect("fetch").expect("present");
    let summary = dataset.summary.expect("summary");
    assert_eq!(summary.header.relevant_messages_found, 1_315);
    assert_eq!(
        summary.subcategory_distribution.get("3.religious_opposition"),
        Some(&1_280)
    );
}
