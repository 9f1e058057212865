//! Integration tests for scripted browsing sessions.

use pagesel_cli::render::{header_checkbox, render_page, status_line};
use pagesel_cli::runner::run_script;
use pagesel_cli::script::parse_script;
use pagesel_cli::types::BrowseReport;
use pagesel_core::{BrowsingSession, VecProvider};
use pagesel_model::{ItemId, SessionOptions};

fn run(text: &str, provider: &mut VecProvider) -> (BrowsingSession, BrowseReport) {
    let script = parse_script(text).unwrap();
    let mut session = BrowsingSession::new(SessionOptions::default()).unwrap();
    let report = run_script(&mut session, provider, &script).unwrap();
    (session, report)
}

#[test]
fn test_bulk_rule_with_overrides_on_second_page() {
    let mut provider = VecProvider::numbered(100);
    let (session, report) = run(
        "page 2\nselect 15\ntoggle 13 off\ntoggle 20 on\n",
        &mut provider,
    );

    insta::assert_snapshot!(status_line(&session), @"page 2/9 | rows 13-24 of 100 | selected 15");
    assert_eq!(report.page_number, 2);
    assert_eq!(report.selection.baseline, 15);
    assert_eq!(report.selection.include, vec!["20".to_string()]);
    assert_eq!(report.selection.exclude, vec!["13".to_string()]);
    assert_eq!(report.selection.effective_count, 15);
    assert_eq!(report.pages_loaded, 2);
    assert!(!report.has_failures());
}

#[test]
fn test_header_checkbox_tracks_page_state() {
    let mut provider = VecProvider::numbered(30);
    let (session, _) = run("select 12\n", &mut provider);
    assert_eq!(header_checkbox(&session.query()), "[x]");

    let (session, _) = run("select 12\ntoggle 5 off\n", &mut provider);
    assert_eq!(header_checkbox(&session.query()), "[-]");

    let (session, _) = run("page 2\n", &mut provider);
    assert_eq!(header_checkbox(&session.query()), "[ ]");
}

#[test]
fn test_toggles_for_other_pages_are_counted_and_ignored() {
    let mut provider = VecProvider::numbered(100);
    let (session, report) = run("toggle 50 on\ntoggle 3 on\n", &mut provider);

    assert_eq!(report.ignored_events, 1);
    assert!(session.model().is_included(&ItemId::from(3)));
    assert!(!session.model().is_included(&ItemId::from(50)));
    assert_eq!(report.selection.effective_count, 1);
}

#[test]
fn test_invalid_baseline_is_reported_and_model_kept() {
    let mut provider = VecProvider::numbered(100);
    let (_, report) = run("select 10\nselect -3\nselect ten\n", &mut provider);

    assert_eq!(report.selection.baseline, 10);
    assert_eq!(report.messages.len(), 2);
    assert!(report.messages[0].starts_with("line 2: "));
    assert!(report.messages[1].starts_with("line 3: "));
    assert!(report.has_failures());
}

#[test]
fn test_failed_page_keeps_selection_and_shows_error() {
    let mut provider = VecProvider::numbered(100).with_failing_pages([3]);
    let (session, report) = run("all on\npage 3\nshow\npage 1\n", &mut provider);

    assert_eq!(report.fetch_failures, 1);
    assert_eq!(report.pages_loaded, 2);
    assert_eq!(report.selection.effective_count, 12);
    assert!(report.messages[0].starts_with("line 2: page 3: "));
    assert!(report.views[0].contains("\nerror: "));
    assert!(session.last_error().is_none());
}

#[test]
fn test_navigation_stops_at_collection_edges() {
    let mut provider = VecProvider::numbered(20);
    let (session, report) = run("prev\nnext\nnext\n", &mut provider);

    assert_eq!(session.page().page_number(), 2);
    assert_eq!(
        report.messages,
        vec![
            "line 1: already on the first page".to_string(),
            "line 3: already on the last page".to_string(),
        ]
    );
}

#[test]
fn test_show_renders_rows_with_positions() {
    let mut provider = VecProvider::numbered(100);
    let (_, report) = run("page 2\nselect 14\nshow\n", &mut provider);

    let view = &report.views[0];
    assert!(view.starts_with("page 2/9 | rows 13-24 of 100 | selected 14"));
    assert!(view.contains("Item 13"));
    assert!(view.contains("Item 24"));
    assert!(!view.contains("Item 25"));
}

#[test]
fn test_render_page_on_empty_collection() {
    let mut provider = VecProvider::numbered(0);
    let (session, _) = run("", &mut provider);

    let view = render_page(&session);
    assert!(view.starts_with("page 1/1 | rows none | selected 0"));
}

#[test]
fn test_report_json_omits_rendered_views() {
    let mut provider = VecProvider::numbered(30);
    let (_, report) = run("select 3\nshow\n", &mut provider);

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert!(json.get("views").is_none());
    assert_eq!(json["selection"]["effective_count"], 3);
    assert_eq!(json["page_size"], 12);
}

#[test]
fn test_page_past_representable_positions_is_noted() {
    let mut provider = VecProvider::numbered(100);
    let (session, report) = run("page 3074457345618258603
all on
", &mut provider);

    assert_eq!(session.page().page_number(), 1);
    assert_eq!(report.selection.effective_count, 12);
    assert_eq!(report.messages.len(), 1);
    assert!(report.messages[0].starts_with("line 1: page 3074457345618258603: "));
    assert_eq!(report.pages_loaded, 1);
}

#[test]
fn test_overflowing_baseline_is_reported_as_too_large() {
    let mut provider = VecProvider::numbered(100);
    let (_, report) = run("select 9223372036854775808
", &mut provider);

    assert_eq!(report.selection.baseline, 0);
    assert_eq!(report.messages.len(), 1);
    assert!(report.messages[0].contains("too large"));
}
