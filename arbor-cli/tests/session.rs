use std::io::Cursor;

use arbor::TreeStore;
use arbor_cli::config::CliConfig;
use arbor_cli::outline::{self, OutlineNode};
use arbor_cli::{CliError, render, session};

const OUTLINE: &str = r#"[
    { "label": "Folder", "icon": "folder", "expanded_icon": "folder-open", "children": [
        { "label": "File1" },
        { "label": "File2", "selected": true }
    ] },
    { "label": "Closed", "expanded": false, "children": [ { "label": "Hidden" } ] }
]"#;

fn run(store: &TreeStore<String>, input: &str) -> String {
    let mut output = Vec::new();
    session::run(store, Cursor::new(input), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

// ============================================================================
// Outline
// ============================================================================

#[test]
fn test_outline_defaults() {
    let nodes = outline::parse(r#"[{ "label": "Only" }]"#).unwrap();
    assert_eq!(
        nodes,
        [OutlineNode {
            label: "Only".to_string(),
            expanded: true,
            selected: false,
            icon: None,
            expanded_icon: None,
            children: Vec::new(),
        }]
    );
}

#[test]
fn test_outline_builds_tree() {
    let items = outline::build(outline::parse(OUTLINE).unwrap());
    assert_eq!(items.len(), 5);
    assert!(items.find(&"File2".to_string()).unwrap().selected());
    assert!(!items.find(&"Closed".to_string()).unwrap().expanded());
}

#[test]
fn test_outline_rejects_bad_json() {
    assert!(outline::parse("{ not json").is_err());
}

#[test]
fn test_outline_load_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(outline::load(&missing), Err(CliError::Io(_))));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "[{ \"label\": 3 }]").unwrap();
    assert!(matches!(outline::load(&broken), Err(CliError::Json(_))));
}

#[test]
fn test_render_outline() {
    let items = outline::build(outline::parse(OUTLINE).unwrap());
    let folder = items.find(&"Folder".to_string()).unwrap().id();
    let text = render::outline(&items, Some(folder));
    assert_eq!(
        text,
        "> ▼ [folder-open] Folder\n      File1\n      File2 *\n  ▶ Closed\n"
    );
}

#[test]
fn test_sample_tree() {
    let items = outline::sample();
    assert_eq!(items.roots().count(), 4);
    assert_eq!(items.find(&"Loading App 3".to_string()).unwrap().depth(), 3);
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_applies_commands() {
    let store = TreeStore::new(outline::build(outline::parse(OUTLINE).unwrap()));
    let output = run(&store, "select file1\ntoggle Folder\nquit\nselect Closed\n");

    let state = store.state();
    assert!(state.find(&"File1".to_string()).unwrap().selected());
    assert!(!state.find(&"Folder".to_string()).unwrap().expanded());
    // Nothing after quit runs.
    assert!(!state.find(&"Closed".to_string()).unwrap().selected());
    assert!(output.ends_with("  ▶ [folder] Folder\n  ▶ Closed\n"));
}

#[test]
fn test_session_reports_errors_and_continues() {
    let store = TreeStore::new(outline::build(outline::parse(OUTLINE).unwrap()));
    let output = run(&store, "select Missing\nbogus\ndown\n");

    assert!(output.contains("error: no node labelled 'Missing'"));
    assert!(output.contains("error: unknown command 'bogus'"));
    let folder = store.state().find(&"Folder".to_string()).unwrap().id();
    assert_eq!(store.current(), Some(folder));
}

#[test]
fn test_session_current_and_navigation() {
    let store = TreeStore::new(outline::build(outline::parse(OUTLINE).unwrap()));
    run(&store, "current File2\nparent\n");
    let folder = store.state().find(&"Folder".to_string()).unwrap().id();
    assert_eq!(store.current(), Some(folder));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_parse_and_defaults() {
    let config = CliConfig::parse(r#"{ "selection": "single", "log_level": "warn" }"#).unwrap();
    assert_eq!(config.selection, arbor::SelectionMode::Single);
    assert_eq!(config.leaf_toggle, arbor::LeafToggle::Ignore);
    assert_eq!(config.log_level, simplelog::LevelFilter::Warn);

    let store = TreeStore::with_config(outline::sample(), config.store());
    assert_eq!(store.config().selection, arbor::SelectionMode::Single);
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let config = CliConfig::load(std::path::Path::new("/nonexistent/arbor/config.json")).unwrap();
    assert_eq!(config, CliConfig::default());
}
