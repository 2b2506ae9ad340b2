mod common;

use common::{recording_dispatcher, temp_file};
use std::sync::Arc;
use triggerkit::dispatch::{AckChannelSink, ActionDispatcher};
use triggerkit::manifest::{Manifest, ManifestError, Step};
use triggerkit::poll::PollRegistry;
use triggerkit::script::{ScriptError, Session};

const DASHBOARD: &str = r#"{
    "components": [
        {"id": "table", "actions": [
            {"trigger": "onload", "action": "fetch rows", "pollingPeriod": 1000},
            {"trigger": "onclick", "action": "fetch rows", "stop": true}
        ]},
        {"id": "field", "actions": [
            {"trigger": "onchange", "action": "validate field"},
            {"trigger": "onfocus", "action": "mark touched", "inputVariables": {"field": "name"}}
        ]}
    ],
    "route": {"initial": "/home", "actions": [
        {"trigger": "onlocationchange", "action": "track page"}
    ]},
    "script": [
        {"component": "field", "trigger": "onfocus"},
        {"waitMs": 2500},
        {"component": "table", "trigger": "onclick"},
        {"navigate": "/home"},
        {"navigate": "/reports"},
        {"component": "field", "dispatch": {"type": "SET_VALUE", "inputVariables": {"value": "x"}}, "then": "onchange"}
    ]
}"#;

#[tokio::test(start_paused = true)]
async fn replays_a_dashboard_script() {
    let manifest = Manifest::parse(DASHBOARD).unwrap();
    manifest.validate().unwrap();

    let (dispatcher, sink) = recording_dispatcher();
    let mut session = Session::new(&dispatcher, &manifest);
    session.mount_all().await.unwrap();
    session.run(&manifest.script).await.unwrap();

    // Polls at mount (t=0), then t=1000 and t=2000; the click at t=2500
    // stops it.
    assert_eq!(
        sink.kinds(),
        vec![
            "FETCH_ROWS",
            "MARK_TOUCHED",
            "FETCH_ROWS",
            "FETCH_ROWS",
            "TRACK_PAGE",
            "SET_VALUE",
            "VALIDATE_FIELD",
        ]
    );
    assert!(dispatcher.registry().active_names().is_empty());
    assert!(session.component("table").unwrap().is_mounted());
}

#[tokio::test]
async fn mount_is_idempotent_across_runs() {
    let manifest = Manifest::parse(
        r#"{"components": [{"id": "a", "actions": [{"trigger": "onload", "action": "init"}]}]}"#,
    )
    .unwrap();

    let (dispatcher, sink) = recording_dispatcher();
    let mut session = Session::new(&dispatcher, &manifest);
    session.mount_all().await.unwrap();
    session.mount_all().await.unwrap();

    assert_eq!(sink.kinds(), vec!["INIT"]);
}

#[tokio::test]
async fn lifecycle_step_fires_directly() {
    let manifest = Manifest::parse(
        r#"{
            "components": [{"id": "a", "actions": [{"trigger": "onrefresh", "action": "reload"}]}],
            "script": [{"component": "a", "trigger": "onrefresh"}]
        }"#,
    )
    .unwrap();

    let (dispatcher, sink) = recording_dispatcher();
    let mut session = Session::new(&dispatcher, &manifest);
    session.run(&manifest.script).await.unwrap();

    assert_eq!(sink.kinds(), vec!["RELOAD"]);
}

#[tokio::test]
async fn unknown_component_is_reported() {
    let manifest = Manifest::default();
    let (dispatcher, _) = recording_dispatcher();
    let mut session = Session::new(&dispatcher, &manifest);

    let step: Step = serde_json::from_str(r#"{"component": "ghost", "trigger": "onclick"}"#).unwrap();
    assert!(matches!(
        session.run_step(&step).await,
        Err(ScriptError::UnknownComponent(id)) if id == "ghost"
    ));
}

#[tokio::test]
async fn navigation_without_route_is_reported() {
    let manifest = Manifest::default();
    let (dispatcher, _) = recording_dispatcher();
    let mut session = Session::new(&dispatcher, &manifest);

    let step = Step::Navigate {
        navigate: "/x".into(),
    };
    assert!(matches!(
        session.run_step(&step).await,
        Err(ScriptError::NoRoute(_))
    ));
}

#[tokio::test]
async fn closed_store_surfaces_as_dispatch_error() {
    let (sink, store) = AckChannelSink::new();
    drop(store);
    let dispatcher = ActionDispatcher::new(Arc::new(sink), PollRegistry::new());

    let manifest = Manifest::parse(
        r#"{"components": [{"id": "a", "actions": [{"trigger": "onload", "action": "init"}]}]}"#,
    )
    .unwrap();
    let mut session = Session::new(&dispatcher, &manifest);

    assert!(matches!(
        session.mount_all().await,
        Err(ScriptError::Dispatch(_))
    ));
}

#[test]
fn manifest_file_errors_are_typed() {
    let (_dir, bad) = temp_file("bad.json", "{ not json");
    assert!(matches!(
        Manifest::load_from(&bad),
        Err(ManifestError::ParseError { .. })
    ));

    let (_dir, invalid) = temp_file(
        "invalid.json",
        r#"{"script": [{"component": "nobody", "trigger": "onclick"}]}"#,
    );
    assert!(matches!(
        Manifest::load_from(&invalid),
        Err(ManifestError::ValidationError { .. })
    ));

    let (_dir, good) = temp_file("good.json", DASHBOARD);
    let manifest = Manifest::load_from(&good).unwrap();
    assert_eq!(manifest.components.len(), 2);
    assert_eq!(manifest.script.len(), 6);
}
