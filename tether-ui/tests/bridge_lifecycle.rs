//! Integration tests driving the bridge through the render root
//! against a recording host.
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tether_ui::bridge::{CommandLog, HostOp, RecordingHost};
use tether_ui::config::{BridgeConfig, IdStrategy};
use tether_ui::events::{EventName, HostEvent, read_events};
use tether_ui::node::{Element, NodeId, RenderReport, RenderRoot, WidgetType};
use tether_ui::style::style_map;
use tether_ui::widgets;

fn sequential() -> BridgeConfig {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tether_ui=debug")
        .with_test_writer()
        .try_init();
    BridgeConfig {
        id_strategy: IdStrategy::Sequential,
        ..BridgeConfig::default()
    }
}

fn payloads(log: &CommandLog, op: HostOp) -> Vec<Value> {
    log.borrow()
        .iter()
        .filter(|c| c.op == op)
        .map(|c| c.payload_json().unwrap())
        .collect()
}

#[test]
fn test_view_with_margin_shorthand() {
    let log = CommandLog::default();
    let mut root = RenderRoot::new(RecordingHost::with_buffer(log.clone()), sequential());

    let tree = widgets::view()
        .id("main")
        .style(style_map(json!({ "marginVertical": 8, "backgroundColor": "#fff" })))
        .child(widgets::text("hello"));
    root.render(&tree);

    let creates = payloads(&log, HostOp::Create);
    assert_eq!(creates.len(), 2);

    let view = &creates[0];
    assert_eq!(view["type"], "View");
    assert_eq!(view["id"], "main");
    assert_eq!(view["persistent"], true);
    assert_eq!(view["className"], "qt View");
    assert!(view.get("parent").is_none());
    assert!(view.get("children").is_none());
    assert_eq!(
        view["style"],
        json!({
            "display": "flex",
            "flex-direction": "column",
            "margin-top": 8,
            "margin-bottom": 8,
            "background": "#fff",
        })
    );

    let text = &creates[1];
    assert_eq!(text["parent"], "main");
    assert!(text.get("persistent").is_none());
    assert_eq!(text["text"], "hello");
}

#[test]
fn test_handlers_never_cross_the_wire() {
    let log = CommandLog::default();
    let mut root = RenderRoot::new(RecordingHost::with_buffer(log.clone()), sequential());

    root.render(&widgets::button("Go").on(EventName::Press, |_| {}));

    for command in log.borrow().iter() {
        let payload = command.payload_json().unwrap();
        assert!(payload.get("onPress").is_none());
        assert!(payload.get("children").is_none());
    }
}

#[test]
fn test_event_reaches_current_handler() {
    let mut root = RenderRoot::new(RecordingHost::new(), sequential());
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = first.clone();
    root.render(&widgets::button("Go").id("go").on(EventName::Press, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let counter = second.clone();
    root.render(&widgets::button("Go").id("go").on(EventName::Press, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let events = "{\"id\":\"go\",\"event\":\"onPress\"}\n{\"id\":\"go\",\"event\":\"onClick\"}\n";
    let delivered = read_events(events.as_bytes())
        .map(|event| root.dispatch(&event.unwrap()))
        .filter(|ran| *ran)
        .count();

    assert_eq!(delivered, 1);
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dropped_handler_becomes_noop() {
    let mut root = RenderRoot::new(RecordingHost::new(), sequential());
    root.render(&widgets::button("Go").id("go").on(EventName::Press, |_| {}));
    root.render(&widgets::button("Go").id("go"));

    let registry = root.registry();
    assert!(registry.contains(&NodeId::from("go")));
    assert!(registry.get(&NodeId::from("go"), "onPress").is_noop());
}

#[test]
fn test_mount_failure_does_not_block_updates() {
    let host = RecordingHost::new().failing_on(HostOp::Create);
    let log = host.log();
    let mut root = RenderRoot::new(host, sequential());
    let pressed = Arc::new(AtomicUsize::new(0));

    let counter = pressed.clone();
    let report = root.render(&widgets::button("Go").id("go").on(EventName::Press, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    assert_eq!(report.mounted, 1);
    assert!(payloads(&log, HostOp::Create).is_empty());
    assert_eq!(payloads(&log, HostOp::Patch).len(), 1);

    assert!(root.dispatch(&HostEvent::new(NodeId::from("go"), "onPress", Value::Null)));
    assert_eq!(pressed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unmount_clears_registry_entry() {
    let log = CommandLog::default();
    let mut root = RenderRoot::new(RecordingHost::with_buffer(log.clone()), sequential());

    let tree = |with_button: bool| {
        let mut panel = widgets::view().id("panel");
        if with_button {
            panel = panel.child(widgets::button("x").id("close").on(EventName::Click, |_| {}));
        }
        panel
    };

    root.render(&tree(true));
    assert!(root.registry().contains(&NodeId::from("close")));

    let report = root.render(&tree(false));
    assert_eq!(report.unmounted, 1);
    assert!(!root.registry().contains(&NodeId::from("close")));

    let destroyed = payloads(&log, HostOp::Destroy);
    assert_eq!(destroyed.len(), 1);
    assert_eq!(destroyed[0]["id"], "close");
}

#[test]
fn test_generated_ids_are_stable_and_authored_ids_distinct() {
    let mut root = RenderRoot::new(RecordingHost::new(), BridgeConfig::default());
    let tree = widgets::view()
        .child(widgets::view().id("left"))
        .child(widgets::view().id("right"))
        .child(widgets::text("anon"));

    root.render(&tree);
    let anon_key = root.keys().last().map(str::to_string).unwrap();
    let anon = root.node_id(&anon_key).cloned().unwrap();
    let root_id = root.node_id("root").cloned().unwrap();
    assert!(uuid_like(anon.as_str()));

    root.render(&tree);
    assert_eq!(root.node_id(&anon_key), Some(&anon));
    assert_eq!(root.node_id("root"), Some(&root_id));

    let left = root.node_id(&format!("{root_id}-#0")).cloned();
    let right = root.node_id(&format!("{root_id}-#1")).cloned();
    assert_eq!(left, Some(NodeId::from("left")));
    assert_eq!(right, Some(NodeId::from("right")));
}

#[test]
fn test_moved_authored_id_is_destroyed_before_recreated() {
    let log = CommandLog::default();
    let mut root = RenderRoot::new(RecordingHost::with_buffer(log.clone()), sequential());

    let badge = || widgets::text("1").id("badge");
    root.render(&widgets::view().child(badge()).child(widgets::view()));
    log.borrow_mut().clear();

    root.render(&widgets::view().child(widgets::view()).child(widgets::view().child(badge())));

    let ops: Vec<_> = log
        .borrow()
        .iter()
        .filter(|c| c.payload_json().unwrap()["id"] == "badge")
        .map(|c| c.op)
        .collect();
    assert_eq!(ops, vec![HostOp::Destroy, HostOp::Create, HostOp::Patch]);
}

#[test]
fn test_flat_list_items_are_mounted_but_data_is_not_sent() {
    let log = CommandLog::default();
    let mut root = RenderRoot::new(RecordingHost::with_buffer(log.clone()), sequential());

    let list = widgets::flat_list(
        vec![json!({ "id": "a", "title": "First" }), json!({ "id": "b", "title": "Second" })],
        |item, _| widgets::text(item["title"].as_str().unwrap_or_default()),
    );
    root.render(&Element::new(WidgetType::Window).child(list));

    let creates = payloads(&log, HostOp::Create);
    assert_eq!(creates.len(), 4);
    assert_eq!(creates[1]["type"], "FlatList");
    assert!(creates[1].get("data").is_none());
    assert_eq!(creates[3]["text"], "Second");
    assert_eq!(creates[3]["parent"], creates[1]["id"]);
}

#[test]
fn test_keyed_sibling_does_not_shadow_positional_sibling() {
    let log = CommandLog::default();
    let mut root = RenderRoot::new(RecordingHost::with_buffer(log.clone()), sequential());

    let tree = widgets::view()
        .child(widgets::text("header"))
        .child(widgets::text("item zero").key("0"));
    let report = root.render(&tree);

    assert_eq!(report.mounted, 3);
    let texts: Vec<_> = payloads(&log, HostOp::Create)
        .iter()
        .filter_map(|create| create["text"].as_str().map(str::to_string))
        .collect();
    assert_eq!(texts, vec!["header", "item zero"]);

    log.borrow_mut().clear();
    let report = root.render(&tree);
    assert_eq!(report, RenderReport { mounted: 0, updated: 3, unmounted: 0 });
}

#[test]
fn test_flat_list_items_with_repeated_ids_all_mount() {
    let log = CommandLog::default();
    let mut root = RenderRoot::new(RecordingHost::with_buffer(log.clone()), sequential());

    let list = widgets::flat_list(
        vec![json!({ "id": "same", "title": "One" }), json!({ "id": "same", "title": "Two" })],
        |item, _| widgets::text(item["title"].as_str().unwrap_or_default()),
    );
    let report = root.render(&list);

    assert_eq!(report.mounted, 3);
    let creates = payloads(&log, HostOp::Create);
    assert_eq!(creates[1]["text"], "One");
    assert_eq!(creates[2]["text"], "Two");
}

fn uuid_like(id: &str) -> bool {
    id.len() == 36 && id.chars().filter(|c| *c == '-').count() == 4
}
