use novaflow_catalog::{demo_catalog, ModuleId, ResourceKind, ResourceNode};
use novaflow_workspace::{
    ContentView, Gesture, InteractionController, Mode, PointerPosition, ResourceRef,
    TabMenuAction, WorkspaceConfig, ELEMENTS_VIEW_TAB_ID,
};

fn report(id: &str, name: &str) -> ResourceRef {
    ResourceRef::node(ResourceNode::leaf(id, name, ResourceKind::Chart))
}

fn closed_ids(session: &InteractionController) -> Vec<String> {
    session
        .snapshot()
        .recently_closed
        .into_iter()
        .map(|entry| entry.id)
        .collect()
}

#[test]
fn builtin_tab_scenario() {
    let mut session = InteractionController::default();
    let initial = session.snapshot();
    assert_eq!(initial.tab_ids(), vec![ELEMENTS_VIEW_TAB_ID]);
    assert_eq!(initial.active_tab_id.as_deref(), Some(ELEMENTS_VIEW_TAB_ID));
    assert_eq!(initial.revision, 0);
    assert_eq!(session.content_view(), ContentView::ElementList);

    session.open_tab(&report("f1", "Report A"));
    session.open_tab(&report("f2", "Report B"));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.tab_ids(), vec![ELEMENTS_VIEW_TAB_ID, "f1", "f2"]);
    assert_eq!(snapshot.active_tab_id.as_deref(), Some("f2"));

    session.close_tab("f1");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.tab_ids(), vec![ELEMENTS_VIEW_TAB_ID, "f2"]);
    assert_eq!(snapshot.active_tab_id.as_deref(), Some("f2"));

    session.close_tab("f2");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.tab_ids(), vec![ELEMENTS_VIEW_TAB_ID]);
    assert_eq!(snapshot.active_tab_id.as_deref(), Some(ELEMENTS_VIEW_TAB_ID));
    assert_eq!(closed_ids(&session), vec!["f2", "f1"]);
}

#[test]
fn set_mode_twice_clears_drawer_once() {
    let mut session = InteractionController::default();
    assert_eq!(
        session.snapshot().active_drawer_module_id,
        Some(ModuleId::new("recents"))
    );

    assert!(session.set_mode(Mode::Business));
    let first = session.snapshot();
    assert_eq!(first.active_drawer_module_id, None);
    assert_eq!(first.active_module_id, ModuleId::new("finance_center"));
    assert!(!first.is_drawer_visible);

    assert!(!session.set_mode(Mode::Business));
    let second = session.snapshot();
    assert_eq!(second.active_module_id, first.active_module_id);
    assert_eq!(second.revision, first.revision);
}

#[test]
fn reopening_never_grows_the_strip() {
    let mut session = InteractionController::default();
    for id in ["a", "b", "c", "b", "a", "c"] {
        session.open_tab(&report(id, id));
        assert_eq!(session.snapshot().active_tab_id.as_deref(), Some(id));
    }
    assert_eq!(
        session.snapshot().tab_ids(),
        vec![ELEMENTS_VIEW_TAB_ID, "a", "b", "c"]
    );
}

#[test]
fn closing_active_tab_picks_slot_neighbour() {
    let mut session = InteractionController::default();
    for id in ["a", "b", "c", "d", "e"] {
        session.open_tab(&report(id, id));
    }
    session.activate_tab("c");
    session.close_tab("c");
    assert_eq!(session.snapshot().active_tab_id.as_deref(), Some("d"));

    session.close_tab("e");
    assert_eq!(session.snapshot().active_tab_id.as_deref(), Some("d"));
    session.activate_tab("d");
    session.close_tab("d");
    assert_eq!(session.snapshot().active_tab_id.as_deref(), Some("b"));
}

#[test]
fn protected_builtin_tab_stays_out_of_history() {
    let mut session = InteractionController::default();
    session.open_tab(&report("f1", "Report A"));
    session.close_others("f1");
    assert_eq!(session.snapshot().tab_ids(), vec!["f1"]);
    assert!(closed_ids(&session).is_empty());
}

#[test]
fn context_menu_close_others_via_gestures() {
    let mut session = InteractionController::default();
    let script = r#"[
        {"op": "open_tab", "item": {"source": "node", "node": {"id": "f1", "name": "Report A", "kind": "chart"}}},
        {"op": "open_tab", "item": {"source": "module", "module_id": "terminal"}},
        {"op": "open_tab", "item": {"source": "console", "id": "log-1", "title": "Build log"}},
        {"op": "show_context_menu", "x": 40, "y": 30, "tab_id": "module-terminal"},
        {"op": "menu_action", "action": "close_others"}
    ]"#;
    let gestures: Vec<Gesture> = serde_json::from_str(script).expect("parse script");
    session.dispatch_all(gestures);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.tab_ids(), vec!["module-terminal"]);
    assert!(snapshot.context_menu.is_none());
    assert_eq!(closed_ids(&session), vec!["log-1", "f1"]);
    assert_eq!(session.content_view(), ContentView::Console);
}

#[test]
fn drag_resize_clamps_through_capture() {
    let mut session = InteractionController::default();
    session.begin_drawer_resize();
    session.pointer_move(PointerPosition::new(0, 50, 1000));
    assert_eq!(session.snapshot().drawer_height, 800);
    session.pointer_move(PointerPosition::new(0, 999, 1000));
    assert_eq!(session.snapshot().drawer_height, 100);

    // Starting a sidebar drag hands the capture over.
    session.begin_sidebar_resize();
    session.pointer_move(PointerPosition::new(-300, 0, 1000));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.sidebar_width, 64);
    assert_eq!(snapshot.drawer_height, 100);
    session.end_sidebar_resize();
    assert_eq!(session.snapshot().resizing, None);
}

#[test]
fn business_explorer_shows_reconciliation_catalog() {
    let catalog = demo_catalog().expect("demo catalog");
    let mut session = InteractionController::default();
    assert_eq!(session.explorer_title(), "Page presentation");

    session.set_mode(Mode::Business);
    session.click_nav("closing_management");
    assert_eq!(session.explorer_title(), "Reconciliation catalog");
    assert_eq!(
        session.snapshot().explorer_module_id,
        ModuleId::new("finance_center")
    );
    assert!(!session.explorer_tree(&catalog).is_empty());
}

#[test]
fn explorer_query_resets_when_module_changes() {
    let catalog = demo_catalog().expect("demo catalog");
    let mut session = InteractionController::default();
    session.select_module("v2");
    session.set_explorer_query("zzz-no-match");
    assert!(session.explorer_tree(&catalog).is_empty());

    session.select_module("logic");
    assert_eq!(session.explorer().query(), "");
    assert!(!session.explorer_tree(&catalog).is_empty());
}

#[test]
fn recent_module_lists_pins_and_history() {
    let catalog = demo_catalog().expect("demo catalog");
    let mut session = InteractionController::default();
    session.open_tab(&report("f1", "Report A"));
    session.show_context_menu(0, 0, "f1");
    session.apply_menu_action(TabMenuAction::Pin);
    session.close_tab("f1");
    session.select_module("recent_fav");

    let tree = session.explorer_tree(&catalog);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].children[0].id, "f1");
    assert_eq!(tree[1].children[0].id, "f1");
}

#[test]
fn element_list_filters_by_owner() {
    let catalog = demo_catalog().expect("demo catalog");
    let mut session = InteractionController::default();
    let all = session.element_list(&catalog).len();
    assert!(all > 0);
    session.set_filter_owner("nobody-in-particular");
    assert!(session.element_list(&catalog).is_empty());
    session.set_filter_owner("all");
    assert_eq!(session.element_list(&catalog).len(), all);
}

#[test]
fn snapshot_serializes_with_camel_case_keys() {
    let session = InteractionController::new(WorkspaceConfig::default());
    let json = session.snapshot().to_json_pretty().expect("json");
    assert!(json.contains("\"activeModuleId\": \"pages\""));
    assert!(json.contains("\"isSidebarExpanded\": false"));
    assert!(json.contains("\"lockedDrawerModuleId\": \"recents\""));
}
