// Pane lifecycle and line-correlation tests driven through the event bus

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use irview::bus::{
    BusEvent, CompileResult, CompilerInfo, EventBus, EventHub, LinkLine, SharedBus,
};
use irview::config::Settings;
use irview::pane::{Delivery, Lifecycle, OptPipelinePane, PersistedState};
use irview::result::{DisplayLine, SourceRef, NO_IR_GENERATED, NO_OUTPUT, UNSUPPORTED_VIEW};
use irview::surface::{RenderSurface, Selection, TextSurface};

fn compiler(supported: bool) -> CompilerInfo {
    CompilerInfo {
        name: "x86-64 clang 17".to_string(),
        supports_opt_pipeline_view: supported,
    }
}

fn result_event(compiler_id: u32, supported: bool, output: Option<Vec<DisplayLine>>) -> BusEvent {
    BusEvent::CompileResult {
        compiler_id,
        compiler: compiler(supported),
        result: CompileResult {
            opt_pipeline_output: output,
        },
    }
}

fn compiler_event(compiler_id: u32, supported: bool, editor_id: u32) -> BusEvent {
    BusEvent::Compiler {
        compiler_id,
        compiler: Some(compiler(supported)),
        options: serde_json::Value::Null,
        editor_id: Some(editor_id),
        tree_id: Some(1),
    }
}

/// Open a pane and throw away its opening announcements
fn open_pane(state: PersistedState) -> (SharedBus, OptPipelinePane<TextSurface>) {
    let bus = EventBus::shared();
    let pane = OptPipelinePane::open(EventHub::new(bus.clone()), state);
    bus.borrow_mut().drain();
    (bus, pane)
}

fn rendered(pane: &OptPipelinePane<TextSurface>) -> String {
    pane.surface().expect("surface").value().to_string()
}

fn ir_lines(count: u32) -> Vec<DisplayLine> {
    (1..=count)
        .map(|n| {
            DisplayLine::mapped(
                format!("%{} = add i32 {}, 1", n, n),
                SourceRef::new("a.c", n + 100),
            )
        })
        .collect()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_scenario_a_other_compiler_result_is_ignored() {
    let (bus, mut pane) = open_pane(PersistedState::for_compiler(1));
    let initial = rendered(&pane);

    let delivery = pane
        .handle(&result_event(2, true, Some(vec![DisplayLine::plain("foo")])))
        .unwrap();

    assert_eq!(delivery, Delivery::Stale);
    assert_eq!(rendered(&pane), initial);
    assert!(pane.buffer().is_empty());
    assert_eq!(pane.lifecycle(), Lifecycle::Uninitialized);
    assert_eq!(bus.borrow().pending(), 0);
}

#[test]
fn test_scenario_b_render_and_navigate() {
    let mut state = PersistedState::for_compiler(1);
    state.editor_id = Some(9);
    let (bus, mut pane) = open_pane(state);

    pane.handle(&result_event(
        1,
        true,
        Some(vec![DisplayLine::mapped(
            "%a = add i32 1, 2",
            SourceRef::new("a.c", 5),
        )]),
    ))
    .unwrap();

    assert_eq!(rendered(&pane), "%a = add i32 1, 2");
    assert_eq!(pane.lifecycle(), Lifecycle::Rendering);

    let link = pane.scroll_to_source().unwrap();
    assert_eq!(link, Some(LinkLine::reveal_line(9, 5)));
    assert_eq!(
        bus.borrow_mut().drain(),
        vec![BusEvent::EditorLinkLine(LinkLine {
            editor_id: 9,
            line: 5,
            column_begin: -1,
            column_end: -1,
            reveal: true,
        })]
    );
}

#[test]
fn test_scenario_c_supported_without_output_shows_no_output() {
    let (_bus, mut pane) = open_pane(PersistedState::for_compiler(1));
    pane.handle(&compiler_event(1, true, 1)).unwrap();
    pane.handle(&result_event(1, true, None)).unwrap();

    assert_eq!(rendered(&pane), NO_OUTPUT);
    assert_ne!(rendered(&pane), UNSUPPORTED_VIEW);
}

#[test]
fn test_scenario_d_unsupported_compiler_keeps_placeholder() {
    let (_bus, mut pane) = open_pane(PersistedState::for_compiler(1));
    pane.handle(&compiler_event(1, false, 1)).unwrap();
    assert_eq!(rendered(&pane), UNSUPPORTED_VIEW);
    assert_eq!(pane.lifecycle(), Lifecycle::Bound);

    pane.handle(&result_event(1, false, None)).unwrap();
    assert_eq!(rendered(&pane), UNSUPPORTED_VIEW);

    let delivery = pane.handle(&result_event(1, false, Some(ir_lines(2)))).unwrap();
    assert_eq!(delivery, Delivery::Unchanged);
    assert_eq!(rendered(&pane), UNSUPPORTED_VIEW);
}

#[test]
fn test_unsupported_compiler_clears_navigable_lines() {
    let mut state = PersistedState::for_compiler(1);
    state.editor_id = Some(7);
    let (bus, mut pane) = open_pane(state);
    pane.handle(&result_event(
        1,
        true,
        Some(vec![
            DisplayLine::mapped("%a = add i32 1, 2", SourceRef::new("a.c", 5)),
            DisplayLine::plain("ret"),
        ]),
    ))
    .unwrap();

    pane.handle(&compiler_event(1, false, 7)).unwrap();

    assert_eq!(rendered(&pane), UNSUPPORTED_VIEW);
    assert_eq!(pane.buffer().len(), pane.surface().unwrap().line_count());
    assert_eq!(pane.scroll_to_source().unwrap(), None);
    assert_eq!(bus.borrow().pending(), 0);
}

#[test]
fn test_output_shown_when_only_result_reports_unsupported() {
    let (_bus, mut pane) = open_pane(PersistedState::for_compiler(1));

    let delivery = pane
        .handle(&result_event(1, false, Some(vec![DisplayLine::plain("ret void")])))
        .unwrap();

    assert_eq!(delivery, Delivery::Applied);
    assert_eq!(rendered(&pane), "ret void");
    assert_eq!(pane.buffer().len(), 1);
    assert_eq!(pane.lifecycle(), Lifecycle::Rendering);
}

#[test]
fn test_newest_capability_signal_wins() {
    let (_bus, mut pane) = open_pane(PersistedState::for_compiler(1));
    pane.handle(&compiler_event(1, false, 1)).unwrap();

    // The result's own metadata says the view is supported now.
    pane.handle(&result_event(1, true, Some(ir_lines(1)))).unwrap();
    assert_eq!(rendered(&pane), "%1 = add i32 1, 1");
}

#[test]
fn test_stale_events_never_change_visible_state() {
    let (bus, mut pane) = open_pane(PersistedState::for_compiler(3));
    pane.handle(&result_event(3, true, Some(ir_lines(4)))).unwrap();
    let before = rendered(&pane);
    let title = pane.title();

    for other in (0..50).filter(|id| *id != 3) {
        assert_eq!(
            pane.handle(&result_event(other, true, Some(ir_lines(other + 1)))).unwrap(),
            Delivery::Stale
        );
        assert_eq!(pane.handle(&compiler_event(other, false, 7)).unwrap(), Delivery::Stale);
        assert_eq!(pane.handle(&result_event(other, true, None)).unwrap(), Delivery::Stale);
    }

    assert_eq!(rendered(&pane), before);
    assert_eq!(pane.title(), title);
    assert_eq!(pane.buffer().len(), 4);
    assert_eq!(bus.borrow().pending(), 0);
}

#[test]
fn test_empty_output_renders_placeholder_not_empty_string() {
    let (_bus, mut pane) = open_pane(PersistedState::for_compiler(1));
    pane.handle(&result_event(1, true, Some(Vec::new()))).unwrap();

    assert_eq!(rendered(&pane), NO_IR_GENERATED);
    assert!(!rendered(&pane).is_empty());
}

#[test]
fn test_selection_restored_at_most_once() {
    let mut state = PersistedState::for_compiler(1);
    state.selection = Some(Selection::lines(3, 4));
    let (_bus, mut pane) = open_pane(state);

    pane.handle(&result_event(1, true, Some(ir_lines(10)))).unwrap();
    let surface = pane.surface().unwrap();
    assert_eq!(surface.selection(), Some(Selection::lines(3, 4)));
    assert_eq!(surface.position().map(|p| p.line), Some(4));

    for _ in 0..20 {
        pane.handle(&result_event(1, true, Some(ir_lines(10)))).unwrap();
        assert_eq!(pane.surface().unwrap().selection(), None);
    }
}

#[test]
fn test_restoration_waits_for_first_result() {
    let mut state = PersistedState::for_compiler(1);
    state.selection = Some(Selection::lines(2, 2));
    let (_bus, mut pane) = open_pane(state);

    // Metadata alone does not consume the saved selection.
    pane.handle(&compiler_event(1, false, 1)).unwrap();
    pane.handle(&compiler_event(1, true, 1)).unwrap();
    assert_eq!(pane.surface().unwrap().selection(), None);

    pane.handle(&result_event(1, true, Some(ir_lines(3)))).unwrap();
    assert_eq!(pane.surface().unwrap().selection(), Some(Selection::lines(2, 2)));
}

#[test]
fn test_no_emissions_after_close() {
    let mut state = PersistedState::for_compiler(1);
    state.editor_id = Some(1);
    let (bus, mut pane) = open_pane(state);
    pane.handle(&result_event(1, true, Some(ir_lines(3)))).unwrap();

    pane.close();
    assert_eq!(
        bus.borrow_mut().drain(),
        vec![BusEvent::PaneClosed { compiler_id: 1 }]
    );
    assert!(bus.borrow().subscribers(irview::bus::Topic::CompileResult).is_empty());

    // Deliveries after close are tolerated and have no effect.
    assert_eq!(
        pane.handle(&result_event(1, true, Some(ir_lines(5)))).unwrap(),
        Delivery::Closed
    );
    assert_eq!(pane.handle(&compiler_event(1, true, 1)).unwrap(), Delivery::Closed);
    assert_eq!(
        pane.handle(&BusEvent::Settings(Settings::default())).unwrap(),
        Delivery::Closed
    );
    assert_eq!(pane.scroll_to_source().unwrap(), None);
    pane.resize(irview::surface::Dimensions {
        width: 80,
        height: 24,
    });
    assert_eq!(pane.run_deferred().unwrap(), None);
    pane.close();

    assert_eq!(bus.borrow().pending(), 0);
    assert_eq!(pane.lifecycle(), Lifecycle::Closed);
}

#[test]
fn test_navigation_from_unmapped_lines_is_silent() {
    let mut state = PersistedState::for_compiler(1);
    state.editor_id = Some(1);
    let (bus, mut pane) = open_pane(state);
    pane.handle(&result_event(
        1,
        true,
        Some(vec![
            DisplayLine::plain("; *** IR Dump After SROAPass ***"),
            DisplayLine {
                text: "ret void".to_string(),
                source: Some(SourceRef { file: None, line: 4 }),
            },
        ]),
    ))
    .unwrap();

    assert_eq!(pane.scroll_to_source().unwrap(), None);
    pane.handle_key(key(KeyCode::Down)).unwrap();
    assert_eq!(pane.scroll_to_source().unwrap(), None);
    assert_eq!(bus.borrow().pending(), 0);
}

#[test]
fn test_settings_reach_the_surface() {
    let (_bus, mut pane) = open_pane(PersistedState::for_compiler(1));
    let settings = Settings {
        tab_width: 2,
        word_wrap: true,
        ..Settings::default()
    };

    assert_eq!(
        pane.handle(&BusEvent::Settings(settings.clone())).unwrap(),
        Delivery::Applied
    );
    assert_eq!(pane.surface().unwrap().settings(), &settings);
}
