// End-to-end session tests: backend events in, source links out

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use irview::bus::{CompileResult, CompilerInfo};
use irview::config::{Settings, PASSES_COLUMN_WIDTH};
use irview::fixture::CompileFixture;
use irview::pane::{Lifecycle, PersistedState};
use irview::result::{DisplayLine, SourceRef};
use irview::session::Session;
use irview::surface::{Dimensions, Position, RenderSurface, Selection};

fn clang() -> CompilerInfo {
    CompilerInfo {
        name: "clang".to_string(),
        supports_opt_pipeline_view: true,
    }
}

fn session_for(compiler_id: u32, editor_id: u32) -> Session {
    let state = PersistedState {
        editor_id: Some(editor_id),
        ..PersistedState::for_compiler(compiler_id)
    };
    let mut session = Session::new(
        state,
        editor_id,
        "a.c",
        "int main() {}\n".to_string(),
        Settings::default(),
    );
    session.pump().expect("opening events");
    session
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_opening_requests_settings_and_registers_view() {
    let settings = Settings {
        tab_width: 8,
        ..Settings::default()
    };
    let mut session = Session::new(
        PersistedState::for_compiler(4),
        1,
        "a.c",
        String::new(),
        settings.clone(),
    );
    assert!(!session.is_view_open(4));

    session.pump().unwrap();

    assert!(session.is_view_open(4));
    assert_eq!(session.pane().surface().unwrap().settings(), &settings);
}

#[test]
fn test_link_reaches_source_view() {
    let mut session = session_for(1, 2);
    session.publish_compiler(1, Some(clang()), Some(2), None);
    session.publish_result(
        1,
        clang(),
        CompileResult::with_output(vec![
            DisplayLine::plain("; *** IR Dump After SROAPass ***"),
            DisplayLine::mapped("%a = add i32 1, 2", SourceRef::new("a.c", 5)),
        ]),
    );
    session.pump().unwrap();

    assert!(!session.scroll_to_source().unwrap());
    assert_eq!(session.source().linked(), None);

    session.pane_mut().handle_key(key(KeyCode::Down)).unwrap();
    assert!(session.scroll_to_source().unwrap());
    assert_eq!(session.source().linked().map(|l| l.line), Some(5));
}

#[test]
fn test_links_for_other_editors_are_ignored() {
    let mut session = session_for(1, 2);
    // The compiler is compiling editor 3, not the one the session shows.
    session.publish_compiler(1, Some(clang()), Some(3), None);
    session.publish_result(
        1,
        clang(),
        CompileResult::with_output(vec![DisplayLine::mapped(
            "ret i32 0",
            SourceRef::new("b.c", 1),
        )]),
    );
    session.pump().unwrap();

    assert!(session.scroll_to_source().unwrap());
    assert_eq!(session.source().linked(), None);
}

#[test]
fn test_two_compilers_share_one_bus() {
    let mut session = session_for(1, 1);
    session.publish_result(
        2,
        clang(),
        CompileResult::with_output(vec![DisplayLine::plain("from compiler two")]),
    );
    session.publish_result(
        1,
        clang(),
        CompileResult::with_output(vec![DisplayLine::plain("from compiler one")]),
    );
    session.publish_result(
        2,
        clang(),
        CompileResult::with_output(vec![DisplayLine::plain("from compiler two again")]),
    );
    session.pump().unwrap();

    assert_eq!(
        session.pane().surface().unwrap().value(),
        "from compiler one"
    );
}

#[test]
fn test_resize_runs_at_idle_with_coalescing() {
    let mut session = session_for(1, 1);
    session.resize(Dimensions { width: 60, height: 10 });
    session.resize(Dimensions { width: 120, height: 40 });
    session.resize(Dimensions { width: 90, height: 30 });
    assert_eq!(session.pane().surface().unwrap().layout_count(), 0);

    let inner = session.idle().unwrap().expect("layout ran");
    assert_eq!(inner.width, 90 - PASSES_COLUMN_WIDTH);
    assert_eq!(inner.height, 29);
    assert_eq!(session.pane().surface().unwrap().layout_count(), 1);
    assert_eq!(session.idle().unwrap(), None);
}

#[test]
fn test_narrow_pane_hides_compiler_details() {
    let mut session = session_for(1, 1);
    session.publish_compiler(1, Some(clang()), Some(1), None);
    session.pump().unwrap();

    // Only the pane name fits, so the compiler details are hidden.
    session.resize(Dimensions { width: 20, height: 30 });
    let inner = session.idle().unwrap().unwrap();
    assert_eq!(inner.width, 20 - PASSES_COLUMN_WIDTH);
    assert_eq!(inner.height, 29);

    let layout = session.pane().top_bar().measure(20);
    assert!(!layout.show_hideable);
}

#[test]
fn test_rename_persists_state() {
    let mut session = session_for(1, 1);
    session.publish_compiler(1, Some(clang()), Some(1), None);
    session.publish_result(
        1,
        clang(),
        CompileResult::with_output(
            (1..=6)
                .map(|n| DisplayLine::mapped(format!("line {}", n), SourceRef::new("a.c", n)))
                .collect(),
        ),
    );
    session.pump().unwrap();
    session.pane_mut().handle_key(key(KeyCode::End)).unwrap();
    assert_eq!(
        session.pane().surface().unwrap().position(),
        Some(Position::new(6, 1))
    );

    session.rename_pane(Some("Inlining".to_string())).unwrap();

    let saved = session.saved_state().expect("state saved on rename");
    assert_eq!(saved.pane_name.as_deref(), Some("Inlining"));
    assert_eq!(saved.compiler_id, 1);
    assert!(session.pane().title().starts_with("Inlining clang"));
}

#[test]
fn test_saved_state_restores_selection_in_new_session() {
    let lines: Vec<DisplayLine> = (1..=30)
        .map(|n| DisplayLine::mapped(format!("%{} = add i32 0, 0", n), SourceRef::new("a.c", n)))
        .collect();

    let json = r#"{
        "compiler_id": 5,
        "editor_id": 1,
        "selection": {"start_line": 20, "start_column": 1, "end_line": 22, "end_column": 4}
    }"#;
    let state = PersistedState::from_json(json).unwrap();
    let mut session = Session::new(state, 1, "a.c", String::new(), Settings::default());
    session.resize(Dimensions { width: 80, height: 11 });
    session.pump().unwrap();
    session.idle().unwrap();

    session.publish_result(5, clang(), CompileResult::with_output(lines));
    session.pump().unwrap();

    let surface = session.pane().surface().unwrap();
    assert_eq!(
        surface.selection(),
        Some(Selection {
            start_line: 20,
            start_column: 1,
            end_line: 22,
            end_column: 4
        })
    );
    // Lines 20..=22 are centred in a 10-line viewport.
    assert_eq!(surface.scroll_top(), 15);
    assert_eq!(session.pane().lifecycle(), Lifecycle::Rendering);
}

#[test]
fn test_close_unregisters_view() {
    let mut session = session_for(1, 1);
    assert!(session.is_view_open(1));

    session.close_pane().unwrap();
    assert!(!session.is_view_open(1));

    session.publish_result(
        1,
        clang(),
        CompileResult::with_output(vec![DisplayLine::plain("late")]),
    );
    assert_eq!(session.pump().unwrap(), 1);
    assert!(session.pane().surface().is_none());
    assert_eq!(session.bus().borrow().pending(), 0);
}

#[test]
fn test_demo_fixture_replays() {
    let fixture =
        CompileFixture::load(Path::new("demos/square.json")).expect("Failed to load fixture");
    let source = fixture.read_source().expect("Failed to read source");
    let mut session = Session::new(
        PersistedState {
            editor_id: Some(fixture.editor_id),
            ..PersistedState::for_compiler(fixture.compiler_id)
        },
        fixture.editor_id,
        fixture.source_name(),
        source,
        Settings::default(),
    );
    session.pump().unwrap();
    fixture.replay(&mut session).unwrap();

    assert!(session.pane().title().contains("x86-64 clang 17.0.1"));
    let surface = session.pane().surface().unwrap();
    assert_eq!(surface.line_count(), session.pane().buffer().len());
    assert!(session.source().source().contains("int square(int x)"));

    // Line 4 of the IR is the multiply in square().
    for _ in 0..3 {
        session.pane_mut().handle_key(key(KeyCode::Down)).unwrap();
    }
    assert!(session.scroll_to_source().unwrap());
    assert_eq!(session.source().linked().map(|l| l.line), Some(4));
}
