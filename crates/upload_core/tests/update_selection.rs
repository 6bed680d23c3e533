use std::sync::Once;

use upload_core::{update, FileSelection, Msg, SelectedFile, SubmitLabel, WidgetState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(upload_logging::initialize_for_tests);
}

fn select(state: WidgetState, names: &[&str]) -> WidgetState {
    let files = names
        .iter()
        .map(|name| SelectedFile::new(*name, name.as_bytes().to_vec()))
        .collect();
    let (state, effects) = update(state, Msg::FileSelectionChanged(FileSelection::new(files)));
    assert!(effects.is_empty());
    state
}

#[test]
fn submit_starts_disabled() {
    init_logging();
    let view = WidgetState::new().view();

    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SubmitLabel::default());
    assert!(view.form_present);
    assert!(view.image.hidden);
    assert_eq!(view.message, None);
}

#[test]
fn submit_enabled_tracks_selection() {
    init_logging();
    let mut state = select(WidgetState::new(), &["cat.png"]);
    assert!(state.view().submit_enabled);
    assert!(state.consume_dirty());

    let mut state = select(state, &[]);
    assert!(!state.view().submit_enabled);
    assert!(state.consume_dirty());

    let state = select(state, &["a.png", "b.png"]);
    assert!(state.view().submit_enabled);
    assert_eq!(state.selection().len(), 2);
}

#[test]
fn reselecting_non_empty_does_not_mark_dirty() {
    init_logging();
    let mut state = select(WidgetState::new(), &["cat.png"]);
    assert!(state.consume_dirty());

    let mut state = select(state, &["dog.png"]);
    assert!(!state.consume_dirty());
    assert_eq!(state.selection().first().unwrap().name, "dog.png");
}

#[test]
fn clearing_an_empty_selection_is_silent() {
    init_logging();
    let mut state = select(WidgetState::new(), &[]);

    assert!(!state.view().submit_enabled);
    assert!(!state.consume_dirty());
}

#[test]
fn selection_is_ignored_after_submit() {
    init_logging();
    let state = select(WidgetState::new(), &["cat.png"]);
    let (state, _effects) = update(state, Msg::SubmitClicked);

    let state = select(state, &["dog.png"]);
    assert!(!state.view().submit_enabled);
    assert_eq!(state.selection().first().unwrap().name, "cat.png");

    let state = select(state, &[]);
    assert_eq!(state.view().submit_label, SubmitLabel::Busy);
}
