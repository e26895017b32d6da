use super::*;

fn session(frames: usize, min: usize) -> QrSession {
    QrSession {
        frames: (0..frames).map(|i| format!("F{i}")).collect(),
        raw_bytes: Arc::from(vec![1u8; 10]),
        encoding: Encoding::Base32,
        file_type: FileType::from_char('S').unwrap(),
        qr_version: 5,
        min_frame_count: min,
    }
}

fn loaded(store: &mut StateStore, frames: usize) -> PageState {
    let artifacts = store.publish(b"anim".to_vec(), b"stack".to_vec());
    PageState::Loaded(LoadedPage {
        session: session(frames, 1),
        artifacts,
        increase_exhausted: false,
    })
}

#[test]
fn starts_loading_with_spinner() {
    let store = StateStore::new();
    assert_eq!(store.read(), &PageState::Loading);
    assert!(store.view().spinner);
    assert_eq!(store.live_artifacts(), 0);
}

#[test]
fn replacing_loaded_state_revokes_previous_images() {
    let mut store = StateStore::new();
    let first = loaded(&mut store, 1);
    let first_handles = first.loaded().unwrap().artifacts;
    store.transition(first);
    assert_eq!(store.artifact(first_handles.animated), Some(&b"anim"[..]));

    let second = loaded(&mut store, 2);
    store.transition(second);
    assert_eq!(store.artifact(first_handles.animated), None);
    assert_eq!(store.artifact(first_handles.stacked), None);
    assert_eq!(store.live_artifacts(), 2);

    store.transition(PageState::InvalidHash);
    assert_eq!(store.live_artifacts(), 0);
    assert!(store.view().error);
}

#[test]
fn carried_over_handles_survive_transition() {
    let mut store = StateStore::new();
    let state = loaded(&mut store, 3);
    store.transition(state.clone());

    let PageState::Loaded(mut page) = state else {
        unreachable!()
    };
    page.increase_exhausted = true;
    store.transition(PageState::Loaded(page.clone()));
    assert_eq!(store.live_artifacts(), 2);
    assert!(store.artifact(page.artifacts.stacked).is_some());
    assert!(store.view().controls.increase_disabled);
}

#[test]
fn stale_ticket_is_discarded_and_its_images_revoked() {
    let mut store = StateStore::new();
    let older = store.begin_load();
    let newer = store.begin_load();

    let newer_state = loaded(&mut store, 1);
    assert!(store.commit(newer, newer_state.clone()));

    let older_state = loaded(&mut store, 2);
    let older_handles = older_state.loaded().unwrap().artifacts;
    assert!(!store.commit(older, older_state));

    assert_eq!(store.read(), &newer_state);
    assert_eq!(store.artifact(older_handles.animated), None);
    assert_eq!(store.live_artifacts(), 2);
}

#[test]
fn current_ticket_does_not_advance_generation() {
    let mut store = StateStore::new();
    let load = store.begin_load();
    let cmd = store.current_ticket();
    assert_eq!(load, cmd);
    assert!(store.commit(cmd, PageState::NoHash));
    assert!(store.is_current(load));
    let _ = store.begin_load();
    assert!(!store.is_current(load));
}
