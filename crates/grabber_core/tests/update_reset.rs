use grabber_core::{
    update, AppState, CoreSettings, DownloadError, DownloadStatus, Effect, Mode, Msg, Platform,
    ResponseHead,
};

fn started(input: &str) -> (AppState, u64) {
    let state = AppState::with_settings(CoreSettings {
        min_payload_bytes: 1,
    });
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let submission = match effects.as_slice() {
        [Effect::SendRequest { submission, .. }] => *submission,
        other => panic!("unexpected effects {other:?}"),
    };
    (state, submission)
}

fn assert_reset(state: &AppState) {
    let view = state.view();
    assert_eq!(view.status, DownloadStatus::Idle);
    assert_eq!(view.progress, 0);
    assert_eq!(view.message, "");
    assert_eq!(view.filename, None);
    assert_eq!(view.download_url, None);
    assert!(view.log_lines.is_empty());
    assert!(view.input_text.is_empty());
}

#[test]
fn reset_from_error_returns_to_idle() {
    let (state, submission) = started("https://youtu.be/x");
    let (state, _) = update(
        state,
        Msg::Finished {
            submission,
            result: Err(DownloadError::from_status(502)),
        },
    );
    assert_eq!(state.download().status(), DownloadStatus::Error);
    assert_eq!(
        state.download().message(),
        "request failed with status 502"
    );

    let (state, effects) = update(state, Msg::ResetClicked);
    assert!(effects.is_empty());
    assert_reset(&state);
}

#[test]
fn reset_from_complete_returns_to_idle() {
    let (state, submission) = started("https://youtu.be/x");
    let (state, _) = update(
        state,
        Msg::Connected {
            submission,
            head: ResponseHead::default(),
        },
    );
    let (state, _) = update(
        state,
        Msg::Finished {
            submission,
            result: Ok(vec![1, 2, 3]),
        },
    );
    let (state, _) = update(
        state,
        Msg::FileSaved {
            submission,
            result: Ok("out/file.mp4".to_string()),
        },
    );
    assert_eq!(state.download().status(), DownloadStatus::Complete);

    let (state, _) = update(state, Msg::ResetClicked);
    assert_reset(&state);
}

#[test]
fn reset_keeps_platform_and_mode() {
    let state = AppState::new();
    let (state, _) = update(state, Msg::PlatformSelected(Platform::Tiktok));
    let (state, _) = update(state, Msg::ModeSelected(Mode::Audio));
    let (state, _) = update(state, Msg::ResetClicked);

    assert_eq!(state.selection().platform(), Platform::Tiktok);
    assert_eq!(state.selection().mode(), Mode::Audio);
}

#[test]
fn stale_events_after_reset_are_discarded() {
    let (state, submission) = started("https://youtu.be/x");
    let (state, _) = update(state, Msg::ResetClicked);
    let (mut state, _) = update(state, Msg::InputChanged("https://youtu.be/y".to_string()));
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::Connected {
            submission,
            head: ResponseHead::default(),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());

    let (state, effects) = update(
        state,
        Msg::Finished {
            submission,
            result: Ok(vec![9; 4096]),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.download().status(), DownloadStatus::Idle);
    assert!(state.log().is_empty());
}

#[test]
fn stale_result_does_not_touch_newer_submission() {
    let (state, old) = started("https://youtu.be/x");
    let (state, _) = update(state, Msg::ResetClicked);
    let (state, _) = update(state, Msg::InputChanged("https://youtu.be/y".to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    let log_before = state.log().clone();

    let (state, effects) = update(
        state,
        Msg::Finished {
            submission: old,
            result: Err(DownloadError::Unknown("late".to_string())),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.download().status(), DownloadStatus::Processing);
    assert_eq!(state.log(), &log_before);
}

#[test]
fn switching_to_youtube_resets_search_mode() {
    let state = AppState::new();
    let (state, _) = update(state, Msg::PlatformSelected(Platform::Tiktok));
    let (state, _) = update(state, Msg::ModeSelected(Mode::Search));
    assert!(state.view().search_available);
    assert_eq!(state.view().mode, Mode::Search);

    let (state, _) = update(state, Msg::PlatformSelected(Platform::Youtube));
    assert_eq!(state.view().mode, Mode::Video);
    assert!(!state.view().search_available);

    let (state, _) = update(state, Msg::ModeSelected(Mode::Search));
    assert_eq!(state.view().mode, Mode::Video);
}
