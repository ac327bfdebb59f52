use std::sync::Once;

use grabber_core::{
    update, ApiRequest, AppState, CoreSettings, DownloadError, DownloadStatus, Effect, Mode, Msg,
    NotificationKind, Platform, RequestBody, ResponseHead, SubmissionId,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(grabber_logging::initialize_for_tests);
}

fn select(state: AppState, platform: Platform, mode: Mode, input: &str) -> AppState {
    let (state, _) = update(state, Msg::PlatformSelected(platform));
    let (state, _) = update(state, Msg::ModeSelected(mode));
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    state
}

fn submit(state: AppState) -> (AppState, SubmissionId) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    let submission = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendRequest { submission, .. } => Some(*submission),
            _ => None,
        })
        .expect("send request effect");
    (state, submission)
}

fn connected(state: AppState, submission: SubmissionId, disposition: Option<&str>) -> AppState {
    let (state, effects) = update(
        state,
        Msg::Connected {
            submission,
            head: ResponseHead {
                content_disposition: disposition.map(ToOwned::to_owned),
            },
        },
    );
    assert!(effects.is_empty());
    state
}

fn texts(state: &AppState) -> Vec<String> {
    state.log().entries().map(|e| e.text.clone()).collect()
}

#[test]
fn empty_input_notifies_without_transition() {
    init_logging();
    let state = select(AppState::new(), Platform::Youtube, Mode::Video, "   ");
    let before = state.download().clone();

    let (next, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(next.download(), &before);
    assert!(next.log().is_empty());
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::Notify(notification) => {
            assert_eq!(notification.kind, NotificationKind::Error);
            assert_eq!(notification.description, "Please provide a URL");
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn invalid_url_blocks_request() {
    init_logging();
    let state = select(
        AppState::new(),
        Platform::Youtube,
        Mode::Video,
        "https://example.com",
    );
    let (next, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(next.download().status(), DownloadStatus::Idle);
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::SendRequest { .. })));
}

#[test]
fn submit_moves_to_processing_and_requests_once() {
    init_logging();
    let state = select(
        AppState::new(),
        Platform::Youtube,
        Mode::Video,
        "https://youtu.be/dQw4w9WgXcQ",
    );
    let (next, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(next.download().status(), DownloadStatus::Processing);
    assert_eq!(next.download().progress(), 20);
    assert_eq!(next.download().message(), "establishing connection");
    assert_eq!(
        effects,
        vec![Effect::SendRequest {
            submission: 1,
            request: ApiRequest {
                path: "/api/youtube/video".to_string(),
                body: RequestBody::Url("https://youtu.be/dQw4w9WgXcQ".to_string()),
            },
        }]
    );
    assert_eq!(
        texts(&next),
        vec![
            "protocol: youtube/video".to_string(),
            "input: https://youtu.be/dQw4w9WgXcQ".to_string(),
            "connecting to api".to_string(),
        ]
    );
}

#[test]
fn search_sends_query_body() {
    init_logging();
    let state = select(AppState::new(), Platform::Tiktok, Mode::Search, "@badbunny");
    let (_next, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::SendRequest {
            submission: 1,
            request: ApiRequest {
                path: "/api/tiktok/search".to_string(),
                body: RequestBody::Query("@badbunny".to_string()),
            },
        }]
    );
}

#[test]
fn successful_download_walks_every_milestone() {
    init_logging();
    let state = select(
        AppState::new(),
        Platform::Youtube,
        Mode::Video,
        "https://youtube.com/watch?v=1",
    );
    let (state, submission) = submit(state);

    let state = connected(state, submission, Some(r#"attachment; filename="clip.mp4""#));
    assert_eq!(state.download().status(), DownloadStatus::Downloading);
    assert_eq!(state.download().progress(), 70);
    assert_eq!(state.download().message(), "streaming data");

    let payload = vec![7u8; 2 * 1024 * 1024];
    let (state, effects) = update(
        state,
        Msg::Finished {
            submission,
            result: Ok(payload.clone()),
        },
    );
    assert_eq!(state.download().status(), DownloadStatus::Complete);
    assert_eq!(state.download().progress(), 100);
    assert_eq!(state.download().filename(), Some("clip.mp4"));
    assert_eq!(
        effects,
        vec![Effect::SaveFile {
            submission,
            filename: "clip.mp4".to_string(),
            payload,
        }]
    );

    let (state, effects) = update(
        state,
        Msg::FileSaved {
            submission,
            result: Ok("/tmp/out/clip.mp4".to_string()),
        },
    );
    assert_eq!(state.download().download_url(), Some("/tmp/out/clip.mp4"));
    assert_eq!(state.active_submission(), None);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Notify(n)] if n.kind == NotificationKind::Success
    ));

    let log = texts(&state);
    assert_eq!(
        log[3..].to_vec(),
        vec![
            "connection established".to_string(),
            "downloading: clip.mp4".to_string(),
            "received 2.00 MiB".to_string(),
            "file_saved: clip.mp4".to_string(),
        ]
    );
}

#[test]
fn transport_error_is_terminal() {
    init_logging();
    let state = select(
        AppState::new(),
        Platform::Tiktok,
        Mode::Audio,
        "https://www.tiktok.com/@a/video/1",
    );
    let (state, submission) = submit(state);

    let (state, effects) = update(
        state,
        Msg::Finished {
            submission,
            result: Err(DownloadError::Transport {
                status: 500,
                message: "rate limited".to_string(),
            }),
        },
    );

    assert_eq!(state.download().status(), DownloadStatus::Error);
    assert_eq!(state.download().progress(), 0);
    assert!(state.download().message().contains("rate limited"));
    assert_eq!(state.log().last().unwrap().text, "error: rate limited");
    assert!(matches!(
        effects.as_slice(),
        [Effect::Notify(n)] if n.kind == NotificationKind::Error && n.title == "Download failed"
    ));
}

#[test]
fn small_payload_fails_even_with_header() {
    init_logging();
    let state = select(
        AppState::new(),
        Platform::Youtube,
        Mode::Audio,
        "https://youtu.be/x",
    );
    let (state, submission) = submit(state);
    let state = connected(state, submission, Some(r#"filename="song.mp3""#));

    let (state, effects) = update(
        state,
        Msg::Finished {
            submission,
            result: Ok(vec![0; 500]),
        },
    );

    assert_eq!(state.download().status(), DownloadStatus::Error);
    assert!(state.download().message().contains("500 bytes"));
    assert!(state.download().filename().is_none());
    assert!(!effects.iter().any(|e| matches!(e, Effect::SaveFile { .. })));
}

#[test]
fn minimum_payload_size_is_configurable() {
    init_logging();
    let state = AppState::with_settings(CoreSettings {
        min_payload_bytes: 16,
    });
    let state = select(state, Platform::Youtube, Mode::Video, "https://youtu.be/x");
    let (state, submission) = submit(state);
    let state = connected(state, submission, None);

    let (state, _) = update(
        state,
        Msg::Finished {
            submission,
            result: Ok(vec![1; 16]),
        },
    );
    assert_eq!(state.download().status(), DownloadStatus::Complete);
    let name = state.download().filename().unwrap();
    assert!(name.starts_with("youtube_video_"));
    assert!(name.ends_with(".mp4"));
}

#[test]
fn second_submit_while_in_flight_is_rejected() {
    init_logging();
    let state = select(AppState::new(), Platform::Youtube, Mode::Video, "https://youtu.be/x");
    let (state, submission) = submit(state);
    let log_before = state.log().clone();

    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(state.active_submission(), Some(submission));
    assert_eq!(state.log(), &log_before);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Notify(n)] if n.title == "Download in progress"
    ));
    assert!(!state.view().submit_enabled);
}

#[test]
fn resubmit_after_failure_uses_fresh_submission() {
    init_logging();
    let state = select(AppState::new(), Platform::Youtube, Mode::Video, "https://youtu.be/x");
    let (state, first) = submit(state);
    let (state, _) = update(
        state,
        Msg::Finished {
            submission: first,
            result: Err(DownloadError::Unknown("connection reset".to_string())),
        },
    );
    assert!(state.view().submit_enabled);

    let (state, second) = submit(state);
    assert!(second > first);
    assert_eq!(state.download().status(), DownloadStatus::Processing);
}

#[test]
fn failed_save_turns_into_error() {
    init_logging();
    let state = AppState::with_settings(CoreSettings {
        min_payload_bytes: 1,
    });
    let state = select(state, Platform::Tiktok, Mode::Video, "https://tiktok.com/@a/1");
    let (state, submission) = submit(state);
    let state = connected(state, submission, Some(r#"filename="a.mp4""#));
    let (state, _) = update(
        state,
        Msg::Finished {
            submission,
            result: Ok(vec![1; 4]),
        },
    );

    let (state, effects) = update(
        state,
        Msg::FileSaved {
            submission,
            result: Err("disk full".to_string()),
        },
    );

    assert_eq!(state.download().status(), DownloadStatus::Error);
    assert_eq!(state.download().message(), "could not save a.mp4: disk full");
    assert_eq!(effects.len(), 1);
}
