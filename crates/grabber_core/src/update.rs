use chrono::Utc;
use grabber_logging::{grab_debug, grab_info, grab_warn};

use crate::{
    resolve_filename, validate, ApiRequest, AppState, DownloadError, DownloadState,
    DownloadStatus, Effect, Msg, Notification, ResponseHead, SubmissionId,
};

/// Longest input echo written to the console log.
const INPUT_ECHO_CHARS: usize = 50;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PlatformSelected(platform) => {
            state.selection_mut().set_platform(platform);
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            if !state.selection_mut().set_mode(mode) {
                grab_debug!(
                    "mode {} not available on {}",
                    mode,
                    state.selection().platform()
                );
            }
            Vec::new()
        }
        Msg::InputChanged(text) => {
            state.selection_mut().set_input_text(text);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::ResetClicked => {
            if let Some(orphaned) = state.active_submission() {
                grab_info!("reset abandons submission {orphaned}");
            }
            state.reset();
            Vec::new()
        }
        Msg::Connected { submission, head } => {
            if accepts(&state, submission, DownloadStatus::Processing) {
                connected(&mut state, submission, head);
            }
            Vec::new()
        }
        Msg::Finished { submission, result } => {
            if !state.download().status().is_busy() || state.active_submission() != Some(submission)
            {
                grab_debug!("dropping stale result for submission {submission}");
                return (state, Vec::new());
            }
            match result {
                Ok(payload) => finished(&mut state, submission, payload),
                Err(err) => fail(&mut state, err),
            }
        }
        Msg::FileSaved { submission, result } => {
            if accepts(&state, submission, DownloadStatus::Complete) {
                file_saved(&mut state, result)
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if let Err(err) = validate(state.selection()) {
        grab_debug!("submission rejected: {err}");
        return vec![Effect::Notify(Notification::error(
            err.title(),
            err.to_string(),
        ))];
    }

    if state.download().status().is_busy() {
        grab_warn!(
            "submit ignored while submission {:?} is in flight",
            state.active_submission()
        );
        return vec![Effect::Notify(Notification::error(
            "Download in progress",
            "Wait for the current download to finish",
        ))];
    }

    let selection = state.selection().clone();
    let submission = state.begin_submission();
    grab_info!(
        "submission {submission}: {}/{}",
        selection.platform(),
        selection.mode()
    );

    state.set_download(DownloadState::processing(0, "preparing request"));
    state.log_line(format!(
        "protocol: {}/{}",
        selection.platform(),
        selection.mode()
    ));
    state.log_line(format!("input: {}", echo_input(selection.input_text())));

    state.log_line("connecting to api");
    state.set_download(DownloadState::processing(20, "establishing connection"));

    vec![Effect::SendRequest {
        submission,
        request: ApiRequest::for_selection(&selection),
    }]
}

fn connected(state: &mut AppState, submission: SubmissionId, head: ResponseHead) {
    let Some((platform, mode)) = state
        .active_mut(submission)
        .map(|active| (active.platform, active.mode))
    else {
        return;
    };

    state.log_line("connection established");
    state.set_download(DownloadState::downloading(50, "extracting media stream"));

    let filename = resolve_filename(
        head.content_disposition.as_deref(),
        platform,
        mode,
        Utc::now().timestamp_millis(),
    );
    if let Some(active) = state.active_mut(submission) {
        active.filename = Some(filename.clone());
    }

    state.log_line(format!("downloading: {filename}"));
    state.set_download(DownloadState::downloading(70, "streaming data"));
}

fn finished(state: &mut AppState, submission: SubmissionId, payload: Vec<u8>) -> Vec<Effect> {
    let Some(filename) = state
        .active_mut(submission)
        .and_then(|active| active.filename.clone())
    else {
        return fail(
            state,
            DownloadError::Unknown("response body arrived before response headers".to_string()),
        );
    };

    let size = payload.len() as u64;
    let minimum = state.settings().min_payload_bytes;
    if size < minimum {
        return fail(state, DownloadError::PayloadTooSmall { size, minimum });
    }

    state.set_download(DownloadState::complete(filename.clone(), None));
    state.log_line(format!("received {:.2} MiB", size as f64 / BYTES_PER_MIB));

    vec![Effect::SaveFile {
        submission,
        filename,
        payload,
    }]
}

fn file_saved(state: &mut AppState, result: Result<String, String>) -> Vec<Effect> {
    let filename = state.download().filename().unwrap_or_default().to_string();
    match result {
        Ok(location) => {
            state.log_line(format!("file_saved: {filename}"));
            state.set_download(DownloadState::complete(filename.clone(), Some(location)));
            state.end_submission();
            vec![Effect::Notify(Notification::success(
                "Download complete",
                filename,
            ))]
        }
        Err(reason) => fail(
            state,
            DownloadError::Unknown(format!("could not save {filename}: {reason}")),
        ),
    }
}

/// Terminal failure: error state, one log line, one notification.
fn fail(state: &mut AppState, err: DownloadError) -> Vec<Effect> {
    let message = err.to_string();
    grab_warn!(
        "submission {:?} failed: {message}",
        state.active_submission()
    );
    state.set_download(DownloadState::failed(message.clone()));
    state.log_line(format!("error: {message}"));
    state.end_submission();
    vec![Effect::Notify(Notification::error("Download failed", message))]
}

/// Engine events only apply to the active submission in the expected phase.
fn accepts(state: &AppState, submission: SubmissionId, expected: DownloadStatus) -> bool {
    let current = state.active_submission() == Some(submission)
        && state.download().status() == expected;
    if !current {
        grab_debug!(
            "dropping stale event for submission {submission} (active {:?}, status {:?})",
            state.active_submission(),
            state.download().status()
        );
    }
    current
}

fn echo_input(input: &str) -> String {
    if input.chars().count() > INPUT_ECHO_CHARS {
        let head: String = input.chars().take(INPUT_ECHO_CHARS).collect();
        format!("{head}…")
    } else {
        input.to_string()
    }
}
