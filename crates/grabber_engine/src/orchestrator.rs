use std::collections::VecDeque;
use std::time::{Duration, Instant};

use grabber_core::{
    update, AppState, AppViewModel, CoreSettings, DownloadStatus, Effect, Mode, Msg,
    Notification, Platform, Selection,
};
use grabber_logging::{grab_error, grab_warn};

use crate::{EngineHandle, SaveTarget};

/// Receives user-facing notifications (toasts, terminal lines, ...).
pub trait NotificationSink {
    fn notify(&self, notification: &Notification);
}

/// Runs the pure state machine against the engine and the host.
///
/// All state lives in the wrapped `AppState`; this type only feeds it
/// messages and carries out the effects it returns.
pub struct DownloadOrchestrator {
    state: AppState,
    engine: EngineHandle,
    notifier: Box<dyn NotificationSink>,
    saver: Box<dyn SaveTarget>,
}

impl DownloadOrchestrator {
    pub fn new(
        engine: EngineHandle,
        settings: CoreSettings,
        notifier: Box<dyn NotificationSink>,
        saver: Box<dyn SaveTarget>,
    ) -> Self {
        Self {
            state: AppState::with_settings(settings),
            engine,
            notifier,
            saver,
        }
    }

    pub fn select_platform(&mut self, platform: Platform) {
        self.dispatch(Msg::PlatformSelected(platform));
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.dispatch(Msg::ModeSelected(mode));
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::InputChanged(text.into()));
    }

    /// Replaces platform, mode and input in one go.
    pub fn apply_selection(&mut self, selection: &Selection) {
        self.select_platform(selection.platform());
        self.select_mode(selection.mode());
        self.set_input(selection.input_text());
    }

    pub fn submit(&mut self) {
        self.dispatch(Msg::SubmitClicked);
    }

    pub fn reset(&mut self) {
        self.dispatch(Msg::ResetClicked);
    }

    /// Applies every engine event already waiting. Returns how many there were.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.engine.try_recv() {
            self.dispatch(event.into());
            handled += 1;
        }
        handled
    }

    /// Blocks until the current submission leaves processing/downloading or
    /// `timeout` passes, and returns the status at that point.
    pub fn run_until_settled(&mut self, timeout: Duration) -> DownloadStatus {
        let deadline = Instant::now() + timeout;
        while self.state.download().status().is_busy() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                grab_warn!(
                    "submission {:?} still in flight after {:?}",
                    self.state.active_submission(),
                    timeout
                );
                break;
            }
            if let Some(event) = self.engine.recv_timeout(remaining) {
                self.dispatch(event.into());
            }
        }
        self.state.download().status()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(follow_up) = self.run_effect(effect) {
                    inbox.push_back(follow_up);
                }
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::SendRequest {
                submission,
                request,
            } => {
                self.engine.send(submission, request);
                None
            }
            Effect::SaveFile {
                submission,
                filename,
                payload,
            } => {
                let result = self.saver.save(&filename, &payload).map_err(|err| {
                    grab_error!("failed to save {filename}: {err}");
                    err.to_string()
                });
                Some(Msg::FileSaved { submission, result })
            }
            Effect::Notify(notification) => {
                self.notifier.notify(&notification);
                None
            }
        }
    }
}
