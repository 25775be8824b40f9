//! The chat controller.
//!
//! [`App`] owns the transcript and the interface state. It turns submitted
//! prompts into [`ChatParams`] for the transport and folds completed
//! exchanges back into the transcript, the output pane and the file on disk.
//! It never blocks: the event loop drives it through [`actions`].

use tracing::{debug, info, warn};

use crate::api::{ChatReply, ChatRequest};
use crate::core::chat_client::{ChatParams, TransportError};
use crate::core::config::ChatSettings;
use crate::core::message::Message;
use crate::core::transcript::{TranscriptError, TranscriptStore};
use crate::ui::theme::Theme;

pub mod actions;
pub mod ui_state;

pub use actions::{apply_action, AppAction, AppCommand};
pub use ui_state::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingReply,
}

pub struct App {
    pub settings: ChatSettings,
    pub ui: UiState,
    pub exit_requested: bool,
    store: TranscriptStore,
    transcript: Vec<Message>,
    state: ChatState,
    // Id of the one exchange whose outcome is still wanted
    active_request: Option<u64>,
    next_request_id: u64,
}

impl App {
    /// Load (or create) the transcript named in `settings` and build the
    /// controller around it.
    pub fn bootstrap(settings: ChatSettings) -> Result<App, TranscriptError> {
        let store = TranscriptStore::new(settings.transcript_path.clone());
        let transcript = store.load_or_create()?;
        info!(
            path = %store.path().display(),
            messages = transcript.len(),
            "loaded transcript"
        );
        Ok(App::new(settings, store, transcript, Theme::default()))
    }

    pub fn new(
        settings: ChatSettings,
        store: TranscriptStore,
        transcript: Vec<Message>,
        theme: Theme,
    ) -> App {
        let mut ui = UiState::new(theme, settings.mouse_enabled);
        for message in &transcript {
            ui.output.push_message(&ui.theme, message);
        }

        App {
            settings,
            ui,
            exit_requested: false,
            store,
            transcript,
            state: ChatState::Idle,
            active_request: None,
            next_request_id: 1,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state == ChatState::AwaitingReply
    }

    pub fn active_request(&self) -> Option<u64> {
        self.active_request
    }

    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Record `text` as the next user turn and hand back the request to send.
    ///
    /// Returns `None` when nothing should be sent: blank input, or a reply is
    /// still outstanding (the latter also leaves a notice in the output pane).
    pub fn submit(&mut self, text: &str) -> Option<ChatParams> {
        if text.trim().is_empty() {
            return None;
        }

        if self.is_awaiting_reply() {
            let notice = format!(
                "Still waiting for {} to reply; your prompt was kept.",
                self.settings.model
            );
            self.ui.output.push_notice(&self.ui.theme, &notice);
            return None;
        }

        self.transcript.push(Message::user(text));
        self.ui.output.push_user(&self.ui.theme, text);

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.active_request = Some(request_id);
        self.state = ChatState::AwaitingReply;

        info!(
            request_id,
            model = %self.settings.model,
            messages = self.transcript.len(),
            "submitting prompt"
        );

        Some(ChatParams {
            request: ChatRequest::new(self.settings.model.clone(), self.transcript.clone()),
            request_id,
        })
    }

    /// Take ownership of an outcome only if it belongs to the live exchange.
    fn finish_request(&mut self, request_id: u64) -> bool {
        if self.active_request != Some(request_id) {
            debug!(
                request_id,
                active = ?self.active_request,
                "discarding stale chat completion"
            );
            return false;
        }
        self.active_request = None;
        self.state = ChatState::Idle;
        true
    }

    pub fn on_reply(&mut self, reply: ChatReply, request_id: u64) {
        if !self.finish_request(request_id) {
            return;
        }

        // Whatever role the server echoes, the turn is the assistant's.
        let content = reply.message.content;
        self.ui.output.push_assistant(&self.ui.theme, &content);
        self.transcript.push(Message::assistant(content));

        match self.store.save(&self.transcript) {
            Ok(()) => debug!(
                request_id,
                messages = self.transcript.len(),
                "transcript saved"
            ),
            Err(err) => {
                warn!(request_id, error = %err, "failed to save transcript");
                self.ui.output.push_error(&self.ui.theme, &err.to_string());
            }
        }
    }

    pub fn on_error(&mut self, error: TransportError, request_id: u64) {
        if !self.finish_request(request_id) {
            return;
        }

        let message = if error.is_connection() {
            format!(
                "Could not connect to {}. Is it running? ({})",
                self.settings.model, self.settings.endpoint
            )
        } else {
            error.to_string()
        };
        self.ui.output.push_error(&self.ui.theme, &message);
    }

    /// Forget the whole conversation, on screen and on disk. A reply still in
    /// flight is dropped when it arrives. If the file cannot be cleared,
    /// nothing in memory changes.
    pub fn clear(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear transcript");
            self.ui.output.push_error(&self.ui.theme, &err.to_string());
            return;
        }

        self.transcript.clear();
        self.active_request = None;
        self.state = ChatState::Idle;
        self.ui.output.clear();
        info!(path = %self.store.path().display(), "history cleared");
        self.ui.output.push_notice(&self.ui.theme, "History cleared.");
    }
}
