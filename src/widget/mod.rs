//! Client side of the chat: transcript state, local answers about the
//! portfolio owner, and delegation of everything else to the proxy.

pub mod render;
pub mod transport;

use std::sync::Arc;
use tokio::sync::Mutex;
use log::{ debug, warn };

use crate::config::Persona;
use crate::models::api::SERVICE_ERROR_REPLY;
use crate::models::chat::Message;

pub use render::{ Align, Bubble, BubbleKind };
pub use transport::{ HttpProxyTransport, ProxyTransport, WidgetError };

/// Result of handing text to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank text, or a request is already in flight.
    Ignored,
    /// Answered from the persona without contacting the proxy.
    AnsweredLocally,
    /// Needs a proxy round trip; loading is set until it completes.
    Pending(PendingRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    message: String,
    session: u64,
}

impl PendingRequest {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Everything one widget instance shows.
///
/// `revision` increases whenever the transcript, the open flag or the
/// loading flag changes; a renderer scrolls to `scroll_anchor()` whenever it
/// sees a new revision.
#[derive(Debug, Clone)]
pub struct WidgetState {
    persona: Arc<Persona>,
    messages: Vec<Message>,
    input: String,
    open: bool,
    loading: bool,
    revision: u64,
    session: u64,
}

impl WidgetState {
    pub fn new(persona: Arc<Persona>) -> Self {
        let mut state = Self {
            persona,
            messages: Vec::new(),
            input: String::new(),
            open: false,
            loading: false,
            revision: 0,
            session: 0,
        };
        state.seed();
        state
    }

    fn seed(&mut self) {
        if !self.persona.widget_greeting.is_empty() {
            self.messages.push(Message::assistant(self.persona.widget_greeting.clone()));
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn persona(&self) -> &Arc<Persona> {
        &self.persona
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn open(&mut self) {
        if !self.open {
            self.open = true;
            self.touch();
        }
    }

    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.touch();
        }
    }

    pub fn toggle(&mut self) {
        if self.open { self.close() } else { self.open() }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.touch();
        }
    }

    /// Starts a new conversation. A reply still in flight for the old one is dropped.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.input.clear();
        self.loading = false;
        self.session += 1;
        self.seed();
        self.touch();
    }

    pub fn is_about_owner(&self, text: &str) -> bool {
        self.persona.is_about_owner(text)
    }

    /// First half of a submission: record the user's message and either
    /// answer it on the spot or mark the widget as waiting on the proxy.
    pub fn begin_submission(&mut self, text: &str) -> Submission {
        if text.trim().is_empty() || self.loading {
            return Submission::Ignored;
        }
        self.append_message(Message::user(text));
        self.input.clear();

        if self.is_about_owner(text) {
            debug!("Answering locally from persona");
            let description = self.persona.description.clone();
            self.append_message(Message::assistant(description));
            return Submission::AnsweredLocally;
        }

        self.set_loading(true);
        Submission::Pending(PendingRequest { message: text.to_string(), session: self.session })
    }

    /// Second half: append the proxy's reply, or the fixed error sentence, and
    /// leave the loading state.
    pub fn complete_submission(
        &mut self,
        pending: &PendingRequest,
        result: Result<String, WidgetError>
    ) {
        if pending.session != self.session {
            debug!("Dropping reply for a conversation that was reset");
            return;
        }
        let content = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                SERVICE_ERROR_REPLY.to_string()
            }
        };
        self.append_message(Message::assistant(content));
        self.set_loading(false);
    }
}

/// A widget instance bound to a proxy transport.
///
/// The state lock is released while the proxy call is awaited, so the UI
/// can keep reading the state (and reject further submissions) meanwhile.
pub struct ChatWidget<T> {
    state: Arc<Mutex<WidgetState>>,
    transport: T,
}

impl<T: ProxyTransport> ChatWidget<T> {
    pub fn new(persona: Arc<Persona>, transport: T) -> Self {
        Self::with_state(Arc::new(Mutex::new(WidgetState::new(persona))), transport)
    }

    pub fn with_state(state: Arc<Mutex<WidgetState>>, transport: T) -> Self {
        Self { state, transport }
    }

    pub fn state(&self) -> Arc<Mutex<WidgetState>> {
        Arc::clone(&self.state)
    }

    /// Opens the widget; `false` if it was already open.
    pub async fn open(&self) -> bool {
        let mut state = self.state.lock().await;
        let was_closed = !state.is_open();
        state.open();
        was_closed
    }

    pub async fn close(&self) {
        self.state.lock().await.close();
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.lock().await.set_input(text);
    }

    pub async fn submit(&self, text: &str) -> Submission {
        let submission = self.state.lock().await.begin_submission(text);
        if let Submission::Pending(pending) = &submission {
            let result = self.transport.send(pending.message()).await;
            self.state.lock().await.complete_submission(pending, result);
        }
        submission
    }

    /// Submits whatever is in the input box.
    pub async fn submit_input(&self) -> Submission {
        let text = self.state.lock().await.input().to_string();
        self.submit(&text).await
    }
}
