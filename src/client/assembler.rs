use thiserror::Error;

use crate::web::models::{ChatMessage, ChatRequest, Message};

/// Where the current submission stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// The user message is in the history; the relay has not answered yet.
    Submitting,
    /// Deltas are arriving. `message` indexes the in-progress assistant
    /// message once the first delta has been applied.
    Streaming {
        buffer: String,
        message: Option<usize>,
    },
    Settled,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("message is empty")]
    EmptyInput,
    #[error("a response is still streaming")]
    InFlight,
    #[error("no API key configured")]
    MissingCredential,
}

/// Conversation history plus the state of the one submission allowed at a time.
#[derive(Debug)]
pub struct Assembler {
    messages: Vec<Message>,
    phase: Phase,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting | Phase::Streaming { .. })
    }

    /// Content of the assistant message currently being extended, if any.
    pub fn in_progress(&self) -> Option<&Message> {
        match &self.phase {
            Phase::Streaming {
                message: Some(index),
                ..
            } => self.messages.get(*index),
            _ => None,
        }
    }

    /// Appends the user message and returns the payload for the relay.
    /// A rejected submission leaves the history untouched.
    pub fn submit(
        &mut self,
        input: &str,
        model: &str,
        credential: &str,
    ) -> Result<ChatRequest, SubmitRejected> {
        let content = input.trim();
        if content.is_empty() {
            return Err(SubmitRejected::EmptyInput);
        }
        if self.is_loading() {
            return Err(SubmitRejected::InFlight);
        }
        if credential.is_empty() {
            return Err(SubmitRejected::MissingCredential);
        }

        self.messages.push(Message::user(content));
        self.phase = Phase::Submitting;

        Ok(ChatRequest {
            messages: self.messages.iter().map(ChatMessage::from).collect(),
            model: Some(model.to_string()),
            api_key: Some(credential.to_string()),
        })
    }

    /// The relay accepted the request and its body is being read.
    pub fn begin_stream(&mut self) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Streaming {
                buffer: String::new(),
                message: None,
            };
        }
    }

    /// Extends the in-progress assistant message. Returns false when nothing changed.
    pub fn apply_delta(&mut self, delta: &str) -> bool {
        let Phase::Streaming { buffer, message } = &mut self.phase else {
            return false;
        };
        if delta.is_empty() {
            return false;
        }
        buffer.push_str(delta);
        match message {
            Some(index) => self.messages[*index].content.clone_from(buffer),
            None => {
                self.messages.push(Message::assistant(buffer.clone()));
                *message = Some(self.messages.len() - 1);
            }
        }
        true
    }

    /// End of the byte stream; the assistant message is final from here on.
    pub fn settle(&mut self) {
        if matches!(self.phase, Phase::Streaming { .. }) {
            self.phase = Phase::Settled;
        }
    }

    /// Records a failure as a synthetic assistant message.
    pub fn fail(&mut self, description: &str) {
        if self.is_loading() {
            self.messages
                .push(Message::assistant(format!("Error: {}", description)));
            self.phase = Phase::Failed;
        }
    }

    /// Drops the whole history. Refused while a submission is in flight.
    pub fn clear(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.messages.clear();
        self.phase = Phase::Idle;
        true
    }
}
