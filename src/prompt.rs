use crate::entry::{Entry, SEPARATOR_MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Confirm,
    Cancel,
}

/// One free-text question put to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub default: &'a str,
    pub confirm_label: &'a str,
    pub cancel_label: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResponse {
    pub button: Button,
    pub text: String,
}

impl PromptResponse {
    pub fn confirm(text: impl Into<String>) -> Self {
        Self {
            button: Button::Confirm,
            text: text.into(),
        }
    }

    pub fn cancel() -> Self {
        Self {
            button: Button::Cancel,
            text: String::new(),
        }
    }
}

/// Blocking request/response dialog used by [`PromptFlow::run`].
pub trait Prompter {
    fn text_prompt(&mut self, request: &PromptRequest<'_>) -> PromptResponse;
}

/// The meeting being assembled while waiting for its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Url(String),
    Id { id: String, password: Option<String> },
}

impl Pending {
    fn target(&self) -> &str {
        match self {
            Pending::Url(url) => url,
            Pending::Id { id, .. } => id,
        }
    }

    fn finish(self, title: &str) -> Entry {
        let title = Some(title.trim());
        match self {
            Pending::Url(url) => Entry::url(title, &url),
            Pending::Id { id, password } => Entry::id(title, &id, password.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    AwaitingEntryText,
    AwaitingSectionText,
    AwaitingPassword { id: String },
    AwaitingTitle(Pending),
    Done(Entry),
    Cancelled,
}

/// Step-by-step collection of a new registry entry. The flow never touches
/// the registry; it only yields a candidate entry.
#[derive(Debug, Clone)]
pub struct PromptFlow {
    state: PromptState,
    url_prefix: String,
}

impl PromptFlow {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            state: PromptState::AwaitingEntryText,
            url_prefix: url_prefix.into(),
        }
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, PromptState::Done(_) | PromptState::Cancelled)
    }

    /// The question for the current step, or `None` once finished.
    pub fn request(&self) -> Option<PromptRequest<'_>> {
        let request = match &self.state {
            PromptState::AwaitingEntryText => PromptRequest {
                title: "Add a new meeting",
                subtitle: "Paste a join URL or enter a meeting ID (\"-\" adds a separator)",
                default: "",
                confirm_label: "Next",
                cancel_label: Some("Cancel"),
            },
            PromptState::AwaitingSectionText => PromptRequest {
                title: "Add a separator",
                subtitle: "Optional section heading",
                default: "",
                confirm_label: "Add",
                cancel_label: Some("Cancel"),
            },
            PromptState::AwaitingPassword { .. } => PromptRequest {
                title: "Meeting password",
                subtitle: "Leave empty if the meeting has none",
                default: "",
                confirm_label: "Next",
                cancel_label: Some("Cancel"),
            },
            PromptState::AwaitingTitle(pending) => PromptRequest {
                title: "Meeting title",
                subtitle: "Name shown in the menu",
                default: pending.target(),
                confirm_label: "Add",
                cancel_label: Some("Cancel"),
            },
            PromptState::Done(_) | PromptState::Cancelled => return None,
        };
        Some(request)
    }

    /// Feed the answer to the current question and move to the next state.
    pub fn advance(&mut self, response: PromptResponse) {
        let state = std::mem::replace(&mut self.state, PromptState::Cancelled);
        if response.button == Button::Cancel {
            tracing::debug!("add meeting cancelled");
            return;
        }
        let text = response.text.trim();
        self.state = match state {
            PromptState::AwaitingEntryText if text.is_empty() => PromptState::Cancelled,
            PromptState::AwaitingEntryText if text == SEPARATOR_MARKER => {
                PromptState::AwaitingSectionText
            }
            PromptState::AwaitingEntryText if text.starts_with(&self.url_prefix) => {
                PromptState::AwaitingTitle(Pending::Url(text.to_string()))
            }
            PromptState::AwaitingEntryText => PromptState::AwaitingPassword {
                id: text.to_string(),
            },
            PromptState::AwaitingSectionText => PromptState::Done(Entry::separator(Some(text))),
            PromptState::AwaitingPassword { id } => PromptState::AwaitingTitle(Pending::Id {
                id,
                password: (!text.is_empty()).then(|| text.to_string()),
            }),
            PromptState::AwaitingTitle(pending) => PromptState::Done(pending.finish(text)),
            finished @ (PromptState::Done(_) | PromptState::Cancelled) => finished,
        };
    }

    /// Drive the flow to completion against `prompter`.
    pub fn run<P: Prompter + ?Sized>(mut self, prompter: &mut P) -> Option<Entry> {
        while !self.is_finished() {
            let response = match self.request() {
                Some(request) => prompter.text_prompt(&request),
                None => break,
            };
            self.advance(response);
        }
        self.into_entry()
    }

    pub fn into_entry(self) -> Option<Entry> {
        match self.state {
            PromptState::Done(entry) => Some(entry),
            _ => None,
        }
    }
}
