use serde::{Deserialize, Serialize};

use crate::service::{AssistantError, AssistantService};

pub const GREETING: &str = "Hi, I'm the NovaFlow copilot. I can find resources, explain data \
models or draft logic snippets. What are you building today?";

/// Shown when the service answers with an empty body.
pub const EMPTY_REPLY_TEXT: &str = "The assistant returned no answer. Please try again.";

/// Shown inline when the service call fails.
pub const SERVICE_FAILURE_TEXT: &str =
    "Could not reach the AI service. Please check your network connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl Message {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            failed: false,
        }
    }

    fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            failed: false,
        }
    }
}

/// Ticket for a prompt that has been recorded but not yet answered.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingPrompt {
    id: u64,
    text: String,
}

impl PendingPrompt {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 助理面板的對話紀錄與等待狀態。 / Transcript and pending state of the assistant panel.
///
/// At most one prompt is in flight. Failures never escape as errors once a
/// prompt was accepted; they become an inline assistant message instead.
#[derive(Debug, Clone)]
pub struct AssistantPanel {
    messages: Vec<Message>,
    pending: Option<u64>,
    next_id: u64,
}

impl Default for AssistantPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantPanel {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
            pending: None,
            next_id: 0,
        }
    }

    /// Records the user's prompt and marks the panel as waiting.
    pub fn begin_send(&mut self, input: &str) -> Result<PendingPrompt, AssistantError> {
        if self.pending.is_some() {
            return Err(AssistantError::Busy);
        }
        if input.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.pending = Some(id);
        self.messages.push(Message::user(input));
        tracing::debug!(prompt_id = id, "assistant prompt sent");
        Ok(PendingPrompt {
            id,
            text: input.to_string(),
        })
    }

    /// Records the reply for `prompt`. Stale tickets are ignored and return `None`.
    pub fn complete(
        &mut self,
        prompt: PendingPrompt,
        result: Result<String, AssistantError>,
    ) -> Option<&Message> {
        if self.pending != Some(prompt.id) {
            tracing::debug!(prompt_id = prompt.id, "stale assistant reply dropped");
            return None;
        }
        self.pending = None;
        let message = match result {
            Ok(text) if text.trim().is_empty() => Message::assistant(EMPTY_REPLY_TEXT),
            Ok(text) => Message::assistant(text),
            Err(err) => {
                tracing::warn!(error = %err, "assistant request failed");
                Message {
                    failed: true,
                    ..Message::assistant(SERVICE_FAILURE_TEXT)
                }
            }
        };
        self.messages.push(message);
        self.messages.last()
    }

    /// Sends `input` through `service` and waits for the answer.
    pub fn send<S>(&mut self, service: &S, input: &str) -> Result<&Message, AssistantError>
    where
        S: AssistantService + ?Sized,
    {
        let prompt = self.begin_send(input)?;
        let result = service.send_prompt(prompt.text());
        self.complete(prompt, result)
            .ok_or_else(|| AssistantError::Service("reply arrived for a cancelled prompt".into()))
    }

    /// Abandons the in-flight prompt, if any; its reply will be dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Clears the transcript back to the greeting.
    pub fn reset(&mut self) {
        *self = Self {
            next_id: self.next_id,
            ..Self::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ScriptedAssistant;

    #[test]
    fn starts_with_greeting() {
        let panel = AssistantPanel::new();
        assert_eq!(panel.messages().len(), 1);
        assert_eq!(panel.messages()[0].role, Role::Assistant);
    }

    #[test]
    fn rejects_blank_prompts() {
        let mut panel = AssistantPanel::new();
        assert_eq!(panel.begin_send("   \n"), Err(AssistantError::EmptyPrompt));
        assert_eq!(panel.messages().len(), 1);
    }

    #[test]
    fn second_send_while_pending_is_busy() {
        let mut panel = AssistantPanel::new();
        let first = panel.begin_send("hello").expect("first prompt");
        assert_eq!(panel.begin_send("again"), Err(AssistantError::Busy));
        panel.complete(first, Ok("hi".into()));
        assert!(!panel.is_pending());
        assert!(panel.begin_send("again").is_ok());
    }

    #[test]
    fn failure_becomes_inline_message() {
        let mut panel = AssistantPanel::new();
        let service = ScriptedAssistant::new([Err(AssistantError::Service("timeout".into()))]);
        let reply = panel.send(&service, "explain models").expect("accepted");
        assert!(reply.failed);
        assert_eq!(reply.text, SERVICE_FAILURE_TEXT);
        assert!(!panel.is_pending());
    }

    #[test]
    fn empty_reply_uses_fallback_text() {
        let mut panel = AssistantPanel::new();
        let service = ScriptedAssistant::new([Ok(String::new())]);
        let reply = panel.send(&service, "anything").expect("accepted");
        assert_eq!(reply.text, EMPTY_REPLY_TEXT);
        assert!(!reply.failed);
    }

    #[test]
    fn cancelled_prompt_drops_late_reply() {
        let mut panel = AssistantPanel::new();
        let prompt = panel.begin_send("slow question").expect("prompt");
        assert!(panel.cancel());
        assert!(panel.complete(prompt, Ok("late".into())).is_none());
        assert_eq!(panel.messages().len(), 2);
    }
}
