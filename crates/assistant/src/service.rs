use std::cell::RefCell;
use std::collections::VecDeque;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssistantError {
    #[error("a prompt is already waiting for a reply")]
    Busy,
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("assistant service failed: {0}")]
    Service(String),
}

/// AI 助理服務。 / Remote assistant reached with a single request/response call.
pub trait AssistantService {
    fn send_prompt(&self, prompt: &str) -> Result<String, AssistantError>;
}

impl<S: AssistantService + ?Sized> AssistantService for &S {
    fn send_prompt(&self, prompt: &str) -> Result<String, AssistantError> {
        (**self).send_prompt(prompt)
    }
}

/// Replies with the prompt itself; used by the CLI when no service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoAssistant;

impl AssistantService for EchoAssistant {
    fn send_prompt(&self, prompt: &str) -> Result<String, AssistantError> {
        Ok(format!("echo: {}", prompt.trim()))
    }
}

/// Plays back a fixed list of replies, then fails.
#[derive(Debug, Default)]
pub struct ScriptedAssistant {
    replies: RefCell<VecDeque<Result<String, AssistantError>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedAssistant {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, AssistantError>>,
    {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl AssistantService for ScriptedAssistant {
    fn send_prompt(&self, prompt: &str) -> Result<String, AssistantError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AssistantError::Service("no scripted reply left".into())))
    }
}
