//! AI assistant panel of the NovaFlow shell.
//!
//! The workspace only toggles the panel's visibility; the transcript, the
//! single in-flight request and failure reporting live here.

pub mod panel;
pub mod service;

pub use panel::{
    AssistantPanel, Message, PendingPrompt, Role, EMPTY_REPLY_TEXT, GREETING,
    SERVICE_FAILURE_TEXT,
};
pub use service::{AssistantError, AssistantService, EchoAssistant, ScriptedAssistant};
