use novaflow_assistant::{
    AssistantError, AssistantPanel, EchoAssistant, Role, ScriptedAssistant,
};

#[test]
fn transcript_alternates_roles() {
    let mut panel = AssistantPanel::new();
    let service = ScriptedAssistant::new([
        Ok("Use the data module.".to_string()),
        Ok("Open finance_center.".to_string()),
    ]);
    panel.send(&service, "where are models?").expect("first");
    panel.send(&service, "and reconciliation?").expect("second");

    let roles: Vec<Role> = panel.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );
    assert_eq!(
        service.prompts(),
        vec!["where are models?", "and reconciliation?"]
    );
}

#[test]
fn rejected_prompts_never_reach_the_service() {
    let mut panel = AssistantPanel::new();
    let service = ScriptedAssistant::default();
    assert_eq!(
        panel.send(&service, "").map(|m| m.text.clone()),
        Err(AssistantError::EmptyPrompt)
    );
    assert!(service.prompts().is_empty());
}

#[test]
fn echo_service_trims_prompt() {
    let mut panel = AssistantPanel::new();
    let reply = panel.send(&EchoAssistant, "  ping ").expect("reply");
    assert_eq!(reply.text, "echo: ping");
    panel.reset();
    assert_eq!(panel.messages().len(), 1);
}
