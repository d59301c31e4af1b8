use kaiwa_llm::{ChatTurn, Role};

#[test]
fn test_role_as_str() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Assistant.as_str(), "assistant");
}

#[test]
fn test_role_serialization() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    assert_eq!(
        serde_json::to_string(&Role::Assistant).unwrap(),
        "\"assistant\""
    );
}

#[test]
fn test_role_deserialization() {
    let role: Role = serde_json::from_str("\"assistant\"").unwrap();
    assert_eq!(role, Role::Assistant);
}

#[test]
fn test_chat_turn_constructors() {
    let turn = ChatTurn::user("こんにちは");
    assert_eq!(turn.role, Role::User);
    assert_eq!(turn.content, "こんにちは");

    let turn = ChatTurn::assistant("こんにちは！");
    assert_eq!(turn.role, Role::Assistant);
}

#[test]
fn test_chat_turn_serde_roundtrip() {
    let turn = ChatTurn::user("Hello");
    let json = serde_json::to_string(&turn).unwrap();
    assert!(json.contains("\"role\":\"user\""));

    let back: ChatTurn = serde_json::from_str(&json).unwrap();
    assert_eq!(back, turn);
}
