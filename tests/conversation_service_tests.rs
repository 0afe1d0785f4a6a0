//! Integration tests for the conversation service.
//!
//! Exercises the service against a scripted mock collaborator: pass-through
//! of generations, preservation of message order, default-option behavior,
//! and unmodified propagation of upstream failures.

use std::sync::Arc;

use colloquy::{
    ChatResponse, ConversationService, DomainError, Generation, GenerationOptions, Message,
    MockChatClient, Role,
};

fn service_with(mock: Arc<MockChatClient>) -> ConversationService {
    init_tracing();
    ConversationService::new(mock)
}

/// Install a test subscriber once; honors `RUST_LOG` when set.
fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[tokio::test]
async fn hello_round_trip() {
    let mock = Arc::new(MockChatClient::replying("Hi there!"));
    let service = service_with(mock.clone());

    let generations = service
        .converse(vec![Message::user("Hello")])
        .await
        .expect("converse should succeed");

    assert_eq!(generations.len(), 1);
    assert_eq!(generations[0].text(), "Hi there!");
    assert_eq!(mock.call_count(), 1, "exactly one outbound call");
}

#[tokio::test]
async fn prompt_message_order_is_preserved() {
    let mock = Arc::new(MockChatClient::replying("ok"));
    let service = service_with(mock.clone());

    let messages = vec![
        Message::system("You are terse."),
        Message::user("What is Rust?"),
        Message::assistant("A systems language."),
        Message::user("And Cargo?"),
    ];
    service
        .converse(messages.clone())
        .await
        .expect("converse should succeed");

    let prompt = mock.last_prompt().expect("a prompt was recorded");
    assert_eq!(prompt.messages(), messages.as_slice());
    assert_eq!(prompt.messages()[0].role(), Role::System);
    assert_eq!(prompt.messages()[3].content(), "And Cargo?");
}

#[tokio::test]
async fn all_generations_pass_through_in_order() {
    let mock = Arc::new(MockChatClient::new());
    mock.push_response(ChatResponse::new(vec![
        Generation::new("candidate one"),
        Generation::new("candidate two"),
        Generation::new("candidate three"),
    ]));
    let service = service_with(mock);

    let generations = service
        .converse(vec![Message::user("give me three")])
        .await
        .expect("converse should succeed");

    let texts: Vec<&str> = generations.iter().map(|g| g.text()).collect();
    assert_eq!(texts, ["candidate one", "candidate two", "candidate three"]);
}

#[tokio::test]
async fn converse_without_options_sends_default_options() {
    let mock = Arc::new(MockChatClient::replying("ok"));
    let service = service_with(mock.clone());

    service
        .converse(vec![Message::user("hi")])
        .await
        .expect("converse should succeed");

    let prompt = mock.last_prompt().unwrap();
    assert!(prompt.options().is_default());
}

#[tokio::test]
async fn converse_matches_explicit_default_options() {
    let mock = Arc::new(MockChatClient::replying("ok"));
    let service = service_with(mock.clone());

    let messages = vec![Message::user("hi")];
    let implicit = service.converse(messages.clone()).await.unwrap();
    let explicit = service
        .converse_with_options(messages, GenerationOptions::default())
        .await
        .unwrap();

    assert_eq!(implicit, explicit);
    let prompts = mock.recorded_prompts();
    assert_eq!(prompts[0], prompts[1], "both calls build the same prompt");
}

#[tokio::test]
async fn options_apply_to_a_single_call_only() {
    let mock = Arc::new(MockChatClient::replying("ok"));
    let service = service_with(mock.clone());

    let options = GenerationOptions::new()
        .with_model("gpt-4o-mini")
        .with_temperature(0.0);
    service
        .converse_with_options(vec![Message::user("first")], options)
        .await
        .unwrap();
    service.converse(vec![Message::user("second")]).await.unwrap();

    let prompts = mock.recorded_prompts();
    assert_eq!(prompts[0].options().model(), Some("gpt-4o-mini"));
    assert!(
        prompts[1].options().is_default(),
        "no option state persists between calls"
    );
}

#[tokio::test]
async fn upstream_failure_propagates_unchanged() {
    let mock = Arc::new(MockChatClient::failing("rate limited"));
    let service = service_with(mock);

    let err = service
        .converse(vec![Message::user("hi")])
        .await
        .expect_err("converse should fail");

    assert!(err.is_upstream());
    match err {
        DomainError::Upstream(msg) => assert_eq!(msg, "rate limited"),
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn empty_conversation_is_forwarded() {
    let mock = Arc::new(MockChatClient::replying("hello?"));
    let service = service_with(mock.clone());

    let generations = service.converse(vec![]).await.expect("empty is accepted");

    assert_eq!(generations.len(), 1);
    let prompt = mock.last_prompt().unwrap();
    assert!(prompt.is_empty(), "empty conversation reaches the client");
}

#[tokio::test]
async fn empty_choice_list_from_collaborator_yields_empty_results() {
    let mock = Arc::new(MockChatClient::new());
    mock.push_response(ChatResponse::new(vec![]));
    let service = service_with(mock);

    let generations = service.converse(vec![Message::user("hi")]).await.unwrap();
    assert!(generations.is_empty(), "no filtering, no fabrication");
}

#[tokio::test]
async fn service_is_safe_for_concurrent_callers() {
    let mock = Arc::new(MockChatClient::replying("ok"));
    let service = Arc::new(service_with(mock.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.converse(vec![Message::user(format!("call {i}"))]).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().expect("each call succeeds");
    }

    assert_eq!(mock.call_count(), 8);
}
