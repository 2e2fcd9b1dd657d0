use assistant::{Classifier, ClassifierError, EndpointClassifier, GatewayClassifier};
use engine::DriverRegistry;
use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> GatewayClassifier {
    GatewayClassifier::new(
        Client::new(),
        format!("{}/v1/chat/completions", server.uri()),
        Some("secret".to_string()),
        "google/gemini-3-flash-preview",
        &DriverRegistry::default(),
    )
}

fn completion(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

#[tokio::test]
async fn gateway_parses_fenced_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({"model": "google/gemini-3-flash-preview"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "```json\n{\"type\":\"expense\",\"data\":{\"driver\":\"Tito\",\"amount\":1500,\"expenseType\":\"combustível\"},\"response\":\"Despesa anotada\",\"understood\":true}\n```",
        )))
        .mount(&server)
        .await;

    let reply = gateway(&server).classify("despesa combustível 1500 tito").await.unwrap();
    assert_eq!(reply.kind, "expense");
    assert_eq!(reply.response, "Despesa anotada");
    let data = reply.data.unwrap();
    assert_eq!(data.expense_type.as_deref(), Some("combustível"));
}

#[tokio::test]
async fn gateway_prose_becomes_question_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Olá, tudo bem?")))
        .mount(&server)
        .await;

    let reply = gateway(&server).classify("olá").await.unwrap();
    assert_eq!(reply.kind, "question");
    assert!(!reply.understood);
    assert_eq!(reply.response, "Olá, tudo bem?");
}

#[tokio::test]
async fn gateway_maps_rate_limit_and_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(402))
        .mount(&server)
        .await;

    let classifier = gateway(&server);
    assert!(matches!(
        classifier.classify("x").await,
        Err(ClassifierError::RateLimited)
    ));
    assert!(matches!(
        classifier.classify("x").await,
        Err(ClassifierError::QuotaExhausted)
    ));
}

#[tokio::test]
async fn endpoint_posts_message_and_maps_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse-finance-command"))
        .and(body_partial_json(json!({"message": "resumo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "summary",
            "data": null,
            "response": "Aqui está o resumo",
            "understood": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parse-finance-command"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let classifier = EndpointClassifier::new(
        Client::new(),
        format!("{}/parse-finance-command", server.uri()),
        None,
    );
    let reply = classifier.classify("resumo").await.unwrap();
    assert_eq!(reply.kind, "summary");

    assert!(matches!(
        classifier.classify("outra coisa").await,
        Err(ClassifierError::Status(503))
    ));
}

#[tokio::test]
async fn endpoint_unreachable_is_a_network_error() {
    // Nothing listens on port 1.
    let classifier = EndpointClassifier::new(
        Client::new(),
        "http://127.0.0.1:1/parse-finance-command",
        None,
    );
    let err = classifier.classify("olá").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Network(_)));
    assert_eq!(err.user_message(), assistant::CONNECTION_ERROR_MESSAGE);
}
