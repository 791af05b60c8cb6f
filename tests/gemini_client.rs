// Tests for the Gemini model capability.
//
// Response parsing is tested on plain structs; the request shape and HTTP
// error handling are tested against a local wiremock server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vibecheck::toxicity::gemini::{extract_json, GeminiModel, GenerateContentResponse};
use vibecheck::toxicity::models::ImageInput;
use vibecheck::toxicity::schema::output_schema;
use vibecheck::toxicity::traits::{ModelCapability, Prompt};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn text_prompt() -> Prompt {
    Prompt {
        text: "Analyze the message below".to_string(),
        image: None,
    }
}

fn candidate_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-test-001"
    })
}

// ============================================================
// extract_json
// ============================================================

#[test]
fn extracts_json_from_first_candidate() {
    let response: GenerateContentResponse =
        serde_json::from_value(candidate_response(r#"{"score": 3, "breakdown": []}"#)).unwrap();
    let value = extract_json(&response).unwrap();
    assert_eq!(value["score"], 3);
}

#[test]
fn joins_split_text_parts() {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{
            "content": { "parts": [{ "text": "{\"score\": " }, { "text": "44}" }] }
        }]
    }))
    .unwrap();
    assert_eq!(extract_json(&response).unwrap()["score"], 44);
}

#[test]
fn missing_candidates_is_error() {
    let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
    assert!(extract_json(&response).is_err());
}

#[test]
fn blocked_prompt_is_error() {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "promptFeedback": { "blockReason": "SAFETY" }
    }))
    .unwrap();
    let err = extract_json(&response).unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[test]
fn empty_candidate_reports_finish_reason() {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{ "finishReason": "MAX_TOKENS" }]
    }))
    .unwrap();
    let err = extract_json(&response).unwrap_err();
    assert!(err.to_string().contains("MAX_TOKENS"));
}

#[test]
fn non_json_text_is_error() {
    let response: GenerateContentResponse =
        serde_json::from_value(candidate_response("The score is 80.")).unwrap();
    assert!(extract_json(&response).is_err());
}

// ============================================================
// HTTP round trips against a mock server
// ============================================================

#[tokio::test]
async fn sends_structured_output_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": "Analyze the message below" }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseJsonSchema": output_schema()
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate_response(r#"{"score": 7, "breakdown": []}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let model = GeminiModel::new(&server.uri(), MODEL, "test-key".to_string(), None).unwrap();
    let value = model.invoke(&text_prompt(), &output_schema()).await.unwrap();

    assert_eq!(value["score"], 7);
}

#[tokio::test]
async fn attaches_image_as_inline_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(json!({
            "contents": [{
                "parts": [
                    { "text": "Read the screenshot" },
                    { "inlineData": { "mimeType": "image/gif", "data": "R0lGODlh" } }
                ]
            }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate_response(r#"{"score": 0, "breakdown": []}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let prompt = Prompt {
        text: "Read the screenshot".to_string(),
        image: Some(ImageInput::from_bytes("image/gif", b"GIF89a").unwrap()),
    };
    let model = GeminiModel::new(&server.uri(), MODEL, "k".to_string(), None).unwrap();

    assert!(model.invoke(&prompt, &output_schema()).await.is_ok());
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED"))
        .mount(&server)
        .await;

    let model = GeminiModel::new(&server.uri(), MODEL, "k".to_string(), None).unwrap();
    let err = model
        .invoke(&text_prompt(), &output_schema())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("429"), "{message}");
    assert!(message.contains("RESOURCE_EXHAUSTED"), "{message}");
}

#[tokio::test]
async fn trailing_slash_in_api_url_is_ignored() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candidate_response(r#"{"score": 1, "breakdown": []}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/", server.uri());
    let model = GeminiModel::new(&url, MODEL, "k".to_string(), None).unwrap();
    assert!(model.invoke(&text_prompt(), &output_schema()).await.is_ok());
}
