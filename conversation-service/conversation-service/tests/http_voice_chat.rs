mod common;

use std::sync::Arc;

use common::{
    audio_upload_form, setup_test_server, ScriptedChatPort, ScriptedSpeechPort,
    ScriptedTranscriberPort, FAKE_MP3_BASE64,
};
use conversation_infra_transcriber_rest::RestTranscriberAdapter;

#[tokio::test]
async fn voice_chat_returns_recognized_text_and_spoken_reply() {
    let chat = ScriptedChatPort::replying("만나서 반가워요");
    let speech = ScriptedSpeechPort::returning_fake_mp3();
    let transcriber = ScriptedTranscriberPort::recognizing("반가워요");
    let (base_url, client) =
        setup_test_server(chat.clone(), speech.clone(), transcriber.clone()).await;

    let response = client
        .post(format!("{base_url}/voice-chat"))
        .multipart(audio_upload_form(vec![0u8; 6_000], "clip.webm", "audio/webm"))
        .send()
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["recognized_text"], "반가워요");
    assert_eq!(body["audio"], FAKE_MP3_BASE64);

    assert_eq!(transcriber.call_count(), 1);
    assert_eq!(
        chat.last_user_message().as_deref(),
        Some("반가워요"),
        "recognized text must feed the chat model"
    );
    assert_eq!(speech.call_count(), 1);
}

#[tokio::test]
async fn non_audio_upload_is_rejected_with_400_before_any_call() {
    let chat = ScriptedChatPort::replying("unused");
    let speech = ScriptedSpeechPort::returning_fake_mp3();
    let transcriber = ScriptedTranscriberPort::recognizing("unused");
    let (base_url, client) =
        setup_test_server(chat.clone(), speech.clone(), transcriber.clone()).await;

    let response = client
        .post(format!("{base_url}/voice-chat"))
        .multipart(audio_upload_form(vec![0u8; 6_000], "notes.txt", "text/plain"))
        .send()
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert!(
        body["error"]
            .as_str()
            .expect("error detail")
            .contains("text/plain"),
        "detail should name the offending content type"
    );
    assert_eq!(transcriber.call_count(), 0);
    assert_eq!(chat.call_count(), 0);
    assert_eq!(speech.call_count(), 0);
}

#[tokio::test]
async fn missing_file_field_is_rejected_with_400() {
    let chat = ScriptedChatPort::replying("unused");
    let speech = ScriptedSpeechPort::returning_fake_mp3();
    let transcriber = ScriptedTranscriberPort::recognizing("unused");
    let (base_url, client) = setup_test_server(chat, speech, transcriber.clone()).await;

    let form = reqwest::multipart::Form::new().text("note", "no audio here");
    let response = client
        .post(format!("{base_url}/voice-chat"))
        .multipart(form)
        .send()
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert!(
        body["error"]
            .as_str()
            .expect("error detail")
            .contains("file"),
        "detail should name the missing field"
    );
    assert_eq!(transcriber.call_count(), 0);
}

#[tokio::test]
async fn unreachable_transcriber_surfaces_as_503_naming_the_endpoint() {
    let chat = ScriptedChatPort::replying("unused");
    let speech = ScriptedSpeechPort::returning_fake_mp3();
    // Port 9 (discard) is never bound in the test environment.
    let endpoint = "http://127.0.0.1:9".to_string();
    let transcriber = Arc::new(RestTranscriberAdapter::new(
        reqwest::Client::new(),
        endpoint.clone(),
    ));
    let (base_url, client) = setup_test_server(chat.clone(), speech, transcriber).await;

    let response = client
        .post(format!("{base_url}/voice-chat"))
        .multipart(audio_upload_form(vec![0u8; 6_000], "clip.webm", "audio/webm"))
        .send()
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), 503);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert!(
        body["error"].as_str().expect("error detail").contains(&endpoint),
        "detail should tell the operator where the transcriber was expected"
    );
    assert_eq!(chat.call_count(), 0);
}
