use async_trait::async_trait;
use chrono::NaiveDate;
use leadbook_core::seed::sample_workspace;
use leadbook_core::AiSettings;
use leadbook_suggest::{
    analyze_interaction_notes, generate_cold_call_script, generate_email_draft, EngineError,
    Generated, TextGenerator, Tone,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

fn configured() -> AiSettings {
    AiSettings {
        provider: "google".into(),
        api_key: "test-key".into(),
        model: "gemini-2.5-flash".into(),
    }
}

fn without_key() -> AiSettings {
    AiSettings {
        api_key: String::new(),
        ..configured()
    }
}

/// Fails the test if a request ever reaches it.
struct MustNotBeCalled;

#[async_trait]
impl TextGenerator for MustNotBeCalled {
    async fn complete(&self, _: &AiSettings, _: &str) -> Result<Option<String>, EngineError> {
        panic!("generator invoked without a configured credential");
    }
}

/// Replies with a fixed answer and records every prompt it sees.
struct Canned {
    reply: fn() -> Result<Option<String>, EngineError>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl Canned {
    fn new(reply: fn() -> Result<Option<String>, EngineError>) -> Self {
        Canned {
            reply,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for Canned {
    async fn complete(&self, _: &AiSettings, prompt: &str) -> Result<Option<String>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.reply)()
    }
}

#[tokio::test]
async fn missing_credential_returns_marked_error_without_calling_out() {
    let ws = sample_workspace().unwrap();
    let client = ws.client("c_1").unwrap();

    let result =
        generate_cold_call_script(&MustNotBeCalled, &without_key(), client, ws.services()).await;

    assert!(matches!(result, Generated::MissingCredential(_)));
    assert!(result.is_error());
    assert!(result.text().starts_with("Error:"));
    assert!(result.text().contains("API Key is missing"));
}

#[tokio::test]
async fn every_template_short_circuits_without_a_key() {
    let ws = sample_workspace().unwrap();
    let client = ws.client("c_2").unwrap();
    let settings = without_key();

    let email =
        generate_email_draft(&MustNotBeCalled, &settings, client, ws.services(), Tone::Casual)
            .await;
    let analysis =
        analyze_interaction_notes(&MustNotBeCalled, &settings, "Asked for a quote").await;

    assert_eq!(email.text(), "Error: API Key is missing.");
    assert_eq!(analysis.text(), "Error: API Key is missing.");
}

#[tokio::test]
async fn successful_reply_is_passed_through() {
    let ws = sample_workspace().unwrap();
    let client = ws.client("c_1").unwrap();
    let generator = Canned::new(|| Ok(Some("Hi John, this is Sam...".to_string())));

    let result = generate_cold_call_script(&generator, &configured(), client, ws.services()).await;

    assert_eq!(result, Generated::Text("Hi John, this is Sam...".into()));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("- Company: Acme Construction"));
    assert!(prompts[0].contains("Website is very slow"));
}

#[tokio::test]
async fn remote_failure_becomes_failure_text() {
    let ws = sample_workspace().unwrap();
    let client = ws.client("c_1").unwrap();
    let generator = Canned::new(|| Err(EngineError::Chat("503 Service Unavailable".into())));

    let script = generate_cold_call_script(&generator, &configured(), client, ws.services()).await;
    let email = generate_email_draft(
        &generator,
        &configured(),
        client,
        ws.services(),
        Tone::Professional,
    )
    .await;
    let analysis = analyze_interaction_notes(&generator, &configured(), "notes").await;

    assert_eq!(
        script,
        Generated::Failed("Failed to generate script. Please try again.".into())
    );
    assert_eq!(email.text(), "Failed to generate email.");
    assert_eq!(analysis.text(), "Failed to analyze notes.");
}

#[tokio::test]
async fn empty_reply_uses_placeholder_text() {
    let generator = Canned::new(|| Ok(None));
    let analysis = analyze_interaction_notes(&generator, &configured(), "notes").await;
    assert_eq!(analysis, Generated::Text("No analysis generated.".into()));
    assert!(!analysis.is_error());
}

#[tokio::test]
async fn ollama_runs_without_a_key() {
    let settings = AiSettings {
        provider: "ollama".into(),
        api_key: String::new(),
        model: "llama3".into(),
    };
    let generator = Canned::new(|| Ok(Some("- Send pricing".to_string())));
    let analysis = analyze_interaction_notes(&generator, &settings, "Wants pricing").await;
    assert_eq!(analysis.text(), "- Send pricing");
}

/// Holds the request open until released.
struct Gated {
    release: Notify,
}

#[async_trait]
impl TextGenerator for Gated {
    async fn complete(&self, _: &AiSettings, _: &str) -> Result<Option<String>, EngineError> {
        self.release.notified().await;
        Ok(Some("script".to_string()))
    }
}

#[tokio::test]
async fn workspace_stays_usable_while_generation_is_pending() {
    let mut ws = sample_workspace().unwrap();
    let acme = ws.client("c_1").unwrap().clone();
    let services = ws.services().to_vec();
    let generator = Gated {
        release: Notify::new(),
    };
    let settings = configured();
    let today = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();

    let pending = generate_cold_call_script(&generator, &settings, &acme, &services);
    let other_work = async {
        let id = ws.log_call("c_2", today, "Follow-up on CRM").unwrap();
        generator.release.notify_one();
        id
    };
    let (generated, interaction_id) = tokio::join!(pending, other_work);

    assert_eq!(generated.text(), "script");
    assert_eq!(interaction_id, "i_2");
    assert_eq!(ws.client("c_2").unwrap().last_contacted, Some(today));
}
