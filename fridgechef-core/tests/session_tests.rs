//! End-to-end tests for the submission flow against a fake AI client.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use fridgechef_core::ai::{AiClient, AiError, ChatRequest, ChatResponse};
use fridgechef_core::{
    FakeAiClient, HistoryStore, MemoryStore, NotificationKind, RecipePhase, Session,
    SubmitOutcome, SummaryPhase,
};

const RECIPE_JSON: &str = r#"{
    "recipeName": "Cheesy Chicken Broccoli Bake",
    "ingredients": [
        "chicken breast (1 lb, cubed)",
        "broccoli florets (2 cups)",
        "cheddar (1 cup, shredded)"
    ],
    "instructions": "1. Preheat oven to 400°F.\n2. Toss everything in a baking dish.\n3. Bake for 25 minutes."
}"#;

const SUMMARY_JSON: &str =
    r#"{"summary": "A weeknight bake of chicken and broccoli under melted cheddar."}"#;

fn fake_with_both() -> FakeAiClient {
    let mut fake = FakeAiClient::new();
    fake.add_response("highly skilled chef", RECIPE_JSON);
    fake.add_response("recipe summarizer", SUMMARY_JSON);
    fake
}

#[tokio::test]
async fn successful_submission_displays_recipe_and_records_history() {
    let fake = Arc::new(fake_with_both());
    let history = Arc::new(MemoryStore::new());
    let session = Session::new(fake.clone(), history.clone());

    let outcome = session.submit("chicken, broccoli, cheese").await;
    assert_eq!(outcome, SubmitOutcome::Generated);

    let view = session.snapshot().await;
    assert_eq!(view.recipe_phase, RecipePhase::Generated);
    assert_eq!(view.summary_phase, SummaryPhase::Summarized);

    let recipe = view.recipe.expect("recipe should be displayed");
    assert!(!recipe.recipe_name.is_empty());
    assert!(!recipe.instructions.is_empty());
    assert_eq!(
        view.summary.as_deref(),
        Some("A weeknight bake of chicken and broccoli under melted cheddar.")
    );

    // Exactly one generation call, carrying the submitted text verbatim
    assert_eq!(fake.calls("generate_recipe"), 1);
    let prompts = fake.prompts("generate_recipe");
    assert!(prompts[0].contains("chicken, broccoli, cheese"));
    assert_eq!(fake.calls("recipe_summary"), 1);

    let entries = history.load().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ingredients, "chicken, broccoli, cheese");
    assert_eq!(
        entries[0].recipe_name.as_deref(),
        Some("Cheesy Chicken Broccoli Bake")
    );

    let notifications = session.take_notifications().await;
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Success));
}

#[tokio::test]
async fn generation_failure_leaves_no_trace() {
    // No responses configured: the generation call errors
    let fake = Arc::new(FakeAiClient::new());
    let history = Arc::new(MemoryStore::new());
    let session = Session::new(fake.clone(), history.clone());

    let outcome = session.submit("pickles, jam").await;
    assert_eq!(outcome, SubmitOutcome::GenerationFailed);

    let view = session.snapshot().await;
    assert_eq!(view.recipe_phase, RecipePhase::Failed);
    assert!(view.recipe.is_none());
    assert!(view.summary.is_none());

    // No history entry, no summarization attempt
    assert!(history.load().unwrap().is_empty());
    assert_eq!(fake.calls("recipe_summary"), 0);

    let notifications = session.take_notifications().await;
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Error));
}

#[tokio::test]
async fn malformed_recipe_response_counts_as_generation_failure() {
    let fake = Arc::new(FakeAiClient::with_response(
        "highly skilled chef",
        "I'd rather chat about food than emit JSON.",
    ));
    let history = Arc::new(MemoryStore::new());
    let session = Session::new(fake, history.clone());

    let outcome = session.submit("chicken").await;
    assert_eq!(outcome, SubmitOutcome::GenerationFailed);
    assert!(history.load().unwrap().is_empty());
}

#[tokio::test]
async fn summary_failure_keeps_recipe_and_history() {
    // Only the generation prompt has a response; summarization errors
    let fake = Arc::new(FakeAiClient::with_response(
        "highly skilled chef",
        RECIPE_JSON,
    ));
    let history = Arc::new(MemoryStore::new());
    let session = Session::new(fake, history.clone());

    let outcome = session.submit("chicken, broccoli, cheese").await;
    assert_eq!(outcome, SubmitOutcome::Generated);

    let view = session.snapshot().await;
    assert_eq!(view.recipe_phase, RecipePhase::Generated);
    assert_eq!(view.summary_phase, SummaryPhase::Failed);
    assert!(view.recipe.is_some());
    assert!(view.summary.is_none());

    let entries = history.load().unwrap();
    assert_eq!(entries.len(), 1);

    let notifications = session.take_notifications().await;
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Error));
    assert!(notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Success));
}

#[tokio::test]
async fn replay_from_history_generates_fresh() {
    let fake = Arc::new(fake_with_both());
    let history = Arc::new(MemoryStore::new());
    let session = Session::new(fake.clone(), history.clone());

    session.submit("chicken, broccoli, cheese").await;
    assert_eq!(fake.calls("generate_recipe"), 1);

    let entry = history.load().unwrap()[0].clone();
    let outcome = session.load_from_history(&entry).await;
    assert_eq!(outcome, SubmitOutcome::Generated);

    // A second real generation call, not a cache replay, and a second
    // history entry for the re-run
    assert_eq!(fake.calls("generate_recipe"), 2);
    assert_eq!(history.load().unwrap().len(), 2);
    assert!(fake.prompts("generate_recipe")[1].contains("chicken, broccoli, cheese"));
}

/// Wraps a fake client, delaying any request whose prompt contains a marker.
struct DelayedClient {
    inner: FakeAiClient,
    slow_marker: &'static str,
    delay: Duration,
}

#[async_trait]
impl AiClient for DelayedClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let is_slow = request
            .messages
            .iter()
            .any(|m| m.content.contains(self.slow_marker));
        if is_slow {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.complete(prompt_name, request).await
    }
}

#[tokio::test]
async fn stale_generation_does_not_overwrite_newer_submission() {
    let mut fake = FakeAiClient::new();
    fake.add_response(
        "escargot",
        r#"{"recipeName": "Slow Garlic Escargot", "ingredients": ["butter (2 tbsp)"], "instructions": "Simmer gently."}"#,
    );
    fake.add_response(
        "toast",
        r#"{"recipeName": "Fast Grilled Cheese", "ingredients": ["bread (2 slices)"], "instructions": "Grill until golden."}"#,
    );
    fake.add_response("recipe summarizer", SUMMARY_JSON);

    let client = Arc::new(DelayedClient {
        inner: fake,
        slow_marker: "escargot",
        delay: Duration::from_millis(400),
    });
    let history = Arc::new(MemoryStore::new());
    let session = Arc::new(Session::new(client, history.clone()));

    let slow = {
        let session = session.clone();
        tokio::spawn(async move { session.submit("escargot").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = {
        let session = session.clone();
        tokio::spawn(async move { session.submit("toast, cheese").await })
    };

    let slow_outcome = slow.await.unwrap();
    let fast_outcome = fast.await.unwrap();

    assert_eq!(slow_outcome, SubmitOutcome::Superseded);
    assert_eq!(fast_outcome, SubmitOutcome::Generated);

    // The newer submission's recipe is displayed, and only it was recorded
    let view = session.snapshot().await;
    assert_eq!(
        view.recipe.map(|r| r.recipe_name),
        Some("Fast Grilled Cheese".to_string())
    );

    let entries = history.load().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ingredients, "toast, cheese");
}

#[tokio::test]
async fn empty_submission_is_forwarded() {
    let fake = Arc::new(fake_with_both());
    let history = Arc::new(MemoryStore::new());
    let session = Session::new(fake.clone(), history.clone());

    let outcome = session.submit("").await;
    assert_eq!(outcome, SubmitOutcome::Generated);
    assert_eq!(fake.calls("generate_recipe"), 1);
    assert_eq!(history.load().unwrap()[0].ingredients, "");
}
