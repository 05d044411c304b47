//! Chat-style session state.
//!
//! A `Session` owns the state a frontend renders: the current recipe, its
//! summary, the phase of each, and a queue of transient notifications. One
//! submission drives `Idle -> Generating -> Generated | Failed`; once a
//! recipe exists, summarization runs as an independent best-effort second
//! step (`Pending -> Summarized | Failed`) whose failure never invalidates
//! the recipe.
//!
//! Submissions are not serialized against each other. Instead every
//! submission takes a monotonically increasing epoch, and results apply
//! only while their epoch is still the latest dispatched, so a slow older
//! generation can never overwrite a newer one (last-submitted-wins).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ai::{generate_recipe, summarize_recipe, AiClient, GeneratedRecipe};
use crate::history::{HistoryEntry, HistoryStore};

/// Primary submission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipePhase {
    Idle,
    Generating,
    Generated,
    Failed,
}

/// Secondary state, meaningful only once a recipe exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPhase {
    Idle,
    Pending,
    Summarized,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient user-facing notice. Frontends render these as toasts.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn success(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Snapshot of the renderable state.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub recipe_phase: RecipePhase,
    pub summary_phase: SummaryPhase,
    pub recipe: Option<GeneratedRecipe>,
    pub summary: Option<String>,
}

/// What a call to [`Session::submit`] amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A recipe was obtained and stored; the summary may or may not have
    /// followed (check the summary phase).
    Generated,
    /// Generation failed; recipe and summary remain cleared.
    GenerationFailed,
    /// A newer submission was dispatched while this one was in flight; no
    /// state was touched by this call.
    Superseded,
}

struct SessionState {
    recipe_phase: RecipePhase,
    summary_phase: SummaryPhase,
    recipe: Option<GeneratedRecipe>,
    summary: Option<String>,
    notifications: Vec<Notification>,
}

/// The view controller: single owner of the current recipe, summary, and
/// notification queue.
pub struct Session {
    ai: Arc<dyn AiClient>,
    history: Arc<dyn HistoryStore>,
    state: Mutex<SessionState>,
    /// Epoch of the most recently dispatched submission.
    epoch: AtomicU64,
}

impl Session {
    pub fn new(ai: Arc<dyn AiClient>, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            ai,
            history,
            state: Mutex::new(SessionState {
                recipe_phase: RecipePhase::Idle,
                summary_phase: SummaryPhase::Idle,
                recipe: None,
                summary: None,
                notifications: Vec::new(),
            }),
            epoch: AtomicU64::new(0),
        }
    }

    /// Submit an ingredient list: clear the display, generate a recipe,
    /// record it in history, then summarize it.
    ///
    /// History is appended only on successful generation; a store failure
    /// is logged and notified but does not fail the submission. Summary
    /// failure leaves the generated recipe intact.
    pub async fn submit(&self, ingredients: &str) -> SubmitOutcome {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.lock().await;
            state.recipe = None;
            state.summary = None;
            state.recipe_phase = RecipePhase::Generating;
            state.summary_phase = SummaryPhase::Idle;
        }

        let recipe = match generate_recipe(self.ai.as_ref(), ingredients).await {
            Ok(result) => result.recipe,
            Err(e) => {
                tracing::error!("Failed to generate recipe: {}", e);
                let mut state = self.state.lock().await;
                if !self.is_current(epoch) {
                    return SubmitOutcome::Superseded;
                }
                state.recipe_phase = RecipePhase::Failed;
                state.notifications.push(Notification::error(
                    "Error Generating Recipe",
                    format!("{}. Please check your ingredients and try again.", e),
                ));
                return SubmitOutcome::GenerationFailed;
            }
        };

        {
            let mut state = self.state.lock().await;
            if !self.is_current(epoch) {
                return SubmitOutcome::Superseded;
            }
            state.recipe = Some(recipe.clone());
            state.recipe_phase = RecipePhase::Generated;
            state.summary_phase = SummaryPhase::Pending;
            state.notifications.push(Notification::success(
                "Recipe Generated",
                "Your recipe has been successfully generated!",
            ));

            let entry = HistoryEntry::new(ingredients, Some(recipe.recipe_name.clone()));
            if let Err(e) = self.history.append(entry) {
                tracing::warn!("Failed to persist history entry: {}", e);
                state.notifications.push(Notification::error(
                    "History Not Saved",
                    format!("Could not record this query: {}", e),
                ));
            }
        }

        match summarize_recipe(self.ai.as_ref(), &recipe).await {
            Ok(result) => {
                let mut state = self.state.lock().await;
                if !self.is_current(epoch) {
                    return SubmitOutcome::Superseded;
                }
                state.summary = Some(result.summary);
                state.summary_phase = SummaryPhase::Summarized;
            }
            Err(e) => {
                tracing::error!("Failed to summarize recipe: {}", e);
                let mut state = self.state.lock().await;
                if !self.is_current(epoch) {
                    return SubmitOutcome::Superseded;
                }
                state.summary_phase = SummaryPhase::Failed;
                state.notifications.push(Notification::error(
                    "Error Summarizing Recipe",
                    format!("{}. The recipe is still available.", e),
                ));
            }
        }

        SubmitOutcome::Generated
    }

    /// Re-run a past query. Only the ingredient text is reused; generation
    /// and summarization run from scratch, so results may differ.
    pub async fn load_from_history(&self, entry: &HistoryEntry) -> SubmitOutcome {
        self.submit(&entry.ingredients).await
    }

    /// Current renderable state.
    pub async fn snapshot(&self) -> ViewState {
        let state = self.state.lock().await;
        ViewState {
            recipe_phase: state.recipe_phase,
            summary_phase: state.summary_phase,
            recipe: state.recipe.clone(),
            summary: state.summary.clone(),
        }
    }

    /// Drain pending notifications in emission order.
    pub async fn take_notifications(&self) -> Vec<Notification> {
        let mut state = self.state.lock().await;
        std::mem::take(&mut state.notifications)
    }

    /// The history store this session records into.
    pub fn history(&self) -> &dyn HistoryStore {
        self.history.as_ref()
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }
}
