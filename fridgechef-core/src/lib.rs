pub mod ai;
pub mod error;
pub mod history;
pub mod session;

pub use ai::{
    client_from_config, generate_recipe, summarize_recipe, AiClient, AiConfig, AiError,
    AiProvider, ClaudeClient, FakeAiClient, GenerateRecipeResult, GeneratedRecipe,
    RecipeSummaryResult,
};
pub use error::{GenerationError, HistoryError, SummaryError};
pub use history::{new_entry_id, HistoryEntry, HistoryStore, JsonFileStore, MemoryStore};
pub use session::{
    Notification, NotificationKind, RecipePhase, Session, SubmitOutcome, SummaryPhase, ViewState,
};
