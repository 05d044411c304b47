//! Terminal rendering for recipes, summaries, history, and notifications.

use fridgechef_core::{GeneratedRecipe, HistoryStore, Notification, NotificationKind};

pub fn print_recipe(recipe: &GeneratedRecipe) {
    println!();
    println!("=== {} ===", recipe.recipe_name);
    println!();
    println!("Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {}", ingredient);
    }
    println!();
    println!("Instructions:");
    println!("{}", recipe.instructions);
}

pub fn print_summary(summary: &str) {
    println!();
    println!("Summary: {}", summary);
}

pub fn print_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => {
            println!("[ok] {}: {}", notification.title, notification.message)
        }
        NotificationKind::Error => {
            eprintln!("[error] {}: {}", notification.title, notification.message)
        }
    }
}

/// Print all persisted entries, 1-indexed so `history <n>` can replay them.
pub fn print_history(store: &dyn HistoryStore) -> anyhow::Result<()> {
    let entries = store.load()?;
    if entries.is_empty() {
        println!("No past queries yet.");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        match &entry.recipe_name {
            Some(name) => println!("{:>3}. {} -> {}", i + 1, entry.ingredients, name),
            None => println!("{:>3}. {}", i + 1, entry.ingredients),
        }
    }
    Ok(())
}
