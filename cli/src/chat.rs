//! Interactive chat loop: the terminal counterpart of the single-page UI.

use anyhow::Result;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

use fridgechef_core::Session;

use crate::render;

pub async fn run(session: &Session) -> Result<()> {
    println!("FridgeChef");
    println!("Enter the ingredients you have in your fridge to generate a recipe.");
    println!("Commands: history, history <n> (replay), quit");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        match input {
            "quit" | "exit" => break,
            "history" => {
                render::print_history(session.history())?;
                continue;
            }
            _ => {}
        }

        if let Some(rest) = input.strip_prefix("history ") {
            replay(session, rest.trim()).await?;
            continue;
        }

        println!("Generating...");
        session.submit(input).await;
        render_state(session).await;
    }

    Ok(())
}

/// Re-run a past query by its 1-based index from `history`.
async fn replay(session: &Session, index: &str) -> Result<()> {
    let Ok(index) = index.parse::<usize>() else {
        println!("Usage: history <n>");
        return Ok(());
    };

    let entries = session.history().load()?;
    let Some(entry) = index.checked_sub(1).and_then(|i| entries.get(i)) else {
        println!("No history entry {}.", index);
        return Ok(());
    };

    println!("Re-running: {}", entry.ingredients);
    session.load_from_history(entry).await;
    render_state(session).await;
    Ok(())
}

async fn render_state(session: &Session) {
    for notification in session.take_notifications().await {
        render::print_notification(&notification);
    }

    let view = session.snapshot().await;
    if let Some(recipe) = &view.recipe {
        render::print_recipe(recipe);
    }
    if let Some(summary) = &view.summary {
        render::print_summary(summary);
    }
}
