//! `saathi sessions` -- list saved chat sessions.

use chrono::Utc;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use saathi_core::chat::{group_into_sessions, relative_time, ChatStore};

use crate::state::AppState;

const HISTORY_FETCH_LIMIT: u32 = 100;

/// List the signed-in seller's saved sessions, newest first.
pub async fn list_sessions(state: &AppState, json: bool) -> anyhow::Result<()> {
    let Some(store) = state.chat_store() else {
        println!(
            "\n  {} Document store not configured; no saved sessions.\n",
            style("i").blue().bold()
        );
        return Ok(());
    };
    let Some(user) = &state.user else {
        println!(
            "\n  {} Not signed in. Set SAATHI_EMAIL and SAATHI_PASSWORD.\n",
            style("i").blue().bold()
        );
        return Ok(());
    };

    let messages = store.list_messages(&user.id, HISTORY_FETCH_LIMIT).await?;
    let sessions = group_into_sessions(&messages);

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!(
            "\n  {} No saved sessions yet. Start one with: {}\n",
            style("i").blue().bold(),
            style("saathi chat").yellow()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Preview").fg(Color::White),
        Cell::new("Last Activity").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
    ]);

    let now = Utc::now();
    for (index, session) in sessions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).fg(Color::DarkGrey),
            Cell::new(session.title()).fg(Color::Cyan),
            Cell::new(&session.preview),
            Cell::new(relative_time(session.last_activity_at, now)).fg(Color::DarkGrey),
            Cell::new(session.messages.len()),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
