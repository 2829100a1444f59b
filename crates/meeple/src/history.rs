// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `meeple history` command implementation.
//!
//! Prints the stored conversation, oldest first, followed by every
//! recommended game, newest first.

use std::io::IsTerminal;

use meeple_config::MeepleConfig;
use meeple_core::StorageAdapter;
use meeple_core::error::MeepleError;
use meeple_core::types::{ConversationTurn, GameRecommendation};
use meeple_storage::SqliteStorage;

/// Runs the `meeple history` command.
///
/// Colors are disabled with `--plain` or when stdout is not a TTY.
pub async fn run_history(config: &MeepleConfig, plain: bool) -> Result<(), MeepleError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;

    let turns = storage.list_turns().await?;
    let recs = storage.list_recommendations().await?;
    storage.close().await?;

    let use_color = !plain && std::io::stdout().is_terminal();
    print!("{}", format_history(&turns, &recs, use_color));
    Ok(())
}

/// Formats the history report.
fn format_history(
    turns: &[ConversationTurn],
    recs: &[GameRecommendation],
    use_color: bool,
) -> String {
    let mut out = heading("Conversation", turns.len(), use_color);
    if turns.is_empty() {
        out.push_str("    (no messages yet)\n");
    }
    for turn in turns {
        // Stored output is HTML; show it as lines.
        let robot = turn.robot_output.replace("<br>", "\n      ");
        out.push_str(&format!(
            "    [{}]\n    {} {}\n    {} {}\n\n",
            turn.timestamp,
            label("you:", use_color, true),
            turn.user_input,
            label("robot:", use_color, false),
            robot,
        ));
    }

    out.push_str(&heading("Recommended games", recs.len(), use_color));
    if recs.is_empty() {
        out.push_str("    (no recommendations yet)\n");
    }
    for rec in recs {
        let name = if use_color {
            use colored::Colorize;
            rec.name.bold().to_string()
        } else {
            rec.name.clone()
        };
        out.push_str(&format!(
            "    {name}  ({})\n      {}\n      {}\n",
            rec.recommended_on,
            rec.description,
            rec.stats_line(),
        ));
    }
    out.push('\n');
    out
}

fn heading(title: &str, count: usize, use_color: bool) -> String {
    let title = if use_color {
        use colored::Colorize;
        title.bold().to_string()
    } else {
        title.to_string()
    };
    format!("\n  {title} ({count})\n  {}\n", "-".repeat(35))
}

fn label(text: &str, use_color: bool, user: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    use colored::Colorize;
    if user {
        text.cyan().to_string()
    } else {
        text.green().to_string()
    }
}
