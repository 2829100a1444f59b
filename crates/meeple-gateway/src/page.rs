// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-side rendering of the chat page.
//!
//! The page is a static template with two slots, filled with the stored
//! history and the recommendation list.

use meeple_core::text::{escape_html, newlines_to_br};
use meeple_core::types::{ConversationTurn, GameRecommendation};

const TEMPLATE: &str = include_str!("../templates/chat.html");
const HISTORY_SLOT: &str = "{{HISTORY}}";
const RECOMMENDATIONS_SLOT: &str = "{{RECOMMENDATIONS}}";

/// A stored turn ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    /// Escaped user text with `<br>` line breaks.
    pub user: String,
    /// Stored output with `<br>` line breaks, otherwise untouched.
    pub robot: String,
}

impl From<&ConversationTurn> for TurnView {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            user: newlines_to_br(&escape_html(&turn.user_input)),
            robot: newlines_to_br(&turn.robot_output),
        }
    }
}

/// A stored recommendation ready for display. Every field is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationView {
    pub name: String,
    pub description: String,
    pub stats: String,
}

impl From<&GameRecommendation> for RecommendationView {
    fn from(rec: &GameRecommendation) -> Self {
        Self {
            name: escape_html(&rec.name),
            description: newlines_to_br(&escape_html(&rec.description)),
            stats: escape_html(&rec.stats_line()),
        }
    }
}

/// Renders the full page. Both slices are displayed in the order given.
pub fn render_page(turns: &[ConversationTurn], recs: &[GameRecommendation]) -> String {
    let history: String = turns
        .iter()
        .map(TurnView::from)
        .map(|t| {
            format!(
                "      <div class=\"mensaje usuario\">{}</div>\n      <div class=\"mensaje robot\">{}</div>\n",
                t.user, t.robot
            )
        })
        .collect();

    let cards: String = recs
        .iter()
        .map(RecommendationView::from)
        .map(|r| {
            format!(
                "    <div class=\"juego\"><strong>{}</strong><p>{}</p><div class=\"stats\">{}</div></div>\n",
                r.name, r.description, r.stats
            )
        })
        .collect();

    // Single pass over the template, so stored text is never scanned for slots.
    let (head, rest) = TEMPLATE
        .split_once(RECOMMENDATIONS_SLOT)
        .unwrap_or((TEMPLATE, ""));
    let (middle, tail) = rest.split_once(HISTORY_SLOT).unwrap_or((rest, ""));

    let mut page = String::with_capacity(TEMPLATE.len() + cards.len() + history.len());
    page.push_str(head);
    page.push_str(&cards);
    page.push_str(middle);
    page.push_str(&history);
    page.push_str(tail);
    page
}

/// Minimal page shown when the store cannot be read.
pub fn render_error_page(detail: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\"><head><meta charset=\"utf-8\"><title>Error</title></head>\
         <body><h1>Error al cargar el historial</h1><p>{}</p></body></html>\n",
        escape_html(detail)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(id: i64, user: &str, robot: &str) -> ConversationTurn {
        ConversationTurn {
            id,
            user_input: user.to_string(),
            robot_output: robot.to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn rec(id: i64, name: &str) -> GameRecommendation {
        GameRecommendation {
            id,
            name: name.to_string(),
            description: "Losetas\ny castillos".to_string(),
            players: "2-5".to_string(),
            duration: "35 min".to_string(),
            complexity: "Baja".to_string(),
            min_age: "7+".to_string(),
            recommended_on: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn turn_view_escapes_user_but_not_robot() {
        let view = TurnView::from(&turn(1, "<b>hola</b>\nqué tal", "<strong>Azul</strong>\nfin"));
        assert_eq!(view.user, "&lt;b&gt;hola&lt;/b&gt;<br>qué tal");
        assert_eq!(view.robot, "<strong>Azul</strong><br>fin");
    }

    #[test]
    fn recommendation_view_has_stats_line() {
        let view = RecommendationView::from(&rec(1, "Carcassonne"));
        assert_eq!(view.stats, "👥: 2-5, ⌛: 35 min, 🤔: Baja, 🪅: 7+");
        assert_eq!(view.description, "Losetas<br>y castillos");
    }

    #[test]
    fn page_keeps_given_order() {
        let html = render_page(
            &[turn(1, "primero", "a"), turn(2, "segundo", "b")],
            &[rec(2, "Nuevo"), rec(1, "Viejo")],
        );
        assert!(html.find("primero").unwrap() < html.find("segundo").unwrap());
        assert!(html.find("Nuevo").unwrap() < html.find("Viejo").unwrap());
        assert!(!html.contains(HISTORY_SLOT));
        assert!(!html.contains(RECOMMENDATIONS_SLOT));
    }

    #[test]
    fn empty_store_renders_page() {
        let html = render_page(&[], &[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("fetch(\"/chat\""));
    }

    #[test]
    fn slot_text_in_stored_data_is_not_expanded() {
        let html = render_page(
            &[turn(1, "{{RECOMMENDATIONS}}", "ok")],
            &[rec(1, "{{HISTORY}}")],
        );
        assert_eq!(html.matches("<div class=\"juego\">").count(), 1);
        assert_eq!(html.matches("class=\"mensaje usuario\"").count(), 1);
        assert!(html.contains("<strong>{{HISTORY}}</strong>"));
    }

    #[test]
    fn error_page_escapes_detail() {
        let html = render_error_page("<db>");
        assert!(html.contains("&lt;db&gt;"));
    }
}
