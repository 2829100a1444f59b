// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small text helpers for the HTML-ish chat output.

/// Escape the five HTML special characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape only `<` and `>`, so text cannot open or close a tag.
///
/// Everything else, `&` and quotes included, is kept as given.
pub fn escape_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every newline with a `<br>` line break.
///
/// `\r\n` counts as one newline.
pub fn newlines_to_br(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\n', "<br>")
}

/// Format the stats of a game as a single emoji-prefixed line.
pub fn stats_line(players: &str, duration: &str, complexity: &str, min_age: &str) -> String {
    format!("👥: {players}, ⌛: {duration}, 🤔: {complexity}, 🪅: {min_age}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_replaces_special_characters() {
        assert_eq!(
            escape_html(r#"<b>"Catan" & 'Carcassonne'</b>"#),
            "&lt;b&gt;&quot;Catan&quot; &amp; &#39;Carcassonne&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_html_leaves_plain_text_alone() {
        assert_eq!(escape_html("🕵️ Deception: Murder in Hong Kong"), "🕵️ Deception: Murder in Hong Kong");
    }

    #[test]
    fn escape_tags_keeps_ampersands_and_quotes() {
        assert_eq!(escape_tags("Dungeons & Dragons"), "Dungeons & Dragons");
        assert_eq!(escape_tags(r#"King's "Dilemma""#), r#"King's "Dilemma""#);
        assert_eq!(escape_tags("<b>x</b>"), "&lt;b&gt;x&lt;/b&gt;");
    }

    #[test]
    fn newlines_become_line_breaks() {
        assert_eq!(newlines_to_br("uno\ndos\r\ntres"), "uno<br>dos<br>tres");
        assert_eq!(newlines_to_br("sin saltos"), "sin saltos");
    }

    #[test]
    fn stats_line_format() {
        assert_eq!(
            stats_line("4-12 jugadores", "20 minutos", "Media", "14+ años"),
            "👥: 4-12 jugadores, ⌛: 20 minutos, 🤔: Media, 🪅: 14+ años"
        );
    }
}
