// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML summary shown in the chat when the model recommends games.

use meeple_core::text::escape_tags;
use meeple_core::types::NewRecommendation;

/// First line of every recommendation summary.
pub const SUMMARY_INTRO: &str =
    "Aquí tienes mis recomendaciones. El listado completo se ha guardado a la izquierda:<br><br>";

/// Renders the intro followed by one block per recommendation.
///
/// Model-supplied text keeps its characters, but `<` and `>` are escaped so
/// only the markup added here is live.
pub fn compose_summary(recs: &[NewRecommendation]) -> String {
    let mut out = String::from(SUMMARY_INTRO);
    for rec in recs {
        out.push_str(&format!(
            "<strong>{}</strong><br>{}<br>{}<br><br>",
            escape_tags(&rec.name),
            escape_tags(&rec.description),
            escape_tags(&rec.stats_line()),
        ));
    }
    out
}
