// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding and interpretation of the model's JSON reply.

use meeple_core::MeepleError;
use meeple_core::types::NewRecommendation;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::extract::extract_json_payload;
use crate::prompt::MAX_RECOMMENDATIONS;
use crate::summary::compose_summary;

/// The JSON object the model is asked to return.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelReply {
    /// Conversational fallback, empty when the request is on topic.
    #[serde(default)]
    pub respuesta_corta: Option<String>,
    /// Up to five game suggestions. `null` and absent both mean none.
    #[serde(default)]
    pub recomendaciones: Option<Vec<RecommendationPayload>>,
}

/// One game suggestion as the model writes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationPayload {
    #[serde(deserialize_with = "text_field")]
    pub name: String,
    #[serde(deserialize_with = "text_field")]
    pub description: String,
    #[serde(deserialize_with = "text_field")]
    pub players: String,
    #[serde(deserialize_with = "text_field")]
    pub duration: String,
    #[serde(deserialize_with = "text_field")]
    pub complexity: String,
    #[serde(deserialize_with = "text_field")]
    pub min_age: String,
}

impl From<RecommendationPayload> for NewRecommendation {
    fn from(p: RecommendationPayload) -> Self {
        NewRecommendation {
            name: p.name,
            description: p.description,
            players: p.players,
            duration: p.duration,
            complexity: p.complexity,
            min_age: p.min_age,
        }
    }
}

/// Accepts a JSON string or number; numbers keep their decimal text.
fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct TextVisitor;

    impl Visitor<'_> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// What one model reply turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// Text shown in the chat and stored as the turn's output.
    pub output: String,
    /// Rows to add to the recommendations table.
    pub recommendations: Vec<NewRecommendation>,
}

/// Decodes `raw` model text and interprets it.
///
/// Text that is not JSON after fence stripping is a
/// [`MeepleError::ReplyFormat`]; JSON of the wrong shape is a
/// [`MeepleError::Reply`].
pub fn parse_reply(raw: &str) -> Result<Interpretation, MeepleError> {
    let payload = extract_json_payload(raw);
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| MeepleError::ReplyFormat {
            message: e.to_string(),
            raw: raw.to_string(),
        })?;
    let reply: ModelReply =
        serde_json::from_value(value).map_err(|e| MeepleError::Reply(e.to_string()))?;
    interpret(reply)
}

/// Chooses between the recommendation summary and the fallback text.
pub fn interpret(reply: ModelReply) -> Result<Interpretation, MeepleError> {
    let mut recs = reply.recomendaciones.unwrap_or_default();

    if recs.len() > MAX_RECOMMENDATIONS {
        warn!(
            received = recs.len(),
            kept = MAX_RECOMMENDATIONS,
            "model returned too many recommendations, truncating"
        );
        recs.truncate(MAX_RECOMMENDATIONS);
    }

    if !recs.is_empty() {
        let recommendations: Vec<NewRecommendation> =
            recs.into_iter().map(NewRecommendation::from).collect();
        return Ok(Interpretation {
            output: compose_summary(&recommendations),
            recommendations,
        });
    }

    let fallback = reply
        .respuesta_corta
        .ok_or_else(|| MeepleError::Reply("missing key `respuesta_corta`".to_string()))?;
    if fallback.trim().is_empty() {
        return Err(MeepleError::Reply(
            "reply has neither recommendations nor a short answer".to_string(),
        ));
    }

    Ok(Interpretation {
        output: fallback,
        recommendations: Vec::new(),
    })
}
