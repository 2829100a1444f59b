// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of pipeline errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meeple_core::MeepleError;
use serde::Serialize;

/// Shown when the model client could not be built at startup.
pub const UNAVAILABLE_MESSAGE: &str =
    "El cliente de Gemini no está disponible. Revisa tu API Key.";

/// Shown when the model reply is not valid JSON.
pub const FORMAT_MESSAGE: &str =
    "El robot no pudo formular una respuesta válida (Error de formato JSON).";

/// Prefix for every other failure; the error detail follows.
pub const GENERIC_PREFIX: &str = "Hubo un error al comunicarse con la API de Gemini. Detalles: ";

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A chat failure on its way to the browser. Always a 500.
#[derive(Debug)]
pub struct ChatError(pub MeepleError);

impl From<MeepleError> for ChatError {
    fn from(e: MeepleError) -> Self {
        Self(e)
    }
}

impl ChatError {
    /// The user-facing message for this error.
    pub fn message(&self) -> String {
        match &self.0 {
            MeepleError::ProviderUnavailable(_) => UNAVAILABLE_MESSAGE.to_string(),
            MeepleError::ReplyFormat { .. } => FORMAT_MESSAGE.to_string(),
            other => format!("{GENERIC_PREFIX}{other}"),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "chat request failed");
        let body = Json(ErrorResponse {
            error: self.message(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
