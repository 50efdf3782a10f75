// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Ollama HTTP API.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/embed`.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedRequest<'a> {
    pub model: &'a str,
    pub input: &'a [String],
}

/// Response body for `POST /api/embed`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedResponse {
    pub embeddings: Vec<Vec<f32>>,
}

/// Request body for `POST /api/generate` (non-streaming).
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

/// Response body for `POST /api/generate` with `stream: false`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub response: String,
}

/// Response body for `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

/// Error body Ollama returns on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
