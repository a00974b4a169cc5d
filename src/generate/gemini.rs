// src/generate/gemini.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Generator;
use crate::config::Settings;
use crate::utils::error::GenerateError;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_OUTPUT_TOKENS: u32 = 8192;
const TEMPERATURE: f32 = 0.5;
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

// --- Wire types for generateContent ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    candidate_count: u32,
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub(crate) fn into_text(self) -> Result<String, GenerateError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerateError::EmptyResponse("no candidates".to_string()))?;
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
            return Err(GenerateError::EmptyResponse(reason));
        }
        Ok(text)
    }
}

/// Google Generative Language API client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    /// Builds a client from settings. A missing API key is not an error here;
    /// each call then fails with [`GenerateError::MissingApiKey`].
    pub fn from_settings(settings: &Settings) -> Result<Self, GenerateError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            api_key: settings.api_key().map(str::to_string),
            model: settings.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                candidate_count: 1,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        };

        tracing::debug!("Calling {} ({} prompt chars)", self.model, prompt.len());
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Http { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn joins_parts_of_first_candidate() {
        let resp = parse(
            r###"{"candidates":[{"content":{"parts":[{"text":"## Highlights\n"},{"text":"- Revenue up"}]},"finishReason":"STOP"}]}"###,
        );
        assert_eq!(resp.into_text().unwrap(), "## Highlights\n- Revenue up");
    }

    #[test]
    fn blocked_candidate_reports_finish_reason() {
        let resp = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        match resp.into_text() {
            Err(GenerateError::EmptyResponse(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn no_candidates_is_an_error() {
        assert!(parse("{}").into_text().is_err());
    }

    #[test]
    fn missing_key_fails_every_call() {
        let client = GeminiClient::from_settings(&Settings::default()).unwrap();
        let err = tokio_test::block_on(client.generate("hello")).unwrap_err();
        assert!(matches!(err, GenerateError::MissingApiKey));
    }

    #[test]
    fn request_body_uses_api_field_names() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: "p" }],
            }],
            generation_config: GenerationConfig {
                candidate_count: 1,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
            },
            safety_settings: vec![],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(json["contents"][0]["parts"][0]["text"], "p");
    }
}
