//! GeminiStylist - Gemini REST implementation of the synthesis collaborator.
//!
//! Sends both encoded images plus the try-on instruction to the Gemini
//! `generateContent` endpoint and extracts the generated composite image
//! from the response candidates.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use fitroom_core::error::{FitroomError, Result};
use fitroom_core::image::{EncodedImage, GeneratedImage};
use fitroom_core::synthesis::Synthesizer;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-image-preview";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const MODEL_ENV: &str = "FITROOM_GEMINI_MODEL";

const TRY_ON_PROMPT: &str = "Take the person from the first image and dress them in the \
     clothing item from the second image. Produce a single photorealistic image of the \
     person wearing that clothing, preserving the person's pose, face and the background.";

/// Collaborator implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiStylist {
    client: Client,
    api_key: String,
    model: String,
    prompt: String,
}

impl GeminiStylist {
    /// Creates a new stylist with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            prompt: TRY_ON_PROMPT.to_string(),
        }
    }

    /// Loads configuration from the environment.
    ///
    /// Reads the API key from `GEMINI_API_KEY`; the model defaults to
    /// `gemini-2.5-flash-image-preview` unless `FITROOM_GEMINI_MODEL` is set.
    pub fn try_from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            FitroomError::synthesis(format!("{API_KEY_ENV} environment variable is not set"))
        })?;
        let model =
            std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the try-on instruction sent alongside the images.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<GeneratedImage> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                FitroomError::synthesis(format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            FitroomError::synthesis(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_image_response(parsed)
    }
}

#[async_trait]
impl Synthesizer for GeminiStylist {
    async fn synthesize(
        &self,
        person: &EncodedImage,
        clothing: &EncodedImage,
    ) -> Result<GeneratedImage> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::inline_data(person),
                    Part::inline_data(clothing),
                    Part::Text {
                        text: self.prompt.clone(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        tracing::debug!(model = %self.model, "sending try-on request to Gemini");
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

impl Part {
    fn inline_data(image: &EncodedImage) -> Self {
        Part::InlineData {
            inline_data: InlineDataPayload {
                mime_type: image.media_type.clone(),
                data: image.encoded_data.clone(),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    inline_data: Option<InlineDataResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataResponse {
    mime_type: Option<String>,
    data: String,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_image_response(response: GenerateContentResponse) -> Result<GeneratedImage> {
    let inline = response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| {
            content
                .parts
                .into_iter()
                .find_map(|part| part.inline_data)
        })
        .ok_or_else(|| {
            FitroomError::synthesis("Gemini API returned no image in the response candidates")
        })?;

    let bytes = BASE64_STANDARD.decode(inline.data.as_bytes()).map_err(|err| {
        FitroomError::synthesis(format!("Failed to decode Gemini image payload: {err}"))
    })?;

    Ok(GeneratedImage {
        bytes,
        media_type: inline
            .mime_type
            .unwrap_or_else(|| "image/png".to_string()),
    })
}

fn map_http_error(status: StatusCode, body: String) -> FitroomError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    FitroomError::synthesis(format!("Gemini API error ({}): {}", status.as_u16(), message))
}
