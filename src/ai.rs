//! Theme generation via the Gemini API
//!
//! One request per invocation: instruction text plus the user's prompt,
//! optionally an inline reference image, with a response schema that pins
//! the reply to the Theme JSON shape.

use crate::image::UploadedImage;
use crate::theme::{Theme, ThemeResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash";

/// The two fixed instruction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Monochrome-leaning scheme derived from a single detected accent hue.
    Harmonious,
    /// High-contrast scheme with a distinct hue per ANSI slot.
    Vibrant,
}

impl GenerationMode {
    pub fn name(&self) -> &'static str {
        match self {
            GenerationMode::Harmonious => "harmonious",
            GenerationMode::Vibrant => "vibrant",
        }
    }

    /// Inverse of `name`, for mode names read from the config file.
    pub fn from_name(name: &str) -> Option<GenerationMode> {
        match name {
            "harmonious" => Some(GenerationMode::Harmonious),
            "vibrant" => Some(GenerationMode::Vibrant),
            _ => None,
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            GenerationMode::Harmonious => {
                "Design a harmonious terminal color theme. Detect the single most \
                 fitting accent hue for the description (or image), then derive the \
                 background, foreground and all 16 ANSI colors as tints and shades \
                 of that hue, keeping the palette monochrome and cohesive. Normal \
                 colors stay muted; bright colors are lighter versions of the same \
                 hue. Ensure readable contrast between foreground and background."
            }
            GenerationMode::Vibrant => {
                "Design a vibrant terminal color theme. Give each of the 8 ANSI \
                 color slots a clearly distinct, saturated hue that fits the \
                 description (or image), with bright variants noticeably lighter. \
                 Keep the background dark enough that every color reads with high \
                 contrast, and pick one standout accent color."
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
enum Part {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "inlineData")]
    InlineData(InlineData),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Schema sent with every request: each field declared as a hex-color
/// string, `accent` optional.
fn theme_schema() -> serde_json::Value {
    let hex = json!({"type": "string", "description": "Hex color in #RRGGBB form"});
    let scheme = json!({
        "type": "object",
        "properties": {
            "black": hex, "red": hex, "green": hex, "yellow": hex,
            "blue": hex, "magenta": hex, "cyan": hex, "white": hex
        },
        "required": ["black", "red", "green", "yellow", "blue", "magenta", "cyan", "white"]
    });
    json!({
        "type": "object",
        "properties": {
            "accent": hex,
            "primary": {
                "type": "object",
                "properties": {"background": hex, "foreground": hex},
                "required": ["background", "foreground"]
            },
            "normal": scheme,
            "bright": scheme
        },
        "required": ["primary", "normal", "bright"]
    })
}

/// Gemini client, constructed once from a validated API key and threaded
/// into whatever needs it.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Generate a theme. Each failure mode gets its own message so the user
    /// can tell a transport error from a malformed reply.
    pub async fn generate_theme(
        &self,
        mode: GenerationMode,
        prompt: &str,
        image: Option<&UploadedImage>,
    ) -> Result<Theme, String> {
        let mut parts = vec![Part::Text(format!(
            "{}\n\nDescription: {}",
            mode.instruction(),
            prompt
        ))];
        if let Some(image) = image {
            parts.push(Part::InlineData(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }));
        }

        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: theme_schema(),
            },
        };

        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, MODEL);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(format!("API error {}: {}", status, text));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        let text = extract_text(&generate_response)
            .ok_or_else(|| "Empty response from the model".to_string())?;

        parse_theme_json(&text)
    }
}

fn extract_text(response: &GenerateResponse) -> Option<String> {
    let text = response
        .candidates
        .as_ref()?
        .first()?
        .content
        .as_ref()?
        .parts
        .as_ref()?
        .first()?
        .text
        .clone()?;
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse and validate the model's JSON reply into a `Theme`.
fn parse_theme_json(text: &str) -> Result<Theme, String> {
    let response: ThemeResponse = serde_json::from_str(text.trim())
        .map_err(|e| format!("Model returned malformed theme JSON: {}", e))?;
    response
        .validate()
        .map_err(|e| format!("Model returned an invalid theme: {}", e))
}
