use reqwest::Client;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use uuid::Uuid;

use crate::entities::inquiry;

/// Served to the end user whenever the text-generation call fails. The
/// advisor path never surfaces raw upstream errors.
pub const STRATEGY_FALLBACK: &str = "The strategic engine is currently processing high-load requests. Please connect with our partners directly for a custom architectural blueprint.";

const GENERATION_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Upstream marker for an invalid or expired API key. Mapped to
/// `GeminiError::KeyResetRequired` so the studio UI can prompt for
/// re-authentication instead of a generic retry.
const KEY_RESET_MARKER: &str = "Requested entity was not found";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("KEY_RESET_REQUIRED")]
    KeyResetRequired,
    #[error("Synthesis failed to materialise. The brief may be too complex for current neural cores.")]
    NoImage,
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("Gemini request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Gemini call failed: {0}")]
    Upstream(String),
}

fn classify_upstream(body: String) -> GeminiError {
    if body.contains(KEY_RESET_MARKER) {
        GeminiError::KeyResetRequired
    } else {
        GeminiError::Upstream(body)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[default]
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "3:4")]
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::Portrait => "3:4",
        }
    }
}

/// Output resolution for the pro tier. The standard tier is pinned to 1K.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

/// Canned style fragments prepended to the user's prompt. Unknown preset
/// names fall back to the Cinematic token.
pub fn style_token(preset: &str) -> &'static str {
    match preset {
        "Cinematic" => "Masterpiece cinematic visual, luxury enterprise digital aesthetic, ultra-sharp focus, volumetric lighting, unreal engine 5 render, global illumination.",
        "Architectural" => "Clean architectural lines, professional interior/exterior photography, minimalist structural design, realistic materials, soft natural daylight.",
        "Blueprint" => "Advanced technical blueprint, white schematic lines on dark blueprint paper, engineering precision, detailed callouts and measurements, schematic aesthetic.",
        "Minimalist" => "Ultra-minimalist tech aesthetic, clean white spaces, subtle gradients, soft ambient occlusion, pristine surfaces, high-end product photography style.",
        "Cyberpunk" => "Futuristic cyberpunk aesthetic, neon violet and cyan accents, rainy urban atmosphere, high contrast, cinematic night lighting, synthwave influence.",
        "Sketch" => "Artistic hand-drawn architectural sketch, charcoal and graphite, textured paper, concept art style, expressive lines, rough but sophisticated.",
        "Dark Futuristic" => "Deep space aesthetic, futuristic technology, high contrast dark environment, glowing purple and electric blue accents, ultra-modern surfaces, sci-fi minimalism.",
        "Minimalist Tech" => "Pristine white tech surfaces, soft shadows, clean geometric forms, soft volumetric lighting, professional industrial design aesthetic, high-key lighting.",
        "Abstract Data Flow" => "Intricate networks of light, flowing energy patterns, digital visualization of information, complex glowing particles, cinematic depth of field, data-driven art.",
        _ => style_token("Cinematic"),
    }
}

fn default_style_preset() -> String {
    "Cinematic".to_string()
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub is_pro: bool,
    #[serde(default)]
    pub image_size: ImageSize,
    #[serde(default)]
    pub use_search: bool,
    #[serde(default = "default_style_preset")]
    pub style_preset: String,
}

fn build_visual_prompt(style_preset: &str, prompt: &str) -> String {
    format!(
        "{} Subject: {}. Quality: Enterprise Production Grade.",
        style_token(style_preset),
        prompt
    )
}

fn build_strategy_prompt(industry: &str, goals: &str) -> String {
    format!(
        "You are the lead Executive Strategy Architect at Infinity Digital. \n\
Deliver a high-impact digital transformation roadmap.\n\n\
SECTOR: {industry}\n\
OBJECTIVES: {goals}\n\n\
STRUCTURE:\n\
1. STRATEGIC VISION: A single provocative sentence on how this project disrupts the sector.\n\
2. ARCHITECTURAL STACK: Highly specific modern tools (e.g., Next.js 15, MongoDB Atlas, Vercel Edge, Gemini Multi-modal).\n\
3. CORE PILLARS: 3 specific UX or engineering innovations that define the product's elite status.\n\
4. EXECUTION ROADMAP: 3 phases (Foundation, Intelligence Integration, Global Scale).\n\n\
TONE: Authoritative, tech-forward, and luxury agency style."
    )
}

/// Scans a generateContent response for the first inline image payload and
/// renders it as a data URI.
fn first_inline_image(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    for part in parts {
        let inline = &part["inlineData"];
        if let (Some(mime_type), Some(data)) = (inline["mimeType"].as_str(), inline["data"].as_str())
        {
            return Some(format!("data:{};base64,{}", mime_type, data));
        }
    }
    None
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    text_model: String,
    image_model: String,
    pro_image_model: String,
}

impl GeminiClient {
    /// A missing GEMINI_API_KEY is not fatal at startup; calls fail at
    /// request time and the per-path failure policy takes over.
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; generation calls will degrade");
        }
        let text_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-3-pro-preview".to_string());
        let image_model =
            env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| "gemini-2.5-flash-image".to_string());
        let pro_image_model = env::var("GEMINI_PRO_IMAGE_MODEL")
            .unwrap_or_else(|_| "gemini-3-pro-image-preview".to_string());
        Self {
            client: Client::new(),
            api_key,
            text_model,
            image_model,
            pro_image_model,
        }
    }

    fn generate_url(&self, model: &str) -> Result<String, GeminiError> {
        let key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        Ok(format!(
            "{}/{}:generateContent?key={}",
            GENERATION_BASE_URL, model, key
        ))
    }

    /// Drafts a transformation strategy for the advisor. Never fails: any
    /// upstream problem degrades to the fixed fallback sentence. On success
    /// the (industry, goals, strategy) triple is persisted best-effort on a
    /// spawned task whose failure only gets logged, never retried.
    pub async fn generate_strategy(
        &self,
        db: &DatabaseConnection,
        industry: &str,
        goals: &str,
    ) -> String {
        match self.request_strategy(industry, goals).await {
            Ok(strategy) if !strategy.is_empty() => {
                let db = db.clone();
                let industry = industry.to_string();
                let goals = goals.to_string();
                let text = strategy.clone();
                tokio::spawn(async move {
                    let now = chrono::Utc::now()
                        .with_timezone(&chrono::FixedOffset::east_opt(0).unwrap());
                    let entry = inquiry::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set("AI Advisor User".to_string()),
                        email: Set("advisor@infinity.internal".to_string()),
                        company: Set(None),
                        industry: Set(Some(industry)),
                        project_description: Set(goals),
                        generated_strategy: Set(Some(text)),
                        status: Set(inquiry::STATUS_STRATEGY_GENERATED.to_string()),
                        created_at: Set(now),
                    };
                    if let Err(e) = entry.insert(&db).await {
                        tracing::warn!("Strategy sample sync deferred: {}", e);
                    }
                });
                strategy
            }
            Ok(_) => STRATEGY_FALLBACK.to_string(),
            Err(e) => {
                tracing::error!("AI advisor failure: {}", e);
                STRATEGY_FALLBACK.to_string()
            }
        }
    }

    async fn request_strategy(&self, industry: &str, goals: &str) -> Result<String, GeminiError> {
        let url = self.generate_url(&self.text_model)?;
        let body = json!({
            "contents": [{
                "parts": [{ "text": build_strategy_prompt(industry, goals) }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "thinkingConfig": { "thinkingBudget": 24000 }
            }
        });

        let res = self.client.post(&url).json(&body).send().await?;
        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(GeminiError::Upstream(text));
        }

        let response: Value = res.json().await?;
        let strategy = response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default();
        Ok(strategy.to_string())
    }

    /// Synthesizes a marketing visual and returns it as a data URI. Unlike
    /// the strategy path this propagates typed failures, so the caller can
    /// distinguish an expired key from a retryable error.
    pub async fn generate_visual(&self, request: &VisualRequest) -> Result<String, GeminiError> {
        let model = if request.is_pro {
            &self.pro_image_model
        } else {
            &self.image_model
        };
        let url = self.generate_url(model)?;

        let mut image_config = json!({ "aspectRatio": request.aspect_ratio.as_str() });
        if request.is_pro {
            image_config["imageSize"] = json!(request.image_size.as_str());
        }
        let mut body = json!({
            "contents": [{
                "parts": [{ "text": build_visual_prompt(&request.style_preset, &request.prompt) }]
            }],
            "generationConfig": { "imageConfig": image_config }
        });
        if request.is_pro && request.use_search {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }

        let res = self.client.post(&url).json(&body).send().await?;
        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(classify_upstream(text));
        }

        let response: Value = res.json().await?;
        first_inline_image(&response).ok_or(GeminiError::NoImage)
    }
}
