//! Vision inference gateway.
//!
//! One request per image: a fixed instruction plus the image inline. The reply text is
//! returned untouched; parsing belongs to the normalizer.

pub mod gemini;

use async_trait::async_trait;

pub use gemini::GeminiGateway;

/// Instruction sent with every image.
pub const ANALYSIS_PROMPT: &str = r#"Analyze the provided image and describe the animal it shows.
Reply with a single JSON object with exactly these keys and string values:

{
  "species": "Species of the animal",
  "breed": "Breed of the animal (if applicable)",
  "country": "Country or region where the animal is commonly found",
  "habitat": "Natural habitat of the animal",
  "specifications": "Physical characteristics or notable features",
  "common_problems": "Any common health or behavioral issues associated with the animal",
  "fun_facts": "Interesting or fun facts about the animal"
}

If the image does not show a recognizable animal, set every value to "N/A"."#;

/// Inference call failures. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Failed to reach inference service: {0}")]
    Transport(String),

    #[error("Inference service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to read inference service response: {0}")]
    InvalidEnvelope(String),

    #[error("Inference service returned no text")]
    EmptyReply,
}

/// Multimodal analysis service
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Send the analysis instruction with `image` attached and return the raw reply text
    async fn analyze(&self, image: &[u8], mime_type: &str) -> Result<String, InferenceError>;

    /// Model identifier, for logs
    fn model_name(&self) -> &str;
}
