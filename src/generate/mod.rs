// src/generate/mod.rs
pub mod gemini;
pub mod prompts;

use async_trait::async_trait;

use crate::utils::error::GenerateError;

pub use gemini::GeminiClient;
pub use prompts::{select_prompt, table_prompt, PromptTemplate};

/// External text generation. No latency or determinism guarantees; any text
/// returned is stored as-is.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Runs a generation task, turning a failure into the placeholder text that
/// is stored in place of the artifact.
pub async fn generate_or_placeholder<G: Generator + ?Sized>(
    generator: &G,
    prompt: &str,
    task: &str,
) -> Result<String, String> {
    tracing::info!("Performing {}...", task);
    generator.generate(prompt).await.map_err(|e| {
        tracing::warn!("Error during {}: {}", task, e);
        failure_placeholder(task, &e)
    })
}

pub fn failure_placeholder(task: &str, error: &GenerateError) -> String {
    format!("Error during {}: {}", task, error)
}
