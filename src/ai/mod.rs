//! Generative model integration
//!
//! Every classification, recommendation, rating and image request goes
//! through [`GenerativeModel`], so the hosted Gemini client and the scripted
//! test double are interchangeable.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiHttpClient, LazyGeminiClient};
pub use mock::MockModelClient;

use crate::Result;
use async_trait::async_trait;
use gemini::{GenerateContentRequest, GenerateContentResponse};

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

