//! Wardrobe operations backed by the generative model.
//!
//! Each operation builds its prompt, makes a single model call and interprets
//! the reply. Failures are re-raised as the operation's own error variant,
//! except configuration and parse errors which keep their variant.

use crate::ai::gemini::{GenerateContentRequest, GenerationConfig, Part};
use crate::ai::{GenerativeModel, LazyGeminiClient};
use crate::config::Config;
use crate::media::{self, EncodedImage};
use crate::rating::{self, OutfitContext, StyleRating};
use crate::{prompts, Error, Result};
use std::path::Path;
use tracing::{debug, info};

pub const CLASSIFY_FALLBACK: &str = "Clothing item";
pub const EMPTY_WARDROBE_ADVICE: &str =
    "Your wardrobe is empty! Add some clothes to get an outfit recommendation.";
pub const RECOMMENDATION_FALLBACK: &str = "Unable to generate recommendation";

/// Model identifiers used per operation.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    pub text_model: String,
    pub image_model: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            text_model: crate::config::DEFAULT_TEXT_MODEL.to_string(),
            image_model: crate::config::DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

pub struct Assistant {
    model: Box<dyn GenerativeModel>,
    models: ModelSelection,
}

impl Assistant {
    pub fn new(model: Box<dyn GenerativeModel>, models: ModelSelection) -> Self {
        Self { model, models }
    }

    /// Builds an assistant whose Gemini client is created on first use.
    pub fn from_config(config: &Config) -> Self {
        info!(
            "Text model: {}, image model: {}",
            config.text_model, config.image_model
        );
        Self::new(
            Box::new(LazyGeminiClient::new(config.keys.clone(), config.timeout)),
            ModelSelection {
                text_model: config.text_model.clone(),
                image_model: config.image_model.clone(),
            },
        )
    }

    /// Produces a short clothing label for an encoded photo.
    pub async fn classify(&self, image: EncodedImage) -> Result<String> {
        debug!("Classifying {} image", image.mime_type);

        let request = GenerateContentRequest::from_parts(vec![
            image.into_part(),
            Part::text(prompts::classify_prompt()),
        ]);

        let response = self
            .model
            .generate_content(&self.models.text_model, &request)
            .await
            .map_err(|e| e.wrap_with(Error::Classification))?;

        let label = response.text().trim().to_string();
        if label.is_empty() {
            debug!("Empty classification reply, using fallback label");
            return Ok(CLASSIFY_FALLBACK.to_string());
        }
        Ok(label)
    }

    /// Reads, encodes and classifies a photo on disk.
    pub async fn classify_file(&self, path: &Path) -> Result<String> {
        let image = media::encode_image(path).await?;
        self.classify(image).await
    }

    /// Suggests an outfit from the given item names.
    ///
    /// An empty wardrobe short-circuits with fixed advice and no model call.
    pub async fn recommend_outfit<S: AsRef<str> + Sync>(&self, item_names: &[S]) -> Result<String> {
        if item_names.is_empty() {
            return Ok(EMPTY_WARDROBE_ADVICE.to_string());
        }

        debug!("Requesting recommendation for {} items", item_names.len());
        let request = GenerateContentRequest::from_parts(vec![Part::text(
            prompts::recommend_prompt(item_names),
        )]);

        let response = self
            .model
            .generate_content(&self.models.text_model, &request)
            .await
            .map_err(|e| e.wrap_with(Error::Recommendation))?;

        let text = response.text();
        if text.trim().is_empty() {
            return Ok(RECOMMENDATION_FALLBACK.to_string());
        }
        Ok(text)
    }

    /// Rates an outfit description against its context.
    pub async fn rate_outfit(
        &self,
        description: &str,
        context: &OutfitContext,
    ) -> Result<StyleRating> {
        if description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "outfit description must not be empty".to_string(),
            ));
        }

        let request = GenerateContentRequest::from_parts(vec![Part::text(prompts::rate_prompt(
            description,
            context,
        ))]);

        let response = self
            .model
            .generate_content(&self.models.text_model, &request)
            .await
            .map_err(|e| e.wrap_with(Error::Rating))?;

        let rating = rating::parse_rating(&response.text())?;
        info!("Outfit rated {}/{}", rating.score, rating::MAX_SCORE);
        Ok(rating)
    }

    /// Generates an image and returns the first inline image part.
    pub async fn generate_image_data(&self, prompt: &str) -> Result<EncodedImage> {
        if prompt.trim().is_empty() {
            return Err(Error::InvalidInput(
                "image prompt must not be empty".to_string(),
            ));
        }

        let request =
            GenerateContentRequest::from_parts(vec![Part::text(prompts::image_prompt(prompt))])
                .with_generation_config(GenerationConfig {
                    response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
                });

        let response = self
            .model
            .generate_content(&self.models.image_model, &request)
            .await
            .map_err(|e| e.wrap_with(Error::NoImageData))?;

        let inline = response.first_inline_data().ok_or_else(|| {
            Error::NoImageData("model reply contained no inline image".to_string())
        })?;
        debug!("Model returned image with mime_type: {}", inline.mime_type);
        Ok(EncodedImage::from(inline))
    }

    /// Generates an image and returns it as a `data:` URI.
    pub async fn generate_image(&self, prompt: &str) -> Result<String> {
        Ok(self.generate_image_data(prompt).await?.to_data_uri())
    }
}
