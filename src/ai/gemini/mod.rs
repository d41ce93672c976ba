pub mod client;
pub mod lazy;
pub mod types;

pub use client::GeminiHttpClient;
pub use lazy::LazyGeminiClient;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};
