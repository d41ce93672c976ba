use super::gemini::{GenerateContentRequest, GenerateContentResponse, InlineData, Part};
use super::GenerativeModel;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Response(GenerateContentResponse),
    Failure(String),
}

/// A request seen by [`MockModelClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub request: GenerateContentRequest,
}

/// Scripted model double. Replies cycle in the order they were added.
///
/// Clones share state, so a test can keep one handle for assertions while
/// another is owned by the code under test.
#[derive(Clone)]
pub struct MockModelClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_text_response(self, text: impl Into<String>) -> Self {
        self.with_response(GenerateContentResponse::from_text(text))
    }

    pub fn with_image_response(self, mime_type: &str, bytes: &[u8]) -> Self {
        use base64::Engine as _;
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        self.with_response(GenerateContentResponse::from_parts(vec![Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.to_string(),
                data,
            },
        }]))
    }

    pub fn with_response(self, response: GenerateContentResponse) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Response(response));
        self
    }

    /// Queues a transport-level failure, reported as [`Error::AiProvider`].
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Failure(message.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeModel for MockModelClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        self.requests.lock().unwrap().push(RecordedRequest {
            model: model.to_string(),
            request: request.clone(),
        });

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(GenerateContentResponse::from_text("mock reply"));
        }

        let index = (*count - 1) % replies.len();
        match &replies[index] {
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::Failure(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> GenerateContentRequest {
        GenerateContentRequest::from_parts(vec![Part::text(text)])
    }

    #[tokio::test]
    async fn test_mock_default_reply() {
        let client = MockModelClient::new();
        let response = client
            .generate_content("m", &request("hi"))
            .await
            .unwrap();
        assert_eq!(response.text(), "mock reply");
    }

    #[tokio::test]
    async fn test_mock_replies_cycle() {
        let client = MockModelClient::new()
            .with_text_response("first")
            .with_failure("boom");

        let first = client.generate_content("m", &request("a")).await.unwrap();
        assert_eq!(first.text(), "first");

        let second = client.generate_content("m", &request("b")).await.unwrap_err();
        assert!(matches!(second, Error::AiProvider(ref m) if m == "boom"));

        // Should cycle back
        let third = client.generate_content("m", &request("c")).await.unwrap();
        assert_eq!(third.text(), "first");
    }

    #[tokio::test]
    async fn test_mock_records_requests_across_clones() {
        let client = MockModelClient::new();
        let handle = client.clone();

        assert_eq!(handle.get_call_count(), 0);
        client
            .generate_content("gemini-2.5-flash", &request("hello"))
            .await
            .unwrap();

        assert_eq!(handle.get_call_count(), 1);
        let recorded = handle.last_request().unwrap();
        assert_eq!(recorded.model, "gemini-2.5-flash");
        assert_eq!(recorded.request.text(), "hello");
    }
}
