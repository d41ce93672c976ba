//! Media encoding for inline image requests.

use crate::ai::gemini::{InlineData, Part};
use crate::ai::mime;
use crate::{Error, Result};
use base64::Engine as _;
use std::path::Path;

/// An image ready to be sent inline: base64 payload plus its MIME type.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn into_part(self) -> Part {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: self.mime_type,
                data: self.data,
            },
        }
    }
}

impl From<&InlineData> for EncodedImage {
    fn from(inline: &InlineData) -> Self {
        Self {
            data: inline.data.clone(),
            mime_type: inline.mime_type.clone(),
        }
    }
}

/// Reads an image file and encodes it for transmission.
///
/// No size or format validation happens here; whatever the user picked is
/// forwarded. An empty file is rejected because it carries no payload.
pub async fn encode_image(path: &Path) -> Result<EncodedImage> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::error!("Failed to read image {}: {}", path.display(), e);
        e
    })?;

    if bytes.is_empty() {
        return Err(Error::EmptyMedia(path.to_path_buf()));
    }

    let mime_type = mime::resolve_mime(path, &bytes);
    tracing::debug!(
        "Encoded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        mime_type
    );

    Ok(EncodedImage::from_bytes(&bytes, mime_type))
}

/// Decodes the base64 payload back into raw bytes.
pub fn decode_image(image: &EncodedImage) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(&image.data)
        .map_err(|e| Error::AiProvider(format!("Failed to decode base64 image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_encode_image_detects_png() {
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        file.write_all(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
            .unwrap();

        let encoded = encode_image(file.path()).await.unwrap();
        assert_eq!(encoded.mime_type, "image/png");
        assert_eq!(encoded.data, "iVBORw0KGgo=");
    }

    #[tokio::test]
    async fn test_encode_image_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_image(&dir.path().join("missing.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_encode_image_rejects_empty_file() {
        let file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        let err = encode_image(file.path()).await.unwrap_err();
        assert!(matches!(err, Error::EmptyMedia(_)));
    }

    #[test]
    fn test_data_uri_and_decode() {
        let image = EncodedImage::from_bytes(b"abc", "image/jpeg");
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,YWJj");
        assert_eq!(decode_image(&image).unwrap(), b"abc");
    }

    #[test]
    fn test_into_part_keeps_mime_type() {
        let part = EncodedImage::from_bytes(b"abc", "image/webp").into_part();
        match part {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/webp");
                assert_eq!(inline_data.data, "YWJj");
            }
            Part::Text { .. } => panic!("expected inline data"),
        }
    }
}
