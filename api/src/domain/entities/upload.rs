//! Image uploads as received from the form or the JSON API

use crate::error::ImageError;

const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Raw bytes of an uploaded image plus whatever the client told us about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub content_type: Option<String>,
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(content_type: Option<String>, filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type,
            filename,
            bytes,
        }
    }

    fn extension(&self) -> Option<String> {
        self.filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase())
    }

    /// Only JPEG and PNG are accepted, judged by MIME type or file extension
    pub fn check_type(&self) -> Result<(), ImageError> {
        let mime = self.content_type.as_deref().map(|m| m.trim().to_lowercase());
        let mime_ok = mime
            .as_deref()
            .is_some_and(|m| ACCEPTED_MIME_TYPES.contains(&m));
        let ext = self.extension();
        let ext_ok = ext
            .as_deref()
            .is_some_and(|e| ACCEPTED_EXTENSIONS.contains(&e));

        if mime_ok || ext_ok {
            Ok(())
        } else {
            let described = mime
                .or_else(|| ext.map(|e| format!(".{}", e)))
                .unwrap_or_else(|| "unknown".to_string());
            Err(ImageError::UnsupportedType(described))
        }
    }
}
