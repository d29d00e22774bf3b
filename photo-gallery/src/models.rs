use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Server-assigned photo identifier
///
/// The service may hand out numeric or string ids; both are kept as a string
/// so identity comparisons never depend on the wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhotoId(String);

impl PhotoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for PhotoId {
    fn from(id: i64) -> Self {
        PhotoId(id.to_string())
    }
}

impl From<&str> for PhotoId {
    fn from(id: &str) -> Self {
        PhotoId(id.to_string())
    }
}

impl From<String> for PhotoId {
    fn from(id: String) -> Self {
        PhotoId(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePhotoId {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for PhotoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WirePhotoId::deserialize(deserializer)? {
            WirePhotoId::Number(n) => PhotoId(n.to_string()),
            WirePhotoId::Text(s) => PhotoId(s),
        })
    }
}

/// A photo as listed by the remote service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Photo {
    pub id: PhotoId,
    pub filename: String,
}

impl Photo {
    pub fn new(id: impl Into<PhotoId>, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
        }
    }
}

/// One file of an upload batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub content: Vec<u8>,
    pub mime_type: String,
    pub name: String,
}

impl UploadFile {
    pub fn new(content: Vec<u8>, mime_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content,
            mime_type: mime_type.into(),
            name: name.into(),
        }
    }

    /// Reads a file from disk, deriving name and MIME type from the path
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self {
            content,
            mime_type: mime_type_for(path).to_string(),
            name,
        })
    }
}

/// Guess an image MIME type from the file extension
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Request body for login and signup
#[derive(Debug, Clone, Serialize)]
pub struct CredentialsBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from the login endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Generic `{message}` / `{error}` body returned by mutating endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MessageResponse {
    /// The most specific human readable text in the body, if any
    pub fn text(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

/// Connection settings for the remote gallery service
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Scheme and host of the service, e.g. `https://gallery.example.com`
    pub base_url: String,
    /// Static asset path under which uploaded files are served
    pub asset_path: String,
    pub user_agent: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            asset_path: "uploads".to_string(),
            user_agent: format!("SnapGallery/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GalleryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Absolute URL of an API path (`path` starts with `/`)
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    ///
    /// `None` when the base URL cannot carry a path.
    pub fn segment_url(&self, segments: &[&str]) -> Option<Url> {
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
        Some(url)
    }

    /// Retrieval URL of an uploaded image
    pub fn image_url(&self, filename: &str) -> String {
        let mut segments: Vec<&str> = self
            .asset_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        segments.push(filename);
        match self.segment_url(&segments) {
            Some(url) => url.to_string(),
            None => {
                log::warn!("Cannot build image URL from base {}", self.base_url);
                format!("{}/{}", self.base_url.trim_end_matches('/'), segments.join("/"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_id_accepts_number_and_string() {
        let photos: Vec<Photo> =
            serde_json::from_str(r#"[{"id":1,"filename":"x.jpg"},{"id":"a7f","filename":"y.png","size":12}]"#)
                .unwrap();
        assert_eq!(photos[0], Photo::new(1i64, "x.jpg"));
        assert_eq!(photos[1].id.as_str(), "a7f");
        assert_eq!(photos[1].filename, "y.png");
    }

    #[test]
    fn test_photo_id_beyond_i64() {
        let photo: Photo =
            serde_json::from_str(r#"{"id":18446744073709551615,"filename":"x.jpg"}"#).unwrap();
        assert_eq!(photo.id.as_str(), "18446744073709551615");
    }

    #[test]
    fn test_image_url() {
        let config = GalleryConfig::new("https://gallery.example.com/");
        assert_eq!(
            config.image_url("x.jpg"),
            "https://gallery.example.com/uploads/x.jpg"
        );

        let bare = GalleryConfig {
            asset_path: String::new(),
            ..config
        };
        assert_eq!(bare.image_url("x.jpg"), "https://gallery.example.com/x.jpg");
    }

    #[test]
    fn test_image_url_escapes_filename() {
        let config = GalleryConfig::new("http://10.0.2.2:5000");
        assert_eq!(
            config.image_url("summer #2?.jpg"),
            "http://10.0.2.2:5000/uploads/summer%20%232%3F.jpg"
        );
        assert_eq!(
            config.image_url("../secret.jpg"),
            "http://10.0.2.2:5000/uploads/..%2Fsecret.jpg"
        );
    }

    #[test]
    fn test_segment_url_keeps_base_path() {
        let config = GalleryConfig::new("https://example.com/gallery/");
        let url = config.segment_url(&["api", "photos", "7#draft"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/gallery/api/photos/7%23draft");

        assert!(GalleryConfig::new("not a url").segment_url(&["api"]).is_none());
    }

    #[test]
    fn test_api_url() {
        let config = GalleryConfig::new("http://10.0.2.2:5000");
        assert_eq!(
            config.api_url("/api/photos/"),
            "http://10.0.2.2:5000/api/photos/"
        );
    }

    #[test]
    fn test_message_response_text() {
        let body: MessageResponse = serde_json::from_str(r#"{"error":"No files"}"#).unwrap();
        assert_eq!(body.text(), Some("No files"));

        let body: MessageResponse = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.text(), None);
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("a/B.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("c.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("noext")), "application/octet-stream");
    }
}
