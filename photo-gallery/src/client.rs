//! HTTP client for the remote gallery service
//!
//! Every call is a single round trip. Calls that need a token take it as an
//! argument and fail with [`GalleryError::AuthenticationRequired`] before
//! touching the network when it is absent.

use crate::error::{GalleryError, GalleryResult};
use crate::models::{
    CredentialsBody, GalleryConfig, MessageResponse, Photo, PhotoId, TokenResponse, UploadFile,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};

/// Multipart field carrying the uploaded files
pub const UPLOAD_FIELD: &str = "photos";

/// Remote operations of the gallery service
///
/// Futures are not required to be `Send`: callers drive them on the UI task.
#[async_trait(?Send)]
pub trait GalleryApi {
    async fn login(&self, email: &str, password: &str) -> GalleryResult<String>;
    async fn signup(&self, email: &str, password: &str) -> GalleryResult<()>;
    async fn list_photos(&self, token: Option<&str>) -> GalleryResult<Vec<Photo>>;
    async fn upload_photos(&self, token: Option<&str>, files: &[UploadFile]) -> GalleryResult<()>;
    async fn delete_photo(&self, token: Option<&str>, id: &PhotoId) -> GalleryResult<()>;
}

/// reqwest-backed implementation of [`GalleryApi`]
#[derive(Debug, Clone)]
pub struct GalleryClient {
    config: GalleryConfig,
    http: reqwest::Client,
}

impl PartialEq for GalleryClient {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl GalleryClient {
    /// Create a client for the configured service
    ///
    /// No request or connect timeout is set; a hung request only blocks the
    /// operation that issued it.
    pub fn new(config: GalleryConfig) -> GalleryResult<Self> {
        let http = reqwest::Client::builder()
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GalleryError::Network(format!("Client build failed: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Retrieval URL for a photo's image bytes
    pub fn image_url(&self, photo: &Photo) -> String {
        self.config.image_url(&photo.filename)
    }

    fn require_token(token: Option<&str>) -> GalleryResult<&str> {
        token.ok_or(GalleryError::AuthenticationRequired)
    }
}

#[async_trait(?Send)]
impl GalleryApi for GalleryClient {
    async fn login(&self, email: &str, password: &str) -> GalleryResult<String> {
        let url = self.config.api_url("/api/auth/login");
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|e| GalleryError::Network(format!("Login request failed: {}", e)))?;

        if response.status() != StatusCode::OK {
            let (status, message) = read_failure(response).await;
            log::warn!("Login rejected with status {}", status);
            return Err(GalleryError::Validation(message));
        }

        let body = response.json::<TokenResponse>().await.map_err(|e| {
            GalleryError::InvalidResponse(format!("Failed to parse login response: {}", e))
        })?;
        log::info!("Login successful");
        Ok(body.token)
    }

    async fn signup(&self, email: &str, password: &str) -> GalleryResult<()> {
        let url = self.config.api_url("/api/auth/signup");
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|e| GalleryError::Network(format!("Signup request failed: {}", e)))?;

        if response.status() != StatusCode::CREATED {
            let (status, message) = read_failure(response).await;
            log::warn!("Signup rejected with status {}", status);
            return Err(GalleryError::Validation(message));
        }

        log::info!("Signup successful");
        Ok(())
    }

    async fn list_photos(&self, token: Option<&str>) -> GalleryResult<Vec<Photo>> {
        let token = Self::require_token(token)?;
        let url = self.config.api_url("/api/photos/");
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GalleryError::Network(format!("List request failed: {}", e)))?;

        expect_status(response, StatusCode::OK)
            .await?
            .json::<Vec<Photo>>()
            .await
            .map_err(|e| GalleryError::InvalidResponse(format!("Failed to parse photo list: {}", e)))
    }

    async fn upload_photos(&self, token: Option<&str>, files: &[UploadFile]) -> GalleryResult<()> {
        let token = Self::require_token(token)?;
        let url = self.config.api_url("/api/photos/upload");
        log::debug!("POST {} ({} files)", url, files.len());

        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.content.clone())
                .file_name(file.name.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| {
                    GalleryError::Validation(format!(
                        "Invalid MIME type {} for {}: {}",
                        file.mime_type, file.name, e
                    ))
                })?;
            form = form.part(UPLOAD_FIELD, part);
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GalleryError::Network(format!("Upload request failed: {}", e)))?;

        expect_status(response, StatusCode::CREATED).await?;
        log::info!("Uploaded {} photos", files.len());
        Ok(())
    }

    async fn delete_photo(&self, token: Option<&str>, id: &PhotoId) -> GalleryResult<()> {
        let token = Self::require_token(token)?;
        let url = self
            .config
            .segment_url(&["api", "photos", id.as_str()])
            .ok_or_else(|| {
                GalleryError::Validation(format!("Invalid server URL: {}", self.config.base_url))
            })?;
        log::debug!("DELETE {}", url);

        let response = self
            .http
            .delete(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GalleryError::Network(format!("Delete request failed: {}", e)))?;

        expect_status(response, StatusCode::OK).await?;
        log::info!("Deleted photo {}", id);
        Ok(())
    }
}

/// Pass the response through when it carries the expected status, otherwise
/// classify the failure of a token-bearing request
async fn expect_status(response: Response, expected: StatusCode) -> GalleryResult<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    if status.is_success() {
        return Err(GalleryError::InvalidResponse(format!(
            "expected status {}, got {}",
            expected.as_u16(),
            status.as_u16()
        )));
    }

    let (status, message) = read_failure(response).await;
    log::warn!("Request failed with status {}: {}", status, message);
    Err(GalleryError::from_status(status, message))
}

/// Status code and best available message of a failed response
async fn read_failure(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    (status.as_u16(), failure_message(status, &body))
}

fn failure_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<MessageResponse>(body)
        .ok()
        .and_then(|m| m.text().map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one request on a local port, answer it, and hand back the raw request
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (GalleryClient, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        let client = GalleryClient::new(GalleryConfig::new(format!("http://{}", addr))).unwrap();
        (client, server)
    }

    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
            if request_complete(&raw) {
                break;
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let head = text[..head_end].to_ascii_lowercase();
        let body_len = raw.len() - (head_end + 4);
        if let Some(line) = head.lines().find(|l| l.starts_with("content-length:")) {
            let expected: usize = line["content-length:".len()..].trim().parse().unwrap_or(0);
            body_len >= expected
        } else if head.contains("transfer-encoding: chunked") {
            text.ends_with("0\r\n\r\n")
        } else {
            true
        }
    }

    #[tokio::test]
    async fn test_login_posts_credentials_and_reads_token() {
        let (client, server) = serve_once("200 OK", r#"{"token":"T1"}"#).await;

        let token = client.login("a@b.com", "secret").await;
        let request = server.await.unwrap();

        assert_eq!(token, Ok("T1".to_string()));
        assert!(request.starts_with("POST /api/auth/login HTTP/1.1\r\n"));
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        assert!(request.contains(r#""email":"a@b.com""#));
        assert!(request.contains(r#""password":"secret""#));
    }

    #[tokio::test]
    async fn test_rejected_login_is_validation_error() {
        let (client, server) =
            serve_once("401 Unauthorized", r#"{"message":"Invalid credentials"}"#).await;

        let result = client.login("a@b.com", "wrong").await;
        server.await.unwrap();

        assert_eq!(
            result,
            Err(GalleryError::Validation("Invalid credentials".to_string()))
        );
    }

    #[tokio::test]
    async fn test_signup_requires_created() {
        let (client, server) = serve_once("201 Created", r#"{"message":"User created"}"#).await;
        assert_eq!(client.signup("new@b.com", "secret").await, Ok(()));
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/auth/signup HTTP/1.1\r\n"));

        let (client, server) = serve_once("200 OK", r#"{"message":"ok"}"#).await;
        assert_eq!(
            client.signup("new@b.com", "secret").await,
            Err(GalleryError::Validation("ok".to_string()))
        );
        server.await.unwrap();

        let (client, server) =
            serve_once("400 Bad Request", r#"{"error":"User already exists"}"#).await;
        assert_eq!(
            client.signup("a@b.com", "secret").await,
            Err(GalleryError::Validation("User already exists".to_string()))
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_list_sends_bearer_token() {
        let (client, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"filename":"x.jpg"},{"id":"b2","filename":"y.png"}]"#,
        )
        .await;

        let photos = client.list_photos(Some("T1")).await;
        let request = server.await.unwrap();

        assert_eq!(
            photos,
            Ok(vec![Photo::new(1i64, "x.jpg"), Photo::new("b2", "y.png")])
        );
        assert!(request.starts_with("GET /api/photos/ HTTP/1.1\r\n"));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer t1\r\n"));
    }

    #[tokio::test]
    async fn test_upload_sends_one_multipart_request() {
        let (client, server) = serve_once("201 Created", r#"{"message":"Uploaded"}"#).await;
        let files = vec![
            UploadFile::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg", "a.jpg"),
            UploadFile::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png", "b.png"),
        ];

        let result = client.upload_photos(Some("T1"), &files).await;
        let request = server.await.unwrap();

        assert_eq!(result, Ok(()));
        assert!(request.starts_with("POST /api/photos/upload HTTP/1.1\r\n"));
        let lower = request.to_ascii_lowercase();
        assert!(lower.contains("content-type: multipart/form-data; boundary="));
        assert!(lower.contains("authorization: bearer t1\r\n"));
        assert_eq!(request.matches(r#"name="photos""#).count(), 2);
        assert!(request.contains(r#"filename="a.jpg""#));
        assert!(request.contains(r#"filename="b.png""#));
        assert!(lower.contains("content-type: image/png"));
    }

    #[tokio::test]
    async fn test_upload_expects_created() {
        let (client, server) = serve_once("200 OK", "{}").await;
        let files = vec![UploadFile::new(vec![1], "image/jpeg", "a.jpg")];

        let result = client.upload_photos(Some("T1"), &files).await;
        server.await.unwrap();

        assert!(matches!(result, Err(GalleryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_delete_escapes_photo_id() {
        let (client, server) = serve_once("200 OK", r#"{"message":"Deleted"}"#).await;

        let result = client
            .delete_photo(Some("T1"), &PhotoId::from("7#draft"))
            .await;
        let request = server.await.unwrap();

        assert_eq!(result, Ok(()));
        assert!(request.starts_with("DELETE /api/photos/7%23draft HTTP/1.1\r\n"));

        let (client, server) = serve_once("200 OK", "{}").await;
        client
            .delete_photo(Some("T1"), &PhotoId::from("a/../../b?x=1"))
            .await
            .unwrap();
        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /api/photos/a%2F..%2F..%2Fb%3Fx=1 HTTP/1.1\r\n"));
    }

    #[tokio::test]
    async fn test_failure_status_classification() {
        let cases = [
            ("401 Unauthorized", "{}", GalleryError::Unauthorized),
            ("403 Forbidden", "{}", GalleryError::Unauthorized),
            (
                "404 Not Found",
                r#"{"error":"Photo not found"}"#,
                GalleryError::NotFound("Photo not found".to_string()),
            ),
            (
                "500 Internal Server Error",
                "<html>oops</html>",
                GalleryError::Server {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                },
            ),
        ];

        for (status, body, expected) in cases {
            let (client, server) = serve_once(status, body).await;
            let result = client.delete_photo(Some("T1"), &PhotoId::from(1i64)).await;
            server.await.unwrap();
            assert_eq!(result, Err(expected), "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_unexpected_success_status_is_invalid_response() {
        let (client, server) = serve_once("202 Accepted", "[]").await;

        let result = client.list_photos(Some("T1")).await;
        server.await.unwrap();

        assert!(matches!(result, Err(GalleryError::InvalidResponse(_))));
    }

    fn unreachable_client() -> GalleryClient {
        // Discard port, nothing listens there
        GalleryClient::new(GalleryConfig::new("http://127.0.0.1:9")).unwrap()
    }

    #[tokio::test]
    async fn test_absent_token_never_reaches_network() {
        let client = unreachable_client();
        let id = PhotoId::from(1i64);
        let files = vec![UploadFile::new(vec![1, 2, 3], "image/jpeg", "a.jpg")];

        assert_eq!(
            client.list_photos(None).await,
            Err(GalleryError::AuthenticationRequired)
        );
        assert_eq!(
            client.upload_photos(None, &files).await,
            Err(GalleryError::AuthenticationRequired)
        );
        assert_eq!(
            client.delete_photo(None, &id).await,
            Err(GalleryError::AuthenticationRequired)
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let client = unreachable_client();
        let result = client.list_photos(Some("T1")).await;
        assert!(matches!(result, Err(GalleryError::Network(_))));

        let result = client.login("a@b.com", "secret").await;
        assert!(matches!(result, Err(GalleryError::Network(_))));
    }

    #[test]
    fn test_failure_message_prefers_body() {
        assert_eq!(
            failure_message(StatusCode::BAD_REQUEST, r#"{"message":"Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(
            failure_message(StatusCode::BAD_REQUEST, r#"{"error":"No files uploaded"}"#),
            "No files uploaded"
        );
        assert_eq!(
            failure_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "Internal Server Error"
        );
    }

    #[test]
    fn test_image_url_uses_filename() {
        let client = unreachable_client();
        let photo = Photo::new(7i64, "cat.png");
        assert_eq!(client.image_url(&photo), "http://127.0.0.1:9/uploads/cat.png");
    }
}
