/// Errors surfaced by gallery operations
///
/// `AuthenticationRequired` and `Unauthorized` end the current session; every
/// other variant is recoverable by repeating the user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// No local token, the request never left the device
    AuthenticationRequired,
    /// The service rejected the token
    Unauthorized,
    /// Malformed request or rejected input (4xx)
    Validation(String),
    /// The addressed resource does not exist
    NotFound(String),
    /// Service failure (5xx)
    Server { status: u16, message: String },
    /// No response received
    Network(String),
    /// A response arrived but could not be understood
    InvalidResponse(String),
}

/// Result type for gallery operations
pub type GalleryResult<T> = Result<T, GalleryError>;

impl std::fmt::Display for GalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GalleryError::AuthenticationRequired => write!(f, "Authentication required"),
            GalleryError::Unauthorized => write!(f, "Unauthorized"),
            GalleryError::Validation(msg) => write!(f, "Validation error: {}", msg),
            GalleryError::NotFound(msg) => write!(f, "Not found: {}", msg),
            GalleryError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            GalleryError::Network(msg) => write!(f, "Network error: {}", msg),
            GalleryError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for GalleryError {}

impl GalleryError {
    /// Whether the error invalidates the session and requires a new login
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            GalleryError::AuthenticationRequired | GalleryError::Unauthorized
        )
    }

    /// Classify a non-success status of a token-bearing request
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => GalleryError::Unauthorized,
            404 => GalleryError::NotFound(message),
            400..=499 => GalleryError::Validation(message),
            500..=599 => GalleryError::Server { status, message },
            _ => GalleryError::InvalidResponse(format!(
                "unexpected status {}: {}",
                status, message
            )),
        }
    }

    /// Text for the blocking notification shown to the user
    pub fn user_message(&self) -> String {
        match self {
            GalleryError::AuthenticationRequired => "Please log in to continue.".to_string(),
            GalleryError::Unauthorized => {
                "Your session has expired. Please log in again.".to_string()
            }
            GalleryError::Validation(msg) => msg.clone(),
            GalleryError::NotFound(msg) => format!("{} was not found.", msg),
            GalleryError::Server { .. } => {
                "The gallery service is having trouble. Please try again.".to_string()
            }
            GalleryError::Network(_) => {
                "Could not reach the gallery service. Check your connection.".to_string()
            }
            GalleryError::InvalidResponse(_) => {
                "The gallery service sent an unexpected response.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(
            GalleryError::from_status(401, "x".into()),
            GalleryError::Unauthorized
        );
        assert_eq!(
            GalleryError::from_status(403, "x".into()),
            GalleryError::Unauthorized
        );
        assert_eq!(
            GalleryError::from_status(404, "Photo".into()),
            GalleryError::NotFound("Photo".into())
        );
        assert_eq!(
            GalleryError::from_status(400, "No files".into()),
            GalleryError::Validation("No files".into())
        );
        assert_eq!(
            GalleryError::from_status(502, "Bad Gateway".into()),
            GalleryError::Server {
                status: 502,
                message: "Bad Gateway".into()
            }
        );
        assert!(matches!(
            GalleryError::from_status(302, "Found".into()),
            GalleryError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_session_fatal() {
        assert!(GalleryError::AuthenticationRequired.is_session_fatal());
        assert!(GalleryError::Unauthorized.is_session_fatal());
        assert!(!GalleryError::Network("down".into()).is_session_fatal());
        assert!(!GalleryError::Validation("bad".into()).is_session_fatal());
    }
}
