use crate::models::Credentials;
use photo_gallery::{GalleryApi, GalleryError, Session, SessionError};

/// Error type for authentication operations
#[derive(Debug)]
pub enum AuthError {
    /// Email or password missing, nothing was sent
    Incomplete,
    Gallery(GalleryError),
    Session(SessionError),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Incomplete => write!(f, "Email and password are required"),
            AuthError::Gallery(e) => write!(f, "{}", e),
            AuthError::Session(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<GalleryError> for AuthError {
    fn from(err: GalleryError) -> Self {
        AuthError::Gallery(err)
    }
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        AuthError::Session(err)
    }
}

impl AuthError {
    /// Text shown next to the form
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Incomplete => "Please enter your email and password.".to_string(),
            AuthError::Gallery(e) => e.user_message(),
            AuthError::Session(_) => "Could not save your login on this device.".to_string(),
        }
    }
}

/// Login, signup and logout against the gallery service
pub struct AuthService<A> {
    api: A,
    session: Session,
}

impl<A: GalleryApi> AuthService<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Log in and persist the issued token
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if !credentials.is_complete() {
            return Err(AuthError::Incomplete);
        }

        let token = self
            .api
            .login(credentials.email.trim(), &credentials.password)
            .await?;
        self.session.begin(&token)?;
        log::info!("Logged in as {}", credentials.email.trim());
        Ok(())
    }

    /// Create an account; the user logs in afterwards
    pub async fn signup(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if !credentials.is_complete() {
            return Err(AuthError::Incomplete);
        }

        self.api
            .signup(credentials.email.trim(), &credentials.password)
            .await?;
        log::info!("Account created for {}", credentials.email.trim());
        Ok(())
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.teardown()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use photo_gallery::{GalleryResult, MemoryTokenStore, Photo, PhotoId, UploadFile};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeAuthApi {
        calls: Cell<usize>,
        seen: RefCell<Vec<(String, String)>>,
        reject: Option<String>,
    }

    #[async_trait(?Send)]
    impl GalleryApi for FakeAuthApi {
        async fn login(&self, email: &str, password: &str) -> GalleryResult<String> {
            self.calls.set(self.calls.get() + 1);
            self.seen
                .borrow_mut()
                .push((email.to_string(), password.to_string()));
            match &self.reject {
                Some(msg) => Err(GalleryError::Validation(msg.clone())),
                None => Ok("T1".to_string()),
            }
        }

        async fn signup(&self, _email: &str, _password: &str) -> GalleryResult<()> {
            self.calls.set(self.calls.get() + 1);
            match &self.reject {
                Some(msg) => Err(GalleryError::Validation(msg.clone())),
                None => Ok(()),
            }
        }

        async fn list_photos(&self, _token: Option<&str>) -> GalleryResult<Vec<Photo>> {
            unreachable!("not used by auth")
        }

        async fn upload_photos(
            &self,
            _token: Option<&str>,
            _files: &[UploadFile],
        ) -> GalleryResult<()> {
            unreachable!("not used by auth")
        }

        async fn delete_photo(&self, _token: Option<&str>, _id: &PhotoId) -> GalleryResult<()> {
            unreachable!("not used by auth")
        }
    }

    fn service(api: FakeAuthApi) -> AuthService<FakeAuthApi> {
        AuthService::new(api, Session::init(MemoryTokenStore::new()).unwrap())
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let auth = service(FakeAuthApi::default());

        auth.login(&Credentials::new("a@b.com", "secret"))
            .await
            .unwrap();

        assert_eq!(auth.session().token(), Some("T1".to_string()));
        assert_eq!(
            auth.api.seen.borrow()[0],
            ("a@b.com".to_string(), "secret".to_string())
        );
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_session_empty() {
        let auth = service(FakeAuthApi {
            reject: Some("Invalid credentials".to_string()),
            ..Default::default()
        });

        let result = auth.login(&Credentials::new("a@b.com", "wrong")).await;

        assert!(matches!(
            result,
            Err(AuthError::Gallery(GalleryError::Validation(ref m))) if m == "Invalid credentials"
        ));
        assert!(!auth.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_incomplete_credentials_are_not_sent() {
        let auth = service(FakeAuthApi::default());

        assert!(matches!(
            auth.login(&Credentials::new("", "secret")).await,
            Err(AuthError::Incomplete)
        ));
        assert!(matches!(
            auth.signup(&Credentials::new("a@b.com", "")).await,
            Err(AuthError::Incomplete)
        ));
        assert_eq!(auth.api.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_signup_does_not_start_session() {
        let auth = service(FakeAuthApi::default());

        auth.signup(&Credentials::new("new@b.com", "secret"))
            .await
            .unwrap();

        assert!(!auth.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let auth = service(FakeAuthApi::default());
        auth.login(&Credentials::new("a@b.com", "secret"))
            .await
            .unwrap();

        auth.logout().unwrap();
        auth.logout().unwrap();

        assert_eq!(auth.session().token(), None);
    }
}
