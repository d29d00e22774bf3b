/// Which form the auth component shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// Email/password pair entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields filled in; anything further is judged by the service
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// State of the auth form
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Waiting for input
    Idle,
    /// Request in flight
    Submitting,
    /// Request succeeded
    Success,
    /// Request failed with error message
    Error(String),
}
