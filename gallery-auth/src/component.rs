use crate::models::{AuthMode, AuthState, Credentials};
use crate::service::AuthService;
use dioxus::prelude::*;
use photo_gallery::{GalleryClient, Session};

/// Props for the AuthForm
#[derive(Props, Clone, PartialEq)]
pub struct AuthFormProps {
    /// Login or signup
    pub mode: AuthMode,
    /// Client for the gallery service
    pub client: GalleryClient,
    /// Session receiving the token after login
    pub session: Session,
    /// Callback when the request succeeds
    pub on_success: EventHandler<AuthMode>,
    /// Callback when the request fails
    #[props(default)]
    pub on_error: Option<EventHandler<String>>,
    /// Custom labels for UI elements (optional)
    #[props(default)]
    pub labels: Option<AuthLabels>,
}

/// Custom labels for the authentication UI
#[derive(Clone, PartialEq, Default)]
pub struct AuthLabels {
    pub title: String,
    pub email_placeholder: String,
    pub password_placeholder: String,
    pub submit_button: String,
    pub submitting: String,
    pub success: String,
    pub error_title: String,
}

impl AuthLabels {
    pub fn for_mode(mode: AuthMode) -> Self {
        let common = Self {
            email_placeholder: "Email".to_string(),
            password_placeholder: "Password".to_string(),
            error_title: "❌ Error".to_string(),
            ..Default::default()
        };
        match mode {
            AuthMode::Login => Self {
                title: "Login".to_string(),
                submit_button: "🔐 Login".to_string(),
                submitting: "🔄 Logging in...".to_string(),
                success: "✅ Login successful!".to_string(),
                ..common
            },
            AuthMode::Signup => Self {
                title: "Sign up".to_string(),
                submit_button: "Create account".to_string(),
                submitting: "🔄 Creating account...".to_string(),
                success: "✅ Account created! You can log in now.".to_string(),
                ..common
            },
        }
    }
}

/// Email/password form for login or signup
///
/// # Example
/// ```rust,ignore
/// AuthForm {
///     mode: AuthMode::Login,
///     client: client.clone(),
///     session: session.clone(),
///     on_success: move |_| {
///         // Navigate to the gallery
///     },
/// }
/// ```
#[component]
pub fn AuthForm(props: AuthFormProps) -> Element {
    let mut auth_state = use_signal(|| AuthState::Idle);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);

    let labels = props
        .labels
        .clone()
        .unwrap_or_else(|| AuthLabels::for_mode(props.mode));

    let submit = {
        let mode = props.mode;
        let client = props.client.clone();
        let session = props.session.clone();
        let on_success = props.on_success;
        let on_error = props.on_error;

        move |_| {
            if auth_state() == AuthState::Submitting {
                return;
            }
            auth_state.set(AuthState::Submitting);
            let credentials = Credentials::new(email(), password());
            let service = AuthService::new(client.clone(), session.clone());
            let on_success = on_success.clone();
            let on_error = on_error.clone();

            spawn(async move {
                let result = match mode {
                    AuthMode::Login => service.login(&credentials).await,
                    AuthMode::Signup => service.signup(&credentials).await,
                };

                match result {
                    Ok(()) => {
                        auth_state.set(AuthState::Success);
                        password.set(String::new());
                        on_success.call(mode);
                    }
                    Err(e) => {
                        log::warn!("{:?} failed: {}", mode, e);
                        let message = e.user_message();
                        auth_state.set(AuthState::Error(message.clone()));
                        if let Some(handler) = on_error {
                            handler.call(message);
                        }
                    }
                }
            });
        }
    };

    let submitting = auth_state() == AuthState::Submitting;

    rsx! {
        div { class: "gallery-auth",
            h1 {
                style: "text-align: center; margin: 0 0 24px 0; font-size: 24px; font-weight: bold;",
                "{labels.title}"
            }
            input {
                style: "width: 100%; padding: 14px 16px; font-size: 16px; border: 2px solid #e0e0e0; border-radius: 10px; margin-bottom: 12px;",
                r#type: "email",
                placeholder: "{labels.email_placeholder}",
                value: "{email}",
                oninput: move |e| email.set(e.value()),
            }
            input {
                style: "width: 100%; padding: 14px 16px; font-size: 16px; border: 2px solid #e0e0e0; border-radius: 10px; margin-bottom: 16px;",
                r#type: "password",
                placeholder: "{labels.password_placeholder}",
                value: "{password}",
                oninput: move |e| password.set(e.value()),
            }
            button {
                class: "btn-primary",
                style: "width: 100%; padding: 14px; font-size: 16px;",
                disabled: submitting,
                onclick: submit,
                if submitting {
                    "{labels.submitting}"
                } else {
                    "{labels.submit_button}"
                }
            }

            match auth_state() {
                AuthState::Success => rsx! {
                    div {
                        style: "margin-top: 12px; padding: 12px; background: #d4edda; border-radius: 4px; text-align: center; color: #155724;",
                        "{labels.success}"
                    }
                },
                AuthState::Error(error) => rsx! {
                    div {
                        style: "margin-top: 12px; padding: 12px; background: #f8d7da; border-radius: 4px; color: #721c24;",
                        p { style: "margin: 0 0 4px 0; font-weight: 600;", "{labels.error_title}" }
                        p { style: "margin: 0; font-size: 14px;", "{error}" }
                    }
                },
                AuthState::Idle | AuthState::Submitting => rsx! {},
            }
        }
    }
}
