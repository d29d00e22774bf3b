use dioxus::prelude::*;

mod components;
mod config;
mod database;
mod error;

use components::{DashboardScreen, LoginScreen, SignupScreen};
use config::AppConfig;
use error::AppError;
use photo_gallery::{GalleryClient, Session};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("snapgallery"),
    );

    #[cfg(not(target_os = "android"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Screen navigation for the app
#[derive(Clone, PartialEq, Debug)]
pub enum Screen {
    Login,
    Signup,
    Dashboard,
}

/// Process-wide services shared by all screens
#[derive(Clone, PartialEq, Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: Session,
    pub client: GalleryClient,
}

impl AppContext {
    /// Resolve the app directory, read the configuration and restore the session
    pub fn bootstrap() -> Result<Self, AppError> {
        let app_dir = database::get_app_directory()?;
        let config = AppConfig::load(&app_dir)?;
        let session = database::open_session(&config.data_dir_or(&app_dir))?;
        let client = GalleryClient::new(config.gallery_config())?;
        log::info!("Using gallery service at {}", config.server_url);

        Ok(Self {
            config,
            session,
            client,
        })
    }
}

#[component]
fn App() -> Element {
    let context = use_hook(|| {
        AppContext::bootstrap().map_err(|e| {
            log::error!("Startup failed: {}", e);
            e.user_message()
        })
    });

    // A persisted token skips the login screen
    let mut current_screen = use_signal(|| match &context {
        Ok(ctx) if ctx.session.is_authenticated() => Screen::Dashboard,
        _ => Screen::Login,
    });

    let content = match context {
        Err(message) => rsx! {
            div { style: "padding: 48px 16px; text-align: center; color: #721c24;",
                h2 { "❌ SnapGallery could not start" }
                p { "{message}" }
            }
        },
        Ok(context) => match current_screen() {
            Screen::Login => rsx! {
                LoginScreen { context, on_navigate: move |s| current_screen.set(s) }
            },
            Screen::Signup => rsx! {
                SignupScreen { context, on_navigate: move |s| current_screen.set(s) }
            },
            Screen::Dashboard => rsx! {
                DashboardScreen { context, on_navigate: move |s| current_screen.set(s) }
            },
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",
            div { style: "flex: 1; overflow-y: auto;", {content} }
        }
    }
}
