use crate::components::AuthTabs;
use crate::{AppContext, Screen};
use dioxus::prelude::*;
use gallery_auth::{AuthForm, AuthMode};

#[component]
pub fn SignupScreen(context: AppContext, on_navigate: EventHandler<Screen>) -> Element {
    rsx! {
        div { style: "padding: 16px; max-width: 420px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            h1 { style: "color: #0066cc; text-align: center; margin-bottom: 24px; margin-top: 48px; font-size: 28px; font-weight: 700;",
                "📷 SnapGallery"
            }
            AuthTabs { current_screen: Screen::Signup, on_navigate }
            div { class: "card",
                // A new account still has to log in before the gallery opens
                AuthForm {
                    mode: AuthMode::Signup,
                    client: context.client.clone(),
                    session: context.session.clone(),
                    on_success: move |_| on_navigate.call(Screen::Login),
                }
            }
        }
    }
}
