use crate::Screen;
use dioxus::prelude::*;

/// Switch between the login and signup forms
#[component]
pub fn AuthTabs(current_screen: Screen, on_navigate: EventHandler<Screen>) -> Element {
    let tab_style = |active: bool| {
        if active {
            "flex: 1; padding: 12px; margin: 0 5px; border: none; border-radius: 8px; cursor: pointer; font-size: 14px; text-align: center; background: #0066cc; color: #ffffff;"
        } else {
            "flex: 1; padding: 12px; margin: 0 5px; border: none; border-radius: 8px; cursor: pointer; font-size: 14px; text-align: center; background: #ffffff; color: #333;"
        }
    };

    rsx! {
        div {
            style: "display: flex; justify-content: space-around; padding: 10px; background: #f0f0f0; border-radius: 10px; margin-bottom: 24px;",

            button {
                style: tab_style(matches!(current_screen, Screen::Login)),
                onclick: move |_| on_navigate.call(Screen::Login),
                "🔐 Login"
            }

            button {
                style: tab_style(matches!(current_screen, Screen::Signup)),
                onclick: move |_| on_navigate.call(Screen::Signup),
                "✨ Sign up"
            }
        }
    }
}
