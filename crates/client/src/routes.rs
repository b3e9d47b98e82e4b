//! Application routing configuration.

use dioxus::prelude::*;

use crate::components::ProtectedRoute;
use crate::views::{Login, MainApp, Register};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // Auth routes; `?registered=true` shows the post-registration notice
    #[route("/login?:registered")]
    Login { registered: bool },
    #[route("/register")]
    Register {},

    // Everything else needs a token
    #[layout(ProtectedRoute)]
        #[route("/")]
        MainApp {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "flex flex-col items-center justify-center min-h-screen bg-[#313338] text-white space-y-4",
            h1 { class: "text-2xl font-bold", "Page not found" }
            p { class: "text-gray-400", "/{path}" }
            Link { class: "text-indigo-400 hover:text-indigo-300", to: Route::MainApp {}, "Back to chat" }
        }
    }
}
