use dioxus::prelude::*;

/// Centered panel used by the login and registration pages.
#[component]
pub fn AuthCard(title: String, children: Element) -> Element {
    rsx! {
        div { class: "bg-gray-900 text-white h-screen flex items-center justify-center",
            div { class: "w-full max-w-md p-8 space-y-6 bg-gray-800 rounded-lg shadow-md",
                h1 { class: "text-2xl font-bold text-center", "{title}" }
                {children}
            }
        }
    }
}

/// Overlay dialog with a title; clicking the backdrop closes it.
#[component]
pub fn Modal(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 bg-black/70 flex items-center justify-center z-50",
            onclick: move |_| on_close.call(()),
            div {
                class: "bg-gray-800 rounded-lg shadow-2xl w-full max-w-md mx-4 p-6 space-y-4",
                onclick: move |e| e.stop_propagation(),
                h2 { class: "text-xl font-bold text-white", "{title}" }
                {children}
            }
        }
    }
}
