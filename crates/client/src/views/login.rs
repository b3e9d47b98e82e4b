use dioxus::prelude::*;
use parley_shared::form_error_message;

use crate::auth_session::AuthContext;
use crate::components::ui::{AuthCard, Button, FormError, InputType, Label, TextInput};
use crate::Route;

pub const LOGIN_FAILED: &str = "Login failed.";

#[component]
pub fn Login(registered: bool) -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    rsx! {
        AuthCard { title: "Welcome Back".to_string(),
            if registered {
                p { class: "text-green-400 text-sm text-center",
                    "Registration successful! Please log in."
                }
            }
            form {
                class: "space-y-4",
                onsubmit: move |e: FormEvent| async move {
                    e.prevent_default();
                    if is_submitting() {
                        return;
                    }
                    is_submitting.set(true);
                    error.set(None);

                    let client = auth.client();
                    let (email_value, password_value) = (email.cloned(), password.cloned());
                    match client.login(&email_value, &password_value).await {
                        Ok(res) => {
                            crate::log_info!("Logged in as {}", email_value);
                            auth.set_token(Some(res.access_token));
                            nav.push(Route::MainApp {});
                        }
                        Err(err) => {
                            crate::log_warn!("Login failed: {}", err);
                            error.set(Some(form_error_message(&err, LOGIN_FAILED)));
                        }
                    }
                    is_submitting.set(false);
                },
                div {
                    Label { html_for: "email", "Email" }
                    TextInput {
                        id: "email".to_string(),
                        value: email.cloned(),
                        input_type: InputType::Email,
                        required: true,
                        oninput: move |e: FormEvent| email.set(e.value()),
                    }
                }
                div {
                    Label { html_for: "password", "Password" }
                    TextInput {
                        id: "password".to_string(),
                        value: password.cloned(),
                        input_type: InputType::Password,
                        required: true,
                        oninput: move |e: FormEvent| password.set(e.value()),
                    }
                }
                FormError { message: error.cloned() }
                Button {
                    r#type: "submit".to_string(),
                    class: "w-full".to_string(),
                    disabled: is_submitting(),
                    if is_submitting() { "Logging in…" } else { "Login" }
                }
            }
            p { class: "text-sm text-gray-400 text-center",
                "Need an account? "
                Link { class: "text-indigo-400 hover:text-indigo-300", to: Route::Register {}, "Register" }
            }
        }
    }
}
