use dioxus::prelude::*;
use parley_shared::{form_error_message, RegisterRequest};

use crate::auth_session::AuthContext;
use crate::components::ui::{AuthCard, Button, FormError, InputType, Label, TextInput};
use crate::Route;

pub const REGISTRATION_FAILED: &str = "Registration failed.";

#[component]
pub fn Register() -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    rsx! {
        AuthCard { title: "Create an Account".to_string(),
            form {
                class: "space-y-4",
                onsubmit: move |e: FormEvent| async move {
                    e.prevent_default();
                    if is_submitting() {
                        return;
                    }
                    is_submitting.set(true);
                    error.set(None);

                    let req = RegisterRequest {
                        username: username.cloned(),
                        email: email.cloned(),
                        password: password.cloned(),
                    };
                    match auth.client().register(&req).await {
                        Ok(user) => {
                            crate::log_info!("Registered user {} ({})", user.username, user.id);
                            nav.push(Route::Login { registered: true });
                        }
                        Err(err) => {
                            crate::log_warn!("Registration failed: {}", err);
                            error.set(Some(form_error_message(&err, REGISTRATION_FAILED)));
                        }
                    }
                    is_submitting.set(false);
                },
                div {
                    Label { html_for: "username", "Username" }
                    TextInput {
                        id: "username".to_string(),
                        value: username.cloned(),
                        required: true,
                        oninput: move |e: FormEvent| username.set(e.value()),
                    }
                }
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
                    if is_submitting() { "Registering…" } else { "Register" }
                }
            }
            p { class: "text-sm text-gray-400 text-center",
                "Already have an account? "
                Link {
                    class: "text-indigo-400 hover:text-indigo-300",
                    to: Route::Login { registered: false },
                    "Login"
                }
            }
        }
    }
}
