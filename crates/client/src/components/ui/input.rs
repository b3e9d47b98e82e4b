use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
}

impl InputType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    #[props(optional)]
    pub id: Option<String>,
    #[props(optional)]
    pub class: Option<String>,
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub input_type: Option<InputType>,
    #[props(optional)]
    pub required: Option<bool>,
}

/// Controlled text field: the caller owns the value.
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let base = "w-full rounded bg-gray-700 text-gray-100 px-3 py-2 text-sm border border-gray-600 placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-indigo-500";
    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base.to_string(),
    };

    rsx! {
        input {
            id: props.id.unwrap_or_default(),
            class,
            r#type: props.input_type.unwrap_or_default().as_str(),
            value: "{props.value}",
            placeholder: props.placeholder.unwrap_or_default(),
            required: props.required.unwrap_or(false),
            oninput: move |e| props.oninput.call(e),
        }
    }
}

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "block text-sm font-medium text-gray-300 mb-1", r#for: "{html_for}", {children} }
    }
}

/// Red error line under a form; renders nothing without a message.
#[component]
pub fn FormError(message: Option<String>) -> Element {
    rsx! {
        if let Some(msg) = message {
            p { class: "text-red-500 text-sm", "{msg}" }
        }
    }
}
