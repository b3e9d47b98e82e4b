use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Primary => "bg-indigo-500 text-white hover:bg-indigo-600 focus:ring-indigo-500",
            Self::Secondary => "bg-gray-600 text-white hover:bg-gray-500 focus:ring-gray-500",
            Self::Danger => "bg-transparent text-red-400 hover:bg-red-500 hover:text-white focus:ring-red-500",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub variant: Option<ButtonVariant>,
    /// `"button"` unless given; forms pass `"submit"`.
    #[props(optional)]
    pub r#type: Option<String>,
    #[props(optional)]
    pub disabled: Option<bool>,
    #[props(optional)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let disabled = props.disabled.unwrap_or(false);
    let base = "inline-flex items-center justify-center rounded px-4 py-2 text-sm font-semibold transition-colors focus:outline-none focus:ring-2 disabled:opacity-50 disabled:pointer-events-none";
    let variant = props.variant.unwrap_or_default().class();

    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{base} {variant} {extra}"),
        _ => format!("{base} {variant}"),
    };

    rsx! {
        button {
            class,
            r#type: props.r#type.unwrap_or_else(|| "button".to_string()),
            disabled,
            onclick: move |evt| {
                if disabled {
                    return;
                }
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}
