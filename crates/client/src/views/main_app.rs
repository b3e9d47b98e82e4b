//! The signed-in shell: server rail, channel list and the chat pane.

use dioxus::prelude::*;
use parley_shared::{form_error_message, ApiError, Channel, ChatMessage, MessageKind, Server};

use crate::auth_session::AuthContext;
use crate::components::ui::{Button, ButtonVariant, FormError, Label, Modal, TextInput};
use crate::hooks::{use_refresh_resource, use_refreshable_resource};
use crate::stores::typing_label;
use crate::ws::{use_channel_feed, ConnectionState};
use crate::Route;

type ServersResult = Result<Vec<Server>, ApiError>;
type ChannelsResult = Result<Vec<Channel>, ApiError>;

/// Main application page, rendered behind the route guard.
#[component]
pub fn MainApp() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let mut selected_server = use_signal(|| None::<i64>);
    let mut selected_channel = use_signal(|| None::<i64>);
    let mut show_create_server = use_signal(|| false);
    let mut show_create_channel = use_signal(|| false);

    let servers = use_refreshable_resource(move || {
        let client = auth.client();
        async move {
            let result: ServersResult = client.list_servers().await;
            if let Err(e) = &result {
                crate::log_error!("Failed to load servers: {}", e);
            }
            result
        }
    });

    let channels = use_refreshable_resource(move || {
        let server = selected_server();
        let client = auth.client();
        async move {
            let result: ChannelsResult = match server {
                Some(id) => client.list_channels(id).await,
                None => Ok(Vec::new()),
            };
            if let Err(e) = &result {
                crate::log_error!("Failed to load channels: {}", e);
            }
            result
        }
    });

    // First server wins until the user picks one.
    use_effect(move || {
        if selected_server().is_some() {
            return;
        }
        if let Some(Ok(list)) = &*servers.read() {
            if let Some(first) = list.first() {
                selected_server.set(Some(first.id));
            }
        }
    });

    // A new server starts with no channel; the effect below picks its first.
    use_effect(move || {
        let _ = selected_server();
        selected_channel.set(None);
    });

    use_effect(move || {
        let server = selected_server();
        if selected_channel().is_some() {
            return;
        }
        if let Some(Ok(list)) = &*channels.read() {
            // The list may still belong to the previous server while reloading.
            if let Some(first) = list.iter().find(|c| Some(c.server_id) == server) {
                selected_channel.set(Some(first.id));
            }
        }
    });

    let server_list = match &*servers.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let channel_list = match &*channels.read() {
        Some(Ok(list)) => list
            .iter()
            .filter(|c| Some(c.server_id) == selected_server())
            .cloned()
            .collect::<Vec<_>>(),
        _ => Vec::new(),
    };
    let server_name = server_list
        .iter()
        .find(|s| Some(s.id) == selected_server())
        .map(|s| s.name.clone());
    let channel_name = channel_list
        .iter()
        .find(|c| Some(c.id) == selected_channel())
        .map(|c| c.name.clone());

    rsx! {
        div { class: "flex h-screen bg-[#313338] text-white overflow-hidden",
            ServerRail {
                servers: server_list,
                selected: selected_server(),
                on_select: move |id| selected_server.set(Some(id)),
                on_add: move |_| show_create_server.set(true),
                on_logout: move |_| {
                    auth.logout();
                    crate::log_info!("Logged out");
                    nav.replace(Route::Login { registered: false });
                },
            }
            div { class: "w-60 bg-[#2b2d31] flex flex-col",
                div { class: "h-12 px-4 flex items-center border-b border-black/20 font-semibold shadow-sm",
                    {server_name.unwrap_or_else(|| "No server".to_string())}
                }
                ChannelList {
                    channels: channel_list,
                    selected: selected_channel(),
                    can_add: selected_server().is_some(),
                    on_select: move |id| selected_channel.set(Some(id)),
                    on_add: move |_| show_create_channel.set(true),
                }
            }
            if let Some(name) = channel_name {
                ChatPane { channel_id: selected_channel, channel_name: name }
            } else {
                div { class: "flex-1 flex items-center justify-center text-gray-400",
                    "Select a channel to start chatting."
                }
            }
        }

        if show_create_server() {
            CreateServerModal {
                on_close: move |_| show_create_server.set(false),
                on_created: move |server: Server| {
                    show_create_server.set(false);
                    selected_server.set(Some(server.id));
                },
            }
        }
        if show_create_channel() {
            if let Some(server_id) = selected_server() {
                CreateChannelModal {
                    server_id,
                    on_close: move |_| show_create_channel.set(false),
                    on_created: move |channel: Channel| {
                        show_create_channel.set(false);
                        selected_channel.set(Some(channel.id));
                    },
                }
            }
        }
    }
}

/// Two-letter badge for a server icon.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

#[component]
fn ServerRail(
    servers: Vec<Server>,
    selected: Option<i64>,
    on_select: EventHandler<i64>,
    on_add: EventHandler<()>,
    on_logout: EventHandler<()>,
) -> Element {
    rsx! {
        nav { class: "w-[72px] bg-[#1e1f22] flex flex-col items-center py-3 space-y-2",
            for server in servers {
                button {
                    key: "{server.id}",
                    title: "{server.name}",
                    class: format!(
                        "w-12 h-12 rounded-2xl flex items-center justify-center font-semibold transition-all {}",
                        if selected == Some(server.id) {
                            "bg-indigo-500 text-white"
                        } else {
                            "bg-[#313338] text-gray-300 hover:bg-indigo-500 hover:text-white"
                        },
                    ),
                    onclick: move |_| on_select.call(server.id),
                    {initials(&server.name)}
                }
            }
            button {
                title: "Create a server",
                class: "w-12 h-12 rounded-2xl bg-[#313338] text-green-400 text-2xl hover:bg-green-500 hover:text-white",
                onclick: move |_| on_add.call(()),
                "+"
            }
            div { class: "flex-1" }
            Button {
                variant: ButtonVariant::Danger,
                class: "text-xs px-2".to_string(),
                onclick: move |_| on_logout.call(()),
                "Logout"
            }
        }
    }
}

#[component]
fn ChannelList(
    channels: Vec<Channel>,
    selected: Option<i64>,
    can_add: bool,
    on_select: EventHandler<i64>,
    on_add: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "flex-1 overflow-y-auto py-3 space-y-0.5",
            div { class: "flex items-center justify-between px-4 pb-1 text-xs font-semibold uppercase text-[#949ba4]",
                span { "Text Channels" }
                if can_add {
                    button {
                        title: "Create a channel",
                        class: "text-lg leading-none hover:text-white",
                        onclick: move |_| on_add.call(()),
                        "+"
                    }
                }
            }
            if channels.is_empty() {
                div { class: "px-4 py-2 text-gray-500 text-xs italic", "No channels yet" }
            }
            for channel in channels {
                div {
                    key: "{channel.id}",
                    class: format!(
                        "flex items-center px-2 py-1.5 mx-2 rounded cursor-pointer transition-colors {}",
                        if selected == Some(channel.id) {
                            "bg-[#404249] text-white"
                        } else {
                            "text-[#949ba4] hover:bg-[#35373c] hover:text-[#dbdee1]"
                        },
                    ),
                    onclick: move |_| on_select.call(channel.id),
                    span { class: "mr-1.5 text-lg", "#" }
                    span { class: "truncate", "{channel.name}" }
                }
            }
        }
    }
}

/// Message list, typing line and composer for the selected channel.
#[component]
fn ChatPane(channel_id: Signal<Option<i64>>, channel_name: String) -> Element {
    let auth = use_context::<AuthContext>();
    let handle = use_channel_feed(channel_id);
    let mut draft = use_signal(String::new);
    let mut uploading = use_signal(|| false);

    let (messages, typing) = {
        let feed = handle.feed.read();
        (feed.messages().to_vec(), typing_label(&feed.typing().users()))
    };
    let state = (handle.state)();
    let is_open = state.is_open();

    rsx! {
        div { class: "flex-1 flex flex-col min-w-0",
            header { class: "h-12 px-4 flex items-center justify-between border-b border-black/20 shadow-sm",
                div { class: "font-semibold",
                    span { class: "text-gray-400 mr-1", "#" }
                    "{channel_name}"
                }
                ConnectionBadge { state }
            }
            div { id: "message-list", class: "flex-1 overflow-y-auto px-4 py-4 space-y-2",
                if messages.is_empty() {
                    div { class: "text-gray-500 text-sm italic", "No messages yet." }
                }
                for (idx, message) in messages.into_iter().enumerate() {
                    MessageItem { key: "{idx}", message }
                }
            }
            div { class: "h-6 px-4 text-xs text-gray-400 italic",
                if let Some(label) = typing {
                    "{label}"
                }
            }
            form {
                class: "flex items-center gap-2 px-4 pb-4",
                onsubmit: move |e: FormEvent| {
                    e.prevent_default();
                    let content = draft.peek().trim().to_string();
                    if content.is_empty() {
                        return;
                    }
                    // The draft survives when the socket is not open.
                    if handle.send_message(&content, None) {
                        draft.set(String::new());
                    }
                },
                label {
                    class: format!(
                        "cursor-pointer rounded px-3 py-2 text-sm bg-[#383a40] hover:bg-[#404249] {}",
                        if uploading() || !is_open { "opacity-50 pointer-events-none" } else { "" },
                    ),
                    title: "Upload a file",
                    if uploading() { "…" } else { "📎" }
                    input {
                        r#type: "file",
                        class: "hidden",
                        disabled: uploading() || !is_open,
                        onchange: move |evt: FormEvent| async move {
                            let Some(file) = evt.files().into_iter().next() else {
                                return;
                            };
                            let Some(id) = channel_id() else {
                                return;
                            };
                            uploading.set(true);
                            let name = file.name();
                            match file.read_bytes().await {
                                Ok(bytes) => {
                                    match auth.client().upload_file(id, name.clone(), bytes.to_vec()).await {
                                        Ok(res) => {
                                            crate::log_info!("Uploaded {} to channel {}", name, id);
                                            handle.send_message(&name, Some(&res.file_url));
                                        }
                                        Err(e) => crate::log_error!("Upload of {} failed: {}", name, e),
                                    }
                                }
                                Err(e) => crate::log_error!("Could not read {}: {}", name, e),
                            }
                            uploading.set(false);
                        },
                    }
                }
                TextInput {
                    class: "flex-1 bg-[#383a40] border-transparent".to_string(),
                    value: draft.cloned(),
                    placeholder: format!("Message #{channel_name}"),
                    oninput: move |e: FormEvent| {
                        draft.set(e.value());
                        handle.send_typing_indicator();
                    },
                }
                Button { r#type: "submit".to_string(), disabled: !is_open, "Send" }
            }
        }
    }
}

#[component]
fn ConnectionBadge(state: ConnectionState) -> Element {
    let color = match state {
        ConnectionState::Open => "bg-green-500",
        ConnectionState::Connecting => "bg-yellow-500",
        ConnectionState::Closed => "bg-red-500",
    };
    rsx! {
        span { class: "flex items-center gap-1.5 text-xs text-gray-400",
            span { class: "w-2 h-2 rounded-full {color}" }
            {state.label()}
        }
    }
}

/// Text shown for join and leave notices.
fn notice_text(message: &ChatMessage) -> String {
    if !message.content.is_empty() {
        return message.content.clone();
    }
    match message.kind {
        MessageKind::UserJoined => format!("{} joined the channel", message.username),
        MessageKind::UserLeft => format!("{} left the channel", message.username),
        MessageKind::Message => String::new(),
    }
}

#[component]
fn MessageItem(message: ChatMessage) -> Element {
    let auth = use_context::<AuthContext>();

    if message.kind != MessageKind::Message {
        return rsx! {
            div { class: "text-center text-xs text-gray-500 italic", {notice_text(&message)} }
        };
    }

    let file_href = message.file_url.as_deref().map(|url| auth.file_url(url));

    rsx! {
        div { class: "group hover:bg-[#2e3035] rounded px-2 py-1",
            div { class: "flex items-baseline gap-2",
                span { class: "font-semibold text-indigo-300", "{message.username}" }
                span { class: "text-xs text-gray-500", "{message.timestamp}" }
            }
            if let Some(href) = file_href {
                a {
                    class: "text-indigo-400 hover:underline break-all",
                    href: "{href}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "{message.content}"
                }
            } else {
                p { class: "text-gray-100 whitespace-pre-wrap break-words", "{message.content}" }
            }
        }
    }
}

#[component]
fn CreateServerModal(on_close: EventHandler<()>, on_created: EventHandler<Server>) -> Element {
    let auth = use_context::<AuthContext>();
    let refresh = use_refresh_resource::<ServersResult>();
    let mut name = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    rsx! {
        Modal { title: "Create a server".to_string(), on_close,
            form {
                class: "space-y-4",
                onsubmit: move |e: FormEvent| async move {
                    e.prevent_default();
                    let value = name.peek().trim().to_string();
                    if value.is_empty() || is_submitting() {
                        return;
                    }
                    is_submitting.set(true);
                    error.set(None);
                    match auth.client().create_server(&value).await {
                        Ok(server) => {
                            crate::log_info!("Created server {} ({})", server.name, server.id);
                            refresh.refresh();
                            on_created.call(server);
                        }
                        Err(err) => error.set(Some(form_error_message(&err, "Could not create server."))),
                    }
                    is_submitting.set(false);
                },
                div {
                    Label { html_for: "server-name", "Server name" }
                    TextInput {
                        id: "server-name".to_string(),
                        value: name.cloned(),
                        required: true,
                        oninput: move |e: FormEvent| name.set(e.value()),
                    }
                }
                FormError { message: error.cloned() }
                div { class: "flex justify-end gap-2",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit".to_string(), disabled: is_submitting(), "Create" }
                }
            }
        }
    }
}

#[component]
fn CreateChannelModal(
    server_id: i64,
    on_close: EventHandler<()>,
    on_created: EventHandler<Channel>,
) -> Element {
    let auth = use_context::<AuthContext>();
    let refresh = use_refresh_resource::<ChannelsResult>();
    let mut name = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    rsx! {
        Modal { title: "Create a channel".to_string(), on_close,
            form {
                class: "space-y-4",
                onsubmit: move |e: FormEvent| async move {
                    e.prevent_default();
                    let value = name.peek().trim().to_string();
                    if value.is_empty() || is_submitting() {
                        return;
                    }
                    is_submitting.set(true);
                    error.set(None);
                    match auth.client().create_channel(server_id, &value).await {
                        Ok(channel) => {
                            crate::log_info!("Created channel {} ({})", channel.name, channel.id);
                            refresh.refresh();
                            on_created.call(channel);
                        }
                        Err(err) => error.set(Some(form_error_message(&err, "Could not create channel."))),
                    }
                    is_submitting.set(false);
                },
                div {
                    Label { html_for: "channel-name", "Channel name" }
                    TextInput {
                        id: "channel-name".to_string(),
                        value: name.cloned(),
                        required: true,
                        oninput: move |e: FormEvent| name.set(e.value()),
                    }
                }
                FormError { message: error.cloned() }
                div { class: "flex justify-end gap-2",
                    Button { variant: ButtonVariant::Secondary, onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit".to_string(), disabled: is_submitting(), "Create" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_classes_ship_in_the_bundled_stylesheet() {
        let css = include_str!("../../assets/main.css");
        for selector in [
            r".w-\[72px\]",
            r".bg-\[\#313338\]",
            r".hover\:bg-\[\#404249\]:hover",
            ".rounded-full",
            ".overflow-y-auto",
            ".whitespace-pre-wrap",
        ] {
            assert!(css.contains(selector), "missing {selector}");
        }
        assert!(!css.contains("@import"));
    }

    #[test]
    fn initials_take_first_letters_of_two_words() {
        assert_eq!(initials("rust lang hub"), "RL");
        assert_eq!(initials("general"), "G");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn notices_fall_back_to_generated_text() {
        let mut msg = ChatMessage {
            id: None,
            username: "ann".to_string(),
            content: String::new(),
            timestamp: String::new(),
            file_url: None,
            kind: MessageKind::UserJoined,
        };
        assert_eq!(notice_text(&msg), "ann joined the channel");

        msg.kind = MessageKind::UserLeft;
        assert_eq!(notice_text(&msg), "ann left the channel");

        msg.content = "ann has left".to_string();
        assert_eq!(notice_text(&msg), "ann has left");
    }
}
