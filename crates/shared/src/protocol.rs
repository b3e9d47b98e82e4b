//! Realtime frames exchanged over `/ws/{channel_id}`.

use serde::{Deserialize, Serialize};

use crate::models::{null_as_empty, ChatMessage, MessageKind};

/// Body shared by the list-bearing frame types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FrameBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Frame received from the server, discriminated by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Typing {
        #[serde(default, deserialize_with = "null_as_empty")]
        username: String,
    },
    Message(FrameBody),
    UserJoined(FrameBody),
    UserLeft(FrameBody),
}

impl ServerFrame {
    /// Parse a text frame. Unknown `type` values and malformed JSON are errors.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The entry this frame contributes to the message list, if any.
    /// Typing frames contribute nothing.
    pub fn into_chat_message(self) -> Option<ChatMessage> {
        let (kind, body) = match self {
            ServerFrame::Typing { .. } => return None,
            ServerFrame::Message(body) => (MessageKind::Message, body),
            ServerFrame::UserJoined(body) => (MessageKind::UserJoined, body),
            ServerFrame::UserLeft(body) => (MessageKind::UserLeft, body),
        };
        Some(ChatMessage {
            id: body.id,
            username: body.username,
            content: body.content,
            timestamp: body.timestamp,
            file_url: body.file_url,
            kind,
        })
    }
}

/// Frame sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Message {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_url: Option<String>,
    },
    Typing,
}

impl ClientFrame {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typing_frame() {
        let frame = ServerFrame::parse(r#"{"type":"typing","username":"ana"}"#).unwrap();
        assert_eq!(frame, ServerFrame::Typing { username: "ana".to_string() });
        assert!(frame.into_chat_message().is_none());
    }

    #[test]
    fn join_frame_becomes_list_entry() {
        let frame =
            ServerFrame::parse(r#"{"type":"user_joined","username":"bo","content":"bo joined"}"#)
                .unwrap();
        let msg = frame.into_chat_message().unwrap();
        assert_eq!(msg.kind, MessageKind::UserJoined);
        assert_eq!(msg.username, "bo");
        assert_eq!(msg.content, "bo joined");
        assert_eq!(msg.id, None);
    }

    #[test]
    fn message_frame_keeps_file_url() {
        let frame = ServerFrame::parse(
            r#"{"type":"message","username":"c","content":"see","file_url":"/u/x.png","timestamp":"2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        let msg = frame.into_chat_message().unwrap();
        assert_eq!(msg.kind, MessageKind::Message);
        assert_eq!(msg.file_url.as_deref(), Some("/u/x.png"));
        assert_eq!(msg.timestamp, "2024-01-01T00:00:00");
    }

    #[test]
    fn null_fields_read_as_empty() {
        let frame = ServerFrame::parse(
            r#"{"type":"message","username":"a","content":"hi","timestamp":null,"file_url":null}"#,
        )
        .unwrap();
        let msg = frame.into_chat_message().unwrap();
        assert_eq!(msg.username, "a");
        assert_eq!(msg.content, "hi");
        assert_eq!(msg.timestamp, "");
        assert_eq!(msg.file_url, None);

        let left = ServerFrame::parse(r#"{"type":"user_left","username":"b","content":null}"#).unwrap();
        assert_eq!(left.into_chat_message().unwrap().content, "");
    }

    #[test]
    fn rejects_unknown_type_and_garbage() {
        assert!(ServerFrame::parse(r#"{"type":"reaction","username":"d"}"#).is_err());
        assert!(ServerFrame::parse("not json").is_err());
        assert!(ServerFrame::parse(r#"{"username":"no type"}"#).is_err());
    }

    #[test]
    fn outbound_frames_serialize_with_type_tag() {
        let typing = ClientFrame::Typing.to_json().unwrap();
        assert_eq!(typing, r#"{"type":"typing"}"#);

        let plain = ClientFrame::Message { content: "hey".to_string(), file_url: None };
        assert_eq!(plain.to_json().unwrap(), r#"{"type":"message","content":"hey"}"#);

        let with_file = ClientFrame::Message {
            content: "pic".to_string(),
            file_url: Some("/u/p.png".to_string()),
        };
        let value: serde_json::Value = serde_json::from_str(&with_file.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "message");
        assert_eq!(value["file_url"], "/u/p.png");
    }
}
