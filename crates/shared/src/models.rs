//! REST resource records exchanged with the chat API.

use serde::{Deserialize, Deserializer, Serialize};

/// Read a string field that the API may send as `null`.
pub(crate) fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

// --- Identity ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Body of `POST /register/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /token`, sent form-encoded. The API expects the email in
/// the `username` field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

// --- Servers & channels ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateServerRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub server_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateChannelRequest {
    pub name: String,
}

// --- Messages ---

/// Author of a stored message. History only guarantees the username.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageOwner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
}

/// A stored message as returned by `GET /channels/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    pub owner: MessageOwner,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

/// Kind of entry in a channel's message list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Message,
    UserJoined,
    UserLeft,
}

/// One entry in a channel's ordered message list, whether it came from
/// history or from the live socket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
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
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

impl From<HistoryRecord> for ChatMessage {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: Some(record.id),
            username: record.owner.username,
            content: record.content,
            timestamp: record.timestamp.unwrap_or_default(),
            file_url: record.file_url,
            kind: MessageKind::Message,
        }
    }
}

// --- Files ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    #[serde(alias = "url")]
    pub file_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_record_maps_to_message_entry() {
        let records: Vec<HistoryRecord> = serde_json::from_str(
            r#"[{"id":1,"owner":{"username":"a"},"content":"hi","timestamp":"T"}]"#,
        )
        .unwrap();

        let messages: Vec<ChatMessage> = records.into_iter().map(ChatMessage::from).collect();

        assert_eq!(
            messages,
            vec![ChatMessage {
                id: Some(1),
                username: "a".to_string(),
                content: "hi".to_string(),
                timestamp: "T".to_string(),
                file_url: None,
                kind: MessageKind::Message,
            }]
        );
    }

    #[test]
    fn history_without_timestamp_keeps_empty_string() {
        let record: HistoryRecord = serde_json::from_str(
            r#"{"id":3,"owner":{"id":1,"username":"b","email":"b@x"},"content":"x","timestamp":null,"file_url":"/f/1.png"}"#,
        )
        .unwrap();
        let message = ChatMessage::from(record);
        assert_eq!(message.timestamp, "");
        assert_eq!(message.file_url.as_deref(), Some("/f/1.png"));
    }

    #[test]
    fn history_owner_id_is_optional_and_kept_when_sent() {
        let record: HistoryRecord = serde_json::from_str(
            r#"{"id":4,"owner":{"id":9,"username":"c"},"content":null}"#,
        )
        .unwrap();
        assert_eq!(record.owner.id, Some(9));
        assert_eq!(ChatMessage::from(record).content, "");
    }

    #[test]
    fn upload_response_accepts_url_alias() {
        let resp: UploadResponse = serde_json::from_str(r#"{"url":"/uploads/a.txt"}"#).unwrap();
        assert_eq!(resp.file_url, "/uploads/a.txt");
    }
}
