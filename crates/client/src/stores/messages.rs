//! Message list and typing state for the active channel.
//!
//! Every channel activation gets a new generation. Work started for an
//! activation (history fetch, socket) carries its [`Activation`] ticket, and
//! results presented with an outdated ticket are discarded.

use parley_shared::{ChatMessage, ServerFrame};

use super::typing::TypingSet;

/// Identifies one activation of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub channel_id: i64,
    pub generation: u64,
}

/// Outcome of selecting a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// Same channel as before; nothing to do.
    Unchanged,
    /// Selection cleared; prior state was discarded.
    Cleared,
    /// A new channel is active: fetch its history and open its socket.
    Activated(Activation),
}

#[derive(Debug, Clone, Default)]
pub struct ChannelFeed {
    channel_id: Option<i64>,
    generation: u64,
    messages: Vec<ChatMessage>,
    typing: TypingSet,
    history_loaded: bool,
}

impl ChannelFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `channel_id`, discarding the previous channel's messages and
    /// typing state when it differs.
    pub fn activate(&mut self, channel_id: Option<i64>) -> Switch {
        if channel_id == self.channel_id {
            return Switch::Unchanged;
        }

        self.generation += 1;
        self.channel_id = channel_id;
        self.messages.clear();
        self.typing.clear();
        self.history_loaded = false;

        match channel_id {
            Some(channel_id) => Switch::Activated(Activation {
                channel_id,
                generation: self.generation,
            }),
            None => Switch::Cleared,
        }
    }

    pub fn is_current(&self, ticket: Activation) -> bool {
        ticket.generation == self.generation && Some(ticket.channel_id) == self.channel_id
    }

    /// Install fetched history ahead of any live messages that arrived first.
    /// Returns `false` (and changes nothing) for a stale ticket.
    pub fn apply_history(&mut self, ticket: Activation, history: Vec<ChatMessage>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let live = std::mem::take(&mut self.messages);
        self.messages = history;
        self.messages.extend(live);
        self.history_loaded = true;
        true
    }

    /// Merge one inbound frame. Returns `false` for a stale ticket.
    pub fn apply_frame(&mut self, ticket: Activation, frame: ServerFrame, now_ms: u64) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match frame {
            ServerFrame::Typing { username } => {
                if !username.is_empty() {
                    self.typing.touch(&username, now_ms);
                }
            }
            other => {
                if let Some(message) = other.into_chat_message() {
                    self.messages.push(message);
                }
            }
        }
        true
    }

    /// Drop expired typing indicators. Returns whether any were removed.
    pub fn expire_typing(&mut self, now_ms: u64) -> bool {
        self.typing.expire(now_ms)
    }

    pub fn channel_id(&self) -> Option<i64> {
        self.channel_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn typing(&self) -> &TypingSet {
        &self.typing
    }

    pub fn is_loaded(&self) -> bool {
        self.history_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::typing::TYPING_TIMEOUT_MS;
    use parley_shared::{FrameBody, MessageKind};

    fn text(user: &str, content: &str) -> ServerFrame {
        ServerFrame::Message(FrameBody {
            username: user.to_string(),
            content: content.to_string(),
            ..FrameBody::default()
        })
    }

    fn entry(user: &str, content: &str) -> ChatMessage {
        text(user, content).into_chat_message().unwrap()
    }

    fn ticket(switch: Switch) -> Activation {
        match switch {
            Switch::Activated(ticket) => ticket,
            other => panic!("expected activation, got {other:?}"),
        }
    }

    #[test]
    fn switching_channel_discards_state_and_activates_once() {
        let mut feed = ChannelFeed::new();
        let first = ticket(feed.activate(Some(1)));
        feed.apply_frame(first, text("a", "hi"), 0);
        feed.apply_frame(first, ServerFrame::Typing { username: "a".into() }, 0);
        assert_eq!(feed.messages().len(), 1);
        assert!(feed.typing().contains("a"));

        let second = ticket(feed.activate(Some(2)));
        assert_eq!(second.channel_id, 2);
        assert_ne!(second.generation, first.generation);
        assert!(feed.messages().is_empty());
        assert!(feed.typing().is_empty());
        assert!(!feed.is_loaded());

        // Re-selecting the active channel starts nothing new.
        assert_eq!(feed.activate(Some(2)), Switch::Unchanged);
        assert_eq!(feed.generation(), second.generation);
    }

    #[test]
    fn stale_history_and_frames_are_ignored() {
        let mut feed = ChannelFeed::new();
        let old = ticket(feed.activate(Some(1)));
        let new = ticket(feed.activate(Some(2)));

        assert!(!feed.apply_history(old, vec![entry("x", "old")]));
        assert!(!feed.apply_frame(old, text("x", "late"), 0));
        assert!(feed.messages().is_empty());

        assert!(feed.apply_history(new, vec![entry("y", "fresh")]));
        assert_eq!(feed.messages()[0].content, "fresh");
        assert!(feed.is_loaded());
    }

    #[test]
    fn same_channel_reselected_after_clear_gets_new_generation() {
        let mut feed = ChannelFeed::new();
        let first = ticket(feed.activate(Some(1)));
        assert_eq!(feed.activate(None), Switch::Cleared);
        let again = ticket(feed.activate(Some(1)));
        assert!(!feed.is_current(first));
        assert!(feed.is_current(again));
    }

    #[test]
    fn history_precedes_live_messages_in_arrival_order() {
        let mut feed = ChannelFeed::new();
        let t = ticket(feed.activate(Some(9)));
        feed.apply_frame(t, text("b", "live-1"), 0);
        feed.apply_frame(
            t,
            ServerFrame::UserJoined(FrameBody {
                username: "c".into(),
                ..FrameBody::default()
            }),
            0,
        );
        feed.apply_history(t, vec![entry("a", "old")]);
        feed.apply_frame(t, text("b", "live-2"), 0);

        let contents: Vec<_> = feed.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["old", "live-1", "", "live-2"]);
        assert_eq!(feed.messages()[2].kind, MessageKind::UserJoined);
    }

    #[test]
    fn typing_frames_do_not_touch_the_list_and_expire() {
        let mut feed = ChannelFeed::new();
        let t = ticket(feed.activate(Some(3)));
        feed.apply_frame(t, ServerFrame::Typing { username: "u".into() }, 100);
        feed.apply_frame(t, ServerFrame::Typing { username: String::new() }, 100);
        assert!(feed.messages().is_empty());
        assert_eq!(feed.typing().users(), vec!["u".to_string()]);

        assert!(feed.expire_typing(100 + TYPING_TIMEOUT_MS + 1));
        assert!(feed.typing().is_empty());
    }
}
