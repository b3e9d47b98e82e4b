//! Users currently typing in the active channel.
//!
//! Expiry is tracked as a min-heap of `(deadline, username)` entries next to
//! a map of each user's latest deadline. Refreshing a user pushes a new entry
//! and leaves the old one in the heap; it is skipped when drained because it
//! no longer matches the map. One timer drains the heap up to "now".

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// How long a typing indicator stays visible without a refresh.
pub const TYPING_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone, Default)]
pub struct TypingSet {
    deadlines: BTreeMap<String, u64>,
    queue: BinaryHeap<Reverse<(u64, String)>>,
}

impl TypingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `username` as typing at `now_ms`, replacing any pending expiry.
    pub fn touch(&mut self, username: &str, now_ms: u64) {
        let deadline = now_ms + TYPING_TIMEOUT_MS;
        self.deadlines.insert(username.to_string(), deadline);
        self.queue.push(Reverse((deadline, username.to_string())));
    }

    /// Drop every user whose deadline is at or before `now_ms`.
    /// Returns whether the visible set changed.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        while let Some(Reverse((deadline, _))) = self.queue.peek() {
            if *deadline > now_ms {
                break;
            }
            let Some(Reverse((deadline, username))) = self.queue.pop() else {
                break;
            };
            if self.deadlines.get(&username) == Some(&deadline) {
                self.deadlines.remove(&username);
                changed = true;
            }
        }
        changed
    }

    /// Earliest pending deadline, stale entries included.
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse((deadline, _))| *deadline)
    }

    pub fn has_expired(&self, now_ms: u64) -> bool {
        self.next_deadline().is_some_and(|d| d <= now_ms)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.deadlines.contains_key(username)
    }

    /// Typing users, sorted by name.
    pub fn users(&self) -> Vec<String> {
        self.deadlines.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
        self.queue.clear();
    }
}

/// "a is typing...", "a and b are typing...", "Several people are typing...".
pub fn typing_label(users: &[String]) -> Option<String> {
    match users {
        [] => None,
        [one] => Some(format!("{one} is typing...")),
        [a, b] => Some(format!("{a} and {b} are typing...")),
        _ => Some("Several people are typing...".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_expires_after_timeout() {
        let mut typing = TypingSet::new();
        typing.touch("u", 1_000);
        assert!(typing.contains("u"));

        assert!(!typing.expire(1_000 + TYPING_TIMEOUT_MS - 1));
        assert!(typing.contains("u"));

        assert!(typing.expire(1_000 + TYPING_TIMEOUT_MS + 1));
        assert!(!typing.contains("u"));
        assert!(typing.is_empty());
    }

    #[test]
    fn refresh_debounces_pending_removal() {
        let mut typing = TypingSet::new();
        typing.touch("u", 0);
        typing.touch("u", 2_000);

        // The first deadline passes but the refreshed one is still pending.
        assert!(!typing.expire(TYPING_TIMEOUT_MS + 1));
        assert!(typing.contains("u"));

        assert!(typing.expire(2_000 + TYPING_TIMEOUT_MS));
        assert!(!typing.contains("u"));
        assert_eq!(typing.next_deadline(), None);
    }

    #[test]
    fn users_expire_independently() {
        let mut typing = TypingSet::new();
        typing.touch("b", 0);
        typing.touch("a", 1_000);
        assert_eq!(typing.users(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(typing.next_deadline(), Some(TYPING_TIMEOUT_MS));

        typing.expire(TYPING_TIMEOUT_MS + 500);
        assert_eq!(typing.users(), vec!["a".to_string()]);
        assert!(!typing.has_expired(TYPING_TIMEOUT_MS + 500));
        assert!(typing.has_expired(1_000 + TYPING_TIMEOUT_MS));
    }

    #[test]
    fn labels_scale_with_count() {
        assert_eq!(typing_label(&[]), None);
        assert_eq!(typing_label(&["a".into()]).unwrap(), "a is typing...");
        assert_eq!(
            typing_label(&["a".into(), "b".into()]).unwrap(),
            "a and b are typing..."
        );
        assert_eq!(
            typing_label(&["a".into(), "b".into(), "c".into()]).unwrap(),
            "Several people are typing..."
        );
    }
}
