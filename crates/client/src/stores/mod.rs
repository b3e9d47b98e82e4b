//! Client-side state for the active channel.

pub mod messages;
pub mod typing;

pub use messages::{Activation, ChannelFeed, Switch};
pub use typing::{typing_label, TypingSet, TYPING_TIMEOUT_MS};
