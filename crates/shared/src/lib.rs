//! Shared types for the parley chat client: REST records, realtime frames,
//! and the client-side error type.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::*;
pub use models::*;
pub use protocol::*;
