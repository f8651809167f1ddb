pub mod client;
pub mod legacy;

pub use client::{MessageClient, decode_messages, resolve_source_url};
pub use legacy::LegacyMessageClient;
