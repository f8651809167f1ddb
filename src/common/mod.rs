pub mod events;
pub mod types;

pub use events::{Notification, RenderOutcome, RenderState};
pub use types::{Message, MessageList, Timestamp};
