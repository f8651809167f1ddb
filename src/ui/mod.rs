pub mod container;
pub mod markup;
pub mod notifier;
pub mod renderer;

pub use container::{Container, Element, HostPage};
pub use notifier::{ConsoleNotifier, Notifier, RecordingNotifier};
pub use renderer::{LegacyMessageRenderer, MessageRenderer, RenderSettings};
