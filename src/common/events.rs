use chrono::{DateTime, Utc};

/// Lifecycle of a single `load_and_render` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Pending,
    Rendered,
    Failed,
}

impl RenderState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RenderState::Rendered | RenderState::Failed)
    }
}

/// User-visible failure notice (the "alert").
#[derive(Debug, Clone)]
pub struct Notification {
    pub raised_at: DateTime<Utc>,
    pub message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            raised_at: Utc::now(),
            message: message.into(),
        }
    }
}

/// What a successful render wrote into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Empty,
    Listed(usize),
}
