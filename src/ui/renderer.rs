use url::Url;

use super::container::{Container, DEFAULT_URL_ATTRIBUTE};
use super::markup::render_messages;
use super::notifier::Notifier;
use crate::common::{MessageList, Notification, RenderOutcome, RenderState};
use crate::error::{DisplayError, Result};
use crate::network::{LegacyMessageClient, MessageClient, resolve_source_url};

/// How a renderer reads its container and writes its output.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub url_attribute: String,
    pub base_url: Option<Url>,
    pub escape_html: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            url_attribute: DEFAULT_URL_ATTRIBUTE.to_string(),
            base_url: None,
            escape_html: true,
        }
    }
}

/// Container, notifier and state shared by both request mechanisms.
struct RenderTarget<C, N> {
    container: C,
    notifier: N,
    source: Url,
    escape_html: bool,
    state: RenderState,
}

impl<C: Container, N: Notifier> RenderTarget<C, N> {
    fn new(container: C, notifier: N, settings: &RenderSettings) -> Result<Self> {
        let raw = container
            .attribute(&settings.url_attribute)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                DisplayError::Config(format!(
                    "container has no \"{}\" attribute",
                    settings.url_attribute
                ))
            })?;
        let source = resolve_source_url(&raw, settings.base_url.as_ref())?;

        Ok(Self {
            container,
            notifier,
            source,
            escape_html: settings.escape_html,
            state: RenderState::Idle,
        })
    }

    fn begin(&mut self) {
        log::debug!("{:?} -> Pending ({})", self.state, self.source);
        self.state = RenderState::Pending;
    }

    fn finish(&mut self, fetched: Result<MessageList>) -> Result<RenderOutcome> {
        match fetched {
            Ok(messages) => {
                self.container
                    .set_inner_html(render_messages(&messages, self.escape_html));
                self.state = RenderState::Rendered;
                log::info!("Rendered {} messages from {}", messages.len(), self.source);
                Ok(if messages.is_empty() {
                    RenderOutcome::Empty
                } else {
                    RenderOutcome::Listed(messages.len())
                })
            }
            Err(err) => {
                self.state = RenderState::Failed;
                log::warn!("error getting messages: {err}");
                if err.is_user_visible() {
                    self.notifier.notify(Notification::new(alert_text(&err)));
                }
                Err(err)
            }
        }
    }
}

fn alert_text(err: &DisplayError) -> String {
    match err {
        DisplayError::Retrieval {
            status: Some(status),
            ..
        } => format!("error getting messages, response: {status}"),
        other => format!("error getting messages: {other}"),
    }
}

macro_rules! renderer_accessors {
    () => {
        pub fn source_url(&self) -> &Url {
            &self.target.source
        }

        pub fn state(&self) -> RenderState {
            self.target.state
        }

        pub fn container(&self) -> &C {
            &self.target.container
        }

        pub fn notifier(&self) -> &N {
            &self.target.notifier
        }

        pub fn into_parts(self) -> (C, N) {
            (self.target.container, self.target.notifier)
        }
    };
}

/// Loads the message list named by a container and writes it back into that container.
pub struct MessageRenderer<C, N> {
    target: RenderTarget<C, N>,
    client: MessageClient,
}

impl<C: Container, N: Notifier> MessageRenderer<C, N> {
    /// Fails fast when the container carries no usable source url.
    pub fn new(
        container: C,
        notifier: N,
        client: MessageClient,
        settings: &RenderSettings,
    ) -> Result<Self> {
        Ok(Self {
            target: RenderTarget::new(container, notifier, settings)?,
            client,
        })
    }

    /// One GET, then a single overwrite of the container on success.
    ///
    /// Failures notify once and leave the container as it was.
    pub async fn load_and_render(&mut self) -> Result<RenderOutcome> {
        self.target.begin();
        let fetched = self.client.fetch(&self.target.source).await;
        self.target.finish(fetched)
    }

    renderer_accessors!();
}

/// Same contract as [`MessageRenderer`] over a blocking request.
pub struct LegacyMessageRenderer<C, N> {
    target: RenderTarget<C, N>,
    client: LegacyMessageClient,
}

impl<C: Container, N: Notifier> LegacyMessageRenderer<C, N> {
    pub fn new(
        container: C,
        notifier: N,
        client: LegacyMessageClient,
        settings: &RenderSettings,
    ) -> Result<Self> {
        Ok(Self {
            target: RenderTarget::new(container, notifier, settings)?,
            client,
        })
    }

    pub fn load_and_render(&mut self) -> Result<RenderOutcome> {
        self.target.begin();
        let fetched = self.client.fetch(&self.target.source);
        self.target.finish(fetched)
    }

    renderer_accessors!();
}
