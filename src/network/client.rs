use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use crate::common::MessageList;
use crate::error::{DisplayError, Result};

/// Async reader for the message source.
#[derive(Debug, Clone)]
pub struct MessageClient {
    http: reqwest::Client,
}

impl MessageClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| DisplayError::Config(format!("cannot build http client: {err}")))?;
        Ok(Self { http })
    }

    /// One GET; anything but 200 is a retrieval failure.
    pub async fn fetch(&self, url: &Url) -> Result<MessageList> {
        log::info!("Requesting messages from {url}");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| DisplayError::network(url.as_str(), &err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DisplayError::status(url.as_str(), status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| DisplayError::network(url.as_str(), &err))?;
        decode_messages(&body)
    }
}

pub fn decode_messages(body: &str) -> Result<MessageList> {
    serde_json::from_str(body).map_err(|err| DisplayError::Parse(err.to_string()))
}

/// Resolve a container URL, which may be relative to the page it came from.
pub fn resolve_source_url(raw: &str, base: Option<&Url>) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DisplayError::Config("message source url is empty".to_string()));
    }

    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base.ok_or_else(|| {
                DisplayError::Config(format!(
                    "message source url \"{raw}\" is relative and no base url is configured"
                ))
            })?;
            base.join(raw)
                .map_err(|err| DisplayError::Config(format!("invalid source url \"{raw}\": {err}")))
        }
        Err(err) => Err(DisplayError::Config(format!(
            "invalid source url \"{raw}\": {err}"
        ))),
    }
}
