use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use super::client::decode_messages;
use crate::common::MessageList;
use crate::error::{DisplayError, Result};

/// Blocking rendition of [`super::MessageClient`] for callers without a runtime.
///
/// Must not be driven from inside an async task; use `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct LegacyMessageClient {
    http: reqwest::blocking::Client,
}

impl LegacyMessageClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        // the blocking builder defaults to a 30s timeout, the page never had one
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DisplayError::Config(format!("cannot build http client: {err}")))?;
        Ok(Self { http })
    }

    pub fn fetch(&self, url: &Url) -> Result<MessageList> {
        log::info!("Requesting messages from {url} (legacy)");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|err| DisplayError::network(url.as_str(), &err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DisplayError::status(url.as_str(), status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|err| DisplayError::network(url.as_str(), &err))?;
        decode_messages(&body)
    }
}
