use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("error getting messages from {url}: {reason}")]
    Retrieval {
        url: String,
        status: Option<u16>,
        reason: String,
    },
    #[error("malformed message data: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DisplayError {
    pub fn status(url: &str, status: u16) -> Self {
        DisplayError::Retrieval {
            url: url.to_string(),
            status: Some(status),
            reason: format!("response status {status}"),
        }
    }

    pub fn network(url: &str, err: &reqwest::Error) -> Self {
        DisplayError::Retrieval {
            url: url.to_string(),
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }

    /// Failures that reach the user as a notification rather than a startup error.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            DisplayError::Retrieval { .. } | DisplayError::Parse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DisplayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_url() {
        let err = DisplayError::status("http://localhost/messages/data", 500);
        let text = format!("{err}");
        assert!(text.contains("http://localhost/messages/data"));
        assert!(text.contains("500"));
        assert!(matches!(err, DisplayError::Retrieval { status: Some(500), .. }));
        assert!(err.is_user_visible());
    }

    #[test]
    fn config_errors_are_not_notified() {
        let err = DisplayError::Config("missing data-url".to_string());
        assert!(format!("{err}").contains("configuration error"));
        assert!(!err.is_user_visible());
    }
}
