use std::fmt;

use serde::{Deserialize, Serialize};

/// One display record as served by the message source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub username: String,
    pub message: String,
    pub timestamp: Timestamp,
}

/// The source sends either a preformatted string or a raw number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Text(text) => f.write_str(text),
            // integral floats print without a fraction, `1.0` shows as `1`
            Timestamp::Number(number) => match number.as_f64() {
                Some(value) if number.is_f64() && value.fract() == 0.0 && value.abs() < 1e21 => {
                    write!(f, "{:.0}", value + 0.0)
                }
                _ => write!(f, "{number}"),
            },
        }
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Timestamp::Text(value.to_string())
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Timestamp::Number(value.into())
    }
}

/// Response order is render order.
pub type MessageList = Vec<Message>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_and_numeric_timestamps() {
        let list: MessageList = serde_json::from_str(
            r#"[
                {"username":"alice","message":"hi","timestamp":"2024-01-01T00:00:00Z"},
                {"username":"bob","message":"yo","timestamp":1704067200},
                {"username":"carol","message":"hey","timestamp":1.5}
            ]"#,
        )
        .unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].timestamp.to_string(), "2024-01-01T00:00:00Z");
        assert_eq!(list[1].timestamp.to_string(), "1704067200");
        assert_eq!(list[2].timestamp.to_string(), "1.5");
    }

    #[test]
    fn integral_floats_drop_the_fraction() {
        let list: MessageList = serde_json::from_str(
            r#"[
                {"username":"a","message":"b","timestamp":1.0},
                {"username":"a","message":"b","timestamp":1704067200.0},
                {"username":"a","message":"b","timestamp":-0.0},
                {"username":"a","message":"b","timestamp":2.25}
            ]"#,
        )
        .unwrap();

        let shown: Vec<String> = list.iter().map(|m| m.timestamp.to_string()).collect();
        assert_eq!(shown, ["1", "1704067200", "0", "2.25"]);
    }

    #[test]
    fn rejects_records_missing_fields() {
        let result = serde_json::from_str::<MessageList>(r#"[{"username":"alice"}]"#);
        assert!(result.is_err());
    }
}
