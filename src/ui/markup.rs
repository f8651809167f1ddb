use crate::common::Message;

pub const NO_MESSAGES: &str = "No messages available.";

/// Render a message list as the container's inner HTML.
///
/// With `escape` off the fields are interpolated raw, matching the legacy page.
pub fn render_messages(messages: &[Message], escape: bool) -> String {
    if messages.is_empty() {
        return NO_MESSAGES.to_string();
    }

    let field = |text: &str| {
        if escape {
            escape_html(text)
        } else {
            text.to_string()
        }
    };

    let mut out = String::from("<ul>");
    for m in messages {
        out.push_str(&format!(
            "<li>{}: <b>{}</b>, ({})</li>",
            field(&m.username),
            field(&m.message),
            field(&m.timestamp.to_string())
        ));
    }
    out.push_str("</ul>");
    out
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Timestamp;

    fn msg(username: &str, message: &str, timestamp: Timestamp) -> Message {
        Message {
            username: username.to_string(),
            message: message.to_string(),
            timestamp,
        }
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(render_messages(&[], true), "No messages available.");
        assert_eq!(render_messages(&[], false), "No messages available.");
    }

    #[test]
    fn single_message_matches_page_format() {
        let list = vec![msg("alice", "hi", "2024-01-01T00:00:00Z".into())];
        assert_eq!(
            render_messages(&list, true),
            "<ul><li>alice: <b>hi</b>, (2024-01-01T00:00:00Z)</li></ul>"
        );
    }

    #[test]
    fn keeps_response_order() {
        let list = vec![
            msg("zed", "last?", Timestamp::from(3i64)),
            msg("amy", "first?", Timestamp::from(1i64)),
            msg("bob", "middle", Timestamp::from(2i64)),
        ];
        let html = render_messages(&list, true);

        assert_eq!(html.matches("<li>").count(), 3);
        let zed = html.find("zed").unwrap();
        let amy = html.find("amy").unwrap();
        let bob = html.find("bob").unwrap();
        assert!(zed < amy && amy < bob);
        assert!(html.contains("(3)"));
    }

    #[test]
    fn integral_float_timestamp_renders_without_fraction() {
        let timestamp: Timestamp = serde_json::from_str("1.0").unwrap();
        let list = vec![msg("a", "b", timestamp)];
        assert_eq!(render_messages(&list, true), "<ul><li>a: <b>b</b>, (1)</li></ul>");
    }

    #[test]
    fn escapes_untrusted_fields() {
        let list = vec![msg("<script>", "a & b", "\"now\"".into())];
        let html = render_messages(&list, true);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("(&quot;now&quot;)"));
    }

    #[test]
    fn raw_mode_injects_fields_verbatim() {
        let list = vec![msg("<i>eve</i>", "<b>loud</b>", "t".into())];
        assert_eq!(
            render_messages(&list, false),
            "<ul><li><i>eve</i>: <b><b>loud</b></b>, (t)</li></ul>"
        );
    }
}
