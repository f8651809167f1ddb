use httpmock::Method::GET;
use httpmock::MockServer;
use message_display::DisplayError;
use message_display::common::RenderState;
use message_display::network::LegacyMessageClient;
use message_display::ui::{
    Container, Element, LegacyMessageRenderer, RecordingNotifier, RenderSettings,
};
use serde_json::json;

fn legacy_renderer_for(url: &str) -> LegacyMessageRenderer<Element, RecordingNotifier> {
    let container = Element::new("div")
        .with_attribute("data-url", url)
        .with_inner_html("previous");
    LegacyMessageRenderer::new(
        container,
        RecordingNotifier::new(),
        LegacyMessageClient::new(None).expect("client"),
        &RenderSettings::default(),
    )
    .expect("renderer")
}

#[test]
fn legacy_renderer_matches_async_output() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/messages/data");
        then.status(200).json_body(json!([
            {"username": "alice", "message": "hi", "timestamp": "2024-01-01T00:00:00Z"}
        ]));
    });

    let mut renderer = legacy_renderer_for(&server.url("/messages/data"));
    renderer.load_and_render().expect("render");

    assert_eq!(
        renderer.container().inner_html(),
        "<ul><li>alice: <b>hi</b>, (2024-01-01T00:00:00Z)</li></ul>"
    );
    assert_eq!(renderer.state(), RenderState::Rendered);
    mock.assert_calls(1);
}

#[test]
fn legacy_renderer_notifies_on_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/messages/data");
        then.status(404);
    });

    let mut renderer = legacy_renderer_for(&server.url("/messages/data"));
    let err = renderer.load_and_render().unwrap_err();

    assert!(matches!(
        err,
        DisplayError::Retrieval {
            status: Some(404),
            ..
        }
    ));
    assert_eq!(renderer.container().inner_html(), "previous");
    assert_eq!(renderer.notifier().count(), 1);
}

#[test]
fn legacy_renderer_requires_source_attribute() {
    let result = LegacyMessageRenderer::new(
        Element::new("div"),
        RecordingNotifier::new(),
        LegacyMessageClient::new(None).expect("client"),
        &RenderSettings::default(),
    );
    assert!(matches!(result, Err(DisplayError::Config(_))));
}
