use super::*;

#[test]
fn test_request_serializes_session_scope() {
    let req = CdpRequest::new(
        7,
        "Runtime.evaluate",
        Some(serde_json::json!({"expression": "1 + 1"})),
        Some("SID1"),
    );
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Runtime.evaluate"));
    assert!(json.contains("\"sessionId\":\"SID1\""));
}

#[test]
fn test_request_skips_absent_fields() {
    let req = CdpRequest::new(1, "Target.getTargets", None, None);
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_envelope_reply_payload() {
    let json = r#"{"id": 1, "result": {"frameId": "abc"}}"#;
    let frame: CdpEnvelope = serde_json::from_str(json).unwrap();
    assert_eq!(frame.id, Some(1));
    assert!(frame.event_name().is_none());
    let value = frame.into_reply().unwrap();
    assert_eq!(value["frameId"], "abc");
}

#[test]
fn test_envelope_empty_reply_is_null() {
    let frame: CdpEnvelope = serde_json::from_str(r#"{"id": 4}"#).unwrap();
    assert_eq!(frame.into_reply().unwrap(), serde_json::Value::Null);
}

#[test]
fn test_envelope_event_fields() {
    let json = r#"{
        "method": "Runtime.bindingCalled",
        "params": {"name": "notify", "payload": "mutation"},
        "sessionId": "SID2"
    }"#;
    let frame: CdpEnvelope = serde_json::from_str(json).unwrap();
    assert_eq!(frame.id, None);
    assert_eq!(frame.event_name(), Some("Runtime.bindingCalled"));
    assert_eq!(frame.session_id.as_deref(), Some("SID2"));
}

#[test]
fn test_envelope_folds_remote_error() {
    let json = r#"{"id": 3, "error": {"code": -32000, "message": "Binding already exists"}}"#;
    let frame: CdpEnvelope = serde_json::from_str(json).unwrap();
    let err = frame.into_reply().unwrap_err();
    assert_eq!(err.code, -32000);
    assert_eq!(err.to_string(), "Binding already exists (code -32000)");
}

#[test]
fn test_page_descriptor_tolerates_extra_fields() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "Google Photos",
        "url": "https://photos.google.com/albums",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let page: PageDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(page.id, "page123");
    assert_eq!(page.url, "https://photos.google.com/albums");
}

#[test]
fn test_browser_info_pascal_case() {
    let json = r#"{
        "Browser": "Chrome/131.0.0.0",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let info: BrowserInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.browser, "Chrome/131.0.0.0");
    assert!(info.web_socket_debugger_url.starts_with("ws://"));
}
