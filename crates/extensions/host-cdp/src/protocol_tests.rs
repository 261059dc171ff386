use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: Some(serde_json::json!({"expression": "location.href"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Runtime.evaluate"));
    assert!(json.contains("\"sessionId\":\"S1\""));
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 1,
        method: "Page.enable".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"frameTree": {"frame": {"id": "F"}}}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
    assert!(resp.method.is_none());
}

#[test]
fn test_cdp_error_response_deserialize() {
    let json = r#"{"id": 3, "error": {"code": -32601, "message": "'Foo.bar' wasn't found"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32601);
    assert!(error.data.is_none());
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "Claude",
        "url": "https://claude.ai/chat/abc",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert!(info.is_tab());
}

#[test]
fn test_service_worker_is_not_a_tab() {
    let json = r#"{"id": "w1", "type": "service_worker", "title": "", "url": "https://claude.ai/sw.js"}"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert!(!info.is_tab());
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/131.0.6778.86",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/browser/xyz"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert!(version.browser.starts_with("Chrome"));
    assert!(version.web_socket_debugger_url.ends_with("xyz"));
}

#[test]
fn test_frame_navigated_top_level() {
    let json = r#"{"frame": {"id": "F1", "loaderId": "L", "url": "https://chatgpt.com/c/1"}}"#;
    let event: FrameNavigated = serde_json::from_str(json).unwrap();
    assert!(event.frame.parent_id.is_none());
    assert_eq!(event.frame.url, "https://chatgpt.com/c/1");
}

#[test]
fn test_script_reply_defaults() {
    let reply: ScriptReply = serde_json::from_str(r#"{"detached": true}"#).unwrap();
    assert!(reply.detached);
    assert!(reply.error.is_none());
    assert!(reply.value.is_null());
}
