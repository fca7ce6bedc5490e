use super::*;

#[test]
fn test_dispatch_resolves_pending_request() {
    let router = Router::default();
    let (tx, mut rx) = oneshot::channel();
    router.pending.lock().insert(1, PendingRequest { tx });

    router.dispatch(r#"{"id": 1, "result": {"value": 42}}"#);

    let result = rx.try_recv().unwrap().unwrap();
    assert_eq!(result["value"], 42);
    assert!(router.pending.lock().is_empty());
}

#[test]
fn test_dispatch_surfaces_protocol_error() {
    let router = Router::default();
    let (tx, mut rx) = oneshot::channel();
    router.pending.lock().insert(2, PendingRequest { tx });

    router.dispatch(r#"{"id": 2, "error": {"code": -32601, "message": "unknown method"}}"#);

    let result = rx.try_recv().unwrap();
    match result {
        Err(CdpError::Remote(err)) => {
            assert_eq!(err.code, -32601);
            assert_eq!(err.message, "unknown method");
        }
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[test]
fn test_dispatch_routes_events_by_session() {
    let router = Router::default();
    let mut rx = router.subscribe("S1");

    router.dispatch(
        r#"{"method": "Runtime.bindingCalled", "params": {"name": "n"}, "sessionId": "S1"}"#,
    );
    router.dispatch(
        r#"{"method": "Runtime.bindingCalled", "params": {"name": "n"}, "sessionId": "S2"}"#,
    );

    let event = rx.try_recv().unwrap();
    assert_eq!(event.event_name(), Some("Runtime.bindingCalled"));
    // The S2 event had no subscriber and was dropped.
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_dispatch_ignores_malformed_frames() {
    let router = Router::default();
    router.dispatch("not json at all");
    router.dispatch(r#"{"id": 99, "result": {}}"#);
}

#[test]
fn test_unsubscribe_closes_event_channel() {
    let router = Router::default();
    let mut rx = router.subscribe("S1");
    router.unsubscribe("S1");

    router.dispatch(r#"{"method": "Page.loadEventFired", "sessionId": "S1"}"#);

    assert!(rx.try_recv().is_err());
}
