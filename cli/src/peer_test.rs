use super::*;

#[test]
fn ws_url_from_http() {
    assert_eq!(ws_url("http://127.0.0.1:3000").unwrap(), "ws://127.0.0.1:3000/ws");
    assert_eq!(ws_url("http://localhost:3000/").unwrap(), "ws://localhost:3000/ws");
}

#[test]
fn ws_url_from_https() {
    assert_eq!(ws_url("https://draw.example.com").unwrap(), "wss://draw.example.com/ws");
}

#[test]
fn ws_url_passes_websocket_urls_through() {
    assert_eq!(ws_url("ws://host:1/ws").unwrap(), "ws://host:1/ws");
    assert_eq!(ws_url("wss://host").unwrap(), "wss://host/ws");
}

#[test]
fn ws_url_rejects_other_schemes() {
    assert!(matches!(ws_url("ftp://host"), Err(CliError::InvalidBaseUrl(_))));
    assert!(matches!(ws_url("127.0.0.1:3000"), Err(CliError::InvalidBaseUrl(_))));
}

#[test]
fn decode_binary_frame() {
    let frame = WsMessage::binary(Message::BoardCleared.to_binary());
    assert_eq!(decode_inbound(&frame).unwrap(), Some(Message::BoardCleared));
}

#[test]
fn decode_browser_text_frame() {
    let frame = WsMessage::text(
        r##"{"event":"draw","data":{"currentPoint":{"x":4,"y":5},"previousPoint":{"x":1,"y":2},"color":"#000"}}"##,
    );
    let Some(Message::Draw(segment)) = decode_inbound(&frame).unwrap() else {
        panic!("expected draw");
    };
    assert_eq!(segment.current_point, frames::Point::new(4.0, 5.0));
}

#[test]
fn decode_ignores_control_frames() {
    assert_eq!(decode_inbound(&WsMessage::Ping(Vec::new().into())).unwrap(), None);
}

#[test]
fn decode_reports_garbage() {
    assert!(decode_inbound(&WsMessage::text("not json")).is_err());
    assert!(decode_inbound(&WsMessage::binary(vec![0xff, 0xff, 0xff])).is_err());
}
