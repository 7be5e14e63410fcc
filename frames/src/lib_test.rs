use super::*;
use prost::Message as _;

fn sample_frame() -> Frame {
    Frame {
        id: "id-1".to_owned(),
        ts: 42,
        event: "draw".to_owned(),
        data: serde_json::json!({
            "currentPoint": {"x": 10.0, "y": 10.5},
            "previousPoint": {"x": 0.0, "y": 0.0},
            "color": "#000",
            "tags": ["a", "b"],
            "ok": true,
            "nil": null
        }),
    }
}

#[test]
fn encode_decode_round_trip_preserves_frame() {
    let frame = sample_frame();
    let bytes = encode_frame(&frame);
    let decoded = decode_frame(&bytes).expect("decode should succeed");
    assert_eq!(decoded, frame);
}

#[test]
fn encode_frame_outputs_non_empty_binary() {
    let bytes = encode_frame(&sample_frame());
    assert!(!bytes.is_empty());
}

#[test]
fn decode_frame_rejects_malformed_bytes() {
    let err = decode_frame(&[0xff, 0x00, 0x01]).expect_err("bytes should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_frame_without_data_yields_empty_object() {
    let wire = WireFrame { id: "id-2".to_owned(), ts: 7, event: "joined".to_owned(), data: None };
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");

    let frame = decode_frame(&bytes).expect("decode");
    assert_eq!(frame.event, "joined");
    assert_eq!(frame.data, serde_json::json!({}));
}

#[test]
fn text_round_trip_preserves_frame() {
    let frame = sample_frame();
    let text = encode_text(&frame).expect("encode text");
    assert_eq!(decode_text(&text).expect("decode text"), frame);
}

#[test]
fn decode_text_accepts_minimal_browser_frame() {
    let frame = decode_text(r#"{"event":"board-cleared"}"#).expect("decode");
    assert_eq!(frame.event, "board-cleared");
    assert!(frame.id.is_empty());
    assert_eq!(frame.ts, 0);
    assert_eq!(frame.data, serde_json::json!({}));
}

#[test]
fn decode_text_rejects_garbage() {
    let err = decode_text("not json").expect_err("should fail");
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn frame_new_stamps_id_and_timestamp() {
    let a = Frame::new("joined", serde_json::json!({}));
    let b = Frame::new("joined", serde_json::json!({}));
    assert_ne!(a.id, b.id);
    assert!(a.ts > 0);
}

#[test]
fn proto_number_conversion_preserves_fractional_coordinates() {
    let value = serde_json::json!({"x": 123.25, "y": -4.5});
    let back = proto_to_json_value(&json_to_proto_value(&value));
    assert_eq!(back, value);
}
