use serde_json::json;

use super::*;

#[test]
fn decodes_tagged_requests() {
    assert_eq!(
        ControlRequest::from_json(r#"{"type":"stop"}"#).unwrap(),
        ControlRequest::Stop
    );
    assert_eq!(
        ControlRequest::from_json(r#"{"type":"resize","width":800,"height":450}"#).unwrap(),
        ControlRequest::Resize {
            width: 800,
            height: 450
        }
    );
    let update =
        ControlRequest::from_json(r#"{"type":"updateSettings","config":{"waveSpeed":1.5}}"#)
            .unwrap();
    assert_eq!(
        update,
        ControlRequest::UpdateSettings {
            config: json!({ "waveSpeed": 1.5 })
        }
    );
    assert_eq!(update.kind(), "updateSettings");
}

#[test]
fn encodes_with_type_tag() {
    let s = ControlRequest::Resize {
        width: 10,
        height: 20,
    }
    .to_json()
    .unwrap();
    let v: Value = serde_json::from_str(&s).unwrap();
    assert_eq!(v, json!({ "type": "resize", "width": 10, "height": 20 }));
}

#[test]
fn rejects_unknown_or_malformed() {
    for raw in [
        r#"{"type":"init"}"#,
        r#"{"type":"resize","width":-1,"height":2}"#,
        r#"{"width":1}"#,
        "not json",
    ] {
        let err = ControlRequest::from_json(raw).unwrap_err();
        assert!(err.to_string().starts_with("config error:"), "{raw}");
    }
}
