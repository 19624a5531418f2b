use super::*;

fn sample_frame() -> Frame {
    Frame {
        id: "id-1".to_owned(),
        ts: 42,
        from: Some("cli".to_owned()),
        syscall: APP_COMMAND.to_owned(),
        data: serde_json::json!({
            "name": "edit",
            "params": {"gistId": "abc", "gistName": "foo"}
        }),
    }
}

#[test]
fn encode_decode_preserves_frame() {
    let frame = sample_frame();
    let text = encode_frame(&frame).expect("encode should succeed");
    let decoded = decode_frame(&text).expect("decode should succeed");
    assert_eq!(decoded, frame);
}

#[test]
fn decode_requires_syscall() {
    let err = decode_frame(r#"{"id":"x"}"#).expect_err("syscall is required");
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn decode_rejects_malformed_text() {
    assert!(decode_frame("not json").is_err());
}

#[test]
fn decode_fills_optional_fields() {
    let frame = decode_frame(r#"{"id":"x","syscall":"app.command"}"#)
        .expect("minimal frame should decode");
    assert_eq!(frame.from, None);
    assert_eq!(frame.ts, 0);
    assert_eq!(frame.data, serde_json::json!({}));
}

#[test]
fn request_frame_has_id_and_timestamp() {
    let frame = Frame::request("session:connected", serde_json::json!({}));
    assert!(!frame.id.is_empty());
    assert!(frame.ts > 0);
    assert_eq!(frame.syscall, SESSION_CONNECTED);
}

#[test]
fn request_frames_get_distinct_ids() {
    let a = Frame::request(APP_COMMAND, Value::Null);
    let b = Frame::request(APP_COMMAND, Value::Null);
    assert_ne!(a.id, b.id);
}

#[test]
fn with_from_sets_sender() {
    let frame = Frame::request(APP_COMMAND, Value::Null).with_from("cli");
    assert_eq!(frame.from.as_deref(), Some("cli"));
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn command_frame_uses_app_command_channel() {
    let frame = Frame::command(&Command::create()).expect("command frame");
    assert_eq!(frame.syscall, APP_COMMAND);
    assert_eq!(frame.data, serde_json::json!({"name": "create"}));
}

#[test]
fn edit_command_params_are_camel_case_on_the_wire() {
    let frame = Frame::command(&Command::edit("abc", "foo")).expect("command frame");
    assert_eq!(
        frame.data,
        serde_json::json!({"name": "edit", "params": {"gistId": "abc", "gistName": "foo"}})
    );
}

#[test]
fn command_payload_decodes_back() {
    let command: Command = serde_json::from_value(sample_frame().data).expect("command payload");
    assert_eq!(command, Command::edit("abc", "foo"));
}

#[test]
fn create_intent() {
    assert_eq!(Command::create().intent(), Ok(Intent::Create));
}

#[test]
fn edit_intent_carries_gist_coordinates() {
    assert_eq!(
        Command::edit("abc", "foo").intent(),
        Ok(Intent::Edit { gist_id: "abc".to_owned(), gist_name: "foo".to_owned() })
    );
}

#[test]
fn edit_without_params_is_rejected() {
    let command = Command { name: "edit".to_owned(), params: None };
    assert_eq!(command.intent(), Err(CommandError::MissingParams("edit")));
}

#[test]
fn unknown_command_name_is_rejected() {
    let command = Command { name: "delete".to_owned(), params: None };
    assert_eq!(command.intent(), Err(CommandError::Unknown("delete".to_owned())));
}

#[test]
fn create_ignores_stray_params() {
    let command = Command {
        name: "create".to_owned(),
        params: Some(GistParams { gist_id: "abc".to_owned(), gist_name: "foo".to_owned() }),
    };
    assert_eq!(command.intent(), Ok(Intent::Create));
}
