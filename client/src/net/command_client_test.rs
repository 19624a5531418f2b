use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::net::rpc::Handler;
use frames::{APP_COMMAND, Command, Frame};

#[test]
fn backoff_doubles_up_to_cap() {
    assert_eq!(next_backoff(INITIAL_BACKOFF_MS), 2000);
    assert_eq!(next_backoff(4000), 8000);
    assert_eq!(next_backoff(8000), MAX_BACKOFF_MS);
    assert_eq!(next_backoff(MAX_BACKOFF_MS), MAX_BACKOFF_MS);
    assert_eq!(next_backoff(u32::MAX), MAX_BACKOFF_MS);
}

#[test]
fn ws_url_follows_page_scheme() {
    assert_eq!(ws_url("https://gist.local/gist", "gist.local"), "wss://gist.local/api/ws");
    assert_eq!(ws_url("http://127.0.0.1:3000/", "127.0.0.1:3000"), "ws://127.0.0.1:3000/api/ws");
}

fn count_commands() -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    rpc::register_handlers([(APP_COMMAND, Rc::new(move |_: &serde_json::Value| sink.set(sink.get() + 1)) as Handler)]);
    count
}

#[test]
fn request_frames_reach_the_registered_handler() {
    let count = count_commands();
    let frame = Frame::command(&Command::create()).expect("frame");
    let text = frames::encode_frame(&frame).expect("encode");

    assert!(handle_text(&text));
    assert_eq!(count.get(), 1);
}

#[test]
fn frames_on_unregistered_channels_are_not_consumed() {
    let count = count_commands();
    let frame = Frame::request("session:connected", serde_json::json!({"client_id": "c1"}));
    let text = frames::encode_frame(&frame).expect("encode");

    assert!(!handle_text(&text));
    assert_eq!(count.get(), 0);
}

#[test]
fn malformed_text_is_dropped() {
    let count = count_commands();
    assert!(!handle_text("{not json"));
    assert_eq!(count.get(), 0);
}
