use std::cell::Cell;

use super::*;
use frames::APP_COMMAND;

fn counting_handler(count: &Rc<Cell<usize>>) -> Handler {
    let count = Rc::clone(count);
    Rc::new(move |_: &Value| count.set(count.get() + 1))
}

#[test]
fn registry_starts_empty() {
    let registry = HandlerRegistry::default();
    assert!(registry.handler(APP_COMMAND).is_none());
}

#[test]
fn re_registering_a_channel_replaces_the_handler() {
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let mut registry = HandlerRegistry::default();

    registry.register_handlers([(APP_COMMAND, counting_handler(&first))]);
    registry.register_handlers([(APP_COMMAND, counting_handler(&second))]);

    let handler = registry.handler(APP_COMMAND).expect("handler registered");
    handler(&Value::Null);
    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn dispatch_routes_by_channel_name() {
    let count = Rc::new(Cell::new(0));
    register_handlers([(APP_COMMAND, counting_handler(&count))]);

    let frame = Frame::command(&frames::Command::create()).expect("frame");
    assert!(dispatch(&frame));
    assert_eq!(count.get(), 1);

    let other = Frame::request("session:connected", serde_json::json!({}));
    assert!(!dispatch(&other));
    assert_eq!(count.get(), 1);
}

#[test]
fn dispatch_passes_frame_payload() {
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    register_handlers([(APP_COMMAND, Rc::new(move |data: &Value| *sink.borrow_mut() = Some(data.clone())) as Handler)]);

    let frame = Frame::command(&frames::Command::edit("abc", "foo")).expect("frame");
    dispatch(&frame);
    assert_eq!(seen.borrow().as_ref(), Some(&frame.data));
}

#[test]
fn handler_may_re_register_while_dispatching() {
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);
    register_handlers([(
        "test.reentrant",
        Rc::new(move |_: &Value| {
            let again = Rc::clone(&inner);
            register_handlers([("test.reentrant", Rc::new(move |_: &Value| again.set(again.get() + 10)) as Handler)]);
            inner.set(inner.get() + 1);
        }) as Handler,
    )]);

    let frame = Frame::request("test.reentrant", Value::Null);
    assert!(dispatch(&frame));
    assert!(dispatch(&frame));
    assert_eq!(count.get(), 11);
}
