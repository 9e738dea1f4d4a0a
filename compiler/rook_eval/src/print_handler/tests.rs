use super::*;

#[test]
fn buffer_collects_lines() {
    let handler = buffer_handler();
    handler.println("first");
    handler.println("second");
    assert_eq!(handler.output(), "first\nsecond\n");

    handler.clear();
    assert_eq!(handler.output(), "");
}

#[test]
fn silent_and_stream_handlers_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.output(), "");
    assert_eq!(stderr_handler().output(), "");
}

#[test]
fn shared_handle_sees_same_buffer() {
    let handler = buffer_handler();
    let other = Arc::clone(&handler);
    other.println("via clone");
    assert_eq!(handler.output(), "via clone\n");
}
