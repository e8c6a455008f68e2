//! Line buffer tests

use uart_line_editor::editor::LineBuffer;

#[test]
fn test_line_buffer_push() {
    let mut buf = LineBuffer::<64>::new();

    assert!(buf.push(b'h'));
    assert!(buf.push(b'e'));
    assert!(buf.push(b'l'));
    assert!(buf.push(b'p'));

    assert_eq!(buf.as_bytes(), b"help");
    assert_eq!(buf.len(), 4);
}

#[test]
fn test_line_buffer_erase() {
    let mut buf = LineBuffer::<64>::new();

    for &c in b"help" {
        buf.push(c);
    }
    assert!(buf.erase());
    assert!(buf.erase());

    assert_eq!(buf.as_bytes(), b"he");
}

#[test]
fn test_line_buffer_erase_empty() {
    let mut buf = LineBuffer::<64>::new();

    assert!(!buf.erase());
    assert!(buf.is_empty());
}

#[test]
fn test_line_buffer_keeps_last_slot_free() {
    let mut buf = LineBuffer::<8>::new();

    for c in b'a'..b'a' + 7 {
        assert!(buf.push(c));
    }
    assert!(buf.is_full());
    assert_eq!(buf.len(), buf.capacity());

    // Refused, index unchanged
    assert!(!buf.push(b'z'));
    assert!(!buf.push(b'z'));
    assert_eq!(buf.as_bytes(), b"abcdefg");
}

#[test]
fn test_terminate_marks_and_resets() {
    let mut buf = LineBuffer::<64>::new();

    for &c in b"show" {
        buf.push(c);
    }
    buf.terminate();

    assert!(buf.is_empty());
    assert_eq!(buf.terminated(), b"show");
}

#[test]
fn test_terminate_full_line() {
    let mut buf = LineBuffer::<4>::new();

    for &c in b"abc" {
        buf.push(c);
    }
    buf.terminate();

    assert_eq!(buf.terminated(), b"abc");
}

#[test]
fn test_next_line_overwrites_from_front() {
    let mut buf = LineBuffer::<64>::new();

    for &c in b"hello" {
        buf.push(c);
    }
    buf.terminate();
    buf.push(b'J');

    assert_eq!(buf.as_bytes(), b"J");
    assert_eq!(buf.terminated(), b"Jello");
}

#[test]
fn test_smallest_buffer_holds_one_byte() {
    const LINE: LineBuffer<2> = LineBuffer::new();
    let mut buf = LINE;

    assert_eq!(buf.capacity(), 1);
    assert!(buf.push(b'x'));
    assert!(buf.is_full());
    assert!(!buf.push(b'y'));

    buf.terminate();
    assert_eq!(buf.terminated(), b"x");
}
