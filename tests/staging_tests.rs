//! Transmit staging buffer tests

use uart_line_editor::editor::{TxStaging, STAGING_CAPACITY};

#[test]
fn test_new_is_drained() {
    let mut tx = TxStaging::new();

    assert!(tx.is_drained());
    assert!(tx.pending().is_empty());
    assert_eq!(tx.next_byte(), None);
}

#[test]
fn test_drains_in_order() {
    let mut tx = TxStaging::new();
    tx.stage(b"\x08 \x08");

    assert_eq!(tx.pending(), b"\x08 \x08");
    assert_eq!(tx.next_byte(), Some(0x08));
    assert_eq!(tx.next_byte(), Some(b' '));
    assert!(!tx.is_drained());
    assert_eq!(tx.next_byte(), Some(0x08));
    assert!(tx.is_drained());
    assert_eq!(tx.next_byte(), None);
}

#[test]
fn test_stage_overwrites_and_rewinds() {
    let mut tx = TxStaging::new();
    tx.stage(b"\r\n");
    tx.next_byte();

    tx.stage(b"x");

    assert_eq!(tx.staged(), b"x");
    assert_eq!(tx.pending(), b"x");
}

#[test]
fn test_capacity_fits_every_response() {
    let mut tx = TxStaging::new();
    let longest = [b'.'; STAGING_CAPACITY];

    tx.stage(&longest);

    assert_eq!(tx.pending().len(), STAGING_CAPACITY);
}
