//! Byte classification and the per-byte reaction table.
//!
//! | Key     | Guard              | Reaction    | Response   |
//! |---------|--------------------|-------------|------------|
//! | Enter   | always             | `EndLine`   | CR LF      |
//! | Erase   | index > 0          | `EraseLast` | BS SP BS   |
//! | Erase   | index == 0         | `Drop`      | nothing    |
//! | Other   | index < capacity-1 | `Store`     | the byte   |
//! | Other   | index == capacity-1| `Drop`      | nothing    |
//!
//! Shared by the interrupt-driven editor and the polled driver.

use crate::diag::DropCode;

/// Carriage return: ends the line.
pub const CR: u8 = b'\r';
/// Backspace.
pub const BS: u8 = 0x08;
/// Delete, sent by most terminals for the backspace key.
pub const DEL: u8 = 0x7F;

/// Response to Enter.
pub const CRLF: &[u8] = b"\r\n";

/// Response to an erase: back up, blank the cell, back up again.
pub const ERASE_SEQUENCE: &[u8] = b"\x08 \x08";

/// Every control response the editor can stage. A new sequence must be
/// added here so [`STAGING_CAPACITY`] keeps covering it.
pub const CONTROL_RESPONSES: [&[u8]; 2] = [CRLF, ERASE_SEQUENCE];

/// Capacity of the transmit staging buffer: the longest response.
pub const STAGING_CAPACITY: usize = longest_response();

const fn longest_response() -> usize {
    // A plain echo is one byte.
    let mut max = 1;
    let mut i = 0;
    while i < CONTROL_RESPONSES.len() {
        if CONTROL_RESPONSES[i].len() > max {
            max = CONTROL_RESPONSES[i].len();
        }
        i += 1;
    }
    max
}

/// What a received byte means to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    /// Backspace or Delete.
    Erase,
    Other(u8),
}

/// Classify one received byte.
#[inline]
pub fn classify(c: u8) -> Key {
    match c {
        CR => Key::Enter,
        BS | DEL => Key::Erase,
        other => Key::Other(other),
    }
}

/// What the editor does with a classified byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Terminate the line, reset the index, respond CR LF.
    EndLine,
    /// Remove the last byte, respond with the erase sequence.
    EraseLast,
    /// Store the byte and echo it.
    Store(u8),
    /// Nothing stored, nothing sent.
    Drop(DropCode),
}

impl Reaction {
    /// Bytes to stage for transmission; empty for a drop.
    pub fn response(&self) -> Response {
        match *self {
            Reaction::EndLine => Response::Fixed(CRLF),
            Reaction::EraseLast => Response::Fixed(ERASE_SEQUENCE),
            Reaction::Store(c) => Response::Echo([c]),
            Reaction::Drop(_) => Response::Fixed(&[]),
        }
    }
}

/// Response bytes for one reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Fixed(&'static [u8]),
    Echo([u8; 1]),
}

impl Response {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Response::Fixed(bytes) => bytes,
            Response::Echo(byte) => byte,
        }
    }
}

/// Decide the reaction for `key` given the current line `index` and the
/// buffer `capacity`.
#[inline]
pub fn decide(key: Key, index: usize, capacity: usize) -> Reaction {
    match key {
        Key::Enter => Reaction::EndLine,
        Key::Erase if index > 0 => Reaction::EraseLast,
        Key::Erase => Reaction::Drop(DropCode::EraseAtStart),
        Key::Other(c) if index + 1 < capacity => Reaction::Store(c),
        Key::Other(_) => Reaction::Drop(DropCode::LineFull),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_capacity_is_longest_sequence() {
        assert_eq!(STAGING_CAPACITY, 3);
        assert_eq!(STAGING_CAPACITY, ERASE_SEQUENCE.len());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(b'\r'), Key::Enter);
        assert_eq!(classify(0x08), Key::Erase);
        assert_eq!(classify(0x7F), Key::Erase);
        assert_eq!(classify(b'\n'), Key::Other(b'\n'));
        assert_eq!(classify(b'a'), Key::Other(b'a'));
        assert_eq!(classify(0x00), Key::Other(0x00));
    }

    #[test]
    fn test_decide_table() {
        assert_eq!(decide(Key::Enter, 0, 64), Reaction::EndLine);
        assert_eq!(decide(Key::Enter, 63, 64), Reaction::EndLine);
        assert_eq!(decide(Key::Erase, 1, 64), Reaction::EraseLast);
        assert_eq!(decide(Key::Erase, 0, 64), Reaction::Drop(DropCode::EraseAtStart));
        assert_eq!(decide(Key::Other(b'x'), 62, 64), Reaction::Store(b'x'));
        assert_eq!(decide(Key::Other(b'x'), 63, 64), Reaction::Drop(DropCode::LineFull));
    }

    #[test]
    fn test_responses() {
        assert_eq!(Reaction::EndLine.response().as_bytes(), b"\r\n");
        assert_eq!(Reaction::EraseLast.response().as_bytes(), b"\x08 \x08");
        assert_eq!(Reaction::Store(b'q').response().as_bytes(), b"q");
        assert!(Reaction::Drop(DropCode::LineFull).response().as_bytes().is_empty());
    }
}
