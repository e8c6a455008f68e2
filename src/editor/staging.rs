//! Transmit staging buffer

use super::classify::STAGING_CAPACITY;

/// Bytes queued for the current reaction, drained one per TX interrupt.
///
/// Invariant: `cursor <= len <= STAGING_CAPACITY`.
pub struct TxStaging {
    bytes: [u8; STAGING_CAPACITY],
    len: u8,
    cursor: u8,
}

impl TxStaging {
    pub const fn new() -> Self {
        Self {
            bytes: [0; STAGING_CAPACITY],
            len: 0,
            cursor: 0,
        }
    }

    /// Replace the contents with `bytes` and rewind the cursor.
    ///
    /// Anything past [`STAGING_CAPACITY`] is cut off.
    pub fn stage(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= STAGING_CAPACITY, "response longer than staging buffer");
        let len = bytes.len().min(STAGING_CAPACITY);
        self.bytes[..len].copy_from_slice(&bytes[..len]);
        self.len = len as u8;
        self.cursor = 0;
    }

    /// Take the byte at the cursor, if any is left.
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        if self.is_drained() {
            return None;
        }
        let b = self.bytes[self.cursor as usize];
        self.cursor += 1;
        Some(b)
    }

    /// Nothing left to send.
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.cursor == self.len
    }

    /// Bytes still to send.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.bytes[self.cursor as usize..self.len as usize]
    }

    /// Everything staged by the last reaction, sent or not.
    #[inline]
    pub fn staged(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl Default for TxStaging {
    fn default() -> Self {
        Self::new()
    }
}
