//! Receive line buffer

use crate::config::LINE_CAPACITY;

/// Fixed-capacity receive buffer and its write index.
///
/// The index is the current line length and always stays in `0..N`; the
/// last slot is never filled by `push`, so there is always room for the
/// NUL marker written by `terminate`.
pub struct LineBuffer<const N: usize = LINE_CAPACITY> {
    buf: [u8; N],
    index: usize,
}

impl<const N: usize> LineBuffer<N> {
    const HAS_ROOM: () = assert!(N >= 2, "line buffer needs room for one byte and the terminator");

    /// Create empty buffer
    ///
    /// A capacity below 2 is rejected when the buffer type is instantiated:
    ///
    /// ```compile_fail
    /// let _line = uart_line_editor::editor::LineBuffer::<1>::new();
    /// ```
    pub const fn new() -> Self {
        let () = Self::HAS_ROOM;

        Self {
            buf: [0u8; N],
            index: 0,
        }
    }

    /// Store a byte at the index.
    ///
    /// Returns `false` (and stores nothing) when only the last slot is left.
    pub fn push(&mut self, c: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.buf[self.index] = c;
        self.index += 1;
        true
    }

    /// Remove last byte. Returns `false` on an empty line.
    pub fn erase(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// End the line: mark its end with NUL and reset the index.
    ///
    /// Content stays in place until overwritten by the next line.
    pub fn terminate(&mut self) {
        self.buf[self.index] = 0;
        self.index = 0;
    }

    /// Get line length (the write index)
    pub fn len(&self) -> usize {
        self.index
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    /// True when one slot is left and ordinary bytes are refused.
    pub fn is_full(&self) -> bool {
        self.index == N - 1
    }

    /// Usable capacity (one less than the storage size).
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Bytes of the line being typed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.index]
    }

    /// Bytes up to the first NUL marker.
    ///
    /// Right after Enter this is the line that was just completed. Partial
    /// input typed since then overwrites it from the front.
    pub fn terminated(&self) -> &[u8] {
        let end = self.buf.iter().position(|&b| b == 0).unwrap_or(N);
        &self.buf[..end]
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
