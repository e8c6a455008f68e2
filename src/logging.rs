//! Interrupt-safe logging for the line editor.
//!
//! # Architecture
//!
//! ```text
//! UART ISR               LogStream            Idle loop
//! ────────               ─────────            ─────────
//!
//! isr_log!() ─────────▶ [L0][L1][L2] ──────▶ log UART / stderr
//! non-blocking            lock-free           blocking ok
//! ```
//!
//! # Rules
//!
//! - The interrupt path never blocks on a log call
//! - The interrupt path never writes to a UART to log
//! - Messages are dropped (and counted) when the ring is full

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 64;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 32;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Producer-defined monotonic stamp (the editor uses its interrupt count).
    pub stamp: u32,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        stamp: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, or a placeholder if the bytes are not UTF-8.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Lock-free log stream (multiple producers, single consumer).
///
/// - Producers coordinate through an atomic `fetch_add` on the write index
/// - Push never blocks (drops message if full)
/// - Drain runs in the idle loop at leisure
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: Multiple producers (coordinated via atomics), single consumer (idle loop).
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry (never blocks).
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    /// Messages longer than [`MAX_MSG_LEN`] are truncated.
    #[inline]
    pub fn push(&self, stamp: u32, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.fetch_add(1, Ordering::AcqRel);
        let read = self.read_idx.load(Ordering::Acquire);

        // write is the PRE-increment value
        if write.wrapping_sub(read) >= N as u32 {
            // Give the slot back so the ring does not drift past the reader.
            self.write_idx.fetch_sub(1, Ordering::AcqRel);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: each producer owns the unique index handed out by fetch_add.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.stamp = stamp;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no entries available.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: single consumer, slot was published before write_idx moved
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Check if there are entries to drain.
    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Get number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written; output past the end is cut off.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Truncating `fmt::Write` over a byte slice.
pub(crate) struct BufWriter<'a> {
    pub(crate) buf: &'a mut [u8],
    pub(crate) pos: usize,
}

impl core::fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Interrupt-safe log macro.
///
/// # Example
///
/// ```ignore
/// isr_log!(LogLevel::Info, EDITOR_LOG, stamp, "line {} bytes", len);
/// ```
#[macro_export]
macro_rules! isr_log {
    ($level:expr, $stream:expr, $stamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($stamp, $level, &buf[..len]);
    }};
}

/// Interrupt-safe debug log.
#[macro_export]
macro_rules! isr_debug {
    ($stream:expr, $stamp:expr, $($arg:tt)*) => {
        $crate::isr_log!($crate::logging::LogLevel::Debug, $stream, $stamp, $($arg)*)
    };
}

/// Interrupt-safe trace log (maximum verbosity).
#[macro_export]
macro_rules! isr_trace {
    ($stream:expr, $stamp:expr, $($arg:tt)*) => {
        $crate::isr_log!($crate::logging::LogLevel::Trace, $stream, $stamp, $($arg)*)
    };
}
