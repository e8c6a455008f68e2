//! Drop diagnostics for the line editor.
//!
//! The editor silently drops two kinds of input: an erase with nothing to
//! erase, and an ordinary byte when the line has one slot left. Neither
//! changes what goes out on the wire. These counters make the drops visible
//! to the foreground without touching serial behavior.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Why a received byte produced no output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DropCode {
    /// Nothing dropped yet.
    None = 0,

    /// Backspace/Delete with an empty line.
    EraseAtStart = 1,

    /// Ordinary byte with the line buffer at capacity.
    LineFull = 2,
}

impl DropCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => DropCode::EraseAtStart,
            2 => DropCode::LineFull,
            _ => DropCode::None,
        }
    }

    /// Short name for log output.
    pub fn as_str(self) -> &'static str {
        match self {
            DropCode::None => "none",
            DropCode::EraseAtStart => "erase-at-start",
            DropCode::LineFull => "line-full",
        }
    }
}

/// Interrupt-safe drop counters.
///
/// Written by the line editor from interrupt context, read by the idle loop.
///
/// # Usage
///
/// ```ignore
/// static DROPS: DropCounters = DropCounters::new();
///
/// let editor = LineEditor::new().with_diagnostics(&DROPS);
///
/// // In idle loop:
/// if DROPS.total() > reported {
///     report(DROPS.snapshot());
/// }
/// ```
pub struct DropCounters {
    erase_at_start: AtomicU32,
    line_full: AtomicU32,

    /// Most recent drop reason.
    last: AtomicU8,
}

impl DropCounters {
    /// Create zeroed counters.
    pub const fn new() -> Self {
        Self {
            erase_at_start: AtomicU32::new(0),
            line_full: AtomicU32::new(0),
            last: AtomicU8::new(DropCode::None as u8),
        }
    }

    /// Count one drop.
    #[inline]
    pub fn record(&self, code: DropCode) {
        match code {
            DropCode::None => return,
            DropCode::EraseAtStart => self.erase_at_start.fetch_add(1, Ordering::Relaxed),
            DropCode::LineFull => self.line_full.fetch_add(1, Ordering::Relaxed),
        };
        self.last.store(code as u8, Ordering::Release);
    }

    /// Drops recorded for `code` since boot.
    #[inline]
    pub fn count(&self, code: DropCode) -> u32 {
        match code {
            DropCode::None => 0,
            DropCode::EraseAtStart => self.erase_at_start.load(Ordering::Relaxed),
            DropCode::LineFull => self.line_full.load(Ordering::Relaxed),
        }
    }

    /// All drops since boot.
    #[inline]
    pub fn total(&self) -> u32 {
        self.count(DropCode::EraseAtStart)
            .wrapping_add(self.count(DropCode::LineFull))
    }

    /// Most recent drop reason.
    #[inline]
    pub fn last(&self) -> DropCode {
        DropCode::from_u8(self.last.load(Ordering::Acquire))
    }

    /// Forget the most recent reason. Counters are never reset.
    #[inline]
    pub fn clear_last(&self) {
        self.last.store(DropCode::None as u8, Ordering::Release);
    }

    /// Get a snapshot of the counters at a point in time.
    #[inline]
    pub fn snapshot(&self) -> DropSnapshot {
        DropSnapshot {
            erase_at_start: self.count(DropCode::EraseAtStart),
            line_full: self.count(DropCode::LineFull),
            last: self.last(),
        }
    }
}

impl Default for DropCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the drop counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropSnapshot {
    pub erase_at_start: u32,
    pub line_full: u32,
    pub last: DropCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_basic() {
        let drops = DropCounters::new();

        assert_eq!(drops.total(), 0);
        assert_eq!(drops.last(), DropCode::None);

        drops.record(DropCode::LineFull);

        assert_eq!(drops.count(DropCode::LineFull), 1);
        assert_eq!(drops.count(DropCode::EraseAtStart), 0);
        assert_eq!(drops.last(), DropCode::LineFull);

        drops.clear_last();

        assert_eq!(drops.last(), DropCode::None);
        assert_eq!(drops.total(), 1); // Count preserved
    }

    #[test]
    fn test_counts_accumulate() {
        let drops = DropCounters::new();

        drops.record(DropCode::EraseAtStart);
        drops.record(DropCode::EraseAtStart);
        drops.record(DropCode::LineFull);
        drops.record(DropCode::None);

        assert_eq!(
            drops.snapshot(),
            DropSnapshot { erase_at_start: 2, line_full: 1, last: DropCode::LineFull }
        );
        assert_eq!(drops.total(), 3);
    }

    #[test]
    fn test_from_u8_unknown_is_none() {
        assert_eq!(DropCode::from_u8(2), DropCode::LineFull);
        assert_eq!(DropCode::from_u8(200), DropCode::None);
    }
}
