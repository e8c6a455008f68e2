//! Log output for the idle loop.
//!
//! Drains [`LogStream`] entries into any `core::fmt::Write` sink. The
//! firmware sinks into a TX-only UART on a separate pin; the host binary
//! sinks into stderr.
//!
//! # Hardware Setup (firmware)
//!
//! ```text
//! ESP32-S3 GPIO6 (TX) ──────▶ USB-UART RX
//!                              └─▶ PC Serial Monitor
//! ```

use core::fmt::Write;

use crate::logging::{BufWriter, LogEntry, LogStream};

/// Size of the scratch buffer one formatted entry is rendered into.
pub const FORMAT_BUF_LEN: usize = 96;

/// Format log entry to bytes.
///
/// Format: `[stamp] LEVEL: message\r\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };

    let _ = write!(
        writer,
        "[{:10}] {}: {}\r\n",
        entry.stamp,
        entry.level.as_str(),
        entry.message()
    );

    writer.pos
}

/// Write every pending entry of `stream` to `out`.
///
/// If the stream dropped messages since the last report, a warning line with
/// the count is written after the entries and the counter is reset.
///
/// Returns the number of entries written.
pub fn drain_to<const N: usize, W: Write>(stream: &LogStream<N>, out: &mut W) -> usize {
    let mut format_buf = [0u8; FORMAT_BUF_LEN];
    let mut written = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut format_buf);
        // format_log_entry only ever emits UTF-8 (from_utf8 guarded upstream)
        let text = core::str::from_utf8(&format_buf[..len]).unwrap_or("");
        let _ = out.write_str(text);
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = write!(out, "[WARN] Dropped: {}\r\n", dropped);
        stream.reset_dropped();
    }

    written
}

/// TX-only log UART for the firmware.
#[cfg(all(target_os = "espidf", feature = "esp32s3"))]
pub mod uart {
    use esp_idf_svc::hal::gpio;
    use esp_idf_svc::hal::peripheral::Peripheral;
    use esp_idf_svc::hal::uart::{self, UartTxDriver};

    use crate::config::SerialConfig;

    /// `fmt::Write` adapter over the log UART.
    pub struct LogUart<'d>(pub UartTxDriver<'d>);

    impl core::fmt::Write for LogUart<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            self.0.write(s.as_bytes()).map(|_| ()).map_err(|_| core::fmt::Error)
        }
    }

    /// Initialize UART1 TX-only for logging output.
    pub fn init_log_uart<'d>(
        uart: impl Peripheral<P = uart::UART1> + 'd,
        tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
        config: &SerialConfig,
    ) -> Result<LogUart<'d>, esp_idf_svc::sys::EspError> {
        let uart_config = uart::config::Config::default()
            .baudrate(esp_idf_svc::hal::units::Hertz(config.log_baud_rate));

        UartTxDriver::new(
            uart,
            tx_pin,
            Option::<gpio::AnyIOPin>::None, // CTS
            Option::<gpio::AnyIOPin>::None, // RTS
            &uart_config,
        )
        .map(LogUart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MAX_MSG_LEN};

    fn entry(stamp: u32, level: LogLevel, text: &[u8]) -> LogEntry {
        let mut msg = [0u8; MAX_MSG_LEN];
        msg[..text.len()].copy_from_slice(text);
        LogEntry { stamp, level, len: text.len() as u8, msg }
    }

    #[test]
    fn test_format_log_entry() {
        let mut buf = [0u8; FORMAT_BUF_LEN];
        let len = format_log_entry(&entry(1234567, LogLevel::Info, b"Hello world"), &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert_eq!(formatted, "[   1234567] INFO: Hello world\r\n");
    }

    #[test]
    fn test_format_uses_len_not_buffer() {
        let mut e = entry(999, LogLevel::Error, b"TEST12345X");
        e.len = 5;

        let mut buf = [0u8; FORMAT_BUF_LEN];
        let len = format_log_entry(&e, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("TEST1"));
        assert!(!formatted.contains('X'));
    }

    #[test]
    fn test_drain_to_reports_drops() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Debug, b"a");
        stream.push(2, LogLevel::Debug, b"b");
        stream.push(3, LogLevel::Debug, b"c");

        let mut out = String::new();
        assert_eq!(drain_to(&stream, &mut out), 2);

        assert!(out.contains("DEBUG: a"));
        assert!(out.contains("DEBUG: b"));
        assert!(out.ends_with("[WARN] Dropped: 1\r\n"));
        assert_eq!(stream.dropped(), 0);
    }

    #[test]
    fn test_drain_empty_writes_nothing() {
        let stream = LogStream::<4>::new();
        let mut out = String::new();

        assert_eq!(drain_to(&stream, &mut out), 0);
        assert!(out.is_empty());
    }
}
