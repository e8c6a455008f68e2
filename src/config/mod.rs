//! Module: config
//!
//! Purpose: Serial line settings for the line editor and its log output.
//!
//! Everything here is consumed once, at bring-up, by the platform layer.
//! The interrupt path never reads configuration.

use crate::error::ConfigError;

/// Receive line buffer capacity. One slot is always kept free, so a line
/// holds at most `LINE_CAPACITY - 1` bytes.
pub const LINE_CAPACITY: usize = 64;

/// Number of UART ports on the target.
pub const UART_PORTS: u8 = 3;

/// Port taken by the log UART driver.
pub const LOG_UART_PORT: u8 = 1;

/// Highest baud rate accepted by [`SerialConfig::validate`].
pub const MAX_BAUD: u32 = 5_000_000;

/// Sent once with polled writes before the receive interrupt is enabled.
pub const BANNER: &[u8] = b"UART Echo Ready\r\n";

/// Serial line settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    /// UART port driven by the line editor.
    pub port: u8,
    pub baud_rate: u32,
    pub tx_pin: u8,
    pub rx_pin: u8,
    /// TX pin of the log UART.
    pub log_tx_pin: u8,
    pub log_baud_rate: u32,
}

impl SerialConfig {
    /// UART2 at 9600 8N1 on GPIO17/18, logs on GPIO6 at 115200.
    pub const DEFAULT: Self = Self {
        port: 2,
        baud_rate: 9600,
        tx_pin: 17,
        rx_pin: 18,
        log_tx_pin: 6, // GPIO6 - free on Quad flash boards
        log_baud_rate: 115_200,
    };

    /// Check the settings before any register is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port >= UART_PORTS {
            return Err(ConfigError::InvalidPort);
        }
        if self.port == LOG_UART_PORT {
            return Err(ConfigError::PortConflict);
        }
        for baud in [self.baud_rate, self.log_baud_rate] {
            if baud == 0 {
                return Err(ConfigError::ZeroBaud);
            }
            if baud > MAX_BAUD {
                return Err(ConfigError::BaudTooHigh);
            }
        }
        let pins = [self.tx_pin, self.rx_pin, self.log_tx_pin];
        if pins[0] == pins[1] || pins[0] == pins[2] || pins[1] == pins[2] {
            return Err(ConfigError::PinConflict);
        }
        Ok(())
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Settings used by the firmware.
pub const CONFIG: SerialConfig = SerialConfig::DEFAULT;
