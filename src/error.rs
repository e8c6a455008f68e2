//! Setup error types
//!
//! The running line editor has no failure modes. Everything here is raised
//! before the first interrupt is serviced.

/// Invalid serial configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// E01: Baud rate of zero
    ZeroBaud,
    /// E02: Baud rate above what the peripheral can divide down to
    BaudTooHigh,
    /// E03: Two signals assigned to the same pin
    PinConflict,
    /// E04: UART port number does not exist
    InvalidPort,
    /// E05: UART port already used by the log output
    PortConflict,
}

impl ConfigError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroBaud => "E01",
            Self::BaudTooHigh => "E02",
            Self::PinConflict => "E03",
            Self::InvalidPort => "E04",
            Self::PortConflict => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::ZeroBaud => "baud rate is zero",
            Self::BaudTooHigh => "baud rate too high",
            Self::PinConflict => "pin assigned twice",
            Self::InvalidPort => "no such UART port",
            Self::PortConflict => "UART port reserved for logs",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Peripheral bring-up failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// E10: Configuration rejected before touching hardware
    Config(ConfigError),
    /// E11: Driver call failed with the given platform error code
    Driver(i32),
    /// E12: Interrupt line could not be allocated
    InterruptAlloc(i32),
}

impl SetupError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E10",
            Self::Driver(_) => "E11",
            Self::InterruptAlloc(_) => "E12",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Config(inner) => inner.message(),
            Self::Driver(_) => "UART driver call failed",
            Self::InterruptAlloc(_) => "interrupt allocation failed",
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl core::fmt::Display for SetupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(inner) => write!(f, "{}: {}", self.code(), inner),
            Self::Driver(raw) | Self::InterruptAlloc(raw) => {
                write!(f, "{}: {} ({})", self.code(), self.message(), raw)
            }
        }
    }
}
