//! Global log stream instances.

use crate::logging::LogStream;

/// Log stream fed by the UART interrupt.
///
/// Single producer (the line editor inside the dispatcher), single consumer
/// (the idle-loop drain).
pub static EDITOR_LOG: LogStream = LogStream::new();
