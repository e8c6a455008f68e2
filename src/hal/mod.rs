//! Hardware Abstraction Layer for the line editor.
//!
//! Thin register access. The editor logic stays in `editor`, the HAL is
//! just I/O.

pub mod uart;

#[cfg(not(target_os = "espidf"))]
pub mod sim;

#[cfg(all(target_os = "espidf", feature = "esp32s3"))]
pub mod esp32s3;

pub use uart::{Status, UartRegisters};
