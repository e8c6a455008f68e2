//! # UartLineEditor
//!
//! Interrupt-driven serial line editor with a fixed-size line buffer.
//!
//! ## Architecture
//!
//! ```text
//! UART IRQ ──▶ Dispatcher ──▶ LineEditor ──▶ UartRegisters
//!              (critical      (line buffer,   (status, RX/TX data,
//!               section)       TX staging)     TX interrupt enable)
//! ```
//!
//! - Every received byte is echoed; Enter answers CR LF
//! - Backspace/Delete erases the last byte on screen
//! - No allocation, no blocking, O(1) work per interrupt

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod diag;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod hal;
pub mod log_drain;
pub mod log_globals;
pub mod logging;

pub use config::{CONFIG, LINE_CAPACITY};
pub use diag::{DropCode, DropCounters};
pub use dispatch::{Dispatcher, Port};
pub use editor::{LineEditor, Service};
pub use error::{ConfigError, SetupError};
pub use hal::{Status, UartRegisters};
pub use log_globals::EDITOR_LOG;
