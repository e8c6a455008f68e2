//! Serial line editor
//!
//! Echo with line editing: Enter answers CR LF, Backspace/Delete erases the
//! last byte on screen. Zero heap allocation, fixed buffers only.

pub mod classify;
pub mod line_buffer;
pub mod machine;
pub mod polled;
pub mod staging;

pub use classify::{classify, decide, Key, Reaction, Response, STAGING_CAPACITY};
pub use line_buffer::LineBuffer;
pub use machine::{LineEditor, Service};
pub use polled::{echo_once, write_blocking};
pub use staging::TxStaging;
