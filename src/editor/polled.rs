//! Busy-wait driver sharing the editor's byte table.
//!
//! Used for the startup banner, before the receive interrupt is enabled,
//! and on boards where the UART is polled instead of interrupt driven.

use core::hint;

use super::machine::LineEditor;
use crate::hal::UartRegisters;

/// Send `bytes`, spinning on `tx_ready` before each one.
pub fn write_blocking<R: UartRegisters + ?Sized>(regs: &mut R, bytes: &[u8]) {
    for &b in bytes {
        while !regs.read_status().tx_ready {
            hint::spin_loop();
        }
        regs.write_transmit_byte(b);
    }
}

/// Wait for one byte, apply it to `editor`, and send the response.
///
/// Returns the received byte.
pub fn echo_once<R: UartRegisters + ?Sized, const N: usize>(
    regs: &mut R,
    editor: &mut LineEditor<'_, N>,
) -> u8 {
    while !regs.read_status().rx_ready {
        hint::spin_loop();
    }
    let c = regs.read_received_byte();
    let response = editor.feed(c);
    write_blocking(regs, response.as_bytes());
    c
}
