//! Simulated UART for host builds.
//!
//! Models the parts of the peripheral the editor depends on:
//!
//! - a receive FIFO; `rx_ready` while it holds bytes
//! - a one-byte transmit shift register; writing clears `tx_ready` until
//!   [`SimUart::shift_out`] moves the byte onto the wire
//! - the transmit-interrupt enable
//! - an interrupt line: `rx_ready`, or `tx_ready` with the TX interrupt on
//!
//! Contract breaches (reading with nothing received, writing while the
//! shift register is busy) are counted, not panicked on, so tests can
//! assert they never happen.

use super::uart::{Status, UartRegisters};
use crate::editor::LineEditor;

/// Receive FIFO depth.
pub const SIM_RX_FIFO: usize = 128;

/// Bytes of wire output kept.
pub const SIM_WIRE_LEN: usize = 1024;

/// Upper bound on steps taken by [`SimUart::run_until_idle`].
pub const MAX_IDLE_STEPS: usize = 16 * SIM_WIRE_LEN;

/// Host model of one UART.
pub struct SimUart {
    rx: [u8; SIM_RX_FIFO],
    rx_head: usize,
    rx_len: usize,

    /// Byte in the transmit shift register.
    shifting: Option<u8>,
    wire: [u8; SIM_WIRE_LEN],
    wire_len: usize,

    tx_irq_enabled: bool,
    /// Shift written bytes out on the next status read.
    auto_shift: bool,

    rx_overruns: u32,
    violations: u32,
}

impl SimUart {
    pub const fn new() -> Self {
        Self {
            rx: [0; SIM_RX_FIFO],
            rx_head: 0,
            rx_len: 0,
            shifting: None,
            wire: [0; SIM_WIRE_LEN],
            wire_len: 0,
            tx_irq_enabled: false,
            auto_shift: false,
            rx_overruns: 0,
            violations: 0,
        }
    }

    /// A line that drains instantly: every written byte is on the wire by
    /// the next status read. Suits polled drivers.
    pub const fn with_auto_shift(mut self) -> Self {
        self.auto_shift = true;
        self
    }

    /// Receive one byte from the line. Returns `false` on FIFO overrun.
    pub fn inject_byte(&mut self, b: u8) -> bool {
        if self.rx_len == SIM_RX_FIFO {
            self.rx_overruns += 1;
            return false;
        }
        let tail = (self.rx_head + self.rx_len) % SIM_RX_FIFO;
        self.rx[tail] = b;
        self.rx_len += 1;
        true
    }

    /// Receive a run of bytes back to back. Returns how many fit.
    pub fn inject(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().take_while(|&&b| self.inject_byte(b)).count()
    }

    /// Finish sending the byte in the shift register and put it on the wire.
    pub fn shift_out(&mut self) -> Option<u8> {
        let b = self.shifting.take()?;
        if self.wire_len < SIM_WIRE_LEN {
            self.wire[self.wire_len] = b;
            self.wire_len += 1;
        }
        Some(b)
    }

    /// State of the interrupt line.
    pub fn irq_pending(&self) -> bool {
        self.rx_len > 0 || (self.tx_irq_enabled && self.shifting.is_none())
    }

    /// Service interrupts and shift bytes out until the line is quiet.
    ///
    /// Each step either services the interrupt (when that makes progress)
    /// or lets the shift register finish its byte. Returns the number of
    /// steps taken, or `None` if the interrupt line stays asserted with
    /// nothing left to do (a spurious interrupt that never clears).
    pub fn run_until_idle<const N: usize>(&mut self, editor: &mut LineEditor<'_, N>) -> Option<usize> {
        for step in 0..MAX_IDLE_STEPS {
            if self.irq_pending() && !editor.on_interrupt(self).is_idle() {
                continue;
            }
            if self.shift_out().is_none() {
                return if self.irq_pending() { None } else { Some(step) };
            }
        }
        None
    }

    /// Everything sent so far.
    pub fn wire(&self) -> &[u8] {
        &self.wire[..self.wire_len]
    }

    pub fn clear_wire(&mut self) {
        self.wire_len = 0;
    }

    /// Bytes received but not yet read by the editor.
    pub fn rx_waiting(&self) -> usize {
        self.rx_len
    }

    pub fn tx_interrupt_enabled(&self) -> bool {
        self.tx_irq_enabled
    }

    /// Bytes lost because the receive FIFO was full.
    pub fn rx_overruns(&self) -> u32 {
        self.rx_overruns
    }

    /// Register accesses made outside their `Status` precondition.
    pub fn violations(&self) -> u32 {
        self.violations
    }
}

impl Default for SimUart {
    fn default() -> Self {
        Self::new()
    }
}

impl UartRegisters for SimUart {
    fn read_status(&mut self) -> Status {
        if self.auto_shift {
            self.shift_out();
        }
        Status {
            rx_ready: self.rx_len > 0,
            tx_ready: self.shifting.is_none(),
        }
    }

    fn read_received_byte(&mut self) -> u8 {
        if self.rx_len == 0 {
            self.violations += 1;
            return 0;
        }
        let b = self.rx[self.rx_head];
        self.rx_head = (self.rx_head + 1) % SIM_RX_FIFO;
        self.rx_len -= 1;
        b
    }

    fn write_transmit_byte(&mut self, b: u8) {
        if self.shifting.is_some() {
            self.violations += 1;
            self.shift_out();
        }
        self.shifting = Some(b);
    }

    fn enable_transmit_interrupt(&mut self) {
        self.tx_irq_enabled = true;
    }

    fn disable_transmit_interrupt(&mut self) {
        self.tx_irq_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order_and_overrun() {
        let mut uart = SimUart::new();

        assert_eq!(uart.inject(b"ab"), 2);
        assert!(uart.read_status().rx_ready);
        assert_eq!(uart.read_received_byte(), b'a');
        assert_eq!(uart.read_received_byte(), b'b');
        assert!(!uart.read_status().rx_ready);

        let flood = [b'z'; SIM_RX_FIFO + 3];
        assert_eq!(uart.inject(&flood), SIM_RX_FIFO);
        assert_eq!(uart.rx_overruns(), 1);
    }

    #[test]
    fn test_write_clears_tx_ready_until_shifted() {
        let mut uart = SimUart::new();

        assert!(uart.read_status().tx_ready);
        uart.write_transmit_byte(b'x');
        assert!(!uart.read_status().tx_ready);

        assert_eq!(uart.shift_out(), Some(b'x'));
        assert!(uart.read_status().tx_ready);
        assert_eq!(uart.wire(), b"x");
        assert_eq!(uart.violations(), 0);
    }

    #[test]
    fn test_contract_breaches_counted() {
        let mut uart = SimUart::new();

        uart.read_received_byte();
        uart.write_transmit_byte(b'1');
        uart.write_transmit_byte(b'2');

        assert_eq!(uart.violations(), 2);
    }

    #[test]
    fn test_irq_line() {
        let mut uart = SimUart::new();
        assert!(!uart.irq_pending());

        uart.enable_transmit_interrupt();
        assert!(uart.irq_pending());

        uart.write_transmit_byte(b'x');
        assert!(!uart.irq_pending());

        uart.disable_transmit_interrupt();
        uart.shift_out();
        assert!(!uart.irq_pending());

        uart.inject_byte(b'q');
        assert!(uart.irq_pending());
    }

    #[test]
    fn test_auto_shift() {
        let mut uart = SimUart::new().with_auto_shift();

        uart.write_transmit_byte(b'x');
        assert!(uart.read_status().tx_ready);
        assert_eq!(uart.wire(), b"x");
    }
}
