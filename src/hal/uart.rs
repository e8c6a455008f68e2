//! UART register interface consumed by the line editor.
//!
//! Clock, pin and baud setup are done before an implementation is handed to
//! the editor. From then on none of these operations can fail.

/// Snapshot of the status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    /// A received byte is waiting.
    pub rx_ready: bool,
    /// The transmit register can take a byte.
    pub tx_ready: bool,
}

/// Register-level access to one UART.
pub trait UartRegisters {
    /// Sample the status flags.
    fn read_status(&mut self) -> Status;

    /// Read the received byte. Only valid after `rx_ready` was seen; the
    /// read clears `rx_ready`.
    fn read_received_byte(&mut self) -> u8;

    /// Load a byte for transmission. Only valid while `tx_ready`; the write
    /// clears `tx_ready` until the byte has left the shift register.
    fn write_transmit_byte(&mut self, b: u8);

    /// Let `tx_ready` raise the interrupt.
    fn enable_transmit_interrupt(&mut self);

    /// Stop `tx_ready` from raising the interrupt.
    fn disable_transmit_interrupt(&mut self);
}
