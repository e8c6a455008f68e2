//! Line editor state machine driven from the UART interrupt.

use super::classify::{classify, decide, Reaction, Response};
use super::line_buffer::LineBuffer;
use super::staging::TxStaging;
use crate::config::LINE_CAPACITY;
use crate::diag::DropCounters;
use crate::hal::UartRegisters;
use crate::logging::LogStream;

/// What one interrupt invocation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Service {
    /// Byte taken from the receive register.
    pub received: Option<u8>,
    /// How that byte was handled.
    pub reaction: Option<Reaction>,
    /// Byte handed to the transmit register.
    pub transmitted: Option<u8>,
}

impl Service {
    /// Nothing was received or sent.
    pub fn is_idle(&self) -> bool {
        self.received.is_none() && self.transmitted.is_none()
    }
}

/// Echoing line editor for one UART.
///
/// Owns the receive line, the transmit staging buffer, and the interrupt
/// count. Diagnostics and logging are optional and borrowed.
///
/// # Contract
///
/// `on_interrupt` must not be re-entered. The [`Dispatcher`] enforces this
/// with a critical section; callers owning the editor directly get it from
/// `&mut self`.
///
/// [`Dispatcher`]: crate::dispatch::Dispatcher
pub struct LineEditor<'a, const N: usize = LINE_CAPACITY> {
    line: LineBuffer<N>,
    tx: TxStaging,
    serviced: u32,
    drops: Option<&'a DropCounters>,
    log: Option<&'a LogStream>,
}

impl<'a, const N: usize> LineEditor<'a, N> {
    /// Editor with an empty line and nothing to send.
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            tx: TxStaging::new(),
            serviced: 0,
            drops: None,
            log: None,
        }
    }

    /// Count silent drops in `drops`.
    pub fn with_diagnostics(mut self, drops: &'a DropCounters) -> Self {
        self.drops = Some(drops);
        self
    }

    /// Log drops and completed lines to `log`.
    pub fn with_log(mut self, log: &'a LogStream) -> Self {
        self.log = Some(log);
        self
    }

    /// Service one interrupt.
    ///
    /// 1. RX: if a byte is waiting and the previous response has been sent,
    ///    read it, apply it to the line and stage the response. Staging
    ///    anything enables the transmit interrupt.
    /// 2. TX: if the transmitter is ready and bytes are staged, send one.
    ///    Sending the last one disables the transmit interrupt.
    ///
    /// A byte that arrives while a response is still going out stays in the
    /// peripheral; `rx_ready` keeps the interrupt asserted, so it is taken on
    /// a later invocation once the staging buffer has drained.
    ///
    /// Until then every invocation with `rx_ready` set and the transmitter
    /// busy returns an idle [`Service`] and touches no data register. On a
    /// UART with a TX FIFO (the ESP32-S3 has 128 bytes) `tx_ready` stays set
    /// and the staged bytes go out in the same invocation, so this does not
    /// happen. On a single data register UART the handler re-enters until the
    /// shift register frees up, bounded by one character time per staged byte.
    pub fn on_interrupt<R: UartRegisters + ?Sized>(&mut self, regs: &mut R) -> Service {
        self.serviced = self.serviced.wrapping_add(1);

        let status = regs.read_status();
        let mut service = Service::default();

        if status.rx_ready && self.tx.is_drained() {
            let c = regs.read_received_byte();
            let reaction = self.apply(c);

            let response = reaction.response();
            if !response.as_bytes().is_empty() {
                self.tx.stage(response.as_bytes());
                regs.enable_transmit_interrupt();
            }

            service.received = Some(c);
            service.reaction = Some(reaction);
        }

        if status.tx_ready {
            if let Some(b) = self.tx.next_byte() {
                regs.write_transmit_byte(b);
                service.transmitted = Some(b);

                if self.tx.is_drained() {
                    regs.disable_transmit_interrupt();
                }
            }
        }

        service
    }

    /// Apply one byte synchronously and return the bytes to send.
    ///
    /// Same table as `on_interrupt`, for drivers that write the response
    /// themselves. Leaves the staging buffer untouched.
    pub fn feed(&mut self, c: u8) -> Response {
        self.apply(c).response()
    }

    /// Classify `c` and update the line.
    fn apply(&mut self, c: u8) -> Reaction {
        let reaction = decide(classify(c), self.line.len(), N);

        match reaction {
            Reaction::EndLine => {
                if let Some(log) = self.log {
                    crate::isr_trace!(log, self.serviced, "line done, {} bytes", self.line.len());
                }
                self.line.terminate();
            }
            Reaction::EraseLast => {
                self.line.erase();
            }
            Reaction::Store(c) => {
                self.line.push(c);
            }
            Reaction::Drop(code) => {
                if let Some(drops) = self.drops {
                    drops.record(code);
                }
                if let Some(log) = self.log {
                    crate::isr_debug!(log, self.serviced, "drop {:#04x}: {}", c, code.as_str());
                }
            }
        }

        reaction
    }

    /// Current write index into the line (its length).
    pub fn line_index(&self) -> usize {
        self.line.len()
    }

    /// The receive line.
    pub fn line(&self) -> &LineBuffer<N> {
        &self.line
    }

    /// Staged bytes not yet sent.
    pub fn tx_pending(&self) -> &[u8] {
        self.tx.pending()
    }

    /// True when nothing is waiting to be sent.
    pub fn tx_idle(&self) -> bool {
        self.tx.is_drained()
    }

    /// Interrupt invocations so far (wraps).
    pub fn serviced(&self) -> u32 {
        self.serviced
    }
}

impl<const N: usize> Default for LineEditor<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
