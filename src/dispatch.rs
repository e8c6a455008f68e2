//! Interrupt entry point.
//!
//! # Architecture
//!
//! ```text
//! UART IRQ ──▶ Dispatcher::on_interrupt ──▶ critical section
//!                                             └─▶ LineEditor::on_interrupt(&mut regs)
//! Idle loop ─▶ Dispatcher::with_port    ──▶ critical section (same lock)
//! ```
//!
//! The editor and its registers live together in one [`Port`] behind a
//! `critical_section::Mutex`. Every access, from the interrupt or from the
//! foreground, goes through a critical section, so the line index and the
//! staging cursor are never observed half-updated even where RX and TX
//! interrupts could preempt each other.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::config::LINE_CAPACITY;
use crate::editor::{LineEditor, Service};
use crate::hal::UartRegisters;

/// One editor bound to one UART.
pub struct Port<'a, R, const N: usize = LINE_CAPACITY> {
    pub editor: LineEditor<'a, N>,
    pub regs: R,
}

impl<'a, R: UartRegisters, const N: usize> Port<'a, R, N> {
    pub fn new(editor: LineEditor<'a, N>, regs: R) -> Self {
        Self { editor, regs }
    }

    /// Run the editor against the registers once.
    #[inline]
    pub fn service(&mut self) -> Service {
        self.editor.on_interrupt(&mut self.regs)
    }
}

/// Static home for the port serviced by the UART interrupt.
///
/// # Example
///
/// ```ignore
/// static UART_PORT: Dispatcher<Esp32Uart> = Dispatcher::new();
///
/// UART_PORT.install(Port::new(LineEditor::new(), regs));
///
/// extern "C" fn uart_isr(_: *mut c_void) {
///     UART_PORT.on_interrupt();
/// }
/// ```
pub struct Dispatcher<R, const N: usize = LINE_CAPACITY> {
    port: Mutex<RefCell<Option<Port<'static, R, N>>>>,
}

impl<R: UartRegisters, const N: usize> Dispatcher<R, N> {
    /// Dispatcher with no port installed.
    pub const fn new() -> Self {
        Self {
            port: Mutex::new(RefCell::new(None)),
        }
    }

    /// Install `port`, returning the one it replaces.
    ///
    /// Call before the receive interrupt is enabled.
    pub fn install(&self, port: Port<'static, R, N>) -> Option<Port<'static, R, N>> {
        critical_section::with(|cs| self.port.borrow_ref_mut(cs).replace(port))
    }

    /// Remove the port. Interrupts arriving afterwards are ignored.
    pub fn take(&self) -> Option<Port<'static, R, N>> {
        critical_section::with(|cs| self.port.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.port.borrow_ref(cs).is_some())
    }

    /// Interrupt entry: service the port exactly once.
    ///
    /// Returns `None` when no port is installed.
    #[inline]
    pub fn on_interrupt(&self) -> Option<Service> {
        critical_section::with(|cs| self.port.borrow_ref_mut(cs).as_mut().map(Port::service))
    }

    /// Run `f` on the port inside the critical section.
    ///
    /// Keep `f` short: the UART interrupt is held off while it runs.
    pub fn with_port<T>(&self, f: impl FnOnce(&mut Port<'static, R, N>) -> T) -> Option<T> {
        critical_section::with(|cs| self.port.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<R: UartRegisters, const N: usize> Default for Dispatcher<R, N> {
    fn default() -> Self {
        Self::new()
    }
}
