//! ESP32-S3 UART registers.
//!
//! The hot path (status, FIFO, interrupt enable) is plain volatile register
//! access. Bring-up goes through ESP-IDF without installing its UART driver,
//! so the interrupt belongs to us.

use core::ffi::c_void;
use core::ptr;

use esp_idf_svc::sys;

use super::uart::{Status, UartRegisters};
use crate::config::SerialConfig;
use crate::error::SetupError;

/// Register block base per port (UART0, UART1, UART2).
const UART_BASES: [usize; 3] = [0x6000_0000, 0x6001_0000, 0x6002_E000];

/// FIFO data register: read pops RX, write pushes TX.
const FIFO: usize = 0x00;
/// Interrupt Enable Register
const INT_ENA: usize = 0x0C;
/// Interrupt Clear Register
const INT_CLR: usize = 0x10;
/// Status Register
const STATUS: usize = 0x1C;

const INT_RXFIFO_FULL: u32 = 1 << 0;
const INT_TXFIFO_EMPTY: u32 = 1 << 1;

const STATUS_FIFO_CNT_MASK: u32 = 0x3FF;
const STATUS_TXFIFO_CNT_SHIFT: u32 = 16;
const TX_FIFO_DEPTH: u32 = 128;

/// Raise the RX interrupt on the first byte.
const RXFIFO_FULL_THRESH: u8 = 1;
/// Raise the TX interrupt only when the FIFO is empty.
const TXFIFO_EMPTY_THRESH: u8 = 1;

/// One UART's register block.
pub struct Esp32Uart {
    base: usize,
}

impl Esp32Uart {
    /// # Safety
    ///
    /// The caller must be the only user of this port's registers, and the
    /// ESP-IDF UART driver must not be installed on it.
    pub const unsafe fn new(port: u8) -> Self {
        Self { base: UART_BASES[port as usize] }
    }

    fn read(&self, reg: usize) -> u32 {
        unsafe { ptr::read_volatile((self.base + reg) as *const u32) }
    }

    fn write(&mut self, reg: usize, value: u32) {
        unsafe { ptr::write_volatile((self.base + reg) as *mut u32, value) }
    }

    /// Clear stale flags and let received bytes raise the interrupt.
    pub fn enable_receive_interrupt(&mut self) {
        self.write(INT_CLR, INT_RXFIFO_FULL | INT_TXFIFO_EMPTY);
        let ena = self.read(INT_ENA);
        self.write(INT_ENA, ena | INT_RXFIFO_FULL);
    }
}

impl UartRegisters for Esp32Uart {
    fn read_status(&mut self) -> Status {
        // Raw flags re-assert for as long as their FIFO condition holds.
        self.write(INT_CLR, INT_RXFIFO_FULL | INT_TXFIFO_EMPTY);

        let status = self.read(STATUS);
        let rx_count = status & STATUS_FIFO_CNT_MASK;
        let tx_count = (status >> STATUS_TXFIFO_CNT_SHIFT) & STATUS_FIFO_CNT_MASK;

        Status {
            rx_ready: rx_count != 0,
            tx_ready: tx_count < TX_FIFO_DEPTH,
        }
    }

    fn read_received_byte(&mut self) -> u8 {
        (self.read(FIFO) & 0xFF) as u8
    }

    fn write_transmit_byte(&mut self, b: u8) {
        self.write(FIFO, b as u32);
    }

    fn enable_transmit_interrupt(&mut self) {
        let ena = self.read(INT_ENA);
        self.write(INT_ENA, ena | INT_TXFIFO_EMPTY);
    }

    fn disable_transmit_interrupt(&mut self) {
        let ena = self.read(INT_ENA);
        self.write(INT_ENA, ena & !INT_TXFIFO_EMPTY);
    }
}

fn driver(err: sys::esp_err_t) -> Result<(), SetupError> {
    sys::EspError::convert(err).map_err(|e| SetupError::Driver(e.code()))
}

/// Clock, pins, baud and FIFO thresholds for `config.port`.
///
/// All interrupts are left disabled.
pub fn configure(config: &SerialConfig) -> Result<Esp32Uart, SetupError> {
    config.validate()?;
    let port = config.port as sys::uart_port_t;

    let uart_config = sys::uart_config_t {
        baud_rate: config.baud_rate as i32,
        data_bits: sys::uart_word_length_t_UART_DATA_8_BITS,
        parity: sys::uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: sys::uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: sys::uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    driver(unsafe { sys::uart_param_config(port, &uart_config) })?;

    driver(unsafe {
        sys::uart_set_pin(
            port,
            config.tx_pin as i32,
            config.rx_pin as i32,
            sys::UART_PIN_NO_CHANGE,
            sys::UART_PIN_NO_CHANGE,
        )
    })?;

    let intr_config = sys::uart_intr_config_t {
        intr_enable_mask: 0,
        rxfifo_full_thresh: RXFIFO_FULL_THRESH,
        txfifo_empty_intr_thresh: TXFIFO_EMPTY_THRESH,
        ..Default::default()
    };
    driver(unsafe { sys::uart_intr_config(port, &intr_config) })?;

    // SAFETY: validated port, no ESP-IDF driver installed on it
    Ok(unsafe { Esp32Uart::new(config.port) })
}

/// Route the port's interrupt source to `handler`.
pub fn attach_interrupt(
    port: u8,
    handler: unsafe extern "C" fn(*mut c_void),
) -> Result<(), SetupError> {
    let source = match port {
        0 => sys::periph_interrput_t_ETS_UART0_INTR_SOURCE,
        1 => sys::periph_interrput_t_ETS_UART1_INTR_SOURCE,
        _ => sys::periph_interrput_t_ETS_UART2_INTR_SOURCE,
    };

    let mut handle: sys::intr_handle_t = ptr::null_mut();
    let err = unsafe {
        sys::esp_intr_alloc(source as i32, 0, Some(handler), ptr::null_mut(), &mut handle)
    };
    sys::EspError::convert(err).map_err(|e| SetupError::InterruptAlloc(e.code()))
}
