//! line-echo - Main entry point
//!
//! On the ESP-IDF target:
//! 1. Bring up the log UART
//! 2. Configure the editor UART, send the banner with polled writes
//! 3. Install the editor, attach the interrupt, enable RX
//! 4. Idle loop: drain logs, report drops
//!
//! On a host, the same editor runs against a simulated UART fed from stdin;
//! the wire output goes to stdout and the logs to stderr.

#![cfg_attr(target_os = "espidf", no_std, no_main)]

#[cfg(target_os = "espidf")]
mod firmware {
    use core::ffi::c_void;
    use core::fmt::Write;

    use esp_idf_svc::hal::gpio::AnyOutputPin;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::sys as esp_idf_sys;

    use uart_line_editor::config::{SerialConfig, BANNER, CONFIG};
    use uart_line_editor::editor::write_blocking;
    use uart_line_editor::hal::esp32s3::{self, Esp32Uart};
    use uart_line_editor::log_drain::{drain_to, uart::init_log_uart};
    use uart_line_editor::{Dispatcher, DropCounters, LineEditor, Port, SetupError, EDITOR_LOG};

    static DROPS: DropCounters = DropCounters::new();
    static UART_PORT: Dispatcher<Esp32Uart> = Dispatcher::new();

    unsafe extern "C" fn uart_isr(_arg: *mut c_void) {
        UART_PORT.on_interrupt();
    }

    fn bring_up(config: &SerialConfig) -> Result<(), SetupError> {
        let mut regs = esp32s3::configure(config)?;
        write_blocking(&mut regs, BANNER);

        let editor = LineEditor::new()
            .with_diagnostics(&DROPS)
            .with_log(&EDITOR_LOG);
        UART_PORT.install(Port::new(editor, regs));

        esp32s3::attach_interrupt(config.port, uart_isr)?;
        UART_PORT.with_port(|port| port.regs.enable_receive_interrupt());
        Ok(())
    }

    fn halt() -> ! {
        loop {
            unsafe {
                esp_idf_sys::vTaskDelay(1000);
            }
        }
    }

    pub fn run() -> ! {
        if CONFIG.validate().is_err() {
            halt();
        }
        let Ok(peripherals) = Peripherals::take() else { halt() };

        // SAFETY: validate() keeps the log pin off the editor UART's pins
        let log_pin = unsafe { AnyOutputPin::new(CONFIG.log_tx_pin as i32) };
        let Ok(mut log_uart) = init_log_uart(peripherals.uart1, log_pin, &CONFIG) else { halt() };

        if let Err(err) = bring_up(&CONFIG) {
            let _ = write!(log_uart, "[ERROR] setup failed: {}\r\n", err);
            halt();
        }

        let mut reported = 0;
        loop {
            drain_to(&EDITOR_LOG, &mut log_uart);

            let drops = DROPS.snapshot();
            let total = drops.erase_at_start.wrapping_add(drops.line_full);
            if total != reported {
                let _ = write!(
                    log_uart,
                    "[INFO] drops: erase-at-start={} line-full={}\r\n",
                    drops.erase_at_start, drops.line_full
                );
                reported = total;
            }

            unsafe {
                esp_idf_sys::vTaskDelay(10);
            }
        }
    }
}

#[cfg(target_os = "espidf")]
#[no_mangle]
fn main() {
    esp_idf_svc::sys::link_patches();
    firmware::run();
}

#[cfg(not(target_os = "espidf"))]
fn main() -> std::io::Result<()> {
    use std::io::{Read, Write};

    use uart_line_editor::config::BANNER;
    use uart_line_editor::editor::write_blocking;
    use uart_line_editor::hal::sim::SimUart;
    use uart_line_editor::log_drain::drain_to;
    use uart_line_editor::{Dispatcher, DropCounters, LineEditor, Port, EDITOR_LOG};

    static DROPS: DropCounters = DropCounters::new();
    static UART_PORT: Dispatcher<SimUart> = Dispatcher::new();

    let mut regs = SimUart::new().with_auto_shift();
    write_blocking(&mut regs, BANNER);
    regs.shift_out();

    let editor = LineEditor::new()
        .with_diagnostics(&DROPS)
        .with_log(&EDITOR_LOG);
    UART_PORT.install(Port::new(editor, regs));

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut chunk = [0u8; 64];
    let mut last = 0u8;

    loop {
        // Forward what is already on the wire, then the logs.
        let wire = UART_PORT
            .with_port(|port| {
                let wire = port.regs.wire().to_vec();
                port.regs.clear_wire();
                wire
            })
            .unwrap_or_default();
        stdout.write_all(&wire)?;
        stdout.flush()?;

        let mut logs = String::new();
        drain_to(&EDITOR_LOG, &mut logs);
        eprint!("{}", logs);

        let n = stdin.read(&mut chunk)?;
        if n == 0 {
            break;
        }

        // Piped text ends lines with LF (or CR LF); the editor wants CR.
        UART_PORT.with_port(|port| {
            for &b in &chunk[..n] {
                match (last, b) {
                    (b'\r', b'\n') => {}
                    (_, b'\n') => {
                        port.regs.inject_byte(b'\r');
                    }
                    _ => {
                        port.regs.inject_byte(b);
                    }
                }
                last = b;
            }
        });

        // Service the interrupt line until the burst has been echoed.
        loop {
            let pending = UART_PORT
                .with_port(|port| port.regs.irq_pending())
                .unwrap_or(false);
            if pending && UART_PORT.on_interrupt().is_some_and(|s| !s.is_idle()) {
                continue;
            }
            let shifted = UART_PORT
                .with_port(|port| port.regs.shift_out().is_some())
                .unwrap_or(false);
            if !shifted {
                break;
            }
        }
    }

    let drops = DROPS.snapshot();
    eprintln!(
        "drops: erase-at-start={} line-full={}",
        drops.erase_at_start, drops.line_full
    );
    Ok(())
}
