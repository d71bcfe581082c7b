//! Device Drivers - UART, timer, enumeration, TPM, display (P5-P7)

pub mod uart_driver;
pub mod timer_driver;
pub mod device_enumeration;
pub mod device_detect;
pub mod tpm_driver;
pub mod vga;
pub mod console;
pub mod console_vga;
