//! Kineto rig firmware
//!
//! Firmware for the servo board (RP2040). Receives command bytes from the
//! remote over UART and plays the matching motion on two hobby servos.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kineto_drivers::servo::PwmServos;

use crate::config::{SERVO_CALIBRATION, SERVO_PERIOD_US};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// PWM clock divider: 125 MHz system clock down to 1 MHz, one count per µs
const PWM_DIVIDER: u8 = 125;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kineto rig firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    info!("UART initialized for remote link");

    // Arm on GPIO16 (slice 0 A), tip on GPIO17 (slice 0 B)
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = PWM_DIVIDER.into();
    pwm_config.top = (SERVO_PERIOD_US - 1) as u16;
    pwm_config.compare_a = 0;
    pwm_config.compare_b = 0;

    let pwm = Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_16, p.PIN_17, pwm_config);
    let (Some(arm), Some(tip)) = pwm.split() else {
        defmt::panic!("PWM slice 0 outputs unavailable");
    };
    let servos = PwmServos::with_period(arm, tip, SERVO_PERIOD_US);

    info!(
        "Servos initialized: arm rest {} µs, tip rest {} µs",
        SERVO_CALIBRATION.primary.rest_us, SERVO_CALIBRATION.secondary.rest_us
    );

    spawner.must_spawn(tasks::link_rx_task(rx));
    spawner.must_spawn(tasks::sequencer_task(servos));
    spawner.must_spawn(tasks::link_watch_task());

    info!("All tasks spawned, firmware running");
}
