//! Kineto remote firmware
//!
//! Firmware for the button board (STM32F042K6). Reads one push button
//! through its NC and NO contacts, classifies presses into gestures and
//! sends one command per gesture to the rig over UART.

#![no_std]
#![no_main]

mod channels;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::Pull;
use embassy_stm32::peripherals::USART2;
use embassy_stm32::usart::{self, Uart};
use {defmt_rtt as _, panic_probe as _};

use kineto_drivers::sense::{SenseConfig, SenseLines};

bind_interrupts!(struct Irqs {
    USART2 => usart::InterruptHandler<USART2>;
    EXTI0_1 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI0_1>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kineto remote firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // Setup UART for the rig link (PA2=TX, PA3=RX on F042K6)
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = 115200;

    let uart = match Uart::new(
        p.USART2,
        p.PA3, // RX
        p.PA2, // TX
        Irqs,
        p.DMA1_CH4,
        p.DMA1_CH5,
        uart_config,
    ) {
        Ok(uart) => uart,
        Err(e) => defmt::panic!("UART config rejected: {:?}", e),
    };

    let (tx, _rx) = uart.split();

    // Button contacts switch to GND (PA0=NC, PA1=NO); an open contact reads high
    let nc = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up, Irqs);
    let no = ExtiInput::new(p.PA1, p.EXTI1, Pull::Up, Irqs);
    let lines = SenseLines::new(nc, no, SenseConfig::default());

    spawner.must_spawn(tasks::edge_task(lines));
    spawner.must_spawn(tasks::gesture_task());
    spawner.must_spawn(tasks::link_tx_task(tx));

    info!("All tasks spawned");
}
