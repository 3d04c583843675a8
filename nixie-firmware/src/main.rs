//! Nixie - Tube Chain Controller Firmware
//!
//! Main firmware binary for RP2040 boards driving a daisy chain of six
//! RGB-backlit nixie tube modules. A host writes text lines over UART0;
//! with no host the tubes cycle random digits.
//!
//! Board wiring:
//!
//! | Signal        | Pin              |
//! |---------------|------------------|
//! | Host TX / RX  | GPIO0 / GPIO1    |
//! | Chain data    | GPIO2            |
//! | Chain clock   | GPIO3            |
//! | Chain latch   | GPIO4            |
//! | Blanking PWM  | GPIO6 (PWM3 A)   |
//! | Noise source  | GPIO26 (ADC0)    |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nixie_core::attract::Lcg;
use nixie_core::Controller;
use nixie_drivers::ShiftChain;
use nixie_hal::UartConfig;
use nixie_hal_rp2040::{noise_seed, to_embassy_config, RpOutput, RpPwm, RpUartRx, RpUartTx};

mod config {
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}
mod control;

use config::CONFIG;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// UART ring buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Nixie firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");
    info!(
        "Config: {} baud, idle flush {}ms, attract every {}ms",
        CONFIG.serial.baudrate, CONFIG.framing.idle_flush_ms, CONFIG.attract.interval_ms
    );

    // Host link
    let uart_config = to_embassy_config(&UartConfig::new(CONFIG.serial.baudrate));
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let rx = RpUartRx::new(rx);
    let tx = RpUartTx::new(tx);

    info!("UART initialized for host link");

    // Seed the attract generator from a floating ADC input
    let mut adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let mut noise = Channel::new_pin(p.PIN_26, Pull::None);
    let seed = noise_seed(&mut adc, &mut noise).await;
    debug!("Attract seed {=u32:x}", seed);

    // Shift register chain
    let blanking = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, PwmConfig::default());
    let chain = ShiftChain::new(
        RpOutput::new(Output::new(p.PIN_2, Level::Low)),
        RpOutput::new(Output::new(p.PIN_3, Level::Low)),
        RpOutput::new(Output::new(p.PIN_4, Level::Low)),
        RpPwm::new(blanking),
        Delay,
    );

    info!("Tube chain initialized");

    let mut controller = Controller::new(CONFIG, chain, Lcg::new(seed));
    controller.boot(control::now_ms());

    info!("Boot frame shown, entering control loop");

    control::run(controller, rx, tx).await
}
