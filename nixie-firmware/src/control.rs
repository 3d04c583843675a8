//! Cooperative control loop
//!
//! One pass drains the UART ring buffer, gives the framer a chance to
//! flush a stalled line, advances the attract animation, then yields.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Instant;

use nixie_core::state::Mode;
use nixie_core::traits::{DigitSource, TubeDriver};
use nixie_core::{Controller, Dispatch};
use nixie_hal::UartRx;
use nixie_hal_rp2040::{RpUartRx, RpUartTx};

/// Milliseconds since boot, wrapping
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

pub async fn run<D, R>(mut controller: Controller<D, R>, mut rx: RpUartRx, mut tx: RpUartTx) -> !
where
    D: TubeDriver,
    R: DigitSource,
{
    let mut mode = controller.mode();

    loop {
        let now = now_ms();

        loop {
            match rx.try_read_byte() {
                Ok(Some(byte)) => {
                    if let Some(outcome) = controller.feed_byte(byte, now, &mut tx) {
                        log_dispatch(&outcome);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("UART read error: {:?}", e);
                    break;
                }
            }
        }

        if let Some(outcome) = controller.poll_idle(now, &mut tx) {
            trace!("Idle flush");
            log_dispatch(&outcome);
        }

        if controller.poll_attract(now) {
            trace!("Attract frame");
        }

        if controller.mode() != mode {
            log_mode_change(mode, controller.mode());
            mode = controller.mode();
        }

        yield_now().await;
    }
}

fn log_dispatch(outcome: &Dispatch) {
    match outcome {
        Dispatch::Updated(update) => debug!("Tube {}: {:?}", update.index, update),
        Dispatch::AttractResumed => debug!("Attract requested"),
        Dispatch::Probed => debug!("Probe answered"),
        Dispatch::Rejected(e) => warn!("Rejected N line: {:?}", e),
        Dispatch::Ignored => trace!("Unrecognized line dropped"),
        Dispatch::Overflow => warn!("Input line overflow, discarded"),
    }
}

fn log_mode_change(from: Mode, to: Mode) {
    info!("Mode {:?} -> {:?}", from, to);
}
