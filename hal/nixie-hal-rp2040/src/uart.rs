//! Buffered UART halves for the host link
//!
//! Reception is interrupt-driven into the embassy ring buffer; the control
//! loop drains it without awaiting. Replies are short and written blocking.

use embassy_rp::uart::{self, BufferedUartRx, BufferedUartTx};
use embedded_io::{Read, ReadReady, Write};
use nixie_core::traits::ReplySink;
use nixie_protocol::REPLY_TERMINATOR;
use nixie_hal::{UartConfig, UartRx, UartTx};

/// Build the embassy-rp configuration for a host link (8N1)
pub fn to_embassy_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = uart::DataBits::DataBits8;
    out.parity = uart::Parity::ParityNone;
    out.stop_bits = uart::StopBits::STOP1;
    out
}

/// Receive half
pub struct RpUartRx {
    rx: BufferedUartRx,
}

impl RpUartRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl UartRx for RpUartRx {
    type Error = uart::Error;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.rx.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        let n = self.rx.read(&mut byte)?;
        Ok((n == 1).then_some(byte[0]))
    }
}

/// Transmit half
pub struct RpUartTx {
    tx: BufferedUartTx,
}

impl RpUartTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for RpUartTx {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }
}

impl ReplySink for RpUartTx {
    fn send_line(&mut self, text: &str) {
        let sent = self
            .write_blocking(text.as_bytes())
            .and_then(|()| self.write_blocking(REPLY_TERMINATOR.as_bytes()));

        #[cfg(feature = "defmt")]
        if let Err(e) = sent {
            defmt::warn!("reply dropped: {:?}", e);
        }
        #[cfg(not(feature = "defmt"))]
        let _ = sent;
    }
}
