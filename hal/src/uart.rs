//! UART (Universal Asynchronous Receiver/Transmitter) abstraction
//!
//! The scheduler only ever transmits; there is no receive path.

use crate::error::HalResult;

/// UART data bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// UART stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

/// UART parity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// UART flow control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    RtsCts,
}

/// Default driver buffer size in bytes
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// UART configuration
#[derive(Debug, Clone)]
pub struct UartConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    pub parity: Parity,
    pub flow_control: FlowControl,
    /// Transmit buffer handed to the driver
    pub tx_buffer_size: usize,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            flow_control: FlowControl::None,
            tx_buffer_size: DEFAULT_BUFFER_SIZE * 2,
        }
    }
}

/// UART peripheral trait
pub trait UartPort: Send {
    /// Configure UART parameters
    fn configure(&mut self, config: &UartConfig) -> HalResult<()>;

    /// Queue data for transmission, returning the number of bytes accepted
    fn write(&mut self, data: &[u8]) -> HalResult<usize>;

    /// Flush TX buffer
    fn flush(&mut self) -> HalResult<()>;

    /// Queue a string for transmission
    fn write_str(&mut self, text: &str) -> HalResult<usize> {
        self.write(text.as_bytes())
    }
}

impl<U: UartPort + ?Sized> UartPort for &mut U {
    fn configure(&mut self, config: &UartConfig) -> HalResult<()> {
        (**self).configure(config)
    }

    fn write(&mut self, data: &[u8]) -> HalResult<usize> {
        (**self).write(data)
    }

    fn flush(&mut self) -> HalResult<()> {
        (**self).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_9600_8n1() {
        let cfg = UartConfig::default();
        assert_eq!(cfg.baud_rate, 9600);
        assert_eq!(cfg.data_bits, DataBits::Eight);
        assert_eq!(cfg.parity, Parity::None);
        assert_eq!(cfg.stop_bits, StopBits::One);
        assert_eq!(cfg.flow_control, FlowControl::None);
        assert_eq!(cfg.tx_buffer_size, 2048);
    }
}
