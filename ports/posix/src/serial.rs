//! Serial console backed by any `Write` sink (stdout by default)

use std::io::{self, BufWriter, Write};

use grid_hal::{HalError, HalResult, UartConfig, UartPort};

/// Console standing in for the target's UART
///
/// Output is buffered up to the configured TX buffer size and pushed out at
/// every line end, which is where each scheduler message finishes.
pub struct SerialConsole<W: Write + Send> {
    writer: BufWriter<W>,
    config: UartConfig,
    bytes_written: u64,
}

impl SerialConsole<io::Stdout> {
    /// Console writing to the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> SerialConsole<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, UartConfig::default())
    }

    /// Console whose buffer matches `config.tx_buffer_size`
    pub fn with_config(writer: W, config: UartConfig) -> Self {
        Self {
            writer: BufWriter::with_capacity(config.tx_buffer_size.max(1), writer),
            config,
            bytes_written: 0,
        }
    }

    pub fn config(&self) -> &UartConfig {
        &self.config
    }

    /// Bytes accepted since creation
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Underlying sink; unflushed bytes are not visible here
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }
}

impl<W: Write + Send> UartPort for SerialConsole<W> {
    fn configure(&mut self, config: &UartConfig) -> HalResult<()> {
        if config.baud_rate == 0 {
            return Err(HalError::InvalidParameter);
        }
        if config.tx_buffer_size != self.config.tx_buffer_size {
            log::debug!(
                "console keeps its {} byte buffer, ignoring {}",
                self.writer.capacity(),
                config.tx_buffer_size
            );
        }
        self.config = config.clone();
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> HalResult<usize> {
        self.writer.write_all(data).map_err(io_error)?;
        self.bytes_written += data.len() as u64;
        if data.contains(&b'\n') {
            self.writer.flush().map_err(io_error)?;
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> HalResult<()> {
        self.writer.flush().map_err(io_error)
    }
}

fn io_error(err: io::Error) -> HalError {
    log::trace!("console i/o error: {}", err);
    HalError::HardwareError
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_flushed() {
        let mut console = SerialConsole::new(Vec::new());
        console.write(b"Task one").unwrap();
        assert!(console.get_ref().is_empty());

        console.write(b" running \n").unwrap();
        assert_eq!(console.get_ref().as_slice(), b"Task one running \n");
        assert_eq!(console.bytes_written(), 18);
    }

    #[test]
    fn test_configure_validates_baud() {
        let mut console = SerialConsole::new(Vec::new());
        let bad = UartConfig {
            baud_rate: 0,
            ..UartConfig::default()
        };
        assert_eq!(console.configure(&bad), Err(HalError::InvalidParameter));

        let fast = UartConfig {
            baud_rate: 115_200,
            ..UartConfig::default()
        };
        console.configure(&fast).unwrap();
        assert_eq!(console.config().baud_rate, 115_200);
    }

    #[test]
    fn test_write_str() {
        let mut console = SerialConsole::new(Vec::new());
        console.write_str("Burn time = 05s\n\n").unwrap();
        assert_eq!(console.get_ref().as_slice(), b"Burn time = 05s\n\n");
    }
}
