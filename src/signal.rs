//! Communicating with the custom ATTiny85 program over I2C to generate the Hell audio tone.

use rpi_embedded::i2c::{self, I2c};

use crate::carrier::ToneGenerator;

const GENERATOR_ADDR: u16 = 0x40;

const CMD_SILENCE: u8 = 0x00;
/// Followed by the frequency in Hz, little endian.
const CMD_TONE: u8 = 0x01;

pub struct SignalGenerator {
    i2c: I2c,
}

impl SignalGenerator {
    pub fn new() -> i2c::Result<Self> {
        let mut i2c = I2c::new()?;
        i2c.set_slave_address(GENERATOR_ADDR)?;

        Ok(Self {i2c})
    }

    fn command(&mut self, buf: &[u8]) -> i2c::Result<()> {
        self.i2c.write(buf)?;

        Ok(())
    }
}

impl ToneGenerator for SignalGenerator {
    type Error = i2c::Error;

    /// The ATTiny takes the pitch as a 16 bit count.
    fn max_frequency(&self) -> u32 {
        u16::MAX as u32
    }

    fn tone(&mut self, frequency_hz: u32) -> i2c::Result<()> {
        // setup already rejects anything above max_frequency
        let hz = u16::try_from(frequency_hz).unwrap_or(u16::MAX).to_le_bytes();
        self.command(&[CMD_TONE, hz[0], hz[1]])
    }

    fn no_tone(&mut self) -> i2c::Result<()> {
        self.command(&[CMD_SILENCE])
    }
}
