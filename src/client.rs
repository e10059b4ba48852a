//! Text front end of a Hell session.
//!
//! Characters without a glyph are skipped rather than reported, the same way
//! a teleprinter ignores codes it cannot print.

use std::fmt;

use log::{trace, warn};

use crate::{
    carrier::{Audio, Direct, DirectCarrier, ToneGenerator, Transmit},
    clock::{Clock, MonotonicClock},
    error::Result,
    font,
    format::{self, DEFAULT_FLOAT_DIGITS},
    scheduler::{HellConfig, KeyingScheduler},
};

pub struct HellClient<T: Transmit, C = MonotonicClock> {
    scheduler: KeyingScheduler<T, C>,
}

impl<P: DirectCarrier> HellClient<Direct<P>> {
    /// Keys the RF carrier of `phy` directly.
    pub fn direct(phy: P) -> Self {
        Self::from_scheduler(KeyingScheduler::new(Direct(phy)))
    }
}

impl<G: ToneGenerator> HellClient<Audio<G>> {
    /// Keys an audio tone on `generator`, for use as a sub-carrier.
    pub fn audio(generator: G) -> Self {
        Self::from_scheduler(KeyingScheduler::new(Audio(generator)))
    }
}

impl<T: Transmit, C: Clock> HellClient<T, C> {
    pub fn from_scheduler(scheduler: KeyingScheduler<T, C>) -> Self {
        Self { scheduler }
    }

    /// See [`KeyingScheduler::setup`].
    pub fn setup(&mut self, base_frequency: f64, pixel_rate: f64) -> Result<(), T::Error> {
        self.scheduler.setup(base_frequency, pixel_rate)
    }

    pub fn configure(&mut self, config: &HellConfig) -> Result<(), T::Error> {
        self.scheduler.configure(config)
    }

    pub fn scheduler(&self) -> &KeyingScheduler<T, C> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut KeyingScheduler<T, C> {
        &mut self.scheduler
    }

    pub fn into_scheduler(self) -> KeyingScheduler<T, C> {
        self.scheduler
    }

    /// Sends a single character code. Returns 0 if it has no glyph.
    pub fn write_byte(&mut self, code: u8) -> Result<usize, T::Error> {
        match font::encode(code) {
            Ok(glyph) => self.scheduler.render_glyph(&glyph),
            Err(err) => {
                trace!("skipping {err}");
                Ok(0)
            }
        }
    }

    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, T::Error> {
        let mut n = 0;
        for &code in bytes {
            n += self.write_byte(code)?;
        }

        Ok(n)
    }

    pub fn print_str(&mut self, text: &str) -> Result<usize, T::Error> {
        self.write(text.as_bytes())
    }

    pub fn print_char(&mut self, c: char) -> Result<usize, T::Error> {
        match u8::try_from(c) {
            Ok(code) => self.write_byte(code),
            Err(_) => Ok(0),
        }
    }

    /// Prints `n` in `base`. Base 0 sends `n` as a raw character code.
    pub fn print_unsigned(&mut self, n: u64, base: u8) -> Result<usize, T::Error> {
        if base == 0 {
            return self.write_byte(n as u8);
        }

        self.write(&format::format_unsigned(n, base))
    }

    /// Prints `n` in `base`. Base 0 sends `n` as a raw character code.
    pub fn print_signed(&mut self, n: i64, base: u8) -> Result<usize, T::Error> {
        if base == 0 {
            return self.write_byte(n as u8);
        }

        self.write(&format::format_signed(n, base))
    }

    pub fn print_float(&mut self, number: f64, digits: u8) -> Result<usize, T::Error> {
        self.write(&format::format_float(number, digits))
    }

    pub fn print<P: Printable + ?Sized>(&mut self, value: &P) -> Result<usize, T::Error> {
        value.print_to(self)
    }

    /// Same as [`print`](Self::print). Hell has no line breaks, so the line
    /// ending sends nothing.
    pub fn println<P: Printable + ?Sized>(&mut self, value: &P) -> Result<usize, T::Error> {
        self.print(value)
    }
}

impl<T: Transmit, C: Clock> fmt::Write for HellClient<T, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print_str(s).map(|_| ()).map_err(|err| {
            warn!("hell transmission failed: {err}");
            fmt::Error
        })
    }
}

/// Values that can be printed with their default formatting.
///
/// Integers print in decimal, floats with [`DEFAULT_FLOAT_DIGITS`] fraction
/// digits.
pub trait Printable {
    fn print_to<T: Transmit, C: Clock>(&self, client: &mut HellClient<T, C>) -> Result<usize, T::Error>;
}

impl Printable for str {
    fn print_to<T: Transmit, C: Clock>(&self, client: &mut HellClient<T, C>) -> Result<usize, T::Error> {
        client.print_str(self)
    }
}

impl Printable for String {
    fn print_to<T: Transmit, C: Clock>(&self, client: &mut HellClient<T, C>) -> Result<usize, T::Error> {
        client.print_str(self)
    }
}

impl Printable for char {
    fn print_to<T: Transmit, C: Clock>(&self, client: &mut HellClient<T, C>) -> Result<usize, T::Error> {
        client.print_char(*self)
    }
}

macro_rules! printable_int {
    ($method:ident as $wide:ty: $($ty:ty),*) => {
        $(
            impl Printable for $ty {
                fn print_to<T: Transmit, C: Clock>(
                    &self,
                    client: &mut HellClient<T, C>,
                ) -> Result<usize, T::Error> {
                    client.$method(*self as $wide, 10)
                }
            }
        )*
    };
}

printable_int!(print_unsigned as u64: u8, u16, u32, u64, usize);
printable_int!(print_signed as i64: i8, i16, i32, i64, isize);

impl Printable for f32 {
    fn print_to<T: Transmit, C: Clock>(&self, client: &mut HellClient<T, C>) -> Result<usize, T::Error> {
        client.print_float(*self as f64, DEFAULT_FLOAT_DIGITS)
    }
}

impl Printable for f64 {
    fn print_to<T: Transmit, C: Clock>(&self, client: &mut HellClient<T, C>) -> Result<usize, T::Error> {
        client.print_float(*self, DEFAULT_FLOAT_DIGITS)
    }
}
