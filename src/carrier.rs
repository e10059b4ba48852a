//! Transmitters a Hell session can key.
//!
//! Radios that can put an unmodulated carrier on air implement
//! [`DirectCarrier`]; anything that can only make a tone implements
//! [`ToneGenerator`]. The scheduler talks to either one through [`Transmit`],
//! picked once when the session is built.

use std::fmt;

use crate::error::{Error, Result};

pub trait DirectCarrier {
    type Error: std::error::Error + 'static;

    /// Synthesizer resolution in Hz.
    fn frequency_step(&self) -> f64;

    fn set_frequency_deviation(&mut self, deviation_khz: f64) -> std::result::Result<(), Self::Error>;

    /// Puts an unmodulated carrier on air at `tuning_word` steps.
    fn transmit_direct(&mut self, tuning_word: u32) -> std::result::Result<(), Self::Error>;

    fn standby(&mut self) -> std::result::Result<(), Self::Error>;
}

pub trait ToneGenerator {
    type Error: std::error::Error + 'static;

    /// Highest pitch the generator can make, in Hz.
    fn max_frequency(&self) -> u32 {
        u32::MAX
    }

    fn tone(&mut self, frequency_hz: u32) -> std::result::Result<(), Self::Error>;

    fn no_tone(&mut self) -> std::result::Result<(), Self::Error>;
}

impl<P: DirectCarrier + ?Sized> DirectCarrier for &mut P {
    type Error = P::Error;

    fn frequency_step(&self) -> f64 {
        (**self).frequency_step()
    }

    fn set_frequency_deviation(&mut self, deviation_khz: f64) -> std::result::Result<(), Self::Error> {
        (**self).set_frequency_deviation(deviation_khz)
    }

    fn transmit_direct(&mut self, tuning_word: u32) -> std::result::Result<(), Self::Error> {
        (**self).transmit_direct(tuning_word)
    }

    fn standby(&mut self) -> std::result::Result<(), Self::Error> {
        (**self).standby()
    }
}

impl<G: ToneGenerator + ?Sized> ToneGenerator for &mut G {
    type Error = G::Error;

    fn max_frequency(&self) -> u32 {
        (**self).max_frequency()
    }

    fn tone(&mut self, frequency_hz: u32) -> std::result::Result<(), Self::Error> {
        (**self).tone(frequency_hz)
    }

    fn no_tone(&mut self) -> std::result::Result<(), Self::Error> {
        (**self).no_tone()
    }
}

/// Keying interface used by the scheduler.
pub trait Transmit {
    /// Whatever the transmitter needs to key the base frequency.
    type Tuning: Copy + fmt::Debug;
    type Error: std::error::Error + 'static;

    /// Resolves `base_frequency` and readies the transmitter for on/off keying.
    fn prepare(&mut self, base_frequency: f64) -> Result<Self::Tuning, Self::Error>;

    fn key(&mut self, tuning: Self::Tuning) -> std::result::Result<(), Self::Error>;

    fn mute(&mut self) -> std::result::Result<(), Self::Error>;
}

/// Keys an RF carrier directly. `base_frequency` is in MHz.
#[derive(Debug)]
pub struct Direct<P>(pub P);

impl<P: DirectCarrier> Direct<P> {
    pub fn tuning_word(&self, base_mhz: f64) -> Result<u32, P::Error> {
        let step = self.0.frequency_step();
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::InvalidConfig("frequency step must be positive"));
        }

        let word = (base_mhz * 1_000_000.0) / step;
        if word < 1.0 {
            return Err(Error::InvalidConfig("base frequency is below one frequency step"));
        }
        if word > u32::MAX as f64 {
            return Err(Error::InvalidConfig("tuning word does not fit in 32 bits"));
        }

        Ok(word as u32)
    }

    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: DirectCarrier> Transmit for Direct<P> {
    type Tuning = u32;
    type Error = P::Error;

    fn prepare(&mut self, base_frequency: f64) -> Result<u32, P::Error> {
        let word = self.tuning_word(base_frequency)?;

        // pure on/off keying, no FSK shift
        self.0.set_frequency_deviation(0.0).map_err(Error::Transmitter)?;

        Ok(word)
    }

    fn key(&mut self, tuning: u32) -> std::result::Result<(), P::Error> {
        self.0.transmit_direct(tuning)
    }

    fn mute(&mut self) -> std::result::Result<(), P::Error> {
        self.0.standby()
    }
}

/// Keys an audio tone. `base_frequency` is in Hz.
#[derive(Debug)]
pub struct Audio<G>(pub G);

impl<G> Audio<G> {
    pub fn into_inner(self) -> G {
        self.0
    }
}

impl<G: ToneGenerator> Transmit for Audio<G> {
    type Tuning = u32;
    type Error = G::Error;

    fn prepare(&mut self, base_frequency: f64) -> Result<u32, G::Error> {
        let hz = base_frequency.round();
        if hz < 1.0 || hz > self.0.max_frequency() as f64 {
            return Err(Error::InvalidConfig("tone frequency out of range"));
        }

        Ok(hz as u32)
    }

    fn key(&mut self, tuning: u32) -> std::result::Result<(), G::Error> {
        self.0.tone(tuning)
    }

    fn mute(&mut self) -> std::result::Result<(), G::Error> {
        self.0.no_tone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("deviation locked")]
    struct Locked;

    #[derive(Default)]
    struct Synth {
        deviation: Option<f64>,
        reject_deviation: bool,
    }

    impl DirectCarrier for Synth {
        type Error = Locked;

        fn frequency_step(&self) -> f64 {
            61.03515625
        }

        fn set_frequency_deviation(&mut self, deviation_khz: f64) -> std::result::Result<(), Locked> {
            if self.reject_deviation {
                return Err(Locked);
            }
            self.deviation = Some(deviation_khz);
            Ok(())
        }

        fn transmit_direct(&mut self, _tuning_word: u32) -> std::result::Result<(), Locked> {
            Ok(())
        }

        fn standby(&mut self) -> std::result::Result<(), Locked> {
            Ok(())
        }
    }

    #[test]
    fn tuning_word_from_step() {
        let mut direct = Direct(Synth::default());
        // 434 MHz at 61.03515625 Hz per step
        assert_eq!(direct.prepare(434.0).unwrap(), 7_110_656);
        assert_eq!(direct.0.deviation, Some(0.0));
    }

    #[test]
    fn deviation_failure_is_returned() {
        let mut direct = Direct(Synth { reject_deviation: true, ..Synth::default() });
        assert!(matches!(direct.prepare(434.0), Err(Error::Transmitter(Locked))));
    }

    #[test]
    fn oversized_tuning_word_is_rejected() {
        let direct = Direct(Synth::default());
        assert!(matches!(direct.tuning_word(1.0e6), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn sub_step_frequency_is_rejected() {
        let mut direct = Direct(Synth::default());
        // 50 Hz is less than one 61 Hz step
        assert!(matches!(direct.prepare(0.00005), Err(Error::InvalidConfig(_))));
        assert_eq!(direct.0.deviation, None);
        assert_eq!(direct.tuning_word(0.0001).unwrap(), 1);
    }

    #[derive(Default)]
    struct Buzzer;

    impl ToneGenerator for Buzzer {
        type Error = Locked;

        fn max_frequency(&self) -> u32 {
            u16::MAX as u32
        }

        fn tone(&mut self, _frequency_hz: u32) -> std::result::Result<(), Locked> {
            Ok(())
        }

        fn no_tone(&mut self) -> std::result::Result<(), Locked> {
            Ok(())
        }
    }

    #[test]
    fn tone_rounds_to_nearest_hz() {
        let mut audio = Audio(Buzzer);
        assert_eq!(audio.prepare(980.4).unwrap(), 980);
        assert_eq!(audio.prepare(980.6).unwrap(), 981);
        assert!(matches!(audio.prepare(0.4), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn tone_above_generator_range_is_rejected() {
        let mut audio = Audio(Buzzer);
        assert_eq!(audio.prepare(65535.0).unwrap(), 65535);
        assert!(matches!(audio.prepare(65536.0), Err(Error::InvalidConfig(_))));

        let mut borrowed = Buzzer;
        let mut audio = Audio(&mut borrowed);
        assert!(matches!(audio.prepare(100_000.0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn borrowed_transmitter_works() {
        let mut synth = Synth::default();
        let mut direct = Direct(&mut synth);
        direct.prepare(434.0).unwrap();
        assert_eq!(synth.deviation, Some(0.0));
    }
}
