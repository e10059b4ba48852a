//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::{cell::Cell, time::Duration};

use hellschreiber::{font, Clock, DirectCarrier, Pixel, ToneGenerator};

/// Advances by a fixed step on every read.
pub struct StepClock {
    now: Cell<Duration>,
    step: Duration,
}

impl StepClock {
    pub fn new(step: Duration) -> Self {
        Self { now: Cell::new(Duration::ZERO), step }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

#[derive(Debug, thiserror::Error)]
#[error("radio refused command")]
pub struct Refused;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Deviation(u32),
    Key(u32),
    Mute,
}

/// Records every call. Works as either kind of transmitter.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn keying(&self) -> Vec<Event> {
        self.events
            .iter()
            .copied()
            .filter(|event| !matches!(event, Event::Deviation(_)))
            .collect()
    }
}

impl DirectCarrier for Recorder {
    type Error = Refused;

    fn frequency_step(&self) -> f64 {
        61.03515625
    }

    fn set_frequency_deviation(&mut self, deviation_khz: f64) -> Result<(), Refused> {
        self.events.push(Event::Deviation(deviation_khz as u32));
        Ok(())
    }

    fn transmit_direct(&mut self, tuning_word: u32) -> Result<(), Refused> {
        self.events.push(Event::Key(tuning_word));
        Ok(())
    }

    fn standby(&mut self) -> Result<(), Refused> {
        self.events.push(Event::Mute);
        Ok(())
    }
}

impl ToneGenerator for Recorder {
    type Error = Refused;

    fn tone(&mut self, frequency_hz: u32) -> Result<(), Refused> {
        self.events.push(Event::Key(frequency_hz));
        Ok(())
    }

    fn no_tone(&mut self) -> Result<(), Refused> {
        self.events.push(Event::Mute);
        Ok(())
    }
}

/// What a recorder should see for `text`, one glyph after the other.
pub fn expected_keying(text: &[u8], tuning: u32) -> Vec<Event> {
    let mut events = Vec::new();
    for &code in text {
        let Ok(glyph) = font::encode(code) else {
            continue;
        };

        events.extend(glyph.pixels().map(|pixel| match pixel {
            Pixel::Key => Event::Key(tuning),
            Pixel::Mute => Event::Mute,
        }));
        events.push(Event::Mute);
    }
    events
}
