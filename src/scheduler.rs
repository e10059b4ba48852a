//! Real-time keying of glyphs.
//!
//! Every pixel of a glyph is put on air for exactly one pixel duration. The
//! loop spins on a monotonic clock instead of sleeping, since a late wakeup
//! smears the received image. Each pixel's deadline is counted from a
//! timestamp taken right before it is keyed or muted, so a stall stretches
//! the pixel it hits and never eats into the ones after it.
//!
//! Nothing is logged while a glyph is on air. Late or failed pixels are
//! counted and reported once the carrier has been muted.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use log::{debug, warn};

use crate::{
    carrier::Transmit,
    clock::{Clock, MonotonicClock},
    error::{Error, Result},
    font::{Glyph, Pixel},
};

/// Pixel rate of standard Feld-Hell, in pixels per second.
pub const FELD_HELL_PIXEL_RATE: f64 = 122.5;

/// How far a pixel may overrun its deadline before it is counted as late.
pub const DEFAULT_JITTER_TOLERANCE: Duration = Duration::from_micros(250);

/// What to do when the transmitter rejects a key or mute command mid-glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FailurePolicy {
    /// Stop the glyph, mute, and return the error.
    #[default]
    Abort,
    /// Count the failure and keep going.
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HellConfig {
    /// Carrier frequency in MHz for direct keying, tone pitch in Hz for audio.
    pub base_frequency: f64,
    /// Pixels per second.
    pub pixel_rate: f64,
    pub jitter_tolerance: Duration,
    pub failure_policy: FailurePolicy,
}

impl HellConfig {
    pub fn new(base_frequency: f64, pixel_rate: f64) -> Self {
        Self {
            base_frequency,
            pixel_rate,
            jitter_tolerance: DEFAULT_JITTER_TOLERANCE,
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn feld_hell(base_frequency: f64) -> Self {
        Self::new(base_frequency, FELD_HELL_PIXEL_RATE)
    }
}

/// Length of one pixel at `pixel_rate` pixels per second.
///
/// `None` if the rate is not a positive, finite number or the pixel would be
/// shorter than a nanosecond.
pub fn pixel_duration(pixel_rate: f64) -> Option<Duration> {
    if !pixel_rate.is_finite() || pixel_rate <= 0.0 {
        return None;
    }

    let nanos = (1_000_000_000.0 / pixel_rate).round();
    if nanos < 1.0 {
        return None;
    }

    Some(Duration::from_nanos(nanos as u64))
}

/// Shared flag that stops a render between two pixels.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Counters accumulated over every glyph rendered by one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Glyphs that ran through all of their pixels.
    pub glyphs: u64,
    pub cells: u64,
    /// Pixels that overran their deadline by more than the jitter tolerance.
    pub late_cells: u64,
    /// Pixels the transmitter rejected under [`FailurePolicy::BestEffort`].
    pub failed_cells: u64,
    pub worst_overshoot: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Session<U> {
    tuning: U,
    pixel: Duration,
}

#[derive(Debug, Default)]
struct ScanReport {
    cells: u64,
    late: u64,
    failed: u64,
    worst: Duration,
}

pub struct KeyingScheduler<T: Transmit, C = MonotonicClock> {
    transmitter: T,
    clock: C,
    session: Option<Session<T::Tuning>>,
    jitter_tolerance: Duration,
    failure_policy: FailurePolicy,
    cancel: Option<CancelToken>,
    stats: RenderStats,
}

impl<T: Transmit> KeyingScheduler<T> {
    pub fn new(transmitter: T) -> Self {
        Self::with_clock(transmitter, MonotonicClock::new())
    }
}

impl<T: Transmit, C: Clock> KeyingScheduler<T, C> {
    pub fn with_clock(transmitter: T, clock: C) -> Self {
        Self {
            transmitter,
            clock,
            session: None,
            jitter_tolerance: DEFAULT_JITTER_TOLERANCE,
            failure_policy: FailurePolicy::default(),
            cancel: None,
            stats: RenderStats::default(),
        }
    }

    /// Resolves the tuning for `base_frequency` and the pixel duration for
    /// `pixel_rate`, replacing any earlier setup.
    ///
    /// The previous session stays in place if the transmitter rejects the new one.
    pub fn setup(&mut self, base_frequency: f64, pixel_rate: f64) -> Result<(), T::Error> {
        let pixel = pixel_duration(pixel_rate)
            .ok_or(Error::InvalidConfig("pixel rate must be a positive number"))?;
        if !base_frequency.is_finite() || base_frequency <= 0.0 {
            return Err(Error::InvalidConfig("base frequency must be a positive number"));
        }

        let tuning = self.transmitter.prepare(base_frequency)?;
        debug!("hell session: tuning {tuning:?}, {pixel:?} per pixel");

        self.session = Some(Session { tuning, pixel });

        Ok(())
    }

    pub fn configure(&mut self, config: &HellConfig) -> Result<(), T::Error> {
        self.jitter_tolerance = config.jitter_tolerance;
        self.failure_policy = config.failure_policy;
        self.setup(config.base_frequency, config.pixel_rate)
    }

    pub fn set_jitter_tolerance(&mut self, tolerance: Duration) {
        self.jitter_tolerance = tolerance;
    }

    pub fn set_failure_policy(&mut self, policy: FailurePolicy) {
        self.failure_policy = policy;
    }

    pub fn set_cancel_token(&mut self, token: Option<CancelToken>) {
        self.cancel = token;
    }

    pub fn is_configured(&self) -> bool {
        self.session.is_some()
    }

    pub fn pixel_duration(&self) -> Option<Duration> {
        self.session.map(|session| session.pixel)
    }

    pub fn tuning(&self) -> Option<T::Tuning> {
        self.session.map(|session| session.tuning)
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = RenderStats::default();
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    /// Only safe to use between glyphs.
    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.transmitter
    }

    pub fn into_transmitter(self) -> T {
        self.transmitter
    }

    /// Puts `glyph` on air and returns the number of characters sent.
    ///
    /// The carrier is muted before this returns, whether the glyph completed,
    /// failed or was cancelled.
    pub fn render_glyph(&mut self, glyph: &Glyph) -> Result<usize, T::Error> {
        let session = self.session.ok_or(Error::NotConfigured)?;

        let mut report = ScanReport::default();
        let scanned = self.scan(glyph, session, &mut report);

        // make sure transmitter is off
        let muted = self.transmitter.mute();

        self.record(&report, scanned.is_ok());
        scanned?;
        muted.map_err(Error::Transmitter)?;

        Ok(1)
    }

    fn scan(
        &mut self,
        glyph: &Glyph,
        session: Session<T::Tuning>,
        report: &mut ScanReport,
    ) -> Result<(), T::Error> {
        for pixel in glyph.pixels() {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(Error::Cancelled);
            }

            let deadline = self.clock.now() + session.pixel;
            let sent = match pixel {
                Pixel::Key => self.transmitter.key(session.tuning),
                Pixel::Mute => self.transmitter.mute(),
            };

            if let Err(err) = sent {
                match self.failure_policy {
                    FailurePolicy::Abort => return Err(Error::Transmitter(err)),
                    FailurePolicy::BestEffort => report.failed += 1,
                }
            }

            let reached = self.clock.spin_until(deadline);
            let overshoot = reached.saturating_sub(deadline);
            if overshoot > self.jitter_tolerance {
                report.late += 1;
            }
            report.worst = report.worst.max(overshoot);
            report.cells += 1;
        }

        Ok(())
    }

    fn record(&mut self, report: &ScanReport, completed: bool) {
        if completed {
            self.stats.glyphs += 1;
        }
        self.stats.cells += report.cells;
        self.stats.late_cells += report.late;
        self.stats.failed_cells += report.failed;
        self.stats.worst_overshoot = self.stats.worst_overshoot.max(report.worst);

        if report.failed > 0 {
            warn!("transmitter rejected {} of {} pixels", report.failed, report.cells);
        }
        if report.late > 0 {
            warn!(
                "{} pixels overran by more than {:?} (worst {:?})",
                report.late, self.jitter_tolerance, report.worst
            );
        }
    }
}
