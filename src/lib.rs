//! Hellschreiber encoder.
//!
//! Text is drawn on air as a 7x7 dot matrix per character: each pixel keys a
//! carrier on or off for one pixel duration. The carrier is either an RF
//! synthesizer keyed directly ([`DirectCarrier`]) or an audio tone
//! ([`ToneGenerator`]) fed into a transmitter.
//!
//! ```ignore
//! let mut hell = HellClient::audio(generator);
//! hell.configure(&HellConfig::feld_hell(1000.0))?;
//! hell.print_str("CQ CQ DE NOCALL")?;
//! ```
//!
//! Rendering busy-waits for pixel timing and holds the calling thread for the
//! whole transmission.

pub mod carrier;
pub mod client;
pub mod clock;
pub mod error;
pub mod font;
pub mod format;
pub mod scheduler;
#[cfg(feature = "rpi")]
pub mod signal;

pub use carrier::{Audio, Direct, DirectCarrier, ToneGenerator, Transmit};
pub use client::{HellClient, Printable};
pub use clock::{Clock, MonotonicClock};
pub use error::Error;
pub use font::{Glyph, Pixel, UnsupportedChar};
pub use scheduler::{CancelToken, FailurePolicy, HellConfig, KeyingScheduler, RenderStats, FELD_HELL_PIXEL_RATE};
#[cfg(feature = "rpi")]
pub use signal::SignalGenerator;
