use std::{process, thread, time::Duration};

use chrono::Utc;
use ftail::Ftail;
use hellschreiber::{HellClient, HellConfig, SignalGenerator};
use log::{error, info, LevelFilter};

// TODO: DO NOT FORGET TO CHANGE
const CALLSIGN: &str = "NOCALL";
/// Audio sub-carrier pitch in Hz. 980 Hz sits in the middle of most Hell receivers.
const TONE_HZ: f64 = 980.0;
const REPEATS: usize = 3;
const PAUSE: Duration = Duration::from_secs(5);

fn main() {
    if let Err(err) = Ftail::new().console(LevelFilter::Info).init() {
        eprintln!("failed to set up logging: {err:?}");
        process::exit(1);
    }

    let generator = match SignalGenerator::new() {
        Ok(generator) => generator,
        Err(err) => {
            error!("unable to reach the signal generator: {err}");
            process::exit(1);
        }
    };

    let mut hell = HellClient::audio(generator);
    if let Err(err) = hell.configure(&HellConfig::feld_hell(TONE_HZ)) {
        error!("signal generator rejected setup: {err}");
        process::exit(1);
    }

    for _ in 0..REPEATS {
        let beacon = format!("{CALLSIGN} {} ", Utc::now().format("%H%MZ"));

        match hell.print_str(&beacon) {
            Ok(sent) => info!("sent {sent} characters: {beacon}"),
            Err(err) => {
                error!("beacon failed: {err}");
                process::exit(1);
            }
        }

        thread::sleep(PAUSE);
    }

    let stats = hell.scheduler().stats();
    info!(
        "{} glyphs, {} late pixels, worst overshoot {:?}",
        stats.glyphs, stats.late_cells, stats.worst_overshoot
    );
}
