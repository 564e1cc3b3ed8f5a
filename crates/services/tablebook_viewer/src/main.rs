// File: services/tablebook_viewer/src/main.rs
//! `tablebook-viewer [YYYY-MM-DD] [--watch]`
//!
//! Prints the booking grid of one schedule day. Without a date the current
//! schedule day at the venue is shown. `--watch` keeps running, refetching and
//! redrawing on every now-line tick until Ctrl-C.

use std::env;
use std::time::Duration;

use chrono::NaiveDate;
use tablebook_common::{config_error, logging, Context, TablebookError};
use tablebook_config::load_config;
use tablebook_grid::{
    parse_timezone, render_text, venue_now, BookingGrid, HttpBookingApi, NowTicker,
    TimeSlotSequence,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), TablebookError> {
    let config = load_config()?;
    logging::init_from_config(&config);

    let tz = parse_timezone(&config.schedule.timezone)?;
    let mut watch = false;
    let mut date_arg = None;
    for arg in env::args().skip(1) {
        if arg == "--watch" {
            watch = true;
        } else {
            date_arg = Some(arg);
        }
    }

    let api = HttpBookingApi::from_config(&config.api)?;
    info!("Using booking service at {}", api.base_url());

    let now = venue_now(tz);
    let date = match date_arg {
        Some(arg) => NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
            .with_context(|| format!("invalid date {arg:?}, expected YYYY-MM-DD"))?,
        None => TimeSlotSequence::from_config(&config.schedule)?.schedule_date(now),
    };

    let mut grid = BookingGrid::from_config(api, &config, date)?;
    if let Err(e) = grid.refresh().await {
        // shown as notice below the grid
        warn!("Initial load failed: {}", e);
    }

    if !watch {
        grid.tick(now.time());
        print!("{}", render_text(&grid));
        return Ok(());
    }

    if config.grid.now_refresh_secs == 0 {
        return Err(config_error("grid.now_refresh_secs must be positive in watch mode"));
    }
    let (tx, mut rx) = mpsc::channel(8);
    let ticker = NowTicker::spawn(
        Duration::from_secs(config.grid.now_refresh_secs),
        tz,
        tx,
    );
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                grid.handle(event)?;
                let _ = grid.refresh().await;
                print!("{}", render_text(&grid));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        }
    }
    ticker.stop();
    Ok(())
}
