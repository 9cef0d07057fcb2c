use std::{future::Future, io::Write, time::Duration};

use anyhow::Result;
use chrono::{DateTime, Local, Timelike};
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::{
    schedule::summary::Summary,
    settings::{store::SettingsStore, Settings},
    utils::{clock::Clock, time::day_key_of},
};

use super::output::{render_clock_line, Palette};

/// The clock is redrawn four times a second so seconds never visibly skip.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Receives the current time on every tick.
pub trait TickHandler {
    fn on_tick(&mut self, now: DateTime<Local>) -> impl Future<Output = Result<()>>;
}

/// Cancels `cancellation` once the process is interrupted. Also returns when someone else
/// cancelled it.
pub async fn detect_shutdown(cancellation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            cancellation.cancel();
        },
        _ = cancellation.cancelled() => (),
    };
}

/// Calls `handler` every `cadence` until `shutdown` is cancelled. Ticks are scheduled from the
/// first one, so a slow handler doesn't make the clock drift.
pub async fn run_ticker(
    clock: &dyn Clock,
    cadence: Duration,
    shutdown: CancellationToken,
    handler: &mut impl TickHandler,
) -> Result<()> {
    let mut tick_point = clock.instant();
    loop {
        tick_point += cadence;

        handler
            .on_tick(clock.time())
            .await
            .inspect_err(|e| error!("Tick failed {e:?}"))?;

        select! {
            biased;
            _ = shutdown.cancelled() => {
                return Ok(())
            }
            _ = clock.sleep_until(tick_point) => ()
        }
    }
}

/// Keeps a single status line on the terminal up to date. Settings are reloaded once a minute so
/// edits made from another terminal show up.
pub struct LiveClock<S: SettingsStore, W: Write> {
    store: S,
    palette: Palette,
    output: W,
    settings: Option<Settings>,
    loaded_minute: Option<u32>,
}

impl<S: SettingsStore, W: Write> LiveClock<S, W> {
    pub fn new(store: S, palette: Palette, output: W) -> Self {
        Self {
            store,
            palette,
            output,
            settings: None,
            loaded_minute: None,
        }
    }

    async fn current_settings(&mut self, now: &DateTime<Local>) -> Result<&Settings> {
        let minute = now.hour() * 60 + now.minute();
        if self.settings.is_none() || self.loaded_minute != Some(minute) {
            debug!("Reloading settings for the live clock");
            self.settings = Some(self.store.load().await?);
            self.loaded_minute = Some(minute);
        }
        Ok(self.settings.get_or_insert_with(Settings::default))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<S: SettingsStore, W: Write> TickHandler for LiveClock<S, W> {
    async fn on_tick(&mut self, now: DateTime<Local>) -> Result<()> {
        let summary = Summary::compute(self.current_settings(&now).await?, day_key_of(&now));
        let line = render_clock_line(&now, &summary, &self.palette);
        // Return to the start of the line and erase it before drawing.
        write!(self.output, "\r\x1b[2K{line}")?;
        self.output.flush()?;
        Ok(())
    }
}
