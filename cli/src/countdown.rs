use std::future::Future;
use std::io;

use anyhow::Result;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use solpot_api::consts::*;
use solpot_client::{Wait, WaitOutcome};
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Formats a number of seconds as `HH:MM:SS`.
pub fn format_hms(seconds: u64) -> String {
    let h = seconds / ONE_HOUR;
    let m = (seconds % ONE_HOUR) / ONE_MINUTE;
    let s = seconds % ONE_MINUTE;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Counts down on the terminal one second at a time. Ctrl-C ends the wait early.
pub struct Countdown;

#[async_trait(?Send)]
impl Wait for Countdown {
    async fn wait(&mut self, seconds: u64) -> Result<WaitOutcome> {
        count_down(seconds, tokio::signal::ctrl_c()).await
    }
}

/// Ticks `seconds` away unless `interrupt` resolves first. An interrupt source that fails
/// (no signal handler could be installed) is an error, not a request to stop.
async fn count_down<F>(seconds: u64, interrupt: F) -> Result<WaitOutcome>
where
    F: Future<Output = io::Result<()>>,
{
    tokio::pin!(interrupt);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.white} {wide_msg}")?);

    let mut ticker = interval(Duration::from_secs(ONE_SECOND));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let mut remaining = seconds;
    while remaining > 0 {
        pb.set_message(format!("please wait until {}", format_hms(remaining)));
        pb.tick();

        tokio::select! {
            _ = ticker.tick() => remaining -= 1,
            signal = &mut interrupt => {
                pb.finish_and_clear();
                return match signal {
                    Ok(()) => Ok(WaitOutcome::Interrupted),
                    Err(e) => Err(anyhow::anyhow!("Failed to listen for Ctrl-C: {}", e)),
                };
            }
        }
    }

    pb.finish_and_clear();
    Ok(WaitOutcome::Elapsed)
}
