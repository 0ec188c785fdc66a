//! Recurring runs
//!
//! Runs a job once, or immediately and then on a fixed period until the
//! process is interrupted. Runs never overlap: the next tick is only
//! awaited after the current run finishes, and missed ticks are skipped.

use crate::error::{Error, Result};
use chrono::Utc;
use regex::Regex;
use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

static EVERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").expect("valid period regex")
});

const HOUR: u64 = 60 * 60;

/// Longest accepted `@every` interval
const MAX_EVERY_SECS: u64 = 366 * 24 * HOUR;

/// Interval between scheduled runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period(Duration);

impl Period {
    /// Wrap an arbitrary interval
    pub const fn from_duration(interval: Duration) -> Self {
        Self(interval)
    }

    /// Parse a period descriptor.
    ///
    /// Accepts `@hourly`, `@daily` (or `@midnight`), `@weekly` and
    /// `@every <d>` where `<d>` is like `90s`, `15m` or `1h30m`, up to 366 days.
    /// Intervals count from process start, not from the wall clock.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let descriptor = descriptor.trim();
        let secs = match descriptor {
            "@hourly" => HOUR,
            "@daily" | "@midnight" => 24 * HOUR,
            "@weekly" => 7 * 24 * HOUR,
            other => {
                let Some(rest) = other.strip_prefix("@every") else {
                    return Err(Error::Schedule(format!(
                        "unsupported period {other:?} (use @hourly, @daily, @weekly or @every <duration>)"
                    )));
                };
                parse_every(rest.trim())?
            }
        };
        Ok(Self(Duration::from_secs(secs)))
    }

    /// The interval
    pub const fn interval(self) -> Duration {
        self.0
    }
}

fn parse_every(raw: &str) -> Result<u64> {
    let invalid = || Error::Schedule(format!("invalid @every duration {raw:?}"));

    let caps = EVERY_RE.captures(raw).ok_or_else(invalid)?;
    let part = |i: usize, unit: u64| -> Result<u64> {
        caps.get(i).map_or(Ok(0), |m| {
            m.as_str()
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_mul(unit))
                .ok_or_else(invalid)
        })
    };

    let (hours, minutes, seconds) = (part(1, HOUR)?, part(2, 60)?, part(3, 1)?);
    let secs = hours
        .checked_add(minutes)
        .and_then(|s| s.checked_add(seconds))
        .ok_or_else(invalid)?;
    if secs == 0 || secs > MAX_EVERY_SECS {
        return Err(invalid());
    }
    Ok(secs)
}

/// Run `job` once when `enabled` is false, otherwise on `period` until
/// Ctrl-C.
pub async fn run_scheduled<F, Fut>(enabled: bool, period: Period, job: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    run_scheduled_until(enabled, period, job, shutdown).await
}

/// Like [`run_scheduled`], stopping when `shutdown` completes.
///
/// In scheduled mode job failures are logged and the loop continues; the
/// loop itself only ends on shutdown.
pub async fn run_scheduled_until<F, Fut, S>(
    enabled: bool,
    period: Period,
    mut job: F,
    shutdown: S,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
    S: Future<Output = ()>,
{
    if !enabled {
        return job().await;
    }

    info!(every = ?period.interval(), "task running on schedule");
    let mut ticker = tokio::time::interval(period.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = job().await {
                    error!(error = %e, "scheduled run failed");
                }
                if let Ok(delta) = chrono::Duration::from_std(period.interval()) {
                    info!(next_run = %(Utc::now() + delta), "waiting for next run");
                }
            }
            () = &mut shutdown => {
                info!("task stopped");
                return Ok(());
            }
        }
    }
}
