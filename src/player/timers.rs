//! Watch-session timers
//!
//! Two independent tokio tasks feed the UI loop while a watch session is
//! open: a once-per-second playback tick and the idle timer that hides the
//! transport controls. Both live exactly as long as the [`WatchTimers`]
//! value that spawned them.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;

/// Period of the playback clock
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Events emitted by the watch timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second of playback elapsed
    Tick,
    /// No activity for the idle period
    ControlsIdle,
}

/// Handles to the running timers of one watch session
///
/// Dropping this aborts both tasks.
#[derive(Debug)]
pub struct WatchTimers {
    tick: JoinHandle<()>,
    idle: Option<IdleTimer>,
}

#[derive(Debug)]
struct IdleTimer {
    task: JoinHandle<()>,
    resets: mpsc::UnboundedSender<()>,
}

impl WatchTimers {
    /// Start the tick timer, plus the idle timer when `idle_after` is set
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<E>(events: mpsc::UnboundedSender<E>, idle_after: Option<Duration>) -> Self
    where
        E: From<TimerEvent> + Send + 'static,
    {
        let tick = tokio::spawn(run_tick(events.clone()));

        let idle = idle_after.map(|after| {
            let (resets, reset_rx) = mpsc::unbounded_channel();
            IdleTimer {
                task: tokio::spawn(run_idle(events, reset_rx, after)),
                resets,
            }
        });

        Self { tick, idle }
    }

    /// Restart the idle countdown (pointer moved / key pressed)
    pub fn reveal(&self) {
        if let Some(idle) = &self.idle {
            let _ = idle.resets.send(());
        }
    }

    /// Whether an idle timer is running for this session
    pub fn has_idle_timer(&self) -> bool {
        self.idle.is_some()
    }
}

impl Drop for WatchTimers {
    fn drop(&mut self) {
        trace!("stopping watch timers");
        self.tick.abort();
        if let Some(idle) = &self.idle {
            idle.task.abort();
        }
    }
}

async fn run_tick<E>(events: mpsc::UnboundedSender<E>)
where
    E: From<TimerEvent>,
{
    let mut interval = tokio::time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        if events.send(TimerEvent::Tick.into()).is_err() {
            break;
        }
    }
}

async fn run_idle<E>(
    events: mpsc::UnboundedSender<E>,
    mut resets: mpsc::UnboundedReceiver<()>,
    after: Duration,
) where
    E: From<TimerEvent>,
{
    loop {
        match tokio::time::timeout(after, resets.recv()).await {
            // Activity: start counting again
            Ok(Some(())) => continue,
            Ok(None) => break,
            Err(_) => {
                if events.send(TimerEvent::ControlsIdle.into()).is_err() {
                    break;
                }
                // Hidden until the next reveal
                match resets.recv().await {
                    Some(()) => continue,
                    None => break,
                }
            }
        }
    }
}
