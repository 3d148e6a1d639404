//! Periodic tick and grace-delay scheduling for quiz sessions.
//!
//! Timer tasks run on the tokio runtime and report back over an unbounded
//! channel. Every event names the session (and, for ticks, the countdown
//! epoch) it was scheduled for; the receiver drops events that no longer
//! match the live session.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::session::{GRACE_DELAY, QuizSession};

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { session: Uuid, epoch: u64 },
    GraceElapsed { session: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArmedFor {
    session: Uuid,
    epoch: u64,
}

/// Owns the running timer tasks. Dropping it cancels them.
pub struct QuizTimer {
    tx: mpsc::UnboundedSender<TimerEvent>,
    period: Duration,
    grace: Duration,
    ticker: Option<(ArmedFor, JoinHandle<()>)>,
    grace_task: Option<(Uuid, JoinHandle<()>)>,
}

impl QuizTimer {
    pub fn new(tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self::with_periods(tx, TICK_PERIOD, GRACE_DELAY)
    }

    pub fn with_periods(
        tx: mpsc::UnboundedSender<TimerEvent>,
        period: Duration,
        grace: Duration,
    ) -> Self {
        Self {
            tx,
            period,
            grace,
            ticker: None,
            grace_task: None,
        }
    }

    /// Whether a periodic ticker is currently armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Brings the ticker in line with `session`: armed while its countdown
    /// runs, re-armed when the session or epoch changes, stopped otherwise.
    /// Must be called from within a tokio runtime when arming.
    pub fn sync(&mut self, session: Option<&QuizSession>) {
        let wanted = session.filter(|s| s.timer_running()).map(|s| ArmedFor {
            session: s.id(),
            epoch: s.timer_epoch(),
        });

        let live = session.map(|s| s.id());
        if self
            .grace_task
            .as_ref()
            .is_some_and(|(id, _)| Some(*id) != live)
        {
            self.stop_grace();
        }

        if self.ticker.as_ref().map(|(armed, _)| *armed) == wanted {
            return;
        }
        self.stop_ticker();

        if let Some(armed) = wanted {
            log::debug!("arming ticker for {} epoch {}", armed.session, armed.epoch);
            let handle = tokio::spawn(run_ticker(self.tx.clone(), self.period, armed));
            self.ticker = Some((armed, handle));
        }
    }

    /// Schedules a single [`TimerEvent::GraceElapsed`] for `session`.
    pub fn schedule_grace(&mut self, session: Uuid) {
        self.stop_grace();
        let tx = self.tx.clone();
        let delay = self.grace;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimerEvent::GraceElapsed { session });
        });
        self.grace_task = Some((session, handle));
    }

    /// Stops every pending timer task.
    pub fn cancel(&mut self) {
        self.stop_ticker();
        self.stop_grace();
    }

    fn stop_ticker(&mut self) {
        if let Some((armed, handle)) = self.ticker.take() {
            log::debug!("stopping ticker for {} epoch {}", armed.session, armed.epoch);
            handle.abort();
        }
    }

    fn stop_grace(&mut self) {
        if let Some((_, handle)) = self.grace_task.take() {
            handle.abort();
        }
    }
}

impl Drop for QuizTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_ticker(tx: mpsc::UnboundedSender<TimerEvent>, period: Duration, armed: ArmedFor) {
    let start = tokio::time::Instant::now() + period;
    let mut interval = tokio::time::interval_at(start, period);
    loop {
        interval.tick().await;
        let event = TimerEvent::Tick {
            session: armed.session,
            epoch: armed.epoch,
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}
