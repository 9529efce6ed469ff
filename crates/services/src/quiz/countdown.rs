//! Timer tasks owned by the quiz controller.
//!
//! Tasks never touch session state. They only post events tagged with the
//! generation they were armed for; the controller drops events whose
//! generation is stale.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerEvent {
    Tick { generation: u64 },
    FeedbackElapsed { generation: u64 },
}

impl TimerEvent {
    pub(crate) fn generation(self) -> u64 {
        match self {
            Self::Tick { generation } | Self::FeedbackElapsed { generation } => generation,
        }
    }
}

/// Handles of the currently armed timers.
#[derive(Default)]
pub(crate) struct Timers {
    countdown: Option<JoinHandle<()>>,
    feedback: Option<JoinHandle<()>>,
}

impl Timers {
    /// Emit a tick every second until cancelled. The first tick fires one
    /// second after arming.
    pub(crate) fn arm_countdown(&mut self, events: UnboundedSender<TimerEvent>, generation: u64) {
        self.cancel_countdown();
        self.countdown = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(TimerEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    pub(crate) fn arm_feedback(
        &mut self,
        events: UnboundedSender<TimerEvent>,
        generation: u64,
        pause: Duration,
    ) {
        self.cancel_feedback();
        self.feedback = Some(tokio::spawn(async move {
            time::sleep(pause).await;
            let _ = events.send(TimerEvent::FeedbackElapsed { generation });
        }));
    }

    pub(crate) fn cancel_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }

    pub(crate) fn cancel_feedback(&mut self) {
        if let Some(handle) = self.feedback.take() {
            handle.abort();
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        self.cancel_countdown();
        self.cancel_feedback();
    }

    pub(crate) fn countdown_armed(&self) -> bool {
        self.countdown
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn countdown_ticks_once_per_second_until_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::default();
        timers.arm_countdown(tx, 7);

        time::sleep(Duration::from_millis(3500)).await;
        let mut ticks = Vec::new();
        while let Ok(event) = rx.try_recv() {
            ticks.push(event);
        }
        assert_eq!(ticks, vec![TimerEvent::Tick { generation: 7 }; 3]);

        timers.cancel_all();
        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert!(!timers.countdown_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn feedback_fires_once_after_pause() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::default();
        timers.arm_feedback(tx, 3, Duration::from_millis(1500));

        time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
        time::sleep(Duration::from_millis(600)).await;
        let event = rx.try_recv().unwrap();
        assert_eq!(event, TimerEvent::FeedbackElapsed { generation: 3 });
        assert_eq!(event.generation(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_timers_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::default();
        timers.arm_countdown(tx, 1);
        drop(timers);
        time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
    }
}
