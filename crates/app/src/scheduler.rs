//! Periodic tasks with an explicit start/stop lifecycle.
//!
//! A task runs its job once immediately, then once per period. A run that
//! takes longer than the period delays the next tick instead of overlapping
//! with it.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

struct Running {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// A named job repeated on a fixed period on the tokio runtime.
pub struct PeriodicTask {
    name: &'static str,
    period: Duration,
    running: Option<Running>,
}

impl PeriodicTask {
    #[must_use]
    pub fn new(name: &'static str, period: Duration) -> Self {
        Self {
            name,
            period,
            running: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Spawn the loop calling `job` on every tick.
    ///
    /// Returns `false` (and drops `job`) when the task is already running.
    pub fn start<F, Fut>(&mut self, mut job: F) -> bool
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            return false;
        }

        let (stop, mut stopped) = watch::channel(false);
        let name = self.name;
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tracing::trace!(task = name, "tick");
                        job().await;
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!(task = name, "periodic task stopped");
        });

        tracing::debug!(task = name, period_ms = period.as_millis(), "periodic task started");
        self.running = Some(Running { stop, handle });
        true
    }

    /// Stop the loop and wait for it to exit. A run in progress completes
    /// first. Calling `stop` on a stopped task does nothing.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        let _ = running.stop.send(true);
        if let Err(err) = running.handle.await {
            tracing::warn!(task = self.name, error = %err, "periodic task ended abnormally");
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_job(counter: &Arc<AtomicUsize>) -> impl FnMut() -> std::future::Ready<()> + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_run_immediately_then_every_period() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut task = PeriodicTask::new("live", Duration::from_secs(2));

        assert!(task.start(counting_job(&counter)));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(4_100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_run_after_stop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut task = PeriodicTask::new("live", Duration::from_secs(2));
        task.start(counting_job(&counter));
        tokio::time::sleep(Duration::from_millis(10)).await;

        task.stop().await;
        assert!(!task.is_running());
        let before = counter.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), before);
    }

    #[tokio::test(start_paused = true)]
    async fn should_ignore_second_start_while_running() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut task = PeriodicTask::new("history", Duration::from_secs(300));

        assert!(task.start(counting_job(&counter)));
        assert!(!task.start(counting_job(&counter)));
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_treat_repeated_stop_as_noop() {
        let mut task = PeriodicTask::new("live", Duration::from_secs(2));
        task.stop().await;
        task.start(|| std::future::ready(()));
        task.stop().await;
        task.stop().await;
        assert!(!task.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn should_delay_next_tick_while_a_run_is_in_progress() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut task = PeriodicTask::new("slow", Duration::from_secs(1));
        let job_counter = Arc::clone(&counter);
        task.start(move || {
            let counter = Arc::clone(&job_counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(3)).await;
            }
        });

        tokio::time::sleep(Duration::from_millis(3_500)).await;

        // first run spans 0..3s; a non-delaying ticker would have started
        // catch-up runs back to back
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_abort_loop_when_dropped() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let mut task = PeriodicTask::new("live", Duration::from_secs(2));
            task.start(counting_job(&counter));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let before = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), before);
    }
}
