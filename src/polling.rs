//! Cancellable periodic refresh.
//!
//! A [`Poller`] runs its task once immediately and then on every tick of a fixed
//! period. Each run is awaited before the next tick is considered, so a slow
//! response never stacks a second request on top of the first; ticks that fall
//! due while a run is in flight are delayed rather than fired in a burst.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

pub struct Poller {
    period: Duration,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Spawn the polling loop on the current tokio runtime
    pub fn spawn<F, Fut>(period: Duration, mut task: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {}
                }

                // Stopping mid-request drops the in-flight future
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = task() => {}
                }
            }

            log::debug!("poller stopped");
        });

        Self {
            period,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the loop and wait for it to wind down
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                log::warn!("poller task ended abnormally: {}", err);
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        // Dropping the sender wakes the loop; abort covers a task stuck outside select!
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_runs_immediately_and_repeats() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let poller = Poller::spawn(Duration::from_millis(20), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(110)).await;
        assert!(poller.is_running());
        poller.stop().await;

        assert!(runs.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_slow_task_never_overlaps() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));
        let (current, max) = (in_flight.clone(), max_in_flight.clone());

        let poller = Poller::spawn(Duration::from_millis(5), move || {
            let (current, max) = (current.clone(), max.clone());
            async move {
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                max.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(30)).await;
                current.fetch_sub(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(150)).await;
        poller.stop().await;

        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_runs_after_stop() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let poller = Poller::spawn(Duration::from_millis(10), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(35)).await;
        poller.stop().await;
        let after_stop = runs.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(runs.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_drop_cancels() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();

        let poller = Poller::spawn(Duration::from_millis(10), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(25)).await;
        drop(poller);
        tokio::time::sleep(Duration::from_millis(5)).await;
        let after_drop = runs.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(runs.load(Ordering::SeqCst), after_drop);
    }
}
