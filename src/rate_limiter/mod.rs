use futures::FutureExt;
use futures::future::BoxFuture;
use log::error;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep};

use crate::errors::CatalogError;

/// Controls the rate of requests to prevent API throttling
pub struct RateLimiter {
    delay: Duration,
    last_dispatch: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_dispatch: None,
        }
    }

    /// Sleep out whatever is left of the spacing, then stamp a new dispatch
    pub async fn wait(&mut self) {
        if let Some(remaining) = self.remaining() {
            sleep(remaining).await;
        }
        self.last_dispatch = Some(Instant::now());
    }

    pub fn reset(&mut self) {
        self.last_dispatch = None;
    }

    fn remaining(&self) -> Option<Duration> {
        let elapsed = self.last_dispatch?.elapsed();
        self.delay.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}

type Job = BoxFuture<'static, ()>;

/// FIFO lane that runs one task at a time with a minimum spacing between starts.
///
/// A single consumer task owns the `RateLimiter`, so the last-dispatch time is
/// only ever touched by the drain loop. Must be created inside a Tokio runtime.
pub struct RequestQueue {
    sender: mpsc::UnboundedSender<Job>,
}

impl RequestQueue {
    pub fn new(delay: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(Self::drain(receiver, RateLimiter::new(delay)));
        Self { sender }
    }

    /// Queue `task` and wait for its own outcome
    pub async fn enqueue<F, Fut, T>(&self, task: F) -> Result<T, CatalogError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();

        let job = async move {
            // The waiter may be gone; the task still ran.
            let _ = tx.send(task().await);
        }
        .boxed();

        self.sender.send(job).map_err(|_| CatalogError::QueueClosed)?;
        rx.await.map_err(|_| CatalogError::QueueClosed)?
    }

    async fn drain(mut receiver: mpsc::UnboundedReceiver<Job>, mut limiter: RateLimiter) {
        while let Some(job) = receiver.recv().await {
            limiter.wait().await;
            if AssertUnwindSafe(job).catch_unwind().await.is_err() {
                error!("Queued request panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::sync::{Arc, Mutex};

    #[tokio::test(start_paused = true)]
    async fn test_limiter_first_wait_is_free() {
        let mut limiter = RateLimiter::new(Duration::from_millis(500));
        let started = Instant::now();

        limiter.wait().await;
        assert_eq!(started.elapsed(), Duration::ZERO);

        limiter.wait().await;
        assert!(started.elapsed() >= Duration::from_millis(500));

        limiter.reset();
        let before = Instant::now();
        limiter.wait().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tasks_run_in_order_with_spacing() {
        let queue = RequestQueue::new(Duration::from_millis(500));
        let starts = Arc::new(Mutex::new(Vec::new()));
        let started = Instant::now();

        let tasks = (0..5).map(|i| {
            let starts = starts.clone();
            queue.enqueue(move || async move {
                starts.lock().unwrap().push((i, Instant::now()));
                Ok(i)
            })
        });
        let results = join_all(tasks).await;

        assert!(started.elapsed() >= Duration::from_millis(2000));
        let results: Vec<i32> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(results, vec![0, 1, 2, 3, 4]);

        let starts = starts.lock().unwrap();
        let order: Vec<i32> = starts.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        for pair in starts.windows(2) {
            assert!(pair[1].1.duration_since(pair[0].1) >= Duration::from_millis(500));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_task_does_not_stop_queue() {
        let queue = RequestQueue::new(Duration::from_millis(500));

        let failing = queue.enqueue(|| async { Err::<u32, _>(CatalogError::network("boom")) });
        let passing = queue.enqueue(|| async { Ok(7u32) });
        let (failing, passing) = tokio::join!(failing, passing);

        assert_eq!(failing.unwrap_err(), CatalogError::network("boom"));
        assert_eq!(passing.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_task_needs_no_extra_wait() {
        let queue = RequestQueue::new(Duration::from_millis(500));
        let started = Instant::now();

        let slow = queue.enqueue(|| async {
            sleep(Duration::from_millis(800)).await;
            Ok(Instant::now())
        });
        let next = queue.enqueue(|| async { Ok(Instant::now()) });
        let (slow, next) = tokio::join!(slow, next);

        let slow_done = slow.unwrap().duration_since(started);
        let next_start = next.unwrap().duration_since(started);
        assert_eq!(slow_done.as_millis(), 800);
        assert_eq!(next_start.as_millis(), 800);
    }

    #[tokio::test]
    async fn test_panicking_task_is_isolated() {
        let queue = RequestQueue::new(Duration::ZERO);

        let panicking = queue.enqueue(|| async {
            if true {
                panic!("task blew up");
            }
            Ok(())
        });
        assert_eq!(panicking.await.unwrap_err(), CatalogError::QueueClosed);

        let after = queue.enqueue(|| async { Ok("still running") }).await;
        assert_eq!(after.unwrap(), "still running");
    }
}
