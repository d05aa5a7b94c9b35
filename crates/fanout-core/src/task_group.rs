use crate::{Error, Result};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use tokio::task::JoinSet;

/// Worker count used by the aggregator.
pub const DEFAULT_MAX_WORKERS: usize = 3;

type Work<T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'static>>;

/// Bounded group of independent tasks.
///
/// At most `max_workers` tasks run at once; the rest wait in a FIFO queue
/// and are started as running ones finish. `join_all` returns results in
/// submission order and fails fast: the first error cancels everything still
/// queued or running. Dropping the group aborts any task it still owns, so
/// workers never outlive it.
///
/// Must be used from within a tokio runtime.
pub struct TaskGroup<T> {
    running: JoinSet<(usize, Result<T>)>,
    queued: VecDeque<(usize, Work<T>)>,
    max_workers: usize,
    submitted: usize,
}

impl<T: Send + 'static> TaskGroup<T> {
    pub fn new(max_workers: usize) -> Self {
        Self {
            running: JoinSet::new(),
            queued: VecDeque::new(),
            max_workers: max_workers.max(1),
            submitted: 0,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Number of tasks submitted so far
    pub fn len(&self) -> usize {
        self.submitted
    }

    pub fn is_empty(&self) -> bool {
        self.submitted == 0
    }

    /// Submit a unit of work and return its submission index.
    ///
    /// The work starts immediately if a worker is free, otherwise it is
    /// queued behind earlier submissions.
    pub fn spawn<F>(&mut self, work: F) -> usize
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let index = self.submitted;
        self.submitted += 1;

        let work: Work<T> = Box::pin(work);
        if self.running.len() < self.max_workers {
            self.start(index, work);
        } else {
            tracing::debug!(index, queued = self.queued.len() + 1, "All workers busy, queueing task");
            self.queued.push_back((index, work));
        }

        index
    }

    /// Wait for every task and return their results in submission order.
    pub async fn join_all(mut self) -> Result<Vec<T>> {
        let mut slots: Vec<Option<T>> = (0..self.submitted).map(|_| None).collect();

        while let Some(joined) = self.running.join_next().await {
            match joined {
                Ok((index, Ok(value))) => {
                    slots[index] = Some(value);
                    self.start_next();
                }
                Ok((index, Err(e))) => {
                    tracing::error!(index, "Task failed, cancelling remaining work: {}", e);
                    self.cancel().await;
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!("Task did not complete, cancelling remaining work: {}", e);
                    self.cancel().await;
                    return Err(Error::TaskJoin(e.to_string()));
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| Error::TaskJoin(format!("task {} produced no result", index)))
            })
            .collect()
    }

    fn start(&mut self, index: usize, work: Work<T>) {
        self.running.spawn(async move { (index, work.await) });
    }

    fn start_next(&mut self) {
        if let Some((index, work)) = self.queued.pop_front() {
            self.start(index, work);
        }
    }

    async fn cancel(&mut self) {
        let dropped = self.queued.len();
        self.queued.clear();
        self.running.shutdown().await;
        if dropped > 0 {
            tracing::debug!(dropped, "Discarded queued tasks");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_empty_group() {
        let group: TaskGroup<u32> = TaskGroup::new(3);
        assert!(group.is_empty());
        let results = group.join_all().await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_results_keep_submission_order() {
        let mut group = TaskGroup::new(3);

        // Later submissions finish first
        for i in 0..5u64 {
            group.spawn(async move {
                sleep(Duration::from_millis((5 - i) * 20)).await;
                Ok(i)
            });
        }

        assert_eq!(group.len(), 5);
        let results = group.join_all().await.unwrap();
        assert_eq!(results, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_never_exceeds_max_workers() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let mut group = TaskGroup::new(3);

        for i in 0..8usize {
            let active = active.clone();
            let peak = peak.clone();
            group.spawn(async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(30)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                Ok(i)
            });
        }

        let results = group.join_all().await.unwrap();
        assert_eq!(results, (0..8).collect::<Vec<_>>());
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(active.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_error_is_returned() {
        let mut group = TaskGroup::new(3);
        group.spawn(async { Ok(1) });
        group.spawn(async { Err(Error::Network("connection refused".to_string())) });
        group.spawn(async { Ok(3) });

        let err = group.join_all().await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_failure_cancels_running_and_queued_tasks() {
        let finished = Arc::new(AtomicBool::new(false));
        let started_queued = Arc::new(AtomicBool::new(false));
        let mut group = TaskGroup::new(2);

        let flag = finished.clone();
        group.spawn(async move {
            sleep(Duration::from_millis(200)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });
        group.spawn(async { Err(Error::Database("connection refused".to_string())) });
        let flag = started_queued.clone();
        group.spawn(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let err = group.join_all().await.unwrap_err();
        assert!(err.is_database());

        sleep(Duration::from_millis(300)).await;
        assert!(!finished.load(Ordering::SeqCst));
        assert!(!started_queued.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicking_task_is_a_join_error() {
        let mut group: TaskGroup<()> = TaskGroup::new(1);
        group.spawn(async {
            if true {
                panic!("boom");
            }
            Ok(())
        });

        let err = group.join_all().await.unwrap_err();
        assert!(matches!(err, Error::TaskJoin(_)));
    }

    #[test]
    fn test_zero_workers_is_clamped() {
        let group: TaskGroup<()> = TaskGroup::new(0);
        assert_eq!(group.max_workers(), 1);
    }
}
